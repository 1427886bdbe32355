/// Sự kiện từ tầng Muse gửi lên UI.
///
/// Một lượt trả lời luôn bắt đầu bằng `ReplyStarted`, theo sau là không
/// hoặc nhiều `Fragment`, và kết thúc bằng đúng một `ReplyFinished` hoặc
/// `ReplyFailed`.
#[derive(Debug, Clone)]
pub enum MuseEvent {
    ReplyStarted,
    Fragment(String),
    ReplyFinished,
    ReplyFailed(String),
}
