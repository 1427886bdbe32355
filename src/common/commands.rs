/// Lệnh UI gửi xuống tầng Muse.
#[derive(Debug, Clone)]
pub enum MuseCommand {
    SendMessage(String),
    /// Xóa lịch sử hội thoại phía worker (bắt đầu phiên mới)
    ResetSession,
}
