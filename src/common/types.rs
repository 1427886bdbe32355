use uuid::Uuid;

/// Vai trò của một tin nhắn trong hội thoại.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Model,
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text, false)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Model, text, false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Model, text, true)
    }

    fn new(role: MessageRole, text: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            is_error,
        }
    }
}
