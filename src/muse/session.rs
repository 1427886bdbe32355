use crate::common::MessageRole;

/// Persona prompt fixed for the lifetime of a session: tone, output
/// language, a rough length ceiling and a no-rich-text constraint.
pub const SYSTEM_INSTRUCTION: &str = "你是 Muse，Aura 设计工作室的 AI 创意助手。\
你优雅、懂艺术、乐于助人。请始终用中文回答，每次回复控制在 100 个字以内，\
并且不要使用加粗、斜体等任何富文本标记。";

/// One committed turn of the conversation, as sent back to the model on
/// every subsequent call.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

/// Conversational context reused across calls: the system instruction plus
/// every committed user/model exchange. Owned by the worker; nothing here is
/// global state.
pub struct MuseSession {
    system_instruction: String,
    turns: Vec<Turn>,
}

impl MuseSession {
    pub fn new() -> Self {
        Self::with_instruction(SYSTEM_INSTRUCTION)
    }

    pub fn with_instruction(instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: instruction.into(),
            turns: Vec::new(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Record a completed exchange. Failed calls never reach this point, so
    /// the history only ever contains successful turns.
    pub fn commit_exchange(&mut self, user_text: &str, model_text: &str) {
        self.turns.push(Turn {
            role: MessageRole::User,
            text: user_text.to_string(),
        });
        self.turns.push(Turn {
            role: MessageRole::Model,
            text: model_text.to_string(),
        });
    }

    /// Drop the history, keeping the system instruction.
    pub fn reset(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_appends_turns_in_order() {
        let mut session = MuseSession::new();
        session.commit_exchange("配色方案", "红色与金色");
        session.commit_exchange("字体呢", "衬线体");

        let turns = session.turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, MessageRole::User);
        assert_eq!(turns[0].text, "配色方案");
        assert_eq!(turns[1].role, MessageRole::Model);
        assert_eq!(turns[1].text, "红色与金色");
        assert_eq!(turns[2].text, "字体呢");
        assert_eq!(turns[3].text, "衬线体");
    }

    #[test]
    fn reset_clears_turns_but_keeps_instruction() {
        let mut session = MuseSession::with_instruction("be terse");
        session.commit_exchange("hi", "hello");
        session.reset();

        assert!(session.turns().is_empty());
        assert_eq!(session.system_instruction(), "be terse");
    }
}
