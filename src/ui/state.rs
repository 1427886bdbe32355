use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::common::{ChatMessage, MessageRole};
use crate::storage::models::{Project, ProjectCategory};

/// Lời chào cố định mở đầu hội thoại.
pub const GREETING: &str = "你好！我是 Muse，你的创意助手。有什么我可以帮你的吗？";

/// Fixed apology rendered when a Muse exchange fails.
pub const FALLBACK_APOLOGY: &str =
    "My creative energies are temporarily depleted. Please try again later.";

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub muse_busy: bool,
    pub muse_open: bool,
    pub muse_enabled: bool,
    pub projects: Vec<Project>,
    pub filter: Option<ProjectCategory>,
    pub managing: bool,
    pub add_form_open: bool,
    pub project_title_input: String,
    pub project_category_input: ProjectCategory,
    pub project_year_input: String,
    pub project_image_input: String,
}

impl AppState {
    pub fn new(muse_enabled: bool, projects: Vec<Project>) -> Self {
        Self {
            messages: vec![ChatMessage::model(GREETING)],
            input_text: String::new(),
            muse_busy: false,
            muse_open: false,
            muse_enabled,
            projects,
            filter: None,
            managing: false,
            add_form_open: false,
            project_title_input: String::new(),
            project_category_input: ProjectCategory::UiUx,
            project_year_input: String::new(),
            project_image_input: String::new(),
        }
    }

    /// Submit guard: non-empty input and no exchange in flight. On accept
    /// the user message is appended synchronously, the input cleared and the
    /// busy flag raised; the accepted text is returned for dispatch.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.muse_busy {
            return None;
        }
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text.clone()));
        self.input_text.clear();
        self.muse_busy = true;
        Some(text)
    }

    /// One empty placeholder per model turn; fragments grow it in place.
    pub fn begin_reply(&mut self) {
        self.messages.push(ChatMessage::model(""));
    }

    pub fn push_fragment(&mut self, fragment: &str) {
        match self.messages.last_mut() {
            Some(last) if last.role == MessageRole::Model && !last.is_error => {
                last.text.push_str(fragment);
            }
            _ => self.messages.push(ChatMessage::model(fragment)),
        }
    }

    pub fn finish_reply(&mut self) {
        self.muse_busy = false;
    }

    /// Partial text that already streamed in stays in the transcript; an
    /// untouched placeholder becomes the apology itself so no empty bubble
    /// is ever shown. Busy is cleared on every terminal path.
    pub fn fail_reply(&mut self) {
        match self.messages.last_mut() {
            Some(last) if last.role == MessageRole::Model && last.text.is_empty() => {
                last.text.push_str(FALLBACK_APOLOGY);
                last.is_error = true;
            }
            _ => self.messages.push(ChatMessage::error(FALLBACK_APOLOGY)),
        }
        self.muse_busy = false;
    }

    /// Back to the greeting; paired with a worker-side session reset. A
    /// no-op while an exchange is in flight.
    pub fn clear_transcript(&mut self) {
        if self.muse_busy {
            return;
        }
        self.messages.clear();
        self.messages.push(ChatMessage::model(GREETING));
    }

    pub fn visible_projects(&self) -> Vec<&Project> {
        match self.filter {
            None => self.projects.iter().collect(),
            Some(category) => self
                .projects
                .iter()
                .filter(|p| p.category == category)
                .collect(),
        }
    }

    pub fn open_add_form(&mut self) {
        self.add_form_open = true;
        if self.project_year_input.is_empty() {
            self.project_year_input = Utc::now().year().to_string();
        }
    }

    /// Build the project from the form fields and clear them.
    pub fn take_new_project(&mut self) -> Project {
        let year = self.project_year_input.trim().to_string();
        let project = Project {
            id: Uuid::new_v4().to_string(),
            title: self.project_title_input.trim().to_string(),
            category: self.project_category_input,
            year: if year.is_empty() {
                Utc::now().year().to_string()
            } else {
                year
            },
            image_url: self.project_image_input.trim().to_string(),
        };

        self.project_title_input.clear();
        self.project_year_input.clear();
        self.project_image_input.clear();
        project
    }
}
