//! Rename-in-progress state. At most one todo is edited at a time.

use crate::types::TodoId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    active_id: Option<TodoId>,
    draft: String,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `id`. Any other session is dropped without saving.
    pub fn begin(&mut self, id: TodoId, title: &str) {
        self.active_id = Some(id);
        self.draft = title.to_string();
    }

    /// Ignored when no session is active.
    pub fn set_draft(&mut self, text: &str) {
        if self.active_id.is_some() {
            self.draft = text.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.active_id = None;
        self.draft.clear();
    }

    pub fn active_id(&self) -> Option<TodoId> {
        self.active_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_active(&self) -> bool {
        self.active_id.is_some()
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.active_id == Some(id)
    }
}
