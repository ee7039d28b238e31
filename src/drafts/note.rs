use crate::error::{NoteError, NoteResult};
use crate::models::{NewNote, NoteTag};

/// Unsaved "create note" form contents. Lives only in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NoteDraft {
    pub(crate) fn new(title: impl Into<String>, content: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }

    /// Title must contain something other than whitespace; content may be empty.
    pub(crate) fn validate(&self) -> NoteResult<NewNote> {
        if self.title.trim().is_empty() {
            return Err(NoteError::Validation("Title is required".to_string()));
        }

        Ok(NewNote {
            title: self.title.clone(),
            content: self.content.clone(),
            tag: self.tag,
        })
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
