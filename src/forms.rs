//! Modal input forms. Each form holds raw field text and only yields a value
//! when every required field is non-blank; otherwise the form stays open.

use crate::app::{NewNote, NoteView};
use crate::domain::text::RequiredText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Accepted(T),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct AddFolderForm {
    pub name: String,
}

impl AddFolderForm {
    pub fn accept(&self) -> Option<RequiredText> {
        self.name.parse().ok()
    }
}

#[derive(Debug, Clone)]
pub struct AddNoteForm {
    folder: String,
    pub title: String,
    pub content: String,
}

impl AddNoteForm {
    pub fn new(folder: &str) -> Self {
        Self {
            folder: folder.to_string(),
            title: String::new(),
            content: String::new(),
        }
    }

    /// Stamps the creation time at the moment of acceptance.
    pub fn accept(&self) -> Option<NewNote> {
        let folder = self.folder.parse().ok()?;
        let title = self.title.parse().ok()?;
        let content = self.content.parse().ok()?;
        Some(NewNote::new(folder, title, content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEdit {
    pub id: i64,
    pub title: RequiredText,
    pub content: RequiredText,
}

/// Editor for an existing note, pre-filled with its stored title and content.
#[derive(Debug, Clone)]
pub struct EditNoteForm {
    id: i64,
    pub title: String,
    pub content: String,
}

impl EditNoteForm {
    pub fn for_note(note: &NoteView) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    pub fn accept(&self) -> Option<NoteEdit> {
        Some(NoteEdit {
            id: self.id,
            title: self.title.parse().ok()?,
            content: self.content.parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AddFolderForm, AddNoteForm, EditNoteForm};
    use crate::app::NoteView;

    #[test]
    fn folder_form_requires_a_non_blank_name() {
        let mut form = AddFolderForm::default();
        assert!(form.accept().is_none());
        form.name = "   ".to_string();
        assert!(form.accept().is_none());
        form.name = "  Travel ".to_string();
        let name = form.accept().expect("form should accept");
        assert_eq!(name.as_str(), "Travel");
    }

    #[test]
    fn note_form_requires_title_and_content() {
        let mut form = AddNoteForm::new("Travel");
        form.title = "Packing".to_string();
        assert!(form.accept().is_none(), "content is still blank");

        form.title = " ".to_string();
        form.content = "socks".to_string();
        assert!(form.accept().is_none(), "title is blank");

        form.title = " Packing ".to_string();
        form.content = "\nsocks\n".to_string();
        let note = form.accept().expect("form should accept");
        assert_eq!(note.folder.as_str(), "Travel");
        assert_eq!(note.title.as_str(), "Packing");
        assert_eq!(note.content.as_str(), "socks");
        assert!(!note.created_at.is_empty());

        let orphan = AddNoteForm {
            folder: "  ".to_string(),
            ..form
        };
        assert!(orphan.accept().is_none(), "folder is blank");
    }

    #[test]
    fn edit_form_starts_from_stored_values() {
        let note = NoteView {
            id: 7,
            folder: "Travel".to_string(),
            title: "Packing".to_string(),
            content: "socks".to_string(),
            created_at: "2026-10-16 09:30:00".to_string(),
        };
        let mut form = EditNoteForm::for_note(&note);
        assert_eq!(form.title, "Packing");

        let unchanged = form.accept().expect("prefilled form should accept");
        assert_eq!(unchanged.title.as_str(), "Packing");

        form.content = "  ".to_string();
        assert!(form.accept().is_none());

        form.content = "socks, hat".to_string();
        let edit = form.accept().expect("form should accept");
        assert_eq!(edit.id, 7);
        assert_eq!(edit.content.as_str(), "socks, hat");
    }
}
