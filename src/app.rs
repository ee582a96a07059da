use std::error::Error;
use std::fmt;

use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::config::ConfigError;
use crate::db::{self, InsertNote, NoteRecord};
use crate::domain::text::RequiredText;
use crate::domain::timestamp::now_local_timestamp;

pub struct App {
    conn: Connection,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FolderView {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NoteView {
    pub id: i64,
    pub folder: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

/// A validated note waiting to be stored. The timestamp is fixed when the
/// draft is built, not when it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub folder: RequiredText,
    pub title: RequiredText,
    pub content: RequiredText,
    pub created_at: String,
}

impl NewNote {
    pub fn new(folder: RequiredText, title: RequiredText, content: RequiredText) -> Self {
        Self {
            folder,
            title,
            content,
            created_at: now_local_timestamp(),
        }
    }
}

impl App {
    pub fn open(db_path: &str) -> Result<Self, AppError> {
        ensure_parent_dir(db_path)?;
        let conn = db::open_connection(db_path)?;
        Ok(Self { conn })
    }

    /// Returns `false` when a folder with this name already exists.
    pub fn create_folder(&self, name: &str) -> Result<bool, AppError> {
        let name = required("folder name", name)?;
        Ok(db::insert_folder(&self.conn, name.as_str())?)
    }

    pub fn list_folders(&self) -> Result<Vec<FolderView>, AppError> {
        let names = db::list_folders(&self.conn)?;
        Ok(names.into_iter().map(|name| FolderView { name }).collect())
    }

    pub fn add_note(&self, folder: &str, title: &str, content: &str) -> Result<NoteView, AppError> {
        let note = NewNote::new(
            required("folder", folder)?,
            required("title", title)?,
            required("content", content)?,
        );
        let id = self.insert_note(&note)?;
        self.show_note(id)?.ok_or(AppError::NotFound(id))
    }

    pub fn insert_note(&self, note: &NewNote) -> Result<i64, AppError> {
        let id = db::insert_note(
            &self.conn,
            &InsertNote {
                folder: note.folder.as_str(),
                title: note.title.as_str(),
                content: note.content.as_str(),
                created_at: &note.created_at,
            },
        )?;
        Ok(id)
    }

    /// Overwrites title and content by id. A missing id is not an error;
    /// the returned row count is zero.
    pub fn update_note(
        &self,
        id: i64,
        title: &RequiredText,
        content: &RequiredText,
    ) -> Result<usize, AppError> {
        Ok(db::update_note(
            &self.conn,
            id,
            title.as_str(),
            content.as_str(),
        )?)
    }

    /// Like `update_note`, but reports a missing id and returns the stored
    /// note afterwards.
    pub fn edit_note(&self, id: i64, title: &str, content: &str) -> Result<NoteView, AppError> {
        let title = required("title", title)?;
        let content = required("content", content)?;
        if self.show_note(id)?.is_none() {
            return Err(AppError::NotFound(id));
        }
        let affected = self.update_note(id, &title, &content)?;
        debug!(id, affected, "edited note");
        self.show_note(id)?.ok_or(AppError::NotFound(id))
    }

    /// Folder names are stored trimmed, so the lookup key is trimmed too.
    pub fn list_notes(&self, folder: &str) -> Result<Vec<NoteView>, AppError> {
        let records = db::list_notes(&self.conn, folder.trim())?;
        Ok(records.into_iter().map(NoteView::from).collect())
    }

    pub fn show_note(&self, id: i64) -> Result<Option<NoteView>, AppError> {
        Ok(db::get_note(&self.conn, id)?.map(NoteView::from))
    }
}

impl From<NoteRecord> for NoteView {
    fn from(value: NoteRecord) -> Self {
        Self {
            id: value.id,
            folder: value.folder,
            title: value.title,
            content: value.content,
            created_at: value.created_at,
        }
    }
}

fn required(field: &str, raw: &str) -> Result<RequiredText, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidArgument(format!("{field} must not be blank")))
}

fn ensure_parent_dir(path: &str) -> Result<(), AppError> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Db(rusqlite::Error),
    Config(ConfigError),
    InvalidArgument(String),
    NotFound(i64),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Db(err) => write!(f, "database error: {}", err),
            AppError::Config(err) => write!(f, "config error: {}", err),
            AppError::InvalidArgument(message) => write!(f, "{}", message),
            AppError::NotFound(id) => write!(f, "note #{} not found", id),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Db(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::InvalidArgument(_) => None,
            AppError::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

#[cfg(test)]
mod tests;
