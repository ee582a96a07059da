use super::{App, AppError, NewNote};
use crate::domain::text::RequiredText;
use std::path::PathBuf;
use uuid::Uuid;

fn unique_workspace() -> PathBuf {
    let root = std::env::temp_dir().join(format!("notepad-app-test-{}", Uuid::now_v7()));
    std::fs::create_dir_all(&root).expect("temp workspace should be creatable");
    root
}

fn open_app(root: &std::path::Path) -> App {
    let db_path = root.join("data/folders.db");
    App::open(db_path.to_str().expect("utf8 path")).expect("app should open")
}

fn text(raw: &str) -> RequiredText {
    raw.parse().expect("text should be non-blank")
}

fn folder_names(app: &App) -> Vec<String> {
    app.list_folders()
        .expect("list should succeed")
        .into_iter()
        .map(|folder| folder.name)
        .collect()
}

#[test]
fn open_creates_missing_parent_directories() {
    let root = unique_workspace();
    let _app = open_app(&root);
    assert!(root.join("data/folders.db").exists());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn new_folder_appears_exactly_once() {
    let root = unique_workspace();
    let app = open_app(&root);

    assert!(app.create_folder("Recipes").expect("create should succeed"));
    let names = folder_names(&app);
    assert_eq!(names.iter().filter(|name| *name == "Recipes").count(), 1);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn duplicate_folder_fails_and_leaves_set_unchanged() {
    let root = unique_workspace();
    let app = open_app(&root);

    assert!(app.create_folder("Work").expect("create should succeed"));
    let before = folder_names(&app);
    assert!(!app.create_folder("Work").expect("duplicate should not error"));
    assert!(!app
        .create_folder("  Work  ")
        .expect("trimmed duplicate should not error"));
    assert_eq!(folder_names(&app), before);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn blank_inputs_are_rejected_without_writes() {
    let root = unique_workspace();
    let app = open_app(&root);

    let blank_folder = app.create_folder("   ");
    assert!(matches!(blank_folder, Err(AppError::InvalidArgument(_))));
    assert!(folder_names(&app).is_empty());

    let blank_title = app.add_note("X", " ", "content");
    assert!(matches!(blank_title, Err(AppError::InvalidArgument(_))));
    let blank_content = app.add_note("X", "title", "\n\t");
    assert!(matches!(blank_content, Err(AppError::InvalidArgument(_))));
    assert!(app.list_notes("X").expect("list should succeed").is_empty());

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn added_note_is_listed_with_timestamp() {
    let root = unique_workspace();
    let app = open_app(&root);

    let created = app.add_note("X", " T ", "C").expect("add should succeed");
    assert_eq!(created.folder, "X");
    assert_eq!(created.title, "T");
    assert_eq!(created.content, "C");

    let notes = app.list_notes("X").expect("list should succeed");
    assert_eq!(notes, vec![created]);
    assert!(!notes[0].created_at.is_empty());

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn insert_note_keeps_draft_timestamp() {
    let root = unique_workspace();
    let app = open_app(&root);

    let mut draft = NewNote::new(text("X"), text("T"), text("C"));
    draft.created_at = "2020-01-02 03:04:05".to_string();
    let id = app.insert_note(&draft).expect("insert should succeed");

    let stored = app
        .show_note(id)
        .expect("show should succeed")
        .expect("note should exist");
    assert_eq!(stored.created_at, "2020-01-02 03:04:05");

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn update_changes_only_title_and_content() {
    let root = unique_workspace();
    let app = open_app(&root);

    let original = app.add_note("X", "T", "C").expect("add should succeed");
    let other = app.add_note("X", "other", "other").expect("add should succeed");

    let affected = app
        .update_note(original.id, &text("T2"), &text("C2"))
        .expect("update should succeed");
    assert_eq!(affected, 1);

    let updated = app
        .show_note(original.id)
        .expect("show should succeed")
        .expect("note should exist");
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.content, "C2");
    assert_eq!(updated.folder, original.folder);
    assert_eq!(updated.created_at, original.created_at);

    let untouched = app
        .show_note(other.id)
        .expect("show should succeed")
        .expect("note should exist");
    assert_eq!(untouched, other);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn update_of_missing_id_succeeds_silently() {
    let root = unique_workspace();
    let app = open_app(&root);

    let affected = app
        .update_note(9999, &text("T"), &text("C"))
        .expect("update should not error");
    assert_eq!(affected, 0);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn edit_note_reports_missing_ids_and_blank_fields() {
    let root = unique_workspace();
    let app = open_app(&root);

    let missing = app.edit_note(42, "T", "C");
    assert!(matches!(missing, Err(AppError::NotFound(42))));

    let note = app.add_note("X", "T", "C").expect("add should succeed");
    let blank = app.edit_note(note.id, "", "C");
    assert!(matches!(blank, Err(AppError::InvalidArgument(_))));

    let edited = app
        .edit_note(note.id, "New title", "New body")
        .expect("edit should succeed");
    assert_eq!(edited.title, "New title");
    assert_eq!(edited.created_at, note.created_at);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn empty_folder_lists_no_notes() {
    let root = unique_workspace();
    let app = open_app(&root);

    assert!(app.create_folder("Empty").expect("create should succeed"));
    assert!(app.list_notes("Empty").expect("list should succeed").is_empty());
    assert!(app.list_notes("never-created").expect("list").is_empty());

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn separate_handles_see_each_others_commits() {
    let root = unique_workspace();
    let main_window = open_app(&root);
    let folder_window = open_app(&root);

    assert!(main_window.create_folder("Shared").expect("create"));
    let note = folder_window
        .add_note("Shared", "T", "C")
        .expect("add should succeed");

    assert_eq!(folder_names(&folder_window), vec!["Shared".to_string()]);
    assert_eq!(
        main_window.list_notes("Shared").expect("list should succeed"),
        vec![note]
    );

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn note_folder_is_trimmed_and_required() {
    let root = unique_workspace();
    let app = open_app(&root);

    assert!(app.create_folder(" Work ").expect("create should succeed"));
    let note = app.add_note(" Work ", "T", "C").expect("add should succeed");
    assert_eq!(note.folder, "Work");
    assert_eq!(folder_names(&app), vec!["Work".to_string()]);

    let listed = app.list_notes("Work").expect("list should succeed");
    assert_eq!(listed, vec![note.clone()]);
    assert_eq!(
        app.list_notes("  Work\t").expect("list should succeed"),
        vec![note]
    );

    let blank_folder = app.add_note("   ", "T", "C");
    assert!(matches!(blank_folder, Err(AppError::InvalidArgument(_))));
    assert!(app.list_notes("").expect("list should succeed").is_empty());
    assert_eq!(app.list_notes("Work").expect("list should succeed").len(), 1);

    let _ = std::fs::remove_dir_all(root);
}
