use std::time::Duration;

use rusqlite::{ffi, params, Connection, DatabaseName, OptionalExtension, Result};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info};

pub const CURRENT_SCHEMA_VERSION: i64 = 1;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 1] = [Migration {
    version: 1,
    name: "folders_and_notes_v1",
    sql: r#"
CREATE TABLE IF NOT EXISTS folders (
    name TEXT UNIQUE
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    folder TEXT,
    title TEXT,
    content TEXT,
    created_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_notes_folder ON notes(folder);
"#,
}];

pub fn open_connection(path: &str) -> Result<Connection> {
    let mut conn = Connection::open(path)?;
    configure_connection(&conn)?;
    apply_migrations(&mut conn)?;
    debug!(path, "opened note store");
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.pragma_update(None::<DatabaseName>, "journal_mode", "WAL")?;
    conn.pragma_update(None::<DatabaseName>, "synchronous", "NORMAL")?;
    conn.pragma_update(None::<DatabaseName>, "temp_store", "MEMORY")?;
    conn.pragma_update(None::<DatabaseName>, "busy_timeout", 5000i64)?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL
);
"#,
    )?;

    for migration in MIGRATIONS {
        let already_applied: Option<i64> = tx
            .query_row(
                "SELECT version FROM schema_migrations WHERE version = ?1",
                params![migration.version],
                |row| row.get(0),
            )
            .optional()?;

        if already_applied.is_some() {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![migration.version, migration.name, now_utc_rfc3339()],
        )?;
        debug!(version = migration.version, name = migration.name, "applied migration");
    }

    debug!(schema_version = CURRENT_SCHEMA_VERSION, "schema up to date");
    tx.commit()
}

fn now_utc_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub id: i64,
    pub folder: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

pub struct InsertNote<'a> {
    pub folder: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: &'a str,
}

/// Inserts a folder row. Returns `false` when the name is already taken;
/// every other failure is propagated.
pub fn insert_folder(conn: &Connection, name: &str) -> Result<bool> {
    match conn.execute("INSERT INTO folders (name) VALUES (?1)", params![name]) {
        Ok(_) => {
            debug!(name, "inserted folder");
            Ok(true)
        }
        Err(err) if is_unique_violation(&err) => {
            info!(name, "folder already exists");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub fn list_folders(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM folders ORDER BY rowid ASC")?;
    let mut rows = stmt.query([])?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        result.push(row.get(0)?);
    }
    Ok(result)
}

pub fn insert_note(conn: &Connection, args: &InsertNote<'_>) -> Result<i64> {
    conn.execute(
        r#"
INSERT INTO notes (folder, title, content, created_at)
VALUES (?1, ?2, ?3, ?4)
"#,
        params![args.folder, args.title, args.content, args.created_at],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, folder = args.folder, "inserted note");
    Ok(id)
}

/// Overwrites title and content. `created_at` and `folder` are left alone,
/// and a missing id is not an error: the returned row count is simply zero.
pub fn update_note(conn: &Connection, id: i64, title: &str, content: &str) -> Result<usize> {
    let affected = conn.execute(
        "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3",
        params![title, content, id],
    )?;
    debug!(id, affected, "updated note");
    Ok(affected)
}

pub fn list_notes(conn: &Connection, folder: &str) -> Result<Vec<NoteRecord>> {
    let mut stmt = conn.prepare(
        r#"
SELECT id, folder, title, content, created_at
FROM notes
WHERE folder = ?1
ORDER BY id ASC
"#,
    )?;

    let mut rows = stmt.query(params![folder])?;
    let mut result = Vec::new();
    while let Some(row) = rows.next()? {
        result.push(note_from_row(row)?);
    }
    Ok(result)
}

pub fn get_note(conn: &Connection, id: i64) -> Result<Option<NoteRecord>> {
    conn.query_row(
        r#"
SELECT id, folder, title, content, created_at
FROM notes
WHERE id = ?1
"#,
        params![id],
        note_from_row,
    )
    .optional()
}

// Columns are nullable in the schema; NULL reads back as an empty string.
fn note_from_row(row: &rusqlite::Row<'_>) -> Result<NoteRecord> {
    Ok(NoteRecord {
        id: row.get(0)?,
        folder: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        content: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}
