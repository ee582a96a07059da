use std::io::{self, IsTerminal};

use crate::app::{FolderView, NoteView};

pub fn print_folder_list(folders: &[FolderView], palette: &Palette) {
    for line in format_folder_list(folders, palette) {
        println!("{line}");
    }
}

pub fn print_note_list(folder: &str, notes: &[NoteView], palette: &Palette) {
    for line in format_note_list(folder, notes, palette) {
        println!("{line}");
    }
}

pub fn print_note_show(note: &NoteView, palette: &Palette) {
    for line in format_note_show(note, palette) {
        println!("{line}");
    }
}

pub fn format_folder_list(folders: &[FolderView], palette: &Palette) -> Vec<String> {
    let mut lines = vec![palette.heading("Folders")];
    if folders.is_empty() {
        lines.push(palette.dim("no folders yet"));
        return lines;
    }
    for (index, folder) in folders.iter().enumerate() {
        lines.push(format!("{} {}", palette.index(index + 1), folder.name));
    }
    lines.push(palette.dim(&format!("{} folder(s)", folders.len())));
    lines
}

pub fn format_note_list(folder: &str, notes: &[NoteView], palette: &Palette) -> Vec<String> {
    let mut lines = vec![palette.heading(&format!("Notes in {folder}"))];
    if notes.is_empty() {
        lines.push(palette.dim("no notes yet"));
        return lines;
    }
    for (index, note) in notes.iter().enumerate() {
        lines.push(format!(
            "{} {}",
            palette.index(index + 1),
            format_note_row(note, palette)
        ));
    }
    lines.push(palette.dim(&format!("{} note(s)", notes.len())));
    lines
}

/// `title | created_at`, the row shape of a folder's note list.
pub fn format_note_row(note: &NoteView, palette: &Palette) -> String {
    format!(
        "{} {} {}",
        palette.id(&format!("#{}", note.id)),
        note.title,
        palette.dim(&format!("| {}", note.created_at))
    )
}

pub fn format_note_show(note: &NoteView, palette: &Palette) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", palette.id(&format!("#{}", note.id)), palette.heading(&note.title)),
        palette.dim(&format!("folder: {}", note.folder)),
        palette.dim(&format!("created: {}", note.created_at)),
        String::new(),
    ];
    lines.extend(note.content.lines().map(str::to_string));
    lines
}

pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colour only for a terminal stdout without `NO_COLOR`; a config value
    /// of `false` turns it off regardless.
    pub fn auto(configured: Option<bool>) -> Self {
        let enabled = configured.unwrap_or(true)
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal();
        Self { enabled }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint("1;36", text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    pub fn id(&self, text: &str) -> String {
        self.paint("1;94", text)
    }

    pub fn index(&self, position: usize) -> String {
        self.paint("33", &format!("{position:>3}."))
    }
}
