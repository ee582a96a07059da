use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::app::{App, AppError, FolderView, NewNote, NoteView};
use crate::domain::text::RequiredText;
use crate::forms::{AddFolderForm, AddNoteForm, EditNoteForm, FormOutcome};
use crate::ui::{self, Palette};

pub const CANCEL_COMMAND: &str = ":cancel";
pub const END_OF_BLOCK: &str = ".";

const MAIN_PROMPT: &str = "[n] open folder  a add folder  q quit > ";
const FOLDER_PROMPT: &str = "[n] edit note  a add note  b back > ";

/// Interactive session over any line source. Views nest the same way the
/// windows do: folder list, then one folder's notes, then a note editor.
pub struct Session<'a, R, W> {
    app: &'a App,
    input: R,
    output: W,
    palette: Palette,
}

pub fn run_interactive(app: &App, palette: Palette) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(app, stdin.lock(), stdout.lock(), palette).run()
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(app: &'a App, input: R, output: W, palette: Palette) -> Self {
        Self {
            app,
            input,
            output,
            palette,
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            let folders = self.app.list_folders()?;
            self.render(&ui::format_folder_list(&folders, &self.palette))?;
            let Some(choice) = self.prompt(MAIN_PROMPT)? else {
                return Ok(());
            };
            match choice.trim() {
                "q" | "quit" => return Ok(()),
                "a" | "add" => self.add_folder()?,
                other => {
                    if let Some(folder) = pick_folder(&folders, other) {
                        let name = folder.name.clone();
                        self.folder_view(&name)?;
                    }
                }
            }
        }
    }

    fn add_folder(&mut self) -> Result<(), AppError> {
        let FormOutcome::Accepted(name) = self.add_folder_form()? else {
            return Ok(());
        };
        // A taken name is swallowed: no message, no navigation.
        if !self.app.create_folder(name.as_str())? {
            return Ok(());
        }
        let folders = self.app.list_folders()?;
        self.render(&ui::format_folder_list(&folders, &self.palette))?;
        self.folder_view(name.as_str())
    }

    fn folder_view(&mut self, folder: &str) -> Result<(), AppError> {
        debug!(folder, "opened folder view");
        loop {
            let notes = self.app.list_notes(folder)?;
            self.render(&ui::format_note_list(folder, &notes, &self.palette))?;
            let Some(choice) = self.prompt(FOLDER_PROMPT)? else {
                return Ok(());
            };
            match choice.trim() {
                "b" | "back" | "q" => return Ok(()),
                "a" | "add" => {
                    if let FormOutcome::Accepted(note) = self.add_note_form(folder)? {
                        self.app.insert_note(&note)?;
                    }
                }
                other => {
                    if let Some(note) = pick_note(&notes, other) {
                        self.note_editor(note.id)?;
                    }
                }
            }
        }
    }

    fn note_editor(&mut self, id: i64) -> Result<(), AppError> {
        let Some(note) = self.app.show_note(id)? else {
            return Ok(());
        };
        self.render(&ui::format_note_show(&note, &self.palette))?;

        let mut form = EditNoteForm::for_note(&note);
        loop {
            let label = format!("Title [{}]: ", form.title);
            let Some(title) = self.prompt(&label)? else {
                return Ok(());
            };
            if is_cancel(&title) {
                return Ok(());
            }
            if !title.trim().is_empty() {
                form.title = title;
            }

            let Some(content) =
                self.read_block("Content (end with '.' alone; '.' right away keeps it):")?
            else {
                return Ok(());
            };
            if !content.trim().is_empty() {
                form.content = content;
            }

            if let Some(edit) = form.accept() {
                self.app.update_note(edit.id, &edit.title, &edit.content)?;
                return Ok(());
            }
        }
    }

    fn add_folder_form(&mut self) -> Result<FormOutcome<RequiredText>, AppError> {
        let mut form = AddFolderForm::default();
        loop {
            let Some(line) = self.prompt("Folder name: ")? else {
                return Ok(FormOutcome::Cancelled);
            };
            if is_cancel(&line) {
                return Ok(FormOutcome::Cancelled);
            }
            form.name = line;
            if let Some(name) = form.accept() {
                return Ok(FormOutcome::Accepted(name));
            }
        }
    }

    /// Asks again only for the fields that are still blank.
    fn add_note_form(&mut self, folder: &str) -> Result<FormOutcome<NewNote>, AppError> {
        let mut form = AddNoteForm::new(folder);
        if folder.trim().is_empty() {
            return Ok(FormOutcome::Cancelled);
        }
        loop {
            if form.title.trim().is_empty() {
                let Some(title) = self.prompt("Title: ")? else {
                    return Ok(FormOutcome::Cancelled);
                };
                if is_cancel(&title) {
                    return Ok(FormOutcome::Cancelled);
                }
                form.title = title;
            }
            if form.content.trim().is_empty() {
                let Some(content) = self.read_block("Content (end with '.' alone):")? else {
                    return Ok(FormOutcome::Cancelled);
                };
                form.content = content;
            }
            if let Some(note) = form.accept() {
                return Ok(FormOutcome::Accepted(note));
            }
        }
    }

    /// Reads lines up to a lone `.`. `None` means the user cancelled or the
    /// input ended first.
    fn read_block(&mut self, label: &str) -> Result<Option<String>, AppError> {
        writeln!(self.output, "{}", self.palette.dim(label))?;
        let mut lines = Vec::new();
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line == END_OF_BLOCK {
                return Ok(Some(lines.join("\n")));
            }
            if lines.is_empty() && is_cancel(&line) {
                return Ok(None);
            }
            lines.push(line);
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    fn render(&mut self, lines: &[String]) -> Result<(), AppError> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }
}

fn is_cancel(line: &str) -> bool {
    line.trim() == CANCEL_COMMAND
}

fn pick_index(len: usize, raw: &str) -> Option<usize> {
    let position = raw.parse::<usize>().ok()?;
    (1..=len).contains(&position).then(|| position - 1)
}

// An exact name beats a list position, so a folder called "2" stays reachable.
fn pick_folder<'f>(folders: &'f [FolderView], raw: &str) -> Option<&'f FolderView> {
    folders
        .iter()
        .find(|folder| folder.name == raw)
        .or_else(|| folders.get(pick_index(folders.len(), raw)?))
}

fn pick_note<'n>(notes: &'n [NoteView], raw: &str) -> Option<&'n NoteView> {
    notes.get(pick_index(notes.len(), raw)?)
}
