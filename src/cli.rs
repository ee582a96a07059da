use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, CommandFactory, Parser, Subcommand};

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

pub fn styled_command() -> clap::Command {
    Cli::command()
}

#[derive(Debug, Parser)]
#[command(name = "notepad")]
#[command(bin_name = "notepad")]
#[command(version)]
#[command(about = "Folders of timestamped notes in a local SQLite file")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "NOTEPAD_DB_PATH",
        help = "Path to the SQLite note store (default: folders.db)."
    )]
    pub db: Option<String>,

    #[arg(
        long,
        env = "NOTEPAD_CONFIG",
        help = "Config file (default: ~/.config/notepad/config.toml)."
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Browse folders and notes interactively (default).")]
    Shell,
    #[command(about = "Create and list folders.")]
    Folder(FolderArgs),
    #[command(about = "Add, list, show, and edit notes.")]
    Note(NoteArgs),
    #[command(about = "Generate or install shell completions.")]
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct FolderArgs {
    #[command(subcommand)]
    pub command: FolderSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum FolderSubcommands {
    #[command(about = "Create a folder with a unique name.")]
    Add(FolderAddArgs),
    #[command(about = "List folders.")]
    Ls(JsonArgs),
}

#[derive(Debug, Args)]
pub struct FolderAddArgs {
    #[arg(help = "Folder name.")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct JsonArgs {
    #[arg(long, help = "Emit JSON output.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub command: NoteSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum NoteSubcommands {
    #[command(about = "Add a note to a folder.")]
    Add(NoteAddArgs),
    #[command(about = "List the notes in a folder.")]
    Ls(NoteListArgs),
    #[command(about = "Show one note.")]
    Show(NoteShowArgs),
    #[command(about = "Replace a note's title and content.")]
    Edit(NoteEditArgs),
}

#[derive(Debug, Args)]
pub struct NoteAddArgs {
    #[arg(help = "Folder name.")]
    pub folder: String,

    #[arg(short = 't', long, help = "Note title.")]
    pub title: String,

    #[arg(short = 'c', long, help = "Note content.")]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct NoteListArgs {
    #[arg(help = "Folder name.")]
    pub folder: String,

    #[arg(long, help = "Emit JSON output.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NoteShowArgs {
    #[arg(help = "Note id.")]
    pub id: i64,

    #[arg(long, help = "Emit JSON output.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NoteEditArgs {
    #[arg(help = "Note id.")]
    pub id: i64,

    #[arg(short = 't', long, help = "New title.")]
    pub title: String,

    #[arg(short = 'c', long, help = "New content.")]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate for. Detected from $SHELL if omitted.")]
    pub shell: Option<clap_complete::Shell>,

    #[arg(
        short = 'i',
        long = "install",
        help = "Write the script under ~/.local/share/notepad/completions."
    )]
    pub install: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
