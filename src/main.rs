mod app;
mod cli;
mod completions;
mod config;
mod db;
mod domain;
mod forms;
mod logging;
mod shell;
mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!("json serialization failed: {err}"),
    }
}

fn run() -> Result<(), app::AppError> {
    use clap::Parser;
    use cli::Commands;

    let cli = cli::Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;
    let log_level = std::env::var(logging::LOG_ENV_VAR).ok();
    logging::init_logging(&config.resolve_log_level(log_level.as_deref()));
    tracing::debug!(config = ?cli.config, "configuration loaded");

    if let Some(Commands::Completions(args)) = &cli.command {
        return completions::run_completions_command(args.shell, args.install);
    }

    let palette = ui::Palette::auto(config.color);
    let db_path = config.resolve_db_path(cli.db.as_deref());
    tracing::debug!(db_path = %db_path, "opening note store");
    let app = app::App::open(&db_path)?;

    match cli.command {
        None | Some(Commands::Shell) => shell::run_interactive(&app, palette)?,
        Some(Commands::Folder(args)) => run_folder_command(&app, args.command, &palette)?,
        Some(Commands::Note(args)) => run_note_command(&app, args.command, &palette)?,
        Some(Commands::Completions(_)) => {
            unreachable!("completions are handled before the store is opened")
        }
    }

    Ok(())
}

fn run_folder_command(
    app: &app::App,
    command: cli::FolderSubcommands,
    palette: &ui::Palette,
) -> Result<(), app::AppError> {
    use cli::FolderSubcommands;

    match command {
        FolderSubcommands::Add(args) => println!("{}", folder_add_outcome(app, &args.name)?),
        FolderSubcommands::Ls(args) => {
            let folders = app.list_folders()?;
            if args.json {
                print_json(&folders);
            } else {
                ui::print_folder_list(&folders, palette);
            }
        }
    }
    Ok(())
}

fn run_note_command(
    app: &app::App,
    command: cli::NoteSubcommands,
    palette: &ui::Palette,
) -> Result<(), app::AppError> {
    use cli::NoteSubcommands;

    match command {
        NoteSubcommands::Add(args) => {
            let note = app.add_note(&args.folder, &args.title, &args.content)?;
            println!("created {}", note_ref(&note));
        }
        NoteSubcommands::Ls(args) => {
            let notes = app.list_notes(&args.folder)?;
            if args.json {
                print_json(&notes);
            } else {
                ui::print_note_list(&args.folder, &notes, palette);
            }
        }
        NoteSubcommands::Show(args) => {
            let note = app
                .show_note(args.id)?
                .ok_or(app::AppError::NotFound(args.id))?;
            if args.json {
                print_json(&note);
            } else {
                ui::print_note_show(&note, palette);
            }
        }
        NoteSubcommands::Edit(args) => {
            let note = app.edit_note(args.id, &args.title, &args.content)?;
            println!("updated {}", note_ref(&note));
        }
    }
    Ok(())
}

/// The CLI reports a taken name as an error; the interactive session stays
/// silent about it instead.
fn folder_add_outcome(app: &app::App, name: &str) -> Result<String, app::AppError> {
    if app.create_folder(name)? {
        Ok(format!("created folder {}", name.trim()))
    } else {
        Err(app::AppError::InvalidArgument(format!(
            "folder '{}' already exists",
            name.trim()
        )))
    }
}

fn note_ref(note: &app::NoteView) -> String {
    format!("note #{} in {}: {}", note.id, note.folder, note.title)
}
