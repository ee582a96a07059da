use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap_complete::{generate, generate_to, Shell};

use crate::app::AppError;

const BIN_NAME: &str = "notepad";

pub fn write_completions(shell: Shell, buf: &mut dyn Write) {
    let mut cmd = crate::cli::styled_command();
    generate(shell, &mut cmd, BIN_NAME, buf);
}

/// Every shell's script lands in one directory; sourcing it is left to the user.
fn completions_dir(home: &Path) -> PathBuf {
    home.join(".local/share/notepad/completions")
}

fn install_into(shell: Shell, home: &Path) -> io::Result<PathBuf> {
    let dir = completions_dir(home);
    std::fs::create_dir_all(&dir)?;
    let mut cmd = crate::cli::styled_command();
    generate_to(shell, &mut cmd, BIN_NAME, &dir)
}

fn resolve_shell(explicit: Option<Shell>, shell_var: Option<&Path>) -> Result<Shell, AppError> {
    explicit
        .or_else(|| shell_var.and_then(Shell::from_shell_path))
        .ok_or_else(|| {
            AppError::InvalidArgument(
                "unable to detect shell from $SHELL; pass a shell name".to_string(),
            )
        })
}

pub fn run_completions_command(shell: Option<Shell>, install: bool) -> Result<(), AppError> {
    let shell_var = std::env::var_os("SHELL").map(PathBuf::from);
    let shell = resolve_shell(shell, shell_var.as_deref())?;

    if install {
        let home = std::env::var_os("HOME")
            .ok_or_else(|| AppError::InvalidArgument("HOME is not set".to_string()))?;
        let path = install_into(shell, Path::new(&home))?;
        tracing::info!(shell = %shell, path = %path.display(), "installed completions");
        println!("completions installed to {}", path.display());
    } else {
        write_completions(shell, &mut io::stdout().lock());
    }
    Ok(())
}
