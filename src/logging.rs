use std::str::FromStr;

use tracing::Level;

pub const LOG_ENV_VAR: &str = "NOTEPAD_LOG";

/// Installs the stderr fmt subscriber. Unknown level names fall back to
/// `warn`; a second call in the same process is ignored.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_level(raw: &str) -> Level {
    Level::from_str(raw.trim()).unwrap_or(Level::WARN)
}
