use super::Parser;
use crate::logger::Level;

#[derive(Parser, Debug, Default)]
pub struct Cli {
    /// Settings file; defaults to settings/dev.toml (debug) or settings/release.toml.
    #[arg(long)]
    pub settings: Option<String>,
    /// Minimum level: info, warn or error.
    #[arg(long)]
    pub level: Option<Level>,
    /// Log file to append to; an empty value selects stdout.
    #[arg(long)]
    pub path: Option<String>,
}
