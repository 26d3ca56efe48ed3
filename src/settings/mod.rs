//! Loads `[log]` (minimum level, destination path) and `[diagnostics]` (tracing
//! filter) from a TOML file, with `--level`/`--path` flags layered on top.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
