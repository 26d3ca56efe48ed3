//! Leveled line logger.
//!
//! A [`Logger`] holds a minimum [`Level`] and one sink (an append-mode file or
//! stdout) and writes `[LEVEL] message` lines:
//!
//! ```no_run
//! use levellog::log_info;
//! use levellog::logger::{Level, Logger};
//!
//! let logger = Logger::new(Level::Info, "app.log")?;
//! log_info!(logger, "value=%d", 7);
//! # Ok::<(), levellog::logger::LoggerError>(())
//! ```

mod error;
pub use error::*;

mod format;
pub use format::{Arg, sprintf};

mod level;
pub use level::*;

mod logger;
pub use logger::*;

mod macros;

mod sink;
