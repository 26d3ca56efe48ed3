//! Internal diagnostics of the crate itself (sink opened, line dropped), routed
//! through `tracing` to stderr. Never mixed into a [`Logger`](crate::logger::Logger) sink.
//! See `bin/logger_demo.rs` for a binary that installs it.

mod bootstrap;
pub use bootstrap::*;
