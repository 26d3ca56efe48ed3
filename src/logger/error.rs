use std::io;
use std::path::PathBuf;

/// The only failure a [`Logger`](super::Logger) ever reports: its sink could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("cannot open log file {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoggerError {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            LoggerError::SinkUnavailable { source, .. } => source.kind(),
        }
    }
}

impl From<LoggerError> for io::Error {
    fn from(err: LoggerError) -> Self {
        match err {
            LoggerError::SinkUnavailable { source, .. } => source,
        }
    }
}
