use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Destination of rendered lines.
pub(crate) enum Sink {
    /// Process stdout; never closed by the logger.
    Stdout(io::Stdout),
    /// Append-mode file owned by the logger, closed on drop.
    File(File),
    Writer(Box<dyn Write + Send>),
}

impl Sink {
    pub(crate) fn stdout() -> Self {
        Sink::Stdout(io::stdout())
    }

    /// Opens `path` for appending, creating it with mode 0644 if missing.
    pub(crate) fn append(path: &Path) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options.open(path).map(Sink::File)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Sink::Stdout(_) => "stdout",
            Sink::File(_) => "file",
            Sink::Writer(_) => "writer",
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(file) => file.write(buf),
            Sink::Writer(writer) => writer.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.lock().write_all(buf),
            Sink::File(file) => file.write_all(buf),
            Sink::Writer(writer) => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(file) => file.flush(),
            Sink::Writer(writer) => writer.flush(),
        }
    }
}
