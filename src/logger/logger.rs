use super::format::{Arg, sprintf};
use super::level::Level;
use super::sink::Sink;
use super::LoggerError;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: Level,
    /// Empty means standard output.
    pub path: String,
}

/// Leveled line logger writing `[LEVEL] message` lines to a single sink.
///
/// Lines below the minimum level are dropped without touching the sink. Once
/// constructed, logging never fails: write errors are discarded.
pub struct Logger {
    min_level: AtomicU8,
    sink: Mutex<Sink>,
    /// Fixed at construction; read without taking the sink lock.
    sink_kind: &'static str,
    is_stdout: bool,
}

impl Logger {
    /// Logs to the file at `path` in append mode, or to stdout when `path` is empty.
    pub fn new(level: Level, path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            Ok(Self::stdout(level))
        } else {
            Self::open(level, path)
        }
    }

    pub fn stdout(level: Level) -> Self {
        Self::with_sink(level, Sink::stdout())
    }

    pub fn open(level: Level, path: impl AsRef<Path>) -> Result<Self, LoggerError> {
        let path = path.as_ref();
        let sink = Sink::append(path).map_err(|source| LoggerError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), %level, "opened log file");
        Ok(Self::with_sink(level, sink))
    }

    pub fn from_writer<W>(level: Level, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_sink(level, Sink::Writer(Box::new(writer)))
    }

    pub fn from_config(config: &LogConfig) -> Result<Self, LoggerError> {
        Self::new(config.level, &config.path)
    }

    fn with_sink(level: Level, sink: Sink) -> Self {
        Self {
            min_level: AtomicU8::new(level.rank()),
            sink_kind: sink.kind(),
            is_stdout: matches!(sink, Sink::Stdout(_)),
            sink: Mutex::new(sink),
        }
    }

    pub fn level(&self) -> Level {
        Level::from_rank(self.min_level.load(Ordering::Relaxed))
    }

    /// Takes effect for every subsequent call.
    pub fn set_level(&self, level: Level) {
        self.min_level.store(level.rank(), Ordering::Relaxed);
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn is_stdout(&self) -> bool {
        self.is_stdout
    }

    pub fn info(&self, msg: &str, args: &[Arg]) {
        self.log(Level::Info, msg, args);
    }

    pub fn warn(&self, msg: &str, args: &[Arg]) {
        self.log(Level::Warn, msg, args);
    }

    pub fn error(&self, msg: &str, args: &[Arg]) {
        self.log(Level::Error, msg, args);
    }

    fn log(&self, level: Level, msg: &str, args: &[Arg]) {
        if !self.enabled(level) {
            return;
        }

        let message = sprintf(msg, args);
        let mut line = String::with_capacity(message.len() + level.as_str().len() + 4);
        line.push('[');
        line.push_str(level.as_str());
        line.push_str("] ");
        line.push_str(&message);
        line.push('\n');

        let mut sink = self.lock_sink();
        if let Err(e) = sink.write_all(line.as_bytes()) {
            debug!(sink = sink.kind(), error = %e, "dropped log line");
        }
    }

    fn lock_sink(&self) -> std::sync::MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("sink", &self.sink_kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn captured(level: Level) -> (Logger, Captured) {
        let out = Captured::default();
        (Logger::from_writer(level, out.clone()), out)
    }

    fn emit(logger: &Logger, level: Level, msg: &str) {
        match level {
            Level::Info => logger.info(msg, &[]),
            Level::Warn => logger.warn(msg, &[]),
            Level::Error => logger.error(msg, &[]),
        }
    }

    #[test]
    fn below_threshold_writes_nothing() {
        for min in Level::ALL {
            for level in Level::ALL.into_iter().filter(|l| *l < min) {
                let (logger, out) = captured(min);
                emit(&logger, level, "hidden");
                assert_eq!(out.text(), "", "{level} under {min}");
            }
        }
    }

    #[test]
    fn at_or_above_threshold_writes_one_line() {
        for min in Level::ALL {
            for level in Level::ALL.into_iter().filter(|l| *l >= min) {
                let (logger, out) = captured(min);
                emit(&logger, level, "shown");
                assert_eq!(out.text(), format!("[{}] shown\n", level.as_str()));
            }
        }
    }

    #[test]
    fn interpolates_arguments() {
        let (logger, out) = captured(Level::Info);
        logger.info("value=%d", &[Arg::from(7)]);
        logger.error("boom", &[]);
        assert_eq!(out.text(), "[INFO] value=7\n[ERROR] boom\n");
    }

    #[test]
    fn set_level_applies_immediately() {
        let (logger, out) = captured(Level::Info);
        logger.set_level(Level::Error);
        assert_eq!(logger.level(), Level::Error);
        logger.warn("suppressed", &[]);
        logger.set_level(Level::Warn);
        logger.warn("emitted", &[]);
        assert_eq!(out.text(), "[WARN] emitted\n");
    }

    #[test]
    fn argument_mismatch_does_not_panic() {
        let (logger, out) = captured(Level::Info);
        logger.warn("%d and %d", &[Arg::from("x")]);
        assert_eq!(out.text(), "[WARN] %!d(string=x) and %!d(MISSING)\n");
    }

    #[test]
    fn write_failures_are_swallowed() {
        let logger = Logger::from_writer(Level::Info, Broken);
        logger.info("lost", &[]);
        logger.error("also lost", &[]);
        assert!(!logger.is_stdout());
    }

    #[test]
    fn empty_path_uses_stdout() {
        let logger = Logger::new(Level::Warn, "").expect("stdout never fails");
        assert!(logger.is_stdout());
        assert_eq!(logger.level(), Level::Warn);
    }

    #[test]
    fn concurrent_lines_do_not_interleave() {
        let (logger, out) = captured(Level::Info);
        let logger = Arc::new(logger);
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info("thread %d line %d", &[Arg::from(t), Arg::from(i)]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = out.text();
        assert_eq!(text.lines().count(), 400);
        assert!(text.lines().all(|l| l.starts_with("[INFO] thread ")));
    }

    #[test]
    fn is_stdout_does_not_wait_for_writers() {
        let logger = Logger::stdout(Level::Info);
        let _held = logger.lock_sink();
        assert!(logger.is_stdout());
        assert!(format!("{logger:?}").contains("\"stdout\""));
    }

    #[test]
    fn debug_shows_level_and_sink() {
        let (logger, _) = captured(Level::Warn);
        assert_eq!(format!("{logger:?}"), "Logger { level: Warn, sink: \"writer\" }");
    }
}
