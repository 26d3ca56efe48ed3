use levellog::logger::{Arg, Level, LogConfig, Logger, LoggerError};
use levellog::{log_error, log_info, log_warn};
use std::fs;
use std::io;

#[test]
fn writes_formatted_lines_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.log");

    let logger = Logger::new(Level::Info, &path).expect("open");
    assert!(!logger.is_stdout());
    log_info!(logger, "value=%d", 7);
    log_warn!(logger, "disk at %d%%", 91);
    log_error!(logger, "boom");
    drop(logger);

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "[INFO] value=7\n[WARN] disk at 91%\n[ERROR] boom\n"
    );
}

#[test]
fn filtered_lines_leave_file_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("quiet.log");

    let logger = Logger::new(Level::Error, &path).expect("open");
    logger.info("dropped", &[]);
    logger.warn("dropped %s", &[Arg::from("too")]);
    drop(logger);

    assert_eq!(fs::read(&path).expect("read"), b"");
}

#[test]
fn reopening_appends() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("append.log");

    let first = Logger::new(Level::Info, &path).expect("first open");
    first.info("A", &[]);
    drop(first);

    let second = Logger::new(Level::Info, &path).expect("second open");
    second.info("B", &[]);
    drop(second);

    assert_eq!(fs::read_to_string(&path).expect("read"), "[INFO] A\n[INFO] B\n");
}

#[test]
fn set_level_changes_filtering_for_file_sink() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("levels.log");

    let logger = Logger::new(Level::Info, &path).expect("open");
    logger.set_level(Level::Error);
    logger.info("suppressed", &[]);
    logger.set_level(Level::Info);
    logger.info("emitted", &[]);
    drop(logger);

    assert_eq!(fs::read_to_string(&path).expect("read"), "[INFO] emitted\n");
}

#[test]
fn directory_path_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");

    let err = Logger::new(Level::Info, dir.path()).expect_err("directories are not writable files");
    assert!(matches!(err, LoggerError::SinkUnavailable { ref path, .. } if path == dir.path()));
    assert!(err.to_string().starts_with("cannot open log file"));
}

#[test]
fn missing_parent_directory_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no/such/dir/app.log");

    let err = Logger::new(Level::Info, &path).expect_err("parent is missing");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    let original: io::Error = err.into();
    assert_eq!(original.kind(), io::ErrorKind::NotFound);
}

#[test]
fn from_config_selects_sink() {
    let stdout = Logger::from_config(&LogConfig::default()).expect("stdout");
    assert!(stdout.is_stdout());
    assert_eq!(stdout.level(), Level::Info);

    let dir = tempfile::tempdir().expect("tempdir");
    let config = LogConfig {
        level: Level::Warn,
        path: dir.path().join("cfg.log").to_string_lossy().into_owned(),
    };
    let file = Logger::from_config(&config).expect("file");
    assert!(!file.is_stdout());
    assert_eq!(file.level(), Level::Warn);
}
