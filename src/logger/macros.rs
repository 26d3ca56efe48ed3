/// `log_info!(logger, "fmt", args...)`: converts each argument with `Arg::from`.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($msg, &[$($crate::logger::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($msg, &[$($crate::logger::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($msg, &[$($crate::logger::Arg::from($arg)),*])
    };
}
