//! Emission macros taking printf-style arguments inline.
//!
//! `log_info!(logger, "%s has %d items", name, count)` expands to
//! `logger.info("%s has %d items", &[Arg::from(name), Arg::from(count)])`.
//! Call-site capture still points at the macro invocation.

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($fmt, &[$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($fmt, &[$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($fmt, &[$($crate::Arg::from($arg)),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($fmt, &[$($crate::Arg::from($arg)),*])
    };
}
