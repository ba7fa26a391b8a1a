//! # levelog-core
//!
//! Leveled logging facade. Callers emit messages tagged with a [`Severity`];
//! messages passing the logger threshold are handed synchronously to any
//! registered sinks, either as a structured [`LogRecord`] or as a rendered
//! line such as `[info 09:04:01.042 main.rs:12:5] cart has 3 items`.
//!
//! The facade performs no I/O of its own and keeps nothing after an
//! emission returns.
//!
//! ```
//! use levelog_core::{line_fn, log_info, LevelLogger, Severity};
//!
//! let logger = LevelLogger::builder().threshold(Severity::Info).build();
//! logger.subscribe_formatted(line_fn(|line| {
//!     println!("{line}");
//!     Ok(())
//! }));
//! log_info!(logger, "%s has %d items", "cart", 3).unwrap();
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod callsite;
pub mod format;
pub mod logger;
mod macros;
pub mod severity;
pub mod sink;
pub mod time;

pub use callsite::{
    parse_stack_frame, BacktraceResolver, CallSite, CallSiteResolver, CallerResolver,
    NullResolver, ResolverKind,
};
pub use format::{format_message, render_line, Arg};
pub use logger::{DispatchMetrics, DispatchOutcome, LevelLogger, LevelLoggerBuilder};
pub use severity::{
    coerce_threshold, parse_threshold, Severity, ThresholdError, LOG_LEVEL_DEBUG,
    LOG_LEVEL_ERROR, LOG_LEVEL_INFO, LOG_LEVEL_NONE, LOG_LEVEL_WARNING,
};
pub use sink::{
    line_fn, record_fn, Channel, LogRecord, SinkError, StringSink, StructuredSink,
    SubscriptionId, WriterSink,
};
pub use time::{format_time, Clock, FixedClock, SystemClock};
