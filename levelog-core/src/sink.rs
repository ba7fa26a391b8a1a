//! Subscriber channels.
//!
//! A logger notifies two independent channels: structured sinks receive a
//! [`LogRecord`], string sinks receive the rendered line. Sinks are invoked
//! synchronously on the emitting thread, in registration order.

use std::fmt;
use std::io::Write;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::format::Arg;
use crate::severity::Severity;

/// Notification channel a sink is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Structured records, historically named `logObject`.
    Structured,
    /// Preformatted lines, historically named `logString`.
    Formatted,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Structured => "logObject",
            Channel::Formatted => "logString",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned on registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId {
    pub(crate) id: u64,
    pub(crate) channel: Channel,
}

impl SubscriptionId {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Failure reported by a sink. Returned unchanged to the emitting caller.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink rejected record: {0}")]
    Rejected(String),

    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One emission as seen by a structured sink. Borrowed for the duration of
/// the notification only.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: Severity,
    /// Lowercase level name: `error`, `warning`, `info` or `debug`.
    pub level_name: &'static str,
    pub timestamp: DateTime<Local>,
    /// Long call-site form, empty when it could not be resolved.
    pub location: &'a str,
    /// Uninterpolated message template.
    pub message: &'a str,
    pub args: &'a [Arg],
}

impl LogRecord<'_> {
    /// Interpolates the message against its arguments.
    pub fn rendered_message(&self) -> String {
        crate::format::format_message(self.message, self.args)
    }
}

/// Receiver for the structured channel.
pub trait StructuredSink: Send + Sync {
    fn on_record(&self, record: &LogRecord<'_>) -> Result<(), SinkError>;
}

/// Receiver for the formatted-string channel.
pub trait StringSink: Send + Sync {
    fn on_line(&self, line: &str) -> Result<(), SinkError>;
}

impl<F> StructuredSink for F
where
    F: Fn(&LogRecord<'_>) -> Result<(), SinkError> + Send + Sync,
{
    fn on_record(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        self(record)
    }
}

impl<F> StringSink for F
where
    F: Fn(&str) -> Result<(), SinkError> + Send + Sync,
{
    fn on_line(&self, line: &str) -> Result<(), SinkError> {
        self(line)
    }
}

/// Wraps a closure as a [`StructuredSink`], letting the compiler infer its signature.
pub fn record_fn<F>(f: F) -> F
where
    F: Fn(&LogRecord<'_>) -> Result<(), SinkError> + Send + Sync + 'static,
{
    f
}

/// Wraps a closure as a [`StringSink`], letting the compiler infer its signature.
pub fn line_fn<F>(f: F) -> F
where
    F: Fn(&str) -> Result<(), SinkError> + Send + Sync + 'static,
{
    f
}

/// Writes every line to an `io::Write` target, one per line.
pub struct WriterSink<W> {
    writer: parking_lot::Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: parking_lot::Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> StringSink for WriterSink<W> {
    fn on_line(&self, line: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}
