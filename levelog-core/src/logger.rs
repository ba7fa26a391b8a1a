//! The leveled logger.
//!
//! One [`LevelLogger`] is built at startup and shared by reference (usually
//! behind an `Arc`) with every component that logs. There is no hidden global.
//!
//! Emission path:
//!
//! 1. messages more verbose than the threshold are dropped,
//! 2. with no sinks registered nothing else happens (no clock read, no call-site lookup),
//! 3. otherwise timestamp and call site are captured once and handed to the
//!    structured sinks, then the rendered line to the string sinks.

use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::callsite::{CallSiteResolver, CallerResolver};
use crate::format::{format_message, render_line, Arg};
use crate::severity::{coerce_threshold, Severity};
use crate::sink::{Channel, LogRecord, SinkError, StringSink, StructuredSink, SubscriptionId};
use crate::time::{format_time, Clock, SystemClock};

/// What happened to a single emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// More verbose than the threshold.
    Suppressed,
    /// Passed the threshold but nobody was listening.
    Unheard,
    /// Handed to every sink.
    Delivered,
    /// A sink returned an error, cutting the notification short.
    Failed,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchOutcome::Suppressed => "suppressed",
            DispatchOutcome::Unheard => "unheard",
            DispatchOutcome::Delivered => "delivered",
            DispatchOutcome::Failed => "failed",
        }
    }
}

/// Hook for counting dispatch outcomes.
pub trait DispatchMetrics: Send + Sync {
    fn record(&self, level: Severity, outcome: DispatchOutcome);
}

struct Subscription<S: ?Sized> {
    id: u64,
    sink: Arc<S>,
}

/// Leveled logging facade with structured and formatted sinks.
pub struct LevelLogger {
    threshold: AtomicU8,
    next_id: AtomicU64,
    structured: RwLock<Vec<Subscription<dyn StructuredSink>>>,
    formatted: RwLock<Vec<Subscription<dyn StringSink>>>,
    resolver: Box<dyn CallSiteResolver>,
    clock: Box<dyn Clock>,
    include_location: bool,
    metrics: Option<Arc<dyn DispatchMetrics>>,
}

impl Default for LevelLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LevelLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelLogger")
            .field("threshold", &self.threshold())
            .field("structured", &self.structured_count())
            .field("formatted", &self.formatted_count())
            .field("include_location", &self.include_location)
            .finish_non_exhaustive()
    }
}

impl LevelLogger {
    /// Logger with threshold [`Severity::Warning`], caller-location call
    /// sites and the system clock.
    pub fn new() -> Self {
        LevelLoggerBuilder::default().build()
    }

    pub fn builder() -> LevelLoggerBuilder {
        LevelLoggerBuilder::default()
    }

    pub fn threshold(&self) -> Severity {
        // Only valid discriminants are ever stored.
        Severity::from_value(i64::from(self.threshold.load(Ordering::Acquire)))
            .unwrap_or_default()
    }

    pub fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold.value(), Ordering::Release);
    }

    /// Sets the threshold from loosely typed input.
    ///
    /// The input is coerced to its leading integer. Values outside `[0, 4]`
    /// and input without digits leave the threshold unchanged. Returns
    /// whether the threshold was replaced.
    pub fn set_threshold_lenient(&self, raw: &str) -> bool {
        match coerce_threshold(raw).and_then(Severity::from_value) {
            Some(threshold) => {
                self.set_threshold(threshold);
                true
            }
            None => false,
        }
    }

    /// Whether a message at `level` would pass the threshold.
    pub fn enabled(&self, level: Severity) -> bool {
        level != Severity::None && self.threshold().allows(level)
    }

    pub fn subscribe_structured<S>(&self, sink: S) -> SubscriptionId
    where
        S: StructuredSink + 'static,
    {
        self.subscribe_structured_arc(Arc::new(sink))
    }

    /// Registers an already shared sink. The same sink may be registered
    /// several times and is then notified once per registration.
    pub fn subscribe_structured_arc(&self, sink: Arc<dyn StructuredSink>) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.structured.write().push(Subscription { id, sink });
        SubscriptionId {
            id,
            channel: Channel::Structured,
        }
    }

    pub fn subscribe_formatted<S>(&self, sink: S) -> SubscriptionId
    where
        S: StringSink + 'static,
    {
        self.subscribe_formatted_arc(Arc::new(sink))
    }

    pub fn subscribe_formatted_arc(&self, sink: Arc<dyn StringSink>) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.formatted.write().push(Subscription { id, sink });
        SubscriptionId {
            id,
            channel: Channel::Formatted,
        }
    }

    /// Removes a registration. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        match subscription.channel {
            Channel::Structured => remove_subscription(&self.structured, subscription.id),
            Channel::Formatted => remove_subscription(&self.formatted, subscription.id),
        }
    }

    pub fn structured_count(&self) -> usize {
        self.structured.read().len()
    }

    pub fn formatted_count(&self) -> usize {
        self.formatted.read().len()
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::Structured => self.structured_count(),
            Channel::Formatted => self.formatted_count(),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Debug, message, args)
    }

    #[track_caller]
    pub fn info(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Info, message, args)
    }

    #[track_caller]
    pub fn warn(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Warning, message, args)
    }

    #[track_caller]
    pub fn error(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Error, message, args)
    }

    /// Same as [`LevelLogger::warn`].
    #[track_caller]
    pub fn warning(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Warning, message, args)
    }

    /// Same as [`LevelLogger::info`].
    #[track_caller]
    pub fn log(&self, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.emit(Severity::Info, message, args)
    }

    /// Emits `message` at `level`.
    ///
    /// Only a sink failure is reported; the first failing sink stops the
    /// remaining notifications of this emission and its error is returned
    /// as is. Messages at [`Severity::None`] are ignored.
    #[track_caller]
    pub fn emit(&self, level: Severity, message: &str, args: &[Arg]) -> Result<(), SinkError> {
        self.dispatch(level, message, args, Location::caller())
    }

    fn dispatch(
        &self,
        level: Severity,
        message: &str,
        args: &[Arg],
        caller: &'static Location<'static>,
    ) -> Result<(), SinkError> {
        let Some(level_name) = level.name() else {
            trace!("ignoring log event without a level");
            return Ok(());
        };

        if !self.threshold().allows(level) {
            trace!(level = level_name, "log event below level");
            self.record(level, DispatchOutcome::Suppressed);
            return Ok(());
        }

        // Snapshot so sinks can log or (un)subscribe without holding the lock.
        let structured = snapshot(&self.structured);
        let formatted = snapshot(&self.formatted);

        if structured.is_empty() && formatted.is_empty() {
            trace!(level = level_name, "log event above level, but no listeners");
            self.record(level, DispatchOutcome::Unheard);
            return Ok(());
        }

        let timestamp = self.clock.now();
        let site = self.resolver.resolve(caller);

        let deliver = || -> Result<(), SinkError> {
            if !structured.is_empty() {
                let record = LogRecord {
                    level,
                    level_name,
                    timestamp,
                    location: &site.long,
                    message,
                    args,
                };
                for sink in &structured {
                    sink.on_record(&record)?;
                }
            }

            if !formatted.is_empty() {
                let short = if self.include_location { site.short.as_str() } else { "" };
                let line = render_line(
                    level_name,
                    &format_time(&timestamp),
                    short,
                    &format_message(message, args),
                );
                for sink in &formatted {
                    sink.on_line(&line)?;
                }
            }
            Ok(())
        };

        let result = deliver();
        let outcome = if result.is_ok() {
            DispatchOutcome::Delivered
        } else {
            DispatchOutcome::Failed
        };
        self.record(level, outcome);
        result
    }

    fn record(&self, level: Severity, outcome: DispatchOutcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record(level, outcome);
        }
    }
}

fn snapshot<S: ?Sized>(list: &RwLock<Vec<Subscription<S>>>) -> Vec<Arc<S>> {
    list.read().iter().map(|s| Arc::clone(&s.sink)).collect()
}

fn remove_subscription<S: ?Sized>(list: &RwLock<Vec<Subscription<S>>>, id: u64) -> bool {
    let mut list = list.write();
    match list.iter().position(|s| s.id == id) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// Builder for [`LevelLogger`].
pub struct LevelLoggerBuilder {
    threshold: Severity,
    resolver: Box<dyn CallSiteResolver>,
    clock: Box<dyn Clock>,
    include_location: bool,
    metrics: Option<Arc<dyn DispatchMetrics>>,
}

impl Default for LevelLoggerBuilder {
    fn default() -> Self {
        Self {
            threshold: Severity::default(),
            resolver: Box::new(CallerResolver),
            clock: Box::new(SystemClock),
            include_location: true,
            metrics: None,
        }
    }
}

impl LevelLoggerBuilder {
    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn resolver(mut self, resolver: Box<dyn CallSiteResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Whether rendered lines carry the short call site after the timestamp.
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = include;
        self
    }

    pub fn metrics(mut self, metrics: Arc<dyn DispatchMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> LevelLogger {
        LevelLogger {
            threshold: AtomicU8::new(self.threshold.value()),
            next_id: AtomicU64::new(0),
            structured: RwLock::new(Vec::new()),
            formatted: RwLock::new(Vec::new()),
            resolver: self.resolver,
            clock: self.clock,
            include_location: self.include_location,
            metrics: self.metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite::{CallSite, NullResolver};
    use crate::sink::{line_fn, record_fn};
    use crate::time::FixedClock;
    use chrono::TimeZone;
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn fixed_clock() -> FixedClock {
        FixedClock(
            chrono::Local
                .with_ymd_and_hms(2024, 5, 17, 9, 4, 1)
                .single()
                .unwrap()
                + chrono::Duration::milliseconds(42),
        )
    }

    fn collecting_lines(logger: &LevelLogger) -> Arc<Mutex<Vec<String>>> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink_lines = Arc::clone(&lines);
        logger.subscribe_formatted(line_fn(move |line| {
            sink_lines.lock().push(line.to_string());
            Ok(())
        }));
        lines
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Seen {
        level_name: &'static str,
        location: String,
        message: String,
        args: Vec<Arg>,
    }

    fn collecting_records(logger: &LevelLogger) -> Arc<Mutex<Vec<Seen>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        logger.subscribe_structured(record_fn(move |record| {
            sink_seen.lock().push(Seen {
                level_name: record.level_name,
                location: record.location.to_string(),
                message: record.message.to_string(),
                args: record.args.to_vec(),
            });
            Ok(())
        }));
        seen
    }

    #[derive(Default)]
    struct Tally(Mutex<Vec<(Severity, DispatchOutcome)>>);

    impl DispatchMetrics for Tally {
        fn record(&self, level: Severity, outcome: DispatchOutcome) {
            self.0.lock().push((level, outcome));
        }
    }

    struct CountingClock {
        reads: Arc<AtomicU64>,
        inner: FixedClock,
    }

    impl Clock for CountingClock {
        fn now(&self) -> chrono::DateTime<chrono::Local> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.now()
        }
    }

    struct CountingResolver(Arc<AtomicU64>);

    impl CallSiteResolver for CountingResolver {
        fn resolve(&self, caller: &'static Location<'static>) -> CallSite {
            self.0.fetch_add(1, Ordering::SeqCst);
            CallerResolver.resolve(caller)
        }
    }

    #[test]
    fn default_threshold_is_warning() {
        assert_eq!(LevelLogger::new().threshold(), Severity::Warning);
    }

    #[test]
    fn lenient_setter_ignores_out_of_range_and_garbage() {
        let logger = LevelLogger::new();
        assert!(logger.set_threshold_lenient("4"));
        assert_eq!(logger.threshold(), Severity::Debug);
        assert!(!logger.set_threshold_lenient("5"));
        assert!(!logger.set_threshold_lenient("-1"));
        assert!(!logger.set_threshold_lenient("loud"));
        assert_eq!(logger.threshold(), Severity::Debug);
        assert!(logger.set_threshold_lenient("1.7"));
        assert_eq!(logger.threshold(), Severity::Error);
    }

    #[test]
    fn below_threshold_notifies_nobody() {
        let logger = LevelLogger::builder().threshold(Severity::Warning).build();
        let lines = collecting_lines(&logger);
        let records = collecting_records(&logger);
        logger.info("quiet", &[]).unwrap();
        logger.debug("quieter", &[]).unwrap();
        assert!(lines.lock().is_empty());
        assert!(records.lock().is_empty());
    }

    #[test]
    fn none_threshold_silences_errors() {
        let logger = LevelLogger::builder().threshold(Severity::None).build();
        let lines = collecting_lines(&logger);
        logger.error("boom", &[]).unwrap();
        assert!(lines.lock().is_empty());
    }

    #[test]
    fn structured_sink_sees_level_location_and_args() {
        let logger = LevelLogger::builder().threshold(Severity::Debug).build();
        let records = collecting_records(&logger);
        logger.error("%s failed", &["job".into()]).unwrap();

        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level_name, "error");
        assert_eq!(records[0].message, "%s failed");
        assert_eq!(records[0].args, vec![Arg::from("job")]);
        assert!(records[0].location.contains("logger.rs:"));
    }

    #[test]
    fn formatted_line_has_level_time_and_location() {
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .clock(fixed_clock())
            .build();
        let lines = collecting_lines(&logger);
        let line_no = line!() + 1;
        logger.info("%s has %d items", &["cart".into(), 3.into()]).unwrap();

        let lines = lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[info 09:04:01.042 logger.rs:"));
        assert!(lines[0].contains(&format!("logger.rs:{line_no}:")));
        assert!(lines[0].ends_with("] cart has 3 items"));
    }

    #[test]
    fn location_can_be_left_out_of_lines() {
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .clock(fixed_clock())
            .include_location(false)
            .build();
        let lines = collecting_lines(&logger);
        logger.warning("careful", &[]).unwrap();
        assert_eq!(lines.lock().as_slice(), ["[warning 09:04:01.042] careful"]);
    }

    #[test]
    fn null_resolver_yields_empty_location() {
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .clock(fixed_clock())
            .resolver(Box::new(NullResolver))
            .build();
        let lines = collecting_lines(&logger);
        let records = collecting_records(&logger);
        logger.info("x", &[]).unwrap();
        assert_eq!(lines.lock().as_slice(), ["[info 09:04:01.042] x"]);
        assert_eq!(records.lock()[0].location, "");
    }

    #[test]
    fn aliases_match_primary_methods() {
        let logger = LevelLogger::builder()
            .threshold(Severity::Debug)
            .clock(fixed_clock())
            .include_location(false)
            .build();
        let lines = collecting_lines(&logger);
        logger.warn("x", &[]).unwrap();
        logger.warning("x", &[]).unwrap();
        logger.info("y", &[]).unwrap();
        logger.log("y", &[]).unwrap();

        let lines = lines.lock();
        assert_eq!(lines[0], lines[1]);
        assert_eq!(lines[2], lines[3]);
        assert!(lines[0].starts_with("[warning "));
        assert!(lines[2].starts_with("[info "));
    }

    #[test]
    fn one_emission_notifies_each_channel_once() {
        let logger = LevelLogger::builder().threshold(Severity::Debug).build();
        let lines = collecting_lines(&logger);
        let records = collecting_records(&logger);
        logger.debug("hi", &[]).unwrap();
        assert_eq!(lines.lock().len(), 1);
        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn duplicate_registrations_are_each_notified() {
        let logger = LevelLogger::builder().threshold(Severity::Info).build();
        let count = Arc::new(AtomicU64::new(0));
        let sink_count = Arc::clone(&count);
        let sink: Arc<dyn StringSink> = Arc::new(line_fn(move |_| {
            sink_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        let first = logger.subscribe_formatted_arc(Arc::clone(&sink));
        logger.subscribe_formatted_arc(sink);
        logger.info("twice", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert!(logger.unsubscribe(first));
        assert!(!logger.unsubscribe(first));
        logger.info("once", &[]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(logger.formatted_count(), 1);
    }

    #[test]
    fn sink_failure_reaches_caller_and_stops_dispatch() {
        let logger = LevelLogger::builder().threshold(Severity::Info).build();
        logger.subscribe_formatted(line_fn(|_| Err(SinkError::Rejected("full".into()))));
        let lines = collecting_lines(&logger);

        let err = logger.info("x", &[]).unwrap_err();
        assert!(matches!(err, SinkError::Rejected(ref reason) if reason == "full"));
        assert!(lines.lock().is_empty());
    }

    #[test]
    fn sinks_may_log_reentrantly() {
        let logger = Arc::new(LevelLogger::builder().threshold(Severity::Debug).build());
        let inner = Arc::clone(&logger);
        logger.subscribe_structured(record_fn(move |record| {
            if record.level == Severity::Error {
                inner.debug("nested", &[])?;
            }
            Ok(())
        }));
        let lines = collecting_lines(&logger);
        logger.error("outer", &[]).unwrap();
        assert_eq!(lines.lock().len(), 2);
    }

    #[test]
    fn metrics_hook_sees_every_outcome() {
        let tally = Arc::new(Tally::default());
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .metrics(tally.clone())
            .build();
        logger.debug("a", &[]).unwrap();
        logger.info("b", &[]).unwrap();
        collecting_lines(&logger);
        logger.error("c", &[]).unwrap();

        assert_eq!(
            tally.0.lock().as_slice(),
            [
                (Severity::Debug, DispatchOutcome::Suppressed),
                (Severity::Info, DispatchOutcome::Unheard),
                (Severity::Error, DispatchOutcome::Delivered),
            ]
        );
    }

    #[test]
    fn failing_sink_is_counted_before_the_error_returns() {
        let tally = Arc::new(Tally::default());
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .metrics(tally.clone())
            .build();
        logger.subscribe_structured(record_fn(|_| Err(SinkError::Rejected("closed".into()))));

        assert!(logger.warn("w", &[]).is_err());
        assert_eq!(
            tally.0.lock().as_slice(),
            [(Severity::Warning, DispatchOutcome::Failed)]
        );
        assert_eq!(DispatchOutcome::Failed.as_str(), "failed");
    }

    #[test]
    fn clock_and_resolver_are_untouched_until_someone_listens() {
        let reads = Arc::new(AtomicU64::new(0));
        let resolves = Arc::new(AtomicU64::new(0));
        let logger = LevelLogger::builder()
            .threshold(Severity::Info)
            .clock(CountingClock {
                reads: Arc::clone(&reads),
                inner: fixed_clock(),
            })
            .resolver(Box::new(CountingResolver(Arc::clone(&resolves))))
            .build();

        logger.debug("suppressed", &[]).unwrap();
        logger.error("unheard", &[]).unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 0);
        assert_eq!(resolves.load(Ordering::SeqCst), 0);

        let lines = collecting_lines(&logger);
        logger.debug("still suppressed", &[]).unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 0);
        assert_eq!(resolves.load(Ordering::SeqCst), 0);

        let records = collecting_records(&logger);
        logger.info("heard", &[]).unwrap();
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(resolves.load(Ordering::SeqCst), 1);
        assert_eq!(lines.lock().len(), 1);
        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn sinks_run_in_registration_order_on_each_channel() {
        let logger = LevelLogger::builder().threshold(Severity::Info).build();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["line-a", "line-b", "line-c"] {
            let order = Arc::clone(&order);
            logger.subscribe_formatted(line_fn(move |_| {
                order.lock().push(label);
                Ok(())
            }));
        }
        for label in ["record-a", "record-b", "record-c"] {
            let order = Arc::clone(&order);
            logger.subscribe_structured(record_fn(move |_| {
                order.lock().push(label);
                Ok(())
            }));
        }

        logger.info("ordered", &[]).unwrap();
        assert_eq!(
            order.lock().as_slice(),
            ["record-a", "record-b", "record-c", "line-a", "line-b", "line-c"]
        );
    }

    #[test]
    fn unsubscribing_keeps_the_order_of_the_rest() {
        let logger = LevelLogger::builder().threshold(Severity::Info).build();
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut ids = Vec::new();
        for label in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            ids.push(logger.subscribe_formatted(line_fn(move |_| {
                order.lock().push(label);
                Ok(())
            })));
        }

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(logger.unsubscribe(ids[1]));
        logger.info("x", &[]).unwrap();
        assert_eq!(order.lock().as_slice(), ["a", "c"]);
    }

    #[test]
    fn none_level_is_never_dispatched() {
        let logger = LevelLogger::builder().threshold(Severity::Debug).build();
        let lines = collecting_lines(&logger);
        logger.emit(Severity::None, "nothing", &[]).unwrap();
        assert!(lines.lock().is_empty());
        assert!(!logger.enabled(Severity::None));
    }

    #[traced_test]
    #[test]
    fn diagnostics_go_to_tracing() {
        let logger = LevelLogger::builder().threshold(Severity::Warning).build();
        logger.debug("dropped", &[]).unwrap();
        logger.error("unheard", &[]).unwrap();
        assert!(logs_contain("log event below level"));
        assert!(logs_contain("log event above level, but no listeners"));
    }

    proptest! {
        #[test]
        fn typed_setter_round_trips(value in 0u8..=4) {
            let logger = LevelLogger::new();
            let level = Severity::try_from(value).unwrap();
            logger.set_threshold(level);
            prop_assert_eq!(logger.threshold(), level);
        }

        #[test]
        fn lenient_setter_only_accepts_range(value in -1000i64..1000, start in 0u8..=4) {
            let logger = LevelLogger::new();
            let before = Severity::try_from(start).unwrap();
            logger.set_threshold(before);
            let replaced = logger.set_threshold_lenient(&value.to_string());
            if (0..=4).contains(&value) {
                prop_assert!(replaced);
                prop_assert_eq!(logger.threshold().value() as i64, value);
            } else {
                prop_assert!(!replaced);
                prop_assert_eq!(logger.threshold(), before);
            }
        }

        #[test]
        fn messages_above_threshold_are_dropped(threshold in 0u8..=4, level in 1u8..=4) {
            let logger = LevelLogger::builder()
                .threshold(Severity::try_from(threshold).unwrap())
                .build();
            let lines = collecting_lines(&logger);
            logger.emit(Severity::try_from(level).unwrap(), "m", &[]).unwrap();
            prop_assert_eq!(lines.lock().len(), usize::from(threshold >= level));
        }
    }
}
