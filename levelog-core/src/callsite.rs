//! Call-site resolution.
//!
//! Every emission method is `#[track_caller]`, so the cheapest resolver just
//! reads the caller [`Location`]. [`BacktraceResolver`] walks a captured
//! backtrace instead and is best effort: frames without symbols or debug info
//! resolve to empty strings.
//!
//! All parsing here is total. Malformed input degrades to empty fields.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a message was emitted from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSite {
    /// Full location as captured, e.g. `app::run (/srv/app/src/main.rs:10:5)`.
    pub long: String,
    /// Location with any wrapper and directory prefix stripped, e.g. `main.rs:10:5`.
    pub short: String,
}

impl CallSite {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_long(long: impl Into<String>) -> Self {
        let long = long.into();
        let short = short_location(&long);
        Self { long, short }
    }

    pub fn is_empty(&self) -> bool {
        self.long.is_empty()
    }
}

/// Derives the short form of a long location.
///
/// Takes the contents of the first parenthesised segment if there is one,
/// then whatever follows the last path separator.
pub fn short_location(long: &str) -> String {
    let mut short = long;

    if let Some(open) = short.find('(') {
        let inner = &short[open + 1..];
        short = match inner.rfind(')') {
            Some(close) => &inner[..close],
            None => inner,
        };
    }

    if let Some(sep) = short.rfind(['/', '\\']) {
        short = &short[sep + 1..];
    }

    short.to_string()
}

/// Extracts the call site from a textual stack trace.
///
/// The trace starts with one descriptive line followed by one frame per line,
/// innermost first. `skip` frames are skipped, so line `skip + 1` is read and
/// the text after its first `"at "` becomes the long location.
pub fn parse_stack_frame(stack: &str, skip: usize) -> CallSite {
    let Some(line) = stack.lines().nth(skip + 1) else {
        return CallSite::empty();
    };
    match line.find("at ") {
        Some(idx) => CallSite::from_long(&line[idx + 3..]),
        None => CallSite::empty(),
    }
}

/// Resolves the location of the code that emitted a message.
pub trait CallSiteResolver: Send + Sync {
    /// `caller` is the `#[track_caller]` location of the emission method.
    fn resolve(&self, caller: &'static Location<'static>) -> CallSite;
}

/// Uses the compiler-provided caller location.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerResolver;

impl CallSiteResolver for CallerResolver {
    fn resolve(&self, caller: &'static Location<'static>) -> CallSite {
        CallSite::from_long(format!(
            "{}:{}:{}",
            caller.file(),
            caller.line(),
            caller.column()
        ))
    }
}

/// Resolves by capturing and parsing a runtime backtrace.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceResolver;

/// Symbol prefixes belonging to backtrace capture or to the logger itself.
const INTERNAL_FRAME_PREFIXES: &[&str] = &[
    "std::backtrace",
    "std::backtrace_rs",
    "backtrace::",
    "levelog_core::callsite::",
    "<levelog_core::callsite::",
    "levelog_core::logger::",
];

impl BacktraceResolver {
    fn is_internal(symbol: &str) -> bool {
        INTERNAL_FRAME_PREFIXES
            .iter()
            .any(|prefix| symbol.starts_with(prefix))
    }

    /// Rewrites the std backtrace listing into one `at symbol (file:line:col)`
    /// line per frame, behind a single header line. Returns the text and the
    /// number of leading internal frames.
    fn normalize(rendered: &str) -> (String, usize) {
        let mut frames: Vec<(String, Option<String>)> = Vec::new();

        for raw in rendered.lines() {
            let line = raw.trim();
            if let Some(location) = line.strip_prefix("at ") {
                if let Some(last) = frames.last_mut() {
                    if last.1.is_none() {
                        last.1 = Some(location.to_string());
                    }
                }
                continue;
            }
            if let Some((index, symbol)) = line.split_once(": ") {
                if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                    frames.push((symbol.trim().to_string(), None));
                }
            }
        }

        let skip = frames
            .iter()
            .take_while(|(symbol, _)| Self::is_internal(symbol))
            .count();

        let mut text = String::from("Backtrace\n");
        for (symbol, location) in &frames {
            match location {
                Some(location) => text.push_str(&format!("    at {symbol} ({location})\n")),
                None => text.push_str(&format!("    at {symbol}\n")),
            }
        }
        (text, skip)
    }
}

impl CallSiteResolver for BacktraceResolver {
    fn resolve(&self, _caller: &'static Location<'static>) -> CallSite {
        let rendered = Backtrace::force_capture().to_string();
        let (text, skip) = Self::normalize(&rendered);
        parse_stack_frame(&text, skip)
    }
}

/// Resolver for platforms or builds where call sites are not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl CallSiteResolver for NullResolver {
    fn resolve(&self, _caller: &'static Location<'static>) -> CallSite {
        CallSite::empty()
    }
}

/// Resolver selection, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    #[default]
    Caller,
    Backtrace,
    None,
}

impl ResolverKind {
    pub fn resolver(self) -> Box<dyn CallSiteResolver> {
        match self {
            ResolverKind::Caller => Box::new(CallerResolver),
            ResolverKind::Backtrace => Box::new(BacktraceResolver),
            ResolverKind::None => Box::new(NullResolver),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResolverKind::Caller => "caller",
            ResolverKind::Backtrace => "backtrace",
            ResolverKind::None => "none",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caller" => Ok(ResolverKind::Caller),
            "backtrace" => Ok(ResolverKind::Backtrace),
            "none" => Ok(ResolverKind::None),
            other => Err(format!("unknown call-site resolver: {other}")),
        }
    }
}
