//! printf-style message interpolation and line rendering.
//!
//! Placeholders follow the conventions of the classic console formatters:
//!
//! | placeholder    | rendering                                  |
//! |----------------|--------------------------------------------|
//! | `%s`           | plain string form                          |
//! | `%d`           | numeric conversion, `NaN` when impossible  |
//! | `%i`           | integer conversion (truncating), or `NaN`  |
//! | `%f`           | floating point conversion, or `NaN`        |
//! | `%j`           | JSON form                                  |
//! | `%o` / `%O`    | inspected form (strings single-quoted)     |
//! | `%%`           | a literal `%`                              |
//!
//! A placeholder without a matching argument is left untouched and surplus
//! arguments are appended, separated by spaces.

use std::fmt::{self, Write};

/// Positional argument for deferred interpolation.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Arg {
    fn as_number(&self) -> f64 {
        match self {
            Arg::Str(s) => string_to_number(s),
            Arg::Int(v) => *v as f64,
            Arg::UInt(v) => *v as f64,
            Arg::Float(v) => *v,
            Arg::Bool(b) => f64::from(u8::from(*b)),
            Arg::Null => 0.0,
        }
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Arg::Str(s) => out.push_str(s),
            Arg::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::Float(v) => write_number(out, *v),
            Arg::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Arg::Null => out.push_str("null"),
        }
    }

    fn write_decimal(&self, out: &mut String) {
        match self {
            Arg::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            other => write_number(out, other.as_number()),
        }
    }

    fn write_integer(&self, out: &mut String) {
        match self {
            Arg::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::Float(v) => write_number(out, v.trunc()),
            Arg::Str(s) => match crate::severity::coerce_threshold(s) {
                Some(v) => {
                    let _ = write!(out, "{v}");
                }
                None => out.push_str("NaN"),
            },
            Arg::Bool(_) | Arg::Null => out.push_str("NaN"),
        }
    }

    fn write_float(&self, out: &mut String) {
        match self {
            Arg::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::Float(v) => write_number(out, *v),
            Arg::Str(s) => write_number(out, leading_float(s)),
            Arg::Bool(_) | Arg::Null => out.push_str("NaN"),
        }
    }

    fn write_json(&self, out: &mut String) {
        match self {
            Arg::Str(s) => write_quoted(out, s, '"'),
            Arg::Float(v) if !v.is_finite() => out.push_str("null"),
            other => other.write_plain(out),
        }
    }

    fn write_inspected(&self, out: &mut String) {
        match self {
            Arg::Str(s) => write_quoted(out, s, '\''),
            other => other.write_plain(out),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_plain(&mut out);
        f.write_str(&out)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Arg::Str(value.to_string())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Null, Into::into)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Arg::Int(i64::from(value))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(value: $t) -> Self {
                Arg::UInt(u64::from(value))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Arg::Int(value as i64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::UInt(value as u64)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

/// Writes a float the way a dynamic runtime prints numbers: integral values
/// without a fractional part, `NaN` and `Infinity` spelled out.
fn write_number(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    } else if value != 0.0 && (value.abs() >= 1e21 || value.abs() < 1e-6) {
        write_exponential(out, value);
    } else if value == value.trunc() {
        // -0.0 prints as 0.
        let _ = write!(out, "{:.0}", value + 0.0);
    } else {
        let _ = write!(out, "{value}");
    }
}

/// `1e-7`, `1.5e+21`: shortest mantissa, explicit exponent sign when positive.
fn write_exponential(out: &mut String, value: f64) {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            let _ = write!(out, "{mantissa}e+{exponent}");
        }
        _ => out.push_str(&formatted),
    }
}

/// Whole-string numeric conversion: surrounding whitespace is ignored, empty
/// is zero, `0x`/`0o`/`0b` literals and signed `Infinity` are understood, and
/// anything else must be a plain decimal literal or the result is NaN.
fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }

    let radix = match t.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &t[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits.chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        });
    }

    let (negative, unsigned) = match t.as_bytes()[0] {
        b'-' => (true, &t[1..]),
        b'+' => (false, &t[1..]),
        _ => (false, t),
    };
    if unsigned == "Infinity" {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    // Rust also accepts `inf` and `nan` spellings; only decimal literals pass here.
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn leading_float(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    if t[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY };
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn write_quoted(out: &mut String, s: &str, quote: char) {
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Interpolates `args` into `template`.
pub fn format_message(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(&spec) = chars.peek() else {
            out.push('%');
            break;
        };

        if spec == '%' {
            chars.next();
            out.push('%');
            continue;
        }

        if !matches!(spec, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O') {
            out.push('%');
            continue;
        }

        chars.next();
        match remaining.next() {
            Some(arg) => match spec {
                's' => arg.write_plain(&mut out),
                'd' => arg.write_decimal(&mut out),
                'i' => arg.write_integer(&mut out),
                'f' => arg.write_float(&mut out),
                'j' => arg.write_json(&mut out),
                _ => arg.write_inspected(&mut out),
            },
            None => {
                out.push('%');
                out.push(spec);
            }
        }
    }

    for arg in remaining {
        out.push(' ');
        arg.write_plain(&mut out);
    }

    out
}

/// Renders the line delivered to string sinks:
/// `[<level> <HH:MM:SS.mmm> <short location>] <message>`.
///
/// The location segment is dropped when `short_location` is empty.
pub fn render_line(level_name: &str, time: &str, short_location: &str, message: &str) -> String {
    let mut line =
        String::with_capacity(level_name.len() + time.len() + short_location.len() + message.len() + 5);
    line.push('[');
    line.push_str(level_name);
    line.push(' ');
    line.push_str(time);
    if !short_location.is_empty() {
        line.push(' ');
        line.push_str(short_location);
    }
    line.push_str("] ");
    line.push_str(message);
    line
}
