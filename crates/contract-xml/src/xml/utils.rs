//! Constants and lexical formatting helpers for XML output.
//!
//! The formatters produce XML Schema lexical forms for primitive values.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// XML Schema instance namespace URI (`xsi:type`, `xsi:nil`).
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix bound to [`XSI_NAMESPACE`] on the root element.
pub const XSI_PREFIX: &str = "i";

/// Prefix of elements whose content is a qualified name.
pub const ELEMENT_PREFIX: &str = "q";

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Formats a double with the special values spelled the XML Schema way.
pub fn f64_to_string(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "INF".to_string()
    } else if v == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        v.to_string()
    }
}

/// Formats a float with the special values spelled the XML Schema way.
pub fn f32_to_string(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f32::INFINITY {
        "INF".to_string()
    } else if v == f32::NEG_INFINITY {
        "-INF".to_string()
    } else {
        v.to_string()
    }
}

/// ISO-8601 UTC timestamp with trailing `Z` and only as many fraction digits
/// as needed.
pub fn date_time_to_string(v: &DateTime<Utc>) -> String {
    v.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// `xs:duration` form of a time span, e.g. `P1DT2H3M4.5S` or `-PT1S`.
pub fn duration_to_string(v: TimeDelta) -> String {
    let mut out = String::new();
    if v < TimeDelta::zero() {
        out.push('-');
    }
    let v = v.abs();
    let total_seconds = v.num_seconds();
    let nanos = v.subsec_nanos();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    out.push('P');
    if days > 0 {
        out.push_str(&format!("{days}D"));
    }
    if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
        if days == 0 {
            out.push_str("T0S");
        }
        return out;
    }
    out.push('T');
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || nanos > 0 {
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
        } else {
            out.push_str(&format!("{seconds}S"));
        }
    }
    out
}

/// Base64 text of a byte array.
pub fn bytes_to_string(v: &[u8]) -> String {
    STANDARD.encode(v)
}

/// A character is written as its numeric code point.
pub fn char_to_string(v: char) -> String {
    u32::from(v).to_string()
}
