use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::host::AttributeSource;

/// Autoplay interval in milliseconds; `0` turns autoplay off.
pub const INTERVAL_ATTRIBUTE: &str = "interval";

/// Attributes whose edits must be forwarded to `attribute_changed`.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[INTERVAL_ATTRIBUTE];

/// Reads an interval the way markup attributes are read: leading whitespace
/// is skipped, then an optional sign and the leading run of digits. Anything
/// without digits, or negative, is `0`.
pub fn normalize_interval(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return 0;
    }
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntervalSetting {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl Default for IntervalSetting {
    fn default() -> Self {
        IntervalSetting::Millis(0)
    }
}

impl IntervalSetting {
    pub fn normalized(&self) -> u64 {
        match self {
            IntervalSetting::Millis(n) => u64::try_from(*n).unwrap_or(0),
            IntervalSetting::Fractional(f) if f.is_finite() && *f >= 0.0 => f.trunc() as u64,
            IntervalSetting::Fractional(_) => 0,
            IntervalSetting::Text(s) => normalize_interval(Some(s)),
        }
    }
}

/// Host-side configuration for a carousel, e.g. loaded from a page manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval: IntervalSetting,
}

impl CarouselConfig {
    pub fn interval_ms(&self) -> u64 {
        self.interval.normalized()
    }

    /// Writes the configuration onto a host's attributes.
    pub fn apply(&self, attributes: &dyn AttributeSource) {
        attributes.set_attribute(INTERVAL_ATTRIBUTE, &self.interval_ms().to_string());
    }
}

/// Attribute bag for headless hosts.
#[derive(Default)]
pub struct MemoryAttributes(RefCell<HashMap<String, String>>);

impl MemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }
}

impl AttributeSource for MemoryAttributes {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().insert(name.to_owned(), value.to_owned());
    }
}
