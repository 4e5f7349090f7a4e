//! Form rule sets
//!
//! Every form field owns an ordered slice of pure rules. A rule maps the
//! field's current value to `Ok(())` or a human-readable failure message. A
//! field is valid when every rule in its slice passes; rules of different
//! fields never depend on each other.

pub mod document;
pub mod employee;

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

pub use document::validate_document;
pub use employee::validate_employee;

/// Outcome of a single rule
pub type RuleResult = Result<(), &'static str>;

/// A single field rule
pub type Rule<V> = fn(&V, &RuleContext) -> RuleResult;

/// Evaluation context shared by all rules of one validation pass.
///
/// Date rules compare against `now` instead of reading the clock themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    now: NaiveDateTime,
}

impl RuleContext {
    /// Context pinned to the local wall clock
    pub fn now() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    /// Context pinned to a fixed instant
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn current_time(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// Run every rule against `value` and collect the failures in order.
pub fn check<V: ?Sized>(rules: &[Rule<V>], value: &V, ctx: &RuleContext) -> Vec<&'static str> {
    rules
        .iter()
        .filter_map(|rule| rule(value, ctx).err())
        .collect()
}

/// First failing message, if any
pub fn first_error<V: ?Sized>(rules: &[Rule<V>], value: &V, ctx: &RuleContext) -> Option<&'static str> {
    rules.iter().find_map(|rule| rule(value, ctx).err())
}

pub fn is_valid<V: ?Sized>(rules: &[Rule<V>], value: &V, ctx: &RuleContext) -> bool {
    first_error(rules, value, ctx).is_none()
}

/// Failure messages of a whole form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<&'static str>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failures of `field`; empty lists are ignored
    pub fn add(&mut self, field: &'static str, messages: Vec<&'static str>) {
        if !messages.is_empty() {
            self.fields.insert(field, messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[&'static str]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    pub(crate) fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ── Shared helpers ──────────────────────────────────────────────────

pub(crate) fn is_blank(value: &str) -> bool {
    value.is_empty()
}

/// Length in Unicode scalar values
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Parse a form date or date-time value.
///
/// Accepts RFC 3339 (converted to local time), `YYYY-MM-DDTHH:MM[:SS]`,
/// `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD` (midnight).
pub(crate) fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
