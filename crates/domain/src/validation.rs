//! Field validation that reports every failing field at once.
//!
//! Rules are plain functions returning `Result<(), String>` (the error is the
//! human-readable message). A [`Violations`] collector records failures under
//! a field name so callers can run every rule before deciding to reject.
//!
//! ```
//! use servicecore_domain::validation::{self, Violations};
//!
//! let mut violations = Violations::default();
//! violations.check("title", validation::not_blank(""));
//! violations.check("lat", validation::latitude("12.5").map(|_| ()));
//! assert_eq!(violations.len(), 1);
//! ```

use std::fmt;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered collection of [`Violation`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Record the outcome of a rule under `field`.
    pub fn check(&mut self, field: &str, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.0.push(Violation::new(field, message));
        }
    }

    /// Merge another collector, prefixing each field (e.g. `items[2].`).
    pub fn extend_prefixed(&mut self, prefix: &str, other: Violations) {
        self.0.extend(other.0.into_iter().map(|v| Violation {
            field: format!("{prefix}{}", v.field),
            message: v.message,
        }));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected violations.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one rule failed.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, violation) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            violation.fmt(f)?;
        }
        Ok(())
    }
}

/// The value must contain at least one non-whitespace character.
///
/// # Errors
///
/// Returns a message when `value` is empty or whitespace.
pub fn not_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(())
    }
}

/// The value must be at most `max` characters long.
///
/// # Errors
///
/// Returns a message when `value` is longer than `max` characters.
pub fn max_len(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("must be at most {max} characters"))
    } else {
        Ok(())
    }
}

/// The value must be at least `min`.
///
/// # Errors
///
/// Returns a message when `value < min`.
pub fn at_least(value: i64, min: i64) -> Result<(), String> {
    if value < min {
        Err(format!("must be at least {min}"))
    } else {
        Ok(())
    }
}

/// The value must lie in `min..=max`.
///
/// # Errors
///
/// Returns a message when `value` is outside the range.
pub fn between(value: i64, min: i64, max: i64) -> Result<(), String> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(format!("must be between {min} and {max}"))
    }
}

/// A strictly positive amount with at most two decimal places.
///
/// # Errors
///
/// Returns a message when the amount is zero, negative or too precise.
pub fn positive_amount(value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err("must be a positive number".to_string());
    }
    max_two_decimals(value)
}

/// A non-negative amount.
///
/// # Errors
///
/// Returns a message when the amount is negative.
pub fn non_negative_amount(value: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO {
        Err("must not be less than 0".to_string())
    } else {
        Ok(())
    }
}

fn max_two_decimals(value: Decimal) -> Result<(), String> {
    if value.normalize().scale() > 2 {
        Err("must have at most 2 decimal places".to_string())
    } else {
        Ok(())
    }
}

/// `[+-]digits[.digits]`: what is accepted as a plain decimal number.
fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match frac_part {
        Some(frac) => !frac.is_empty() && digits(int_part) && digits(frac),
        None => !int_part.is_empty() && digits(int_part),
    }
}

fn degrees(value: &str, limit: f64, what: &str) -> Result<f64, String> {
    let message = || format!("must be a {what} between -{limit} and {limit}");
    if !is_plain_decimal(value) {
        return Err(message());
    }
    let parsed: f64 = value.parse().map_err(|_| message())?;
    if parsed.abs() <= limit {
        Ok(parsed)
    } else {
        Err(message())
    }
}

/// Parse a latitude in decimal degrees (`-90..=90`).
///
/// # Errors
///
/// Returns a message when the text is not a plain decimal number in range.
pub fn latitude(value: &str) -> Result<f64, String> {
    degrees(value, 90.0, "latitude")
}

/// Parse a longitude in decimal degrees (`-180..=180`).
///
/// # Errors
///
/// Returns a message when the text is not a plain decimal number in range.
pub fn longitude(value: &str) -> Result<f64, String> {
    degrees(value, 180.0, "longitude")
}

/// The value must be a plain decimal number (`"3"`, `"-1.25"`).
///
/// # Errors
///
/// Returns a message when the text is not numeric.
pub fn numeric_string(value: &str) -> Result<(), String> {
    if is_plain_decimal(value) {
        Ok(())
    } else {
        Err("must be a number string".to_string())
    }
}

/// Parse a 24-hour `H:MM` / `HH:MM` time of day.
///
/// # Errors
///
/// Returns a message when the text is not a valid time in that format.
pub fn time_of_day(value: &str) -> Result<NaiveTime, String> {
    let message = || "must be in HH:MM format".to_string();
    let (hours, minutes) = value.split_once(':').ok_or_else(message)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if hours.len() > 2 || minutes.len() != 2 || !all_digits(hours) || !all_digits(minutes) {
        return Err(message());
    }
    let hours: u32 = hours.parse().map_err(|_| message())?;
    let minutes: u32 = minutes.parse().map_err(|_| message())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(message)
}
