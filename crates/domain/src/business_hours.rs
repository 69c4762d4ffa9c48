//! Business hours: one opening window per provider and weekday.
//!
//! Windows are validated for internal ordering only (`open < close` on open
//! days). There is no conflict detection, timezone handling or recurrence.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceCoreError, ValidationError};
use crate::format::{clock, flag};
use crate::id::{BusinessHoursId, ProviderId};
use crate::time::Timestamp;
use crate::validation::{self, Violations};

/// Opening window for a single weekday (`0` = Sunday … `6` = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursWindow {
    pub day_of_week: u8,
    #[serde(serialize_with = "clock::serialize")]
    pub open_time: NaiveTime,
    #[serde(serialize_with = "clock::serialize")]
    pub close_time: NaiveTime,
    #[serde(with = "flag")]
    pub is_closed: bool,
}

impl HoursWindow {
    /// Check that an open day closes after it opens.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CloseBeforeOpen`] when the window is empty
    /// or inverted on a day that is not closed.
    pub fn validate(&self) -> Result<(), ServiceCoreError> {
        if !self.is_closed && self.open_time >= self.close_time {
            return Err(ValidationError::CloseBeforeOpen(self.day_of_week).into());
        }
        Ok(())
    }

    /// Whether `time` falls inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        !self.is_closed && self.open_time <= time && time <= self.close_time
    }
}

/// A stored business-hours row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub id: BusinessHoursId,
    pub provider_id: ProviderId,
    #[serde(flatten)]
    pub window: HoursWindow,
    pub status: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(with = "flag")]
    pub is_deleted: bool,
}

/// Everything needed to insert (or revive) a business-hours row.
#[derive(Debug, Clone)]
pub struct NewBusinessHours {
    pub provider_id: ProviderId,
    pub window: HoursWindow,
    pub created_at: Timestamp,
}

fn parse_day(violations: &mut Violations, day: i64) -> u8 {
    violations.check("dayOfWeek", validation::between(day, 0, 6));
    u8::try_from(day).unwrap_or_default()
}

fn parse_time(violations: &mut Violations, field: &str, value: &str) -> NaiveTime {
    match validation::time_of_day(value) {
        Ok(time) => time,
        Err(message) => {
            violations.check(field, Err(message));
            NaiveTime::default()
        }
    }
}

/// Request payload for a new opening window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HoursDraft {
    pub day_of_week: i64,
    pub open_time: String,
    pub close_time: String,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub is_closed: Option<bool>,
}

impl HoursDraft {
    #[must_use]
    pub fn new(day_of_week: i64, open_time: &str, close_time: &str) -> Self {
        Self {
            day_of_week,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            is_closed: None,
        }
    }

    #[must_use]
    pub fn closed(mut self) -> Self {
        self.is_closed = Some(true);
        self
    }

    /// Parse field formats, without checking the window ordering.
    ///
    /// # Errors
    ///
    /// Returns every malformed field.
    pub fn parse(&self) -> Result<HoursWindow, Violations> {
        let mut violations = Violations::default();
        let day_of_week = parse_day(&mut violations, self.day_of_week);
        let open_time = parse_time(&mut violations, "openTime", &self.open_time);
        let close_time = parse_time(&mut violations, "closeTime", &self.close_time);
        violations.into_result()?;
        Ok(HoursWindow {
            day_of_week,
            open_time,
            close_time,
            is_closed: self.is_closed.unwrap_or(false),
        })
    }

    /// Parse and check ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] for malformed fields or an
    /// inverted window.
    pub fn into_window(self) -> Result<HoursWindow, ServiceCoreError> {
        let window = self.parse()?;
        window.validate()?;
        Ok(window)
    }
}

/// Request payload for a partial update; `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HoursPatch {
    #[serde(default)]
    pub day_of_week: Option<i64>,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default, deserialize_with = "flag::option::deserialize")]
    pub is_closed: Option<bool>,
}

impl HoursPatch {
    /// Merge the supplied fields over `current` and check the result.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceCoreError::Validation`] for malformed fields or when
    /// the merged window is inverted.
    pub fn apply(self, current: &HoursWindow) -> Result<HoursWindow, ServiceCoreError> {
        let mut violations = Violations::default();
        let mut window = *current;
        if let Some(day) = self.day_of_week {
            window.day_of_week = parse_day(&mut violations, day);
        }
        if let Some(value) = self.open_time.as_deref() {
            window.open_time = parse_time(&mut violations, "openTime", value);
        }
        if let Some(value) = self.close_time.as_deref() {
            window.close_time = parse_time(&mut violations, "closeTime", value);
        }
        if let Some(value) = self.is_closed {
            window.is_closed = value;
        }
        violations.into_result()?;
        window.validate()?;
        Ok(window)
    }
}
