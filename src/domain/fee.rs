//! Parking fee calculation.
//!
//! Every place that turns a stay into money goes through [`FeeCalculator`],
//! so the hourly rate has a single source of truth.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{CURRENCY, DEFAULT_HOURLY_RATE, MINUTES_PER_HOUR};
use crate::errors::{AppError, AppResult};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Billing outcome of a single stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Fee {
    /// Stay length in whole minutes (rounded half up)
    pub duration_minutes: i64,
    /// Started hours, `ceil(duration / 60)`
    pub billable_hours: i64,
    /// `billable_hours * hourly_rate`
    pub amount: i64,
}

/// Flat hourly-rate fee calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    hourly_rate: i64,
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_RATE)
    }
}

impl FeeCalculator {
    pub fn new(hourly_rate: i64) -> Self {
        Self { hourly_rate }
    }

    pub fn hourly_rate(&self) -> i64 {
        self.hourly_rate
    }

    /// Compute the fee for a stay from `entry` to `exit`.
    ///
    /// A zero-length stay costs nothing; any positive stay bills at least one
    /// hour.
    ///
    /// # Errors
    /// Returns a validation error when `exit` precedes `entry`.
    pub fn calculate(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> AppResult<Fee> {
        let elapsed_ms = (exit - entry).num_milliseconds();
        if elapsed_ms < 0 {
            return Err(AppError::validation("Exit time cannot be before entry time"));
        }

        Ok(self.for_duration(round_minutes(elapsed_ms)))
    }

    /// Fee for a stay already measured in minutes.
    pub fn for_duration(&self, duration_minutes: i64) -> Fee {
        let duration_minutes = duration_minutes.max(0);
        let billable_hours = (duration_minutes + MINUTES_PER_HOUR - 1) / MINUTES_PER_HOUR;

        Fee {
            duration_minutes,
            billable_hours,
            amount: billable_hours * self.hourly_rate,
        }
    }

    /// Live fee for a session that is still parked. Clock skew that puts the
    /// entry in the future yields a zero fee instead of an error.
    pub fn current(&self, entry: DateTime<Utc>, now: DateTime<Utc>) -> Fee {
        self.calculate(entry, now)
            .unwrap_or_else(|_| self.for_duration(0))
    }

    /// Receipt line shown to the attendant after an exit.
    pub fn describe(&self, fee: &Fee) -> String {
        format!(
            "Parking fee calculated at {} {} per hour for {} hour(s)",
            self.hourly_rate, CURRENCY, fee.billable_hours
        )
    }
}

/// Milliseconds to minutes, halves rounded up.
fn round_minutes(elapsed_ms: i64) -> i64 {
    (elapsed_ms + MILLIS_PER_MINUTE / 2).div_euclid(MILLIS_PER_MINUTE)
}
