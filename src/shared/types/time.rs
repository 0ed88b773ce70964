//! Time windows and the date formats accepted from operators.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::errors::DomainError;

/// Input format for booking and search times (interpreted as UTC).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Input format for report period bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Half-open interval `[starts_at, ends_at)` with `ends_at > starts_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if ends_at <= starts_at {
            return Err(DomainError::Validation(format!(
                "end ({}) must be after start ({})",
                ends_at, starts_at
            )));
        }
        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Wall-clock length in fractional hours.
    pub fn hours(&self) -> f64 {
        (self.ends_at - self.starts_at).num_seconds() as f64 / 3600.0
    }

    /// Exact length in hours, used for pricing.
    pub fn hours_decimal(&self) -> Decimal {
        let seconds = (self.ends_at - self.starts_at).num_seconds();
        Decimal::from(seconds) / Decimal::from(3600)
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.starts_at < other.ends_at && other.starts_at < self.ends_at
    }

    pub fn contains(&self, other: &TimeWindow) -> bool {
        self.starts_at <= other.starts_at && other.ends_at <= self.ends_at
    }
}

/// Parse `YYYY-MM-DD HH:MM` as a UTC timestamp.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, DomainError> {
    NaiveDateTime::parse_from_str(input.trim(), DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            DomainError::Validation(format!(
                "invalid date/time '{}', expected YYYY-MM-DD HH:MM",
                input.trim()
            ))
        })
}

pub fn parse_date(input: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::Validation(format!(
            "invalid date '{}', expected YYYY-MM-DD",
            input.trim()
        ))
    })
}

/// Report period covering whole days: from 00:00:00 of `from` to 23:59:59 of `to`.
pub fn report_period(from: NaiveDate, to: NaiveDate) -> Result<TimeWindow, DomainError> {
    let start = from.and_time(NaiveTime::MIN).and_utc();
    let end = to
        .and_hms_opt(23, 59, 59)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("invalid end date {}", to)))?;
    TimeWindow::new(start, end)
}
