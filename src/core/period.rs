//! Reporting periods: explicit date ranges and localized month labels.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Locale, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::Display;

use crate::core::error::{ServiceError, ServiceResult};

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ServiceResult<Self> {
        if start > end {
            return Err(ServiceError::Validation(vec![format!(
                "startDate {start} must not be after endDate {end}"
            )]));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Parses a POSIX-style locale name such as `es_ES` or `en_US`.
pub fn parse_locale(name: &str) -> Result<Locale> {
    Locale::try_from(name).map_err(|_| anyhow!("Unsupported locale: {}", name))
}

/// Upper-cased "month year" label of `at`, e.g. `OCTUBRE 2026` for `es_ES`.
pub fn month_label(at: DateTime<Utc>, locale: Locale) -> String {
    at.format_localized("%B %Y", locale)
        .to_string()
        .to_uppercase()
}
