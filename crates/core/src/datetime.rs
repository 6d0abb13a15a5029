// crates/core/src/datetime.rs
use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{PrigorodError, PrigorodResult};

/// Date/time specification as the platform delivers it: any subset of the
/// five fields may be present, each either an absolute calendar value or a
/// delta relative to "now".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub year_is_relative: bool,
    #[serde(default)]
    pub month: Option<i64>,
    #[serde(default)]
    pub month_is_relative: bool,
    #[serde(default)]
    pub day: Option<i64>,
    #[serde(default)]
    pub day_is_relative: bool,
    #[serde(default)]
    pub hour: Option<i64>,
    #[serde(default)]
    pub hour_is_relative: bool,
    #[serde(default)]
    pub minute: Option<i64>,
    #[serde(default)]
    pub minute_is_relative: bool,
}

const MINUTES_PER_YEAR: i64 = 525_600;
const MINUTES_PER_MONTH: i64 = 43_200;
const MINUTES_PER_DAY: i64 = 1_440;
const MINUTES_PER_HOUR: i64 = 60;

/// Fixed offset for the given whole-hour shift from UTC.
pub fn zone(utc_offset_hours: i32) -> PrigorodResult<FixedOffset> {
    FixedOffset::east_opt(utc_offset_hours * 3600)
        .ok_or_else(|| PrigorodError::Config(format!("invalid UTC offset: {utc_offset_hours}")))
}

/// Current moment in the given fixed zone.
pub fn now_in(zone: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&zone)
}

/// Resolves a partial date against an explicit anchor.
///
/// Fields are applied strictly in order year, month, day, hour, minute.
/// A relative field shifts the running timestamp by its value converted to
/// minutes; an absolute field overwrites that one calendar component of the
/// running timestamp, so later absolute fields see earlier adjustments.
pub fn resolve_at(
    anchor: DateTime<FixedOffset>,
    date: &PartialDate,
) -> PrigorodResult<DateTime<FixedOffset>> {
    let mut at = anchor;

    at = apply(at, date.year, date.year_is_relative, MINUTES_PER_YEAR, |t, v| {
        t.with_year(v as i32)
    })?;
    at = apply(at, date.month, date.month_is_relative, MINUTES_PER_MONTH, |t, v| {
        t.with_month(v as u32)
    })?;
    at = apply(at, date.day, date.day_is_relative, MINUTES_PER_DAY, |t, v| {
        t.with_day(v as u32)
    })?;
    at = apply(at, date.hour, date.hour_is_relative, MINUTES_PER_HOUR, |t, v| {
        t.with_hour(v as u32)
    })?;
    at = apply(at, date.minute, date.minute_is_relative, 1, |t, v| {
        t.with_minute(v as u32)
    })?;

    Ok(at)
}

fn apply<F>(
    at: DateTime<FixedOffset>,
    field: Option<i64>,
    is_relative: bool,
    minutes_per_unit: i64,
    overwrite: F,
) -> PrigorodResult<DateTime<FixedOffset>>
where
    F: Fn(DateTime<FixedOffset>, i64) -> Option<DateTime<FixedOffset>>,
{
    let Some(value) = field else {
        return Ok(at);
    };

    if is_relative {
        Ok(at + Duration::minutes(value * minutes_per_unit))
    } else {
        overwrite(at, value)
            .ok_or_else(|| PrigorodError::Date(format!("invalid calendar component: {value}")))
    }
}
