//! Timestamp helpers shared by the model, the request schema and storage.
//!
//! Every stored instant is truncated to milliseconds so that what goes over
//! the wire (`2025-01-01T00:00:00.000Z`) is exactly what sits in the store.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};

/// Offset-less date-time shapes, read as UTC. The second is what a
/// `datetime-local` input sends.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Current time, or one millisecond past `previous` if the clock has not moved on.
pub fn next_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Accepts RFC 3339 date-times (any offset), date-times without an offset
/// (taken as UTC) and bare `YYYY-MM-DD` dates.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc).trunc_subsecs(3));
    }
    if let Some(naive) = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
    {
        return Some(Utc.from_utc_datetime(&naive).trunc_subsecs(3));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date-time `{raw}`")))
    }
}
