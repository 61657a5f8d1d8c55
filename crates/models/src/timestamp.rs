//! Timestamp wire format.
//!
//! Documents store instants as RFC 3339 UTC strings with exactly three fractional digits, so
//! lexicographic order of the stored strings equals chronological order. Inbound values accept
//! any RFC 3339 offset or a bare calendar date.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Current instant truncated to the stored precision.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).trunc_subsecs(3));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("invalid date/time '{raw}', expected RFC 3339 or YYYY-MM-DD"))
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&super::format(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        assert_eq!(format(&a), "2024-01-01T00:00:00.000Z");
        let later = a + chrono::Duration::milliseconds(500);
        assert!(format(&a) < format(&later));
    }

    #[test]
    fn parse_accepts_offsets_and_bare_dates() {
        let dt = parse("2024-12-01T10:30:00+05:30").expect("rfc3339");
        assert_eq!(format(&dt), "2024-12-01T05:00:00.000Z");
        let d = parse("2024-12-01").expect("date");
        assert_eq!(format(&d), "2024-12-01T00:00:00.000Z");
        assert!(parse("next tuesday").is_err());
    }
}
