//! Every timestamp accepted from a client is stored in UTC. Values that carry
//! an offset are converted; values without one are taken to already be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn naive_as_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

pub fn parse_utc(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Some(with_offset.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive_as_utc(naive));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|date| naive_as_utc(date.and_time(NaiveTime::MIN)))
}

/// Combines separate date and time form fields, as sent by the quick-add reminder form.
pub fn combine_date_time(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    Some(naive_as_utc(date.and_time(time)))
}

/// Serde adapter for request bodies: `#[serde(with = "utc")]`.
pub mod utc {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_utc(&raw).ok_or_else(|| D::Error::custom(format!("invalid date/time `{raw}`")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de::Error, Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::super::parse_utc(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid date/time `{raw}`"))),
            }
        }
    }
}
