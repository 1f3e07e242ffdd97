//! Lenient field decoding for stored blobs
//!
//! Older blobs hold form values verbatim: numbers as strings, blanks for
//! missing optionals, and times as `HH:MM`. These helpers accept both that
//! shape and the canonical one.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    Text(String),
}

fn to_u32<E: de::Error>(raw: NumberOrString) -> Result<Option<u32>, E> {
    match raw {
        NumberOrString::Number(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| E::custom(format!("number out of range: {n}"))),
        NumberOrString::Text(s) if s.trim().is_empty() => Ok(None),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| E::custom(format!("not a number: {s:?}"))),
    }
}

/// Required integer stored as a number or a numeric string
///
/// # Errors
/// Fails on blanks and non-numeric text
pub fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?;
    to_u32::<D::Error>(raw)?.ok_or_else(|| de::Error::custom("missing number"))
}

/// Optional integer; blank strings and nulls read as absent
///
/// # Errors
/// Fails on non-numeric text
pub fn opt_u32_lenient<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(raw) => to_u32(raw),
        None => Ok(None),
    }
}

/// Optional text; blank strings read as absent
///
/// # Errors
/// Fails only if the value is not a string or null
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// `HH:MM` times, also accepting `HH:MM:SS`
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    /// Write as `HH:MM`
    ///
    /// # Errors
    /// Propagates serializer errors
    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    /// Read `HH:MM` or `HH:MM:SS`
    ///
    /// # Errors
    /// Fails on any other shape
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).ok_or_else(|| de::Error::custom(format!("invalid time: {raw:?}")))
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
#[must_use]
pub fn parse_time(raw: &str) -> Option<chrono::NaiveTime> {
    let raw = raw.trim();
    chrono::NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
