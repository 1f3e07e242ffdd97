//! Record identifiers
//!
//! Provides [`RecordKind`] and [`RecordId`]. Ids are plain strings of the form
//! `<prefix>_<token>` so that blobs written by older sessions keep loading.

use crate::record::ParseValueError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The three record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Patient records (`p_` ids)
    Patient,
    /// Doctor records (`d_` ids)
    Doctor,
    /// Appointment records (`a_` ids)
    Appointment,
}

impl RecordKind {
    /// All kinds in storage order
    pub const ALL: [RecordKind; 3] = [Self::Patient, Self::Doctor, Self::Appointment];

    /// Id prefix for this kind
    #[inline]
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Patient => "p",
            Self::Doctor => "d",
            Self::Appointment => "a",
        }
    }

    /// Position of this kind in [`RecordKind::ALL`]
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Patient => 0,
            Self::Doctor => 1,
            Self::Appointment => 2,
        }
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Appointment => "appointment",
        }
    }

    /// Look up a kind by its id prefix
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" | "patients" => Ok(Self::Patient),
            "doctor" | "doctors" => Ok(Self::Doctor),
            "appointment" | "appointments" => Ok(Self::Appointment),
            other => Err(ParseValueError::new("record kind", other)),
        }
    }
}

/// Record identifier
///
/// Serialized transparently as its string form. Ids loaded from storage are
/// accepted as-is even if they do not follow the prefix convention.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Build an id from a kind and a token
    #[inline]
    #[must_use]
    pub fn new(kind: RecordKind, token: impl Display) -> Self {
        Self(format!("{}_{token}", kind.prefix()))
    }

    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind encoded in the prefix, if recognised
    #[must_use]
    pub fn kind(&self) -> Option<RecordKind> {
        self.0
            .split_once('_')
            .and_then(|(prefix, _)| RecordKind::from_prefix(prefix))
    }

    /// Token after the prefix separator
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, token)| token)
    }

    /// Token parsed as an integer (sequential and legacy timestamp ids)
    #[must_use]
    pub fn numeric_token(&self) -> Option<u64> {
        self.token().and_then(|t| t.parse().ok())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_formats_with_prefix() {
        let id = RecordId::new(RecordKind::Doctor, 7);
        assert_eq!(id.as_str(), "d_7");
        assert_eq!(id.kind(), Some(RecordKind::Doctor));
        assert_eq!(id.numeric_token(), Some(7));
    }

    #[test]
    fn legacy_timestamp_ids_parse() {
        let id = RecordId::from_raw("p_1739871234567");
        assert_eq!(id.kind(), Some(RecordKind::Patient));
        assert_eq!(id.numeric_token(), Some(1_739_871_234_567));
    }

    #[test]
    fn non_numeric_token_has_no_number() {
        let id = RecordId::from_raw("a_01HZX3J5Q8ABCDEF");
        assert_eq!(id.numeric_token(), None);
        assert_eq!(id.token(), Some("01HZX3J5Q8ABCDEF"));
    }

    #[test]
    fn id_without_separator() {
        let id = RecordId::from_raw("orphan");
        assert_eq!(id.kind(), None);
        assert_eq!(id.token(), None);
    }

    #[test]
    fn kind_parses_plural() {
        assert_eq!("Patients".parse::<RecordKind>(), Ok(RecordKind::Patient));
        assert!("nurse".parse::<RecordKind>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let id = RecordId::new(RecordKind::Appointment, 3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a_3\"");
    }
}
