//! Display theme flag

use serde::{Deserialize, Serialize};
use std::fmt;

/// Light or dark display
///
/// Anything other than the literal `light` reads as dark, which is also the
/// value for a fresh store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark display (default)
    #[default]
    Dark,
    /// Light display
    Light,
}

impl Theme {
    /// Stored form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Decode a stored flag
    #[must_use]
    pub fn from_stored(raw: Option<&[u8]>) -> Self {
        match raw {
            Some(bytes) if std::str::from_utf8(bytes).map(str::trim) == Ok("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The other theme
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_light_reads_as_light() {
        assert_eq!(Theme::from_stored(Some(b"light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some(b"dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some(b"sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
