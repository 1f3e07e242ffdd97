//! Case-insensitive text matching

/// A free-text search term, folded once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Create term from user input
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// Input as given
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Empty terms match everything
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Case-insensitive substring test
    #[must_use]
    pub fn found_in(&self, haystack: &str) -> bool {
        self.is_empty() || haystack.to_lowercase().contains(&self.folded)
    }

    /// True when any haystack contains the term
    #[must_use]
    pub fn found_in_any<'a>(&self, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty() || haystacks.into_iter().any(|h| self.found_in(h))
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        let term = SearchTerm::new("MIGR");
        assert!(term.found_in("Migraine"));
        assert!(!term.found_in("Hypertension"));
    }

    #[test]
    fn empty_term_matches_everything() {
        let term = SearchTerm::default();
        assert!(term.found_in(""));
        assert!(term.found_in_any([]));
    }

    #[test]
    fn any_of_several_fields() {
        let term = SearchTerm::new("99001");
        assert!(term.found_in_any(["Rohan", "+91 99001 22222"]));
        assert!(!term.found_in_any(["Rohan", "Diabetes"]));
    }
}
