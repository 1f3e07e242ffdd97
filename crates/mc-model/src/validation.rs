//! Field validation
//!
//! Provides [`FieldChecks`], a small collector used by drafts and patches to
//! report every offending field at once instead of stopping at the first.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::RangeInclusive;

/// Accepted patient ages, inclusive
pub const AGE_RANGE: RangeInclusive<u32> = 1..=120;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d\s+\-()]{7,15}$").expect("phone pattern compiles")
});

/// One failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears in the stored record
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected before any mutation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input ({})", join(.fields))]
pub struct ValidationError {
    /// Every failing field, in check order
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Single-field error
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            fields: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    /// Whether a given field failed
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn join(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field errors
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    /// Start an empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Value must contain something other than whitespace
    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "This field is required");
        }
        self
    }

    /// Optional variant of [`FieldChecks::required`]: only checks when present
    pub fn required_if_set(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.required(field, value);
        }
        self
    }

    /// Age must fall in [`AGE_RANGE`]
    pub fn age(&mut self, field: &'static str, value: u32) -> &mut Self {
        if !AGE_RANGE.contains(&value) {
            self.fail(
                field,
                format!("Age must be {}–{}", AGE_RANGE.start(), AGE_RANGE.end()),
            );
        }
        self
    }

    /// Phone must match the loose pattern; blank values are left to `required`
    pub fn phone(&mut self, field: &'static str, value: &str) -> &mut Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !PHONE_PATTERN.is_match(trimmed) {
            self.fail(field, "Enter a valid phone number");
        }
        self
    }

    /// Finish, returning every collected failure
    ///
    /// # Errors
    /// Returns [`ValidationError`] if any check failed
    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                fields: std::mem::take(&mut self.errors),
            })
        }
    }
}

/// Whether a phone string passes the pattern
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}
