//! Parsed contact records.

use crate::table::Cell;
use std::collections::HashMap;

/// Sentinel rendered for any field that is absent or blank.
pub const NOT_LISTED: &str = "Not listed";

/// Literal marker that introduces each person segment in a contact block.
pub const FIRST_NAME_MARKER: &str = "* First Name:";

/// The five labeled fields of a contact segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    JobTitle,
    Phone,
    Email,
}

impl Field {
    /// All fields, in output column order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::JobTitle,
        Self::Phone,
        Self::Email,
    ];

    /// Label as written in the block and used as the output column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::JobTitle => "Job Title",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

/// Where a contact came from: the input row and the segment within its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactOrigin {
    pub row: usize,
    pub segment: usize,
}

/// One person parsed from a contact block.
///
/// `None` fields render as [`NOT_LISTED`]. Present fields are trimmed and
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Every non-block column of the originating row.
    pub metadata: HashMap<String, Cell>,
    pub origin: Option<ContactOrigin>,
}

impl Contact {
    #[must_use]
    pub const fn field(&self, field: Field) -> Option<&String> {
        match field {
            Field::FirstName => self.first_name.as_ref(),
            Field::LastName => self.last_name.as_ref(),
            Field::JobTitle => self.job_title.as_ref(),
            Field::Phone => self.phone.as_ref(),
            Field::Email => self.email.as_ref(),
        }
    }

    /// Field value or the sentinel.
    #[must_use]
    pub fn display(&self, field: Field) -> &str {
        self.field(field).map_or(NOT_LISTED, String::as_str)
    }

    /// Both first and last name, when present.
    #[must_use]
    pub fn names(&self) -> Option<(&str, &str)> {
        Some((self.first_name.as_deref()?, self.last_name.as_deref()?))
    }

    /// The extracted email, if it looks like an address at all.
    #[must_use]
    pub fn real_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| email.contains('@'))
    }

    /// Metadata value rendered as text; absent or empty cells give `""`.
    #[must_use]
    pub fn metadata_text(&self, column: &str) -> String {
        self.metadata
            .get(column)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Placeholders a generator writes instead of leaving a field blank.
const PLACEHOLDERS: [&str; 2] = [NOT_LISTED, "N/A"];

/// Normalise a cleaned field value: blank or a placeholder, in any case, is
/// absent.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}
