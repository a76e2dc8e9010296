//! Canonical email local-part naming conventions.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A deterministic template mapping (first name, last name) to a local-part.
///
/// Rendering is lower-cased. `f` and `l` stand for the first character of the
/// first and last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `first_last`
    FirstUnderscoreLast,
    /// `first.last`
    FirstDotLast,
    /// `firstlast`
    FirstLast,
    /// `f.last`
    InitialDotLast,
    /// `firstl`
    FirstInitial,
    /// `flast`
    InitialLast,
    /// `lastf`
    LastInitial,
    /// `last.first`
    LastDotFirst,
    /// `last_first`
    LastUnderscoreFirst,
}

impl Pattern {
    /// Every template in match priority order.
    ///
    /// When a local-part renders identically under several templates (very
    /// short names), the earliest entry here wins.
    pub const ALL: [Self; 9] = [
        Self::FirstUnderscoreLast,
        Self::FirstDotLast,
        Self::FirstLast,
        Self::InitialDotLast,
        Self::FirstInitial,
        Self::InitialLast,
        Self::LastInitial,
        Self::LastDotFirst,
        Self::LastUnderscoreFirst,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstUnderscoreLast => "first_last",
            Self::FirstDotLast => "first.last",
            Self::FirstLast => "firstlast",
            Self::InitialDotLast => "f.last",
            Self::FirstInitial => "firstl",
            Self::InitialLast => "flast",
            Self::LastInitial => "lastf",
            Self::LastDotFirst => "last.first",
            Self::LastUnderscoreFirst => "last_first",
        }
    }

    /// Render the local-part for a pair of names.
    #[must_use]
    pub fn render(self, first: &str, last: &str) -> String {
        let first = first.to_lowercase();
        let last = last.to_lowercase();
        let f = initial(&first);
        let l = initial(&last);

        match self {
            Self::FirstUnderscoreLast => format!("{first}_{last}"),
            Self::FirstDotLast => format!("{first}.{last}"),
            Self::FirstLast => format!("{first}{last}"),
            Self::InitialDotLast => format!("{f}.{last}"),
            Self::FirstInitial => format!("{first}{l}"),
            Self::InitialLast => format!("{f}{last}"),
            Self::LastInitial => format!("{last}{f}"),
            Self::LastDotFirst => format!("{last}.{first}"),
            Self::LastUnderscoreFirst => format!("{last}_{first}"),
        }
    }

    /// First template whose rendering equals `local_part` (compared lower-cased).
    #[must_use]
    pub fn detect(local_part: &str, first: &str, last: &str) -> Option<Self> {
        let local_part = local_part.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.render(first, last) == local_part)
    }

    /// Every template matching `local_part`; more than one means the match is ambiguous.
    #[must_use]
    pub fn matching(local_part: &str, first: &str, last: &str) -> Vec<Self> {
        let local_part = local_part.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|pattern| pattern.render(first, last) == local_part)
            .collect()
    }
}

fn initial(name: &str) -> &str {
    name.char_indices()
        .nth(1)
        .map_or(name, |(end, _)| &name[..end])
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized as the template name, e.g. `"first.last"`.
impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == s)
            .ok_or_else(|| format!("unknown email pattern: {s}"))
    }
}

/// Dominant naming convention resolved for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationProfile {
    pub pattern: Pattern,
    pub domain: String,
    /// Observations that voted for `pattern`.
    pub votes: usize,
    /// All qualifying observations for the organization.
    pub observations: usize,
}

impl OrganizationProfile {
    /// Synthesize an address for a pair of names.
    #[must_use]
    pub fn address_for(&self, first: &str, last: &str) -> String {
        format!("{}@{}", self.pattern.render(first, last), self.domain)
    }
}
