use crate::contact::{Contact, NOT_LISTED};
use std::fmt;

/// Output column header for the speculative email.
pub const SPECULATIVE_EMAIL_HEADER: &str = "Speculative Email";

/// Email offered for a contact after pattern inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeculativeEmail {
    /// The extracted email, copied through.
    Observed(String),
    /// Synthesized from the organization's dominant pattern.
    Inferred(String),
    NotListed,
}

impl SpeculativeEmail {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Observed(address) | Self::Inferred(address) => address,
            Self::NotListed => NOT_LISTED,
        }
    }

    #[must_use]
    pub const fn is_inferred(&self) -> bool {
        matches!(self, Self::Inferred(_))
    }
}

impl fmt::Display for SpeculativeEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedContact {
    pub contact: Contact,
    pub speculative_email: SpeculativeEmail,
}

impl EnrichedContact {
    /// Wrap a contact without inference: its real email or nothing.
    #[must_use]
    pub fn passthrough(contact: Contact) -> Self {
        let speculative_email = contact
            .real_email()
            .map_or(SpeculativeEmail::NotListed, |email| {
                SpeculativeEmail::Observed(email.to_string())
            });
        Self {
            contact,
            speculative_email,
        }
    }
}

/// Result of one extraction run.
///
/// Finding nothing is a normal outcome, distinct from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Found(Vec<EnrichedContact>),
    NoMatches,
}

impl ExtractionOutcome {
    #[must_use]
    pub fn from_contacts(contacts: Vec<EnrichedContact>) -> Self {
        if contacts.is_empty() {
            Self::NoMatches
        } else {
            Self::Found(contacts)
        }
    }

    #[must_use]
    pub fn contacts(&self) -> &[EnrichedContact] {
        match self {
            Self::Found(contacts) => contacts,
            Self::NoMatches => &[],
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_keeps_real_email_only() {
        let with_email = Contact {
            email: Some("jane.doe@acme.org".to_string()),
            ..Contact::default()
        };
        assert_eq!(
            EnrichedContact::passthrough(with_email).speculative_email,
            SpeculativeEmail::Observed("jane.doe@acme.org".to_string())
        );

        let without = Contact {
            email: Some("ask reception".to_string()),
            ..Contact::default()
        };
        let enriched = EnrichedContact::passthrough(without);
        assert_eq!(enriched.speculative_email.as_str(), NOT_LISTED);
    }

    #[test]
    fn empty_outcome_is_no_matches() {
        assert!(ExtractionOutcome::from_contacts(Vec::new()).is_empty());
        assert!(ExtractionOutcome::NoMatches.contacts().is_empty());
    }
}
