//! Email pattern inference.
//!
//! Contacts that already have an email reveal their organization's naming
//! convention. The most common convention per organization is then used to
//! synthesize an address for contacts without one.

use contacts_core::{Contact, EnrichedContact, OrganizationProfile, Pattern, SpeculativeEmail};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Default metadata column used to group contacts by organization.
pub const DEFAULT_ORGANIZATION_COLUMN: &str = "Institution Name";

/// One contact's email matched against the canonical templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub organization: String,
    pub pattern: Pattern,
    pub domain: String,
}

/// Resolved profiles keyed by organization, kept in first-observation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationProfiles {
    order: Vec<String>,
    profiles: HashMap<String, OrganizationProfile>,
}

impl OrganizationProfiles {
    #[must_use]
    pub fn get(&self, organization: &str) -> Option<&OrganizationProfile> {
        self.profiles.get(organization)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrganizationProfile)> {
        self.order
            .iter()
            .filter_map(|key| Some((key.as_str(), self.profiles.get(key)?)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Debug)]
struct Tally {
    /// Pattern counts in first-seen order.
    counts: Vec<(Pattern, usize)>,
    domain: String,
    total: usize,
}

impl Tally {
    fn new(domain: &str) -> Self {
        Self {
            counts: Vec::new(),
            domain: domain.to_string(),
            total: 0,
        }
    }

    fn record(&mut self, pattern: Pattern) {
        self.total += 1;
        match self.counts.iter_mut().find(|(seen, _)| *seen == pattern) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((pattern, 1)),
        }
    }

    /// Highest count; ties go to the pattern seen first.
    fn winner(&self) -> Option<(Pattern, usize)> {
        let mut best: Option<(Pattern, usize)> = None;
        for &(pattern, count) in &self.counts {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((pattern, count));
            }
        }
        best
    }
}

/// Infers per-organization email conventions over a whole contact set.
#[derive(Debug, Clone)]
pub struct EmailPatternInference {
    organization_column: String,
}

impl Default for EmailPatternInference {
    fn default() -> Self {
        Self::new(DEFAULT_ORGANIZATION_COLUMN)
    }
}

impl EmailPatternInference {
    #[must_use]
    pub fn new(organization_column: impl Into<String>) -> Self {
        Self {
            organization_column: organization_column.into(),
        }
    }

    #[must_use]
    pub fn organization_column(&self) -> &str {
        &self.organization_column
    }

    /// Grouping key of a contact; missing values group under `""`.
    #[must_use]
    pub fn organization_of(&self, contact: &Contact) -> String {
        contact.metadata_text(&self.organization_column)
    }

    /// Observation for a single contact, if its email follows a known template.
    #[must_use]
    pub fn observe_one(&self, contact: &Contact) -> Option<Observation> {
        let email = contact.real_email()?;
        let (first, last) = contact.names()?;
        let (local_part, domain) = email.rsplit_once('@')?;

        let candidates = Pattern::matching(local_part, first, last);
        let pattern = *candidates.first()?;
        if candidates.len() > 1 {
            trace!(
                email,
                chosen = %pattern,
                candidates = candidates.len(),
                "Ambiguous local-part, keeping first template in priority order"
            );
        }

        Some(Observation {
            organization: self.organization_of(contact),
            pattern,
            domain: domain.to_string(),
        })
    }

    #[must_use]
    pub fn observe(&self, contacts: &[Contact]) -> Vec<Observation> {
        contacts
            .iter()
            .filter_map(|contact| self.observe_one(contact))
            .collect()
    }

    /// Majority vote per organization. The domain is taken from the
    /// organization's first observation.
    #[must_use]
    pub fn profiles(observations: &[Observation]) -> OrganizationProfiles {
        let mut order: Vec<String> = Vec::new();
        let mut tallies: HashMap<&str, Tally> = HashMap::new();

        for observation in observations {
            let tally = tallies
                .entry(observation.organization.as_str())
                .or_insert_with(|| {
                    order.push(observation.organization.clone());
                    Tally::new(&observation.domain)
                });
            tally.record(observation.pattern);
        }

        let profiles = tallies
            .into_iter()
            .filter_map(|(organization, tally)| {
                let (pattern, votes) = tally.winner()?;
                debug!(
                    organization,
                    %pattern,
                    domain = %tally.domain,
                    votes,
                    observations = tally.total,
                    "Resolved organization email pattern"
                );
                Some((
                    organization.to_string(),
                    OrganizationProfile {
                        pattern,
                        domain: tally.domain,
                        votes,
                        observations: tally.total,
                    },
                ))
            })
            .collect();

        OrganizationProfiles { order, profiles }
    }

    /// Speculative email for one contact given resolved profiles.
    #[must_use]
    pub fn speculate(&self, contact: &Contact, profiles: &OrganizationProfiles) -> SpeculativeEmail {
        if let Some(email) = contact.real_email() {
            return SpeculativeEmail::Observed(email.to_string());
        }
        let Some((first, last)) = contact.names() else {
            return SpeculativeEmail::NotListed;
        };
        profiles
            .get(&self.organization_of(contact))
            .map_or(SpeculativeEmail::NotListed, |profile| {
                SpeculativeEmail::Inferred(profile.address_for(first, last))
            })
    }

    /// Observe, vote, then synthesize for every contact in input order.
    #[must_use]
    pub fn enrich(&self, contacts: Vec<Contact>) -> (Vec<EnrichedContact>, OrganizationProfiles) {
        let profiles = Self::profiles(&self.observe(&contacts));
        let enriched = contacts
            .into_iter()
            .map(|contact| {
                let speculative_email = self.speculate(&contact, &profiles);
                EnrichedContact {
                    contact,
                    speculative_email,
                }
            })
            .collect();
        (enriched, profiles)
    }
}
