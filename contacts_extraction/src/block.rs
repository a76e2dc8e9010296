//! Contact block parsing.
//!
//! A block is free text holding one section per person in the fixed bullet
//! format:
//!
//! ```text
//! * First Name: Jane
//! * Last Name: Doe
//! * Job Title: Director
//! * Phone: 555-0100
//! * Email: jane.doe@acme.org
//! ```
//!
//! Each section starts at a `* First Name:` marker. A field's value runs from
//! its colon to the next `*`-prefixed label or the end of the section.

use contacts_core::{
    Cell, Contact, ContactOrigin, FIRST_NAME_MARKER, Field, RawRow, Table, normalize_value,
};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

/// `*`, optional blanks, a label of letters and spaces, optional blanks, `:`.
#[expect(clippy::expect_used, reason = "Regex literal is known to be valid")]
static LABEL_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*[ \t]*([A-Za-z][A-Za-z ]*?)[ \t]*:").expect("label token regex")
});

/// Bracketed numeric citation markers such as `[12]`.
#[expect(clippy::expect_used, reason = "Regex literal is known to be valid")]
static CITATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("citation regex"));

/// The five field values of one segment, cleaned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    values: [Option<String>; 5],
}

impl ParsedFields {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[index_of(field)].as_deref()
    }

    fn set_once(&mut self, field: Field, value: Option<String>, seen: &mut [bool; 5]) {
        let slot = index_of(field);
        if !seen[slot] {
            seen[slot] = true;
            self.values[slot] = value;
        }
    }

    /// Attach row metadata and origin.
    #[must_use]
    pub fn into_contact(
        self,
        metadata: std::collections::HashMap<String, Cell>,
        origin: ContactOrigin,
    ) -> Contact {
        let [first_name, last_name, job_title, phone, email] = self.values;
        Contact {
            first_name,
            last_name,
            job_title,
            phone,
            email,
            metadata,
            origin: Some(origin),
        }
    }
}

const fn index_of(field: Field) -> usize {
    match field {
        Field::FirstName => 0,
        Field::LastName => 1,
        Field::JobTitle => 2,
        Field::Phone => 3,
        Field::Email => 4,
    }
}

/// Remove citation markers, then trim; blank or sentinel values are absent.
#[must_use]
pub fn clean_value(raw: &str) -> Option<String> {
    normalize_value(&CITATION.replace_all(raw, ""))
}

/// Split a block into segments, each starting with the first-name marker.
///
/// Text before the first marker is preamble and is dropped.
pub fn segments(block: &str) -> impl Iterator<Item = String> + '_ {
    block
        .split(FIRST_NAME_MARKER)
        .skip(1)
        .map(|piece| format!("{FIRST_NAME_MARKER}{piece}"))
}

/// Extract the five fields from one segment in a single scan over its labels.
///
/// Only the first occurrence of a label counts. Unknown labels still end the
/// value of the label before them.
#[must_use]
pub fn parse_segment(segment: &str) -> ParsedFields {
    let tokens: Vec<(usize, usize, Option<Field>)> = LABEL_TOKEN
        .captures_iter(segment)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?.as_str().trim_end();
            Some((whole.start(), whole.end(), Field::from_label(label)))
        })
        .collect();

    let mut fields = ParsedFields::default();
    let mut seen = [false; 5];

    for (position, &(_, value_start, field)) in tokens.iter().enumerate() {
        let Some(field) = field else {
            continue;
        };
        let value_end = tokens
            .get(position + 1)
            .map_or(segment.len(), |&(next_start, _, _)| next_start);
        fields.set_once(field, clean_value(&segment[value_start..value_end]), &mut seen);
    }

    fields
}

/// Parse every segment of a block, in textual order.
#[must_use]
pub fn parse_block(block: &str) -> Vec<ParsedFields> {
    segments(block).map(|segment| parse_segment(&segment)).collect()
}

/// Contacts from a table plus the number of rows that held no usable block.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub contacts: Vec<Contact>,
    pub rows_skipped: usize,
}

/// Parses the designated contact-block column of each row.
#[derive(Debug, Clone)]
pub struct BlockParser {
    contact_column: String,
    parallel: bool,
}

impl BlockParser {
    #[must_use]
    pub fn new(contact_column: impl Into<String>) -> Self {
        Self {
            contact_column: contact_column.into(),
            parallel: false,
        }
    }

    /// Parse rows on the rayon pool. Output order is unchanged.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Contacts from every row, in row then segment order.
    pub fn parse(&self, table: &Table) -> contacts_core::Result<Vec<Contact>> {
        Ok(self.parse_detailed(table)?.contacts)
    }

    pub fn parse_detailed(&self, table: &Table) -> contacts_core::Result<ParseOutput> {
        table.require_column(&self.contact_column)?;

        let per_row: Vec<Option<Vec<Contact>>> = if self.parallel {
            table
                .rows
                .par_iter()
                .enumerate()
                .map(|(index, row)| self.parse_row(index, row))
                .collect()
        } else {
            table
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| self.parse_row(index, row))
                .collect()
        };

        let mut output = ParseOutput::default();
        for row in per_row {
            match row {
                Some(contacts) => output.contacts.extend(contacts),
                None => output.rows_skipped += 1,
            }
        }
        Ok(output)
    }

    /// Contacts from one row, or `None` when the row holds no block.
    #[must_use]
    pub fn parse_row(&self, index: usize, row: &RawRow) -> Option<Vec<Contact>> {
        let Some(block) = row.get(&self.contact_column).as_text() else {
            debug!(row = index, "Skipping row: contact cell is not text");
            return None;
        };
        if !block.contains(FIRST_NAME_MARKER) {
            debug!(row = index, "Skipping row: no '{FIRST_NAME_MARKER}' marker");
            return None;
        }

        let metadata = row.metadata_without(&self.contact_column);
        let contacts = parse_block(block)
            .into_iter()
            .enumerate()
            .map(|(segment, fields)| {
                fields.into_contact(metadata.clone(), ContactOrigin { row: index, segment })
            })
            .collect();
        Some(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_core::NOT_LISTED;

    #[test]
    fn parses_partial_segment() {
        let parsed = parse_block("* First Name: Jane\n* Last Name: Doe\n* Email: jane.doe@acme.org");
        assert_eq!(parsed.len(), 1);
        let fields = &parsed[0];
        assert_eq!(fields.get(Field::FirstName), Some("Jane"));
        assert_eq!(fields.get(Field::LastName), Some("Doe"));
        assert_eq!(fields.get(Field::JobTitle), None);
        assert_eq!(fields.get(Field::Phone), None);
        assert_eq!(fields.get(Field::Email), Some("jane.doe@acme.org"));
    }

    #[test]
    fn preamble_is_dropped() {
        let block = "Here are the contacts I found:\n\n* First Name: Ann\n* Last Name: Lee";
        let parsed = parse_block(block);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].get(Field::FirstName), Some("Ann"));
    }

    #[test]
    fn value_stops_at_next_label_on_same_line() {
        let parsed = parse_block("* First Name: Ann * Last Name: Lee * Phone: 555-0100");
        assert_eq!(parsed[0].get(Field::FirstName), Some("Ann"));
        assert_eq!(parsed[0].get(Field::LastName), Some("Lee"));
        assert_eq!(parsed[0].get(Field::Phone), Some("555-0100"));
    }

    #[test]
    fn unknown_label_ends_previous_value() {
        let parsed = parse_block("* First Name: Ann\n* Email: ann@x.org\n* Notes: call after 5");
        assert_eq!(parsed[0].get(Field::Email), Some("ann@x.org"));
    }

    #[test]
    fn trailing_prose_stays_in_last_value() {
        let parsed = parse_block("* First Name: Ann\n* Email: ann@acme.org\n\nSources: university website.");
        assert_eq!(
            parsed[0].get(Field::Email),
            Some("ann@acme.org\n\nSources: university website.")
        );
    }

    #[test]
    fn citations_are_stripped() {
        assert_eq!(clean_value(" Not listed [3]"), None);
        assert_eq!(
            clean_value(" Dean of Students[12] [4]\n"),
            Some("Dean of Students".to_string())
        );
        assert_eq!(clean_value("555[1]-0100"), Some("555-0100".to_string()));
    }

    #[test]
    fn blank_values_are_not_listed() {
        let parsed = parse_block("* First Name:\n* Last Name:   \n* Job Title: Not listed");
        assert_eq!(parsed.len(), 1);
        for field in Field::ALL {
            assert_eq!(parsed[0].get(field), None, "{} should be absent", field.label());
        }
    }

    #[test]
    fn placeholder_names_in_other_cases_are_absent() {
        let parsed = parse_block("* First Name: Carla\n* Last Name: Not Listed\n* Phone: N/A");
        assert_eq!(parsed[0].get(Field::LastName), None);
        assert_eq!(parsed[0].get(Field::Phone), None);
    }

    #[test]
    fn first_occurrence_of_label_wins() {
        let parsed = parse_block("* First Name: Ann\n* Phone: 111\n* Phone: 222");
        assert_eq!(parsed[0].get(Field::Phone), Some("111"));
    }

    #[test]
    fn segment_count_matches_markers() {
        let block = "* First Name: A\n* First Name: B\n* First Name:\n";
        assert_eq!(parse_block(block).len(), block.matches(FIRST_NAME_MARKER).count());
    }

    #[test]
    fn values_never_contain_label_tokens() {
        let block = "* First Name: Ann\n* Last Name: Lee\n* Job Title: CTO\n* Phone: 1\n* Email: a@b.c";
        let fields = &parse_block(block)[0];
        for field in Field::ALL {
            let value = fields.get(field).unwrap_or(NOT_LISTED);
            assert!(!value.contains('*'), "{value:?} leaked a label");
            assert!(!value.contains(':'), "{value:?} leaked a label");
        }
    }

    #[test]
    fn non_text_and_marker_less_rows_are_skipped() {
        let parser = BlockParser::new("Contacts");
        let numeric = RawRow::new().with("Contacts", "42");
        let plain = RawRow::new().with("Contacts", "no contacts here");
        assert!(parser.parse_row(0, &numeric).is_none());
        assert!(parser.parse_row(1, &plain).is_none());
        assert!(parser.parse_row(2, &RawRow::new()).is_none());
    }

    #[test]
    fn row_contacts_carry_metadata_and_origin() {
        let parser = BlockParser::new("Contacts");
        let row = RawRow::new()
            .with("Institution Name", "Acme")
            .with("Contacts", "* First Name: A\n* First Name: B");

        let contacts = parser.parse_row(7, &row).unwrap_or_default();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].origin, Some(ContactOrigin { row: 7, segment: 1 }));
        assert_eq!(contacts[1].metadata_text("Institution Name"), "Acme");
        assert!(!contacts[1].metadata.contains_key("Contacts"));
    }
}
