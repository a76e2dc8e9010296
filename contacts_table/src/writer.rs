use crate::Result;
use contacts_core::{EnrichedContact, Field, SPECULATIVE_EMAIL_HEADER, Table};
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Output columns: the five fields, the speculative email, then the input's
/// metadata columns in input order.
///
/// Metadata columns named like an output field are dropped so the parsed
/// values are never shadowed.
#[must_use]
pub fn output_headers(table: &Table, contact_column: &str) -> (Vec<String>, Vec<String>) {
    let fixed: Vec<String> = Field::ALL
        .iter()
        .map(|field| field.label().to_string())
        .chain(std::iter::once(SPECULATIVE_EMAIL_HEADER.to_string()))
        .collect();

    let metadata: Vec<String> = table
        .metadata_headers(contact_column)
        .filter(|header| {
            let collides = fixed.iter().any(|name| name.as_str() == *header);
            if collides {
                warn!(column = *header, "Dropping input column that collides with an output field");
            }
            !collides
        })
        .map(ToString::to_string)
        .collect();

    (fixed, metadata)
}

/// Write contacts as UTF-8 CSV with a header row and no index column.
pub fn write_contacts<W: Write>(
    writer: W,
    table: &Table,
    contact_column: &str,
    contacts: &[EnrichedContact],
) -> Result<()> {
    let (fixed, metadata) = output_headers(table, contact_column);
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(fixed.iter().chain(&metadata))?;

    for enriched in contacts {
        let contact = &enriched.contact;
        let mut record: Vec<String> = Field::ALL
            .iter()
            .map(|&field| contact.display(field).to_string())
            .collect();
        record.push(enriched.speculative_email.to_string());
        record.extend(metadata.iter().map(|column| contact.metadata_text(column)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_path(
    path: &Path,
    table: &Table,
    contact_column: &str,
    contacts: &[EnrichedContact],
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_contacts(std::io::BufWriter::new(file), table, contact_column, contacts)?;
    info!(path = %path.display(), contacts = contacts.len(), "Wrote contacts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_core::{Cell, Contact, SpeculativeEmail};

    fn table() -> Table {
        Table::new(
            vec![
                "Institution Name".to_string(),
                "Contacts".to_string(),
                "Email".to_string(),
                "City".to_string(),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn headers_skip_block_and_colliding_columns() {
        let (fixed, metadata) = output_headers(&table(), "Contacts");
        assert_eq!(
            fixed,
            ["First Name", "Last Name", "Job Title", "Phone", "Email", "Speculative Email"]
        );
        assert_eq!(metadata, ["Institution Name", "City"]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn parsed_field_wins_over_same_named_input_column() {
        let mut contact = Contact {
            first_name: Some("Ann".to_string()),
            email: Some("ann.lee@acme.org".to_string()),
            ..Contact::default()
        };
        contact
            .metadata
            .insert("Email".to_string(), Cell::Text("office@acme.org".to_string()));
        contact
            .metadata
            .insert("City".to_string(), Cell::Text("Salem".to_string()));
        let contacts = [EnrichedContact::passthrough(contact)];

        let mut out = Vec::new();
        write_contacts(&mut out, &table(), "Contacts", &contacts).expect("write should succeed");
        let text = String::from_utf8(out).expect("output is UTF-8");

        assert!(!text.contains("office@acme.org"));
        assert_eq!(
            text.lines().nth(1),
            Some("Ann,Not listed,Not listed,Not listed,ann.lee@acme.org,ann.lee@acme.org,,Salem")
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn writes_sentinels_and_metadata() {
        let mut contact = Contact {
            first_name: Some("Carla".to_string()),
            last_name: Some("Ortiz".to_string()),
            ..Contact::default()
        };
        contact
            .metadata
            .insert("Institution Name".to_string(), Cell::Text("Acme, Inc.".to_string()));
        let contacts = [EnrichedContact {
            contact,
            speculative_email: SpeculativeEmail::Inferred("carla.ortiz@acme.org".to_string()),
        }];

        let mut out = Vec::new();
        write_contacts(&mut out, &table(), "Contacts", &contacts).expect("write should succeed");
        let text = String::from_utf8(out).expect("output is UTF-8");

        assert_eq!(
            text,
            "First Name,Last Name,Job Title,Phone,Email,Speculative Email,Institution Name,City\n\
             Carla,Ortiz,Not listed,Not listed,Not listed,carla.ortiz@acme.org,\"Acme, Inc.\",\n"
        );
    }
}
