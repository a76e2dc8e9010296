//! Integration tests for the CSV boundary.
//!
//! These tests verify that:
//! - A spreadsheet export round-trips through extraction into the output CSV
//! - Output columns follow the fixed fields then the input metadata order
//! - Runs that find nothing produce no rows

#![deny(clippy::unwrap_used, clippy::expect_used)]

use contacts_core::{Cell, Field};
use contacts_extraction::{ContactExtractor, ExtractorOptions};
use contacts_table::{read_path, read_str, write_path};
use std::io::Write;

const INPUT: &str = "\
Institution Name,State,AI Contacts
Acme University,OR,\"Here is what I found:
* First Name: John
* Last Name: Smith
* Job Title: Registrar [1]
* Phone: 555-0100
* Email: john.smith@acme.edu

* First Name: Carla
* Last Name: Ortiz
* Job Title: Dean
* Phone: Not listed
* Email: Not listed [2]\"
Globex College,WA,12
Initech,CA,No contacts available
";

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("input.csv");
    let output = dir.path().join("extracted_contacts.csv");
    std::fs::File::create(&input)
        .and_then(|mut file| file.write_all(INPUT.as_bytes()))
        .expect("write input");

    let table = read_path(&input).expect("input should parse");
    assert_eq!(table.len(), 3);
    assert_eq!(table.rows[1].get("AI Contacts"), &Cell::Number("12".to_string()));

    let report = ContactExtractor::new(ExtractorOptions::new("AI Contacts"))
        .extract(&table)
        .expect("column exists");
    assert_eq!(report.contacts().len(), 2);
    assert_eq!(report.rows_skipped, 2);

    write_path(&output, &table, "AI Contacts", report.contacts()).expect("write output");

    let written = read_path(&output).expect("output should parse");
    assert_eq!(
        written.headers,
        [
            "First Name",
            "Last Name",
            "Job Title",
            "Phone",
            "Email",
            "Speculative Email",
            "Institution Name",
            "State",
        ]
    );
    assert_eq!(written.len(), 2);

    let carla = &written.rows[1];
    assert_eq!(carla.get("First Name").as_text(), Some("Carla"));
    assert_eq!(carla.get(Field::Email.label()).as_text(), Some("Not listed"));
    assert_eq!(carla.get("Speculative Email").as_text(), Some("carla.ortiz@acme.edu"));
    assert_eq!(carla.get("Institution Name").as_text(), Some("Acme University"));

    let john = &written.rows[0];
    assert_eq!(john.get("Job Title").as_text(), Some("Registrar"));
    assert_eq!(john.get("Speculative Email").as_text(), Some("john.smith@acme.edu"));
}

#[test]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
fn test_no_matches_has_no_rows() {
    let table = read_str("Name,Blocks\nA,1\nB,\n").expect("valid CSV");
    let report = ContactExtractor::new(ExtractorOptions::new("Blocks"))
        .extract(&table)
        .expect("column exists");
    assert!(report.outcome.is_empty());
}

#[test]
fn test_header_only_file_is_empty_table() {
    let table = read_str("Contacts\n");
    assert!(matches!(table, Ok(ref t) if t.is_empty() && t.headers == ["Contacts"]));
}
