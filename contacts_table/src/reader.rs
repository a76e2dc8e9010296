use crate::{Result, TableError};
use contacts_core::{Cell, RawRow, Table};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const UTF8_BOM: char = '\u{feff}';

/// Decode file bytes as UTF-8, falling back to Windows-1252 for legacy
/// spreadsheet exports.
#[must_use]
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.strip_prefix(UTF8_BOM).unwrap_or(text)),
        Err(_) => {
            debug!("Input is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

pub fn read_path(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    let table = read_bytes(&bytes)?;
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.len(),
        "Loaded table"
    );
    Ok(table)
}

pub fn read_bytes(bytes: &[u8]) -> Result<Table> {
    read_str(&decode(bytes))
}

/// Parse comma-separated text with a header row.
///
/// Values are kept untrimmed. Short rows read the missing columns as empty.
pub fn read_str(content: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::None)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = dedupe_headers(reader.headers()?);
    if headers.is_empty() {
        return Err(TableError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_row(&headers, &record?));
    }

    Ok(Table::new(headers, rows))
}

fn to_row(headers: &[String], record: &StringRecord) -> RawRow {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let cell = record.get(index).map_or(Cell::Empty, Cell::classify);
            (header.clone(), cell)
        })
        .collect()
}

/// Repeated headers get `.1`, `.2`, ... suffixes so every column stays addressable.
fn dedupe_headers(record: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(record.len());

    for raw in record {
        let base = raw.strip_prefix(UTF8_BOM).unwrap_or(raw).to_string();
        let mut name = base.clone();
        while let Some(count) = seen.get_mut(&name) {
            *count += 1;
            name = format!("{base}.{count}");
            if !seen.contains_key(&name) {
                break;
            }
        }
        seen.insert(name.clone(), 0);
        headers.push(name);
    }

    if headers.len() == 1 && headers[0].is_empty() {
        headers.clear();
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn reads_multiline_quoted_block() {
        let content = "Institution Name,Contacts\nAcme,\"* First Name: Jane\n* Last Name: Doe\"\nGlobex,42\n";
        let table = read_str(content).expect("valid CSV should parse");

        assert_eq!(table.headers, ["Institution Name", "Contacts"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[0].get("Contacts").as_text(),
            Some("* First Name: Jane\n* Last Name: Doe")
        );
        assert_eq!(table.rows[1].get("Contacts"), &Cell::Number("42".to_string()));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn short_rows_pad_with_empty() {
        let table = read_str("a,b,c\n1\n").expect("flexible rows should parse");
        assert_eq!(table.rows[0].get("c"), &Cell::Empty);
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let record = StringRecord::from(vec!["Name", "Name", "Name", "Name.1"]);
        assert_eq!(dedupe_headers(&record), ["Name", "Name.1", "Name.2", "Name.1.1"]);
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(decode("\u{feff}a,b".as_bytes()), "a,b");
    }

    #[test]
    fn legacy_bytes_fall_back_to_windows_1252() {
        // "Jos\xe9" is "José" in Windows-1252 and invalid UTF-8.
        assert_eq!(decode(b"Jos\xe9"), "Jos\u{e9}");
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read_str(""), Err(TableError::MissingHeader)));
    }
}
