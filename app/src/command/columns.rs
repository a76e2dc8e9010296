use anyhow::Context;
use contacts_core::FIRST_NAME_MARKER;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ColumnsInput {
    pub input: PathBuf,
}

/// Strategy for listing the columns of a CSV file.
///
/// Each column is shown with the number of rows whose cell contains a
/// contact block, which makes the right `--column` easy to spot.
#[derive(Debug, Clone, Copy)]
pub struct ColumnsStrategy;

impl super::CommandStrategy for ColumnsStrategy {
    type Input = ColumnsInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let table = contacts_table::read_path(&input.input)
            .with_context(|| format!("Failed to read {}", input.input.display()))?;

        println!("=== Columns in {} ({} rows) ===\n", input.input.display(), table.len());
        for header in &table.headers {
            let blocks = table
                .rows
                .iter()
                .filter_map(|row| row.get(header).as_text())
                .filter(|text| text.contains(FIRST_NAME_MARKER))
                .count();
            if blocks > 0 {
                println!("  {header}  ({blocks} rows with contact blocks)");
            } else {
                println!("  {header}");
            }
        }

        Ok(())
    }
}
