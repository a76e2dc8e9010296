use anyhow::Context;
use contacts_config::Config;
use contacts_core::ExtractionOutcome;
use contacts_core::OrganizationProfile;
use contacts_extraction::{ContactExtractor, ExtractionReport, OrganizationProfiles};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub input: PathBuf,
    /// Overrides `extraction.contact_column`
    pub column: Option<String>,
    /// Overrides `output.path`; `-` writes to stdout
    pub output: Option<PathBuf>,
    /// Overrides `inference.organization_column`
    pub org_column: Option<String>,
    pub no_infer: bool,
    pub parallel: bool,
    pub show_patterns: bool,
    /// Print `--show-patterns` output as JSON
    pub json: bool,
}

/// Strategy for the extract command.
///
/// Reads the CSV, parses the contact column, infers speculative emails and
/// writes the result table. Finding no contacts is reported as a warning,
/// not a failure.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        let table = contacts_table::read_path(&input.input)
            .with_context(|| format!("Failed to read {}", input.input.display()))?;

        let contact_column = input
            .column
            .or_else(|| config.extraction.contact_column.clone())
            .ok_or_else(|| contacts_core::Error::NoColumnSelected {
                available: table.headers.clone(),
            })?;

        info!(column = %contact_column, "Extracting contacts");
        let options = config.extractor_options(
            contact_column.clone(),
            input.org_column,
            input.no_infer,
            input.parallel,
        );
        let report = ContactExtractor::new(options).extract(&table)?;

        if input.json {
            eprintln!("{}", profiles_json(&report.profiles)?);
        } else if input.show_patterns {
            print_profiles(&report);
        }

        let contacts = match &report.outcome {
            ExtractionOutcome::Found(contacts) => contacts,
            ExtractionOutcome::NoMatches => {
                warn!(rows = report.rows_scanned, "No contacts found");
                eprintln!("⚠️  No contacts found. Make sure the column follows the expected format.");
                return Ok(());
            }
        };

        let output = input.output.unwrap_or_else(|| config.output.path.clone());
        if is_stdout(&output) {
            contacts_table::write_contacts(std::io::stdout().lock(), &table, &contact_column, contacts)?;
            eprintln!("✅ Extracted {} contacts successfully!", contacts.len());
        } else {
            contacts_table::write_path(&output, &table, &contact_column, contacts)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("✅ Extracted {} contacts successfully!", contacts.len());
            println!("   Rows scanned: {}", report.rows_scanned);
            println!("   Rows skipped: {}", report.rows_skipped);
            println!("   Emails inferred: {}", report.emails_inferred);
            println!("⬇️  Saved to: {}", output.display());
        }

        Ok(())
    }
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[derive(Debug, Serialize)]
struct ProfileEntry<'a> {
    organization: &'a str,
    #[serde(flatten)]
    profile: &'a OrganizationProfile,
}

fn profiles_json(profiles: &OrganizationProfiles) -> anyhow::Result<String> {
    let entries: Vec<ProfileEntry<'_>> = profiles
        .iter()
        .map(|(organization, profile)| ProfileEntry {
            organization,
            profile,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

fn print_profiles(report: &ExtractionReport) {
    if report.profiles.is_empty() {
        eprintln!("No organization email patterns could be resolved.");
        return;
    }

    eprintln!("Organization email patterns:");
    for (organization, profile) in report.profiles.iter() {
        let name = if organization.is_empty() {
            "(no organization)"
        } else {
            organization
        };
        eprintln!(
            "  {name}: {}@{} ({}/{} observations)",
            profile.pattern, profile.domain, profile.votes, profile.observations
        );
    }
}
