use crate::block::BlockParser;
use crate::inference::{DEFAULT_ORGANIZATION_COLUMN, EmailPatternInference, OrganizationProfiles};
use contacts_core::{EnrichedContact, ExtractionOutcome, Table};
use tracing::{info, warn};

/// Options for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    /// Column holding the contact blocks.
    pub contact_column: String,
    /// Metadata column grouping contacts for pattern inference.
    pub organization_column: String,
    /// Whether to synthesize speculative emails.
    pub infer_emails: bool,
    /// Parse rows on the rayon pool.
    pub parallel_rows: bool,
}

impl ExtractorOptions {
    #[must_use]
    pub fn new(contact_column: impl Into<String>) -> Self {
        Self {
            contact_column: contact_column.into(),
            organization_column: DEFAULT_ORGANIZATION_COLUMN.to_string(),
            infer_emails: true,
            parallel_rows: false,
        }
    }
}

/// Outcome of a run plus counters for reporting.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub outcome: ExtractionOutcome,
    pub profiles: OrganizationProfiles,
    pub rows_scanned: usize,
    pub rows_skipped: usize,
    pub emails_inferred: usize,
}

impl ExtractionReport {
    #[must_use]
    pub fn contacts(&self) -> &[EnrichedContact] {
        self.outcome.contacts()
    }
}

/// Block parsing followed by email pattern inference.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    parser: BlockParser,
    inference: Option<EmailPatternInference>,
}

impl ContactExtractor {
    #[must_use]
    pub fn new(options: ExtractorOptions) -> Self {
        let parser = BlockParser::new(options.contact_column).parallel(options.parallel_rows);
        let inference = options
            .infer_emails
            .then(|| EmailPatternInference::new(options.organization_column));
        Self { parser, inference }
    }

    pub fn extract(&self, table: &Table) -> contacts_core::Result<ExtractionReport> {
        let parsed = self.parser.parse_detailed(table)?;

        let missing_org_column = self
            .inference
            .as_ref()
            .map(EmailPatternInference::organization_column)
            .filter(|column| !parsed.contacts.is_empty() && !table.has_column(column));
        if let Some(column) = missing_org_column {
            warn!(column, "Organization column not present; all contacts share one group");
        }

        let (contacts, profiles) = match &self.inference {
            Some(inference) => inference.enrich(parsed.contacts),
            None => (
                parsed
                    .contacts
                    .into_iter()
                    .map(EnrichedContact::passthrough)
                    .collect(),
                OrganizationProfiles::default(),
            ),
        };

        let emails_inferred = contacts
            .iter()
            .filter(|contact| contact.speculative_email.is_inferred())
            .count();

        info!(
            rows = table.len(),
            skipped = parsed.rows_skipped,
            contacts = contacts.len(),
            organizations = profiles.len(),
            inferred = emails_inferred,
            "Extraction finished"
        );

        Ok(ExtractionReport {
            outcome: ExtractionOutcome::from_contacts(contacts),
            profiles,
            rows_scanned: table.len(),
            rows_skipped: parsed.rows_skipped,
            emails_inferred,
        })
    }
}
