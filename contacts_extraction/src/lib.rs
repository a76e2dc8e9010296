#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod block;
pub mod inference;
mod pipeline;

pub use block::{BlockParser, ParseOutput, ParsedFields, parse_block};
pub use inference::{
    DEFAULT_ORGANIZATION_COLUMN, EmailPatternInference, Observation, OrganizationProfiles,
};
pub use pipeline::{ContactExtractor, ExtractionReport, ExtractorOptions};
