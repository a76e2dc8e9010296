#![deny(
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

pub mod contact;
pub mod enriched;
pub mod error;
pub mod pattern;
pub mod table;

pub use contact::{Contact, ContactOrigin, FIRST_NAME_MARKER, Field, NOT_LISTED, normalize_value};
pub use enriched::{EnrichedContact, ExtractionOutcome, SPECULATIVE_EMAIL_HEADER, SpeculativeEmail};
pub use error::{Error, Result};
pub use pattern::{OrganizationProfile, Pattern};
pub use table::{Cell, RawRow, Table};
