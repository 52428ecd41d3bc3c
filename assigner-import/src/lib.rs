//! # assigner-import
//!
//! Source adapters that feed candidate students into a [`Roster`], plus the
//! best-effort secondary enrichment applied to every accepted record.
//!
//! - [`csv_import::import_csv`] — registrar CSV export
//! - [`canvas::import_students`] — Canvas course roster
//! - [`enrich`] — GitLab user-id lookup via [`UserDirectory`]
//!
//! [`Roster`]: assigner_core::Roster

pub mod canvas;
pub mod csv_import;
pub mod enrich;
pub mod error;
pub mod gitlab;
mod http;

pub use canvas::{CanvasClient, CanvasCourse, CanvasCredentials, CanvasStudent, CourseRoster};
pub use enrich::{enrich, enrich_best_effort, EnrichOutcome, UserDirectory};
pub use error::{ImportError, LookupError};
pub use gitlab::GitlabDirectory;

/// Counters reported by a batch import.
///
/// `reported` is the number shown to the user. For CSV it counts data rows
/// processed; for Canvas it counts students returned by the API, which can
/// exceed `inserted` when descriptors are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub reported: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub missing_identifier: usize,
    pub unmatched_accounts: usize,
}
