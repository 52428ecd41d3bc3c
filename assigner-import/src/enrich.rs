//! Secondary enrichment: attach a collaboration-platform user id to a record.
//!
//! Lookups are best-effort. A failure is logged and the record stays in the
//! roster without an id.

use assigner_core::{SecondaryId, StudentRecord};

use crate::error::LookupError;

/// Resolves a roster username to the platform's user id.
pub trait UserDirectory {
    fn user_id(&self, username: &str) -> Result<SecondaryId, LookupError>;
}

/// Result of [`enrich_best_effort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// No directory configured; nothing attempted.
    Skipped,
    Attached,
    /// The lookup failed; the record is unchanged.
    Unmatched,
}

/// Look up `record.username` and store the id on success.
pub fn enrich(record: &mut StudentRecord, directory: &dyn UserDirectory) -> Result<(), LookupError> {
    let id = directory.user_id(&record.username)?;
    record.secondary_id = Some(id);
    Ok(())
}

/// [`enrich`] with failures downgraded to a warning naming `display_name`.
pub fn enrich_best_effort(
    record: &mut StudentRecord,
    display_name: &str,
    directory: Option<&dyn UserDirectory>,
) -> EnrichOutcome {
    let Some(directory) = directory else {
        return EnrichOutcome::Skipped;
    };
    match enrich(record, directory) {
        Ok(()) => EnrichOutcome::Attached,
        Err(LookupError::MissingSecondaryAccount { .. }) => {
            tracing::warn!("Student {display_name} does not have a GitLab account.");
            EnrichOutcome::Unmatched
        }
        Err(err) => {
            tracing::warn!(username = %record.username, error = %err, "GitLab user lookup failed");
            EnrichOutcome::Unmatched
        }
    }
}
