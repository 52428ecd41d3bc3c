//! Roster import from the registrar's CSV export.
//!
//! The export layout is fixed: the first row is a header, column 3 holds the
//! display name and column 4 the student's email-style identifier. The
//! username is everything before the first `@`.
//!
//! Duplicates are warned about and skipped; a row whose username cannot be
//! derived aborts the whole batch.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use assigner_core::{Roster, RosterError};

use crate::enrich::{enrich_best_effort, EnrichOutcome, UserDirectory};
use crate::error::{io_err, ImportError};
use crate::ImportSummary;

pub const NAME_COLUMN: usize = 3;
pub const IDENTIFIER_COLUMN: usize = 4;

/// Prefix of `identifier` before the first `@`.
///
/// `None` when that prefix is empty (blank identifier, or one that starts
/// with `@`). An identifier with no `@` at all is returned whole.
pub fn username_from_identifier(identifier: &str) -> Option<&str> {
    let user = identifier.split('@').next().unwrap_or_default();
    (!user.is_empty()).then_some(user)
}

/// Import every data row of `reader` into `roster` under `section`.
pub fn import_csv<R: Read>(
    reader: R,
    roster: &mut Roster,
    section: &str,
    force: bool,
    directory: Option<&dyn UserDirectory>,
) -> Result<ImportSummary, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut summary = ImportSummary::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        if row_idx == 0 {
            continue;
        }
        let row = row_idx + 1;
        summary.reported += 1;

        let name = record
            .get(NAME_COLUMN)
            .ok_or_else(|| malformed(row, "missing name column"))?;
        let identifier = record
            .get(IDENTIFIER_COLUMN)
            .ok_or_else(|| malformed(row, "missing identifier column"))?;
        let username = username_from_identifier(identifier).ok_or_else(|| {
            malformed(row, format!("cannot derive a username from '{identifier}'"))
        })?;

        match roster.add(name, username, section, force) {
            Ok(student) => {
                summary.inserted += 1;
                if enrich_best_effort(student, name, directory) == EnrichOutcome::Unmatched {
                    summary.unmatched_accounts += 1;
                }
            }
            Err(RosterError::DuplicateUser { username }) => {
                tracing::warn!("User {username} is already in the roster, skipping");
                summary.duplicates += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::info!(
        processed = summary.reported,
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        "CSV import finished"
    );
    Ok(summary)
}

/// [`import_csv`] over the file at `path`.
pub fn import_csv_file(
    path: &Path,
    roster: &mut Roster,
    section: &str,
    force: bool,
    directory: Option<&dyn UserDirectory>,
) -> Result<ImportSummary, ImportError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    import_csv(file, roster, section, force, directory)
}

fn malformed(row: usize, reason: impl Into<String>) -> ImportError {
    ImportError::MalformedRecord {
        row,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
