//! The course roster and its reconciliation rules.
//!
//! Every insertion path (manual add, CSV import, Canvas import) goes through
//! [`Roster::add`].
//!
//! - [`Roster::exists`]: dedup filter, exact case-sensitive username match
//! - [`Roster::add`]: record merger, appends or rejects with [`RosterError`]
//! - [`Roster::list`]: section-filtered view in insertion order
//! - [`Roster::remove`]: drops every record for a username

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::types::StudentRecord;

/// Ordered collection of student records.
///
/// Serialized as a plain YAML sequence under the config's `roster` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<StudentRecord>);

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any record, in any section, has this username.
    pub fn exists(&self, username: &str) -> bool {
        self.0.iter().any(|r| r.username == username)
    }

    /// Append a new record.
    ///
    /// Without `force`, an existing username anywhere in the roster rejects the
    /// insert with [`RosterError::DuplicateUser`]. With `force` the duplicate
    /// is appended alongside the existing record.
    ///
    /// On success the roster grows by exactly one and the new record is
    /// returned for enrichment; on error it is left untouched.
    pub fn add(
        &mut self,
        name: &str,
        username: &str,
        section: &str,
        force: bool,
    ) -> Result<&mut StudentRecord, RosterError> {
        if username.is_empty() {
            return Err(RosterError::EmptyField { field: "username" });
        }
        if section.is_empty() {
            return Err(RosterError::EmptyField { field: "section" });
        }
        if !force && self.exists(username) {
            return Err(RosterError::DuplicateUser {
                username: username.to_owned(),
            });
        }

        self.0.push(StudentRecord::new(name, username, section));
        let last = self.0.len() - 1;
        Ok(&mut self.0[last])
    }

    /// Records in insertion order, restricted to `section` when given.
    ///
    /// The returned iterator is lazy and `Clone`, so callers can walk it more
    /// than once.
    pub fn list<'a>(
        &'a self,
        section: Option<&'a str>,
    ) -> impl Iterator<Item = &'a StudentRecord> + Clone + 'a {
        self.0
            .iter()
            .filter(move |r| section.map_or(true, |s| r.section == s))
    }

    /// Remove every record with this username, across all sections.
    ///
    /// Returns how many were removed; zero is not an error.
    pub fn remove(&mut self, username: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|r| r.username != username);
        before - self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
