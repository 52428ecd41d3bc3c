//! Canvas LMS adapter: course roster client and the import driver.
//!
//! [`import_course`] checks credentials before anything touches the network,
//! fetches the course's students through a [`CourseRoster`], and merges them
//! into the roster. Students without an SIS id are skipped with an error log;
//! duplicates are skipped with a warning.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use assigner_core::{Config, Roster};

use crate::enrich::{enrich_best_effort, EnrichOutcome, UserDirectory};
use crate::error::ImportError;
use crate::http;
use crate::ImportSummary;

pub const DEFAULT_CANVAS_HOST: &str = "canvas.instructure.com";

/// Upper bound on followed `Link: rel="next"` pages per request.
const MAX_PAGES: usize = 500;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A student as returned by `GET /api/v1/courses/:id/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CanvasStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sortable_name: String,
    #[serde(default)]
    pub sis_user_id: Option<String>,
}

impl CanvasStudent {
    /// Display name, falling back to the sortable name when Canvas omits it.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.sortable_name
        } else {
            &self.name
        }
    }

    /// SIS id, treating an empty string the same as an absent one.
    pub fn username(&self) -> Option<&str> {
        self.sis_user_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CanvasCourse {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Credentials + client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasCredentials {
    pub token: String,
    pub host: String,
}

impl CanvasCredentials {
    /// Read `canvas-token` and `canvas-host` from the config.
    ///
    /// A missing or empty token is [`ImportError::MissingCredential`]; a
    /// missing host falls back to [`DEFAULT_CANVAS_HOST`].
    pub fn from_config(config: &Config) -> Result<Self, ImportError> {
        let token = config
            .canvas_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ImportError::MissingCredential { key: "canvas-token" })?;
        let host = config
            .canvas_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_CANVAS_HOST);
        Ok(Self {
            token: token.to_owned(),
            host: host.to_owned(),
        })
    }
}

/// Source of a course's student list.
pub trait CourseRoster {
    fn course_students(&self, course_id: &str) -> Result<Vec<CanvasStudent>, ImportError>;
}

/// Blocking Canvas REST client.
pub struct CanvasClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl CanvasClient {
    pub fn new(credentials: CanvasCredentials) -> Self {
        Self {
            agent: http::build_agent(),
            base_url: http::base_url(&credentials.host),
            token: credentials.token,
        }
    }

    /// Courses where the token's user is enrolled as teacher or TA, in the
    /// order Canvas returns them, without repeats.
    pub fn instructor_courses(&self) -> Result<Vec<CanvasCourse>, ImportError> {
        let mut courses: Vec<CanvasCourse> = Vec::new();
        for role in ["teacher", "ta"] {
            let url = format!(
                "{}/api/v1/courses?enrollment_type={role}&per_page=100",
                self.base_url
            );
            for course in self.get_paginated::<CanvasCourse>(url)? {
                if !courses.iter().any(|c| c.id == course.id) {
                    courses.push(course);
                }
            }
        }
        Ok(courses)
    }

    fn get_paginated<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>, ImportError> {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0;

        while let Some(url) = next.take() {
            pages += 1;
            if pages > MAX_PAGES {
                tracing::warn!(url = %url, "Canvas pagination limit reached, stopping");
                break;
            }

            let response = self
                .agent
                .get(&url)
                .set("Authorization", &format!("Bearer {}", self.token))
                .set("Accept", "application/json")
                .call()
                .map_err(|e| ImportError::Http {
                    url: url.clone(),
                    message: http::describe(e),
                })?;

            next = http::next_link(response.header("Link"));
            if let Some(link) = next.as_deref() {
                if !http::same_origin(link, &self.base_url) {
                    return Err(ImportError::Http {
                        url: link.to_owned(),
                        message: format!(
                            "pagination link leaves {}, refusing to send credentials",
                            self.base_url
                        ),
                    });
                }
            }
            let page: Vec<T> = response.into_json().map_err(|e| ImportError::Http {
                url: url.clone(),
                message: format!("invalid JSON: {e}"),
            })?;
            tracing::debug!(url = %url, count = page.len(), "fetched Canvas page");
            items.extend(page);
        }

        Ok(items)
    }
}

impl CourseRoster for CanvasClient {
    fn course_students(&self, course_id: &str) -> Result<Vec<CanvasStudent>, ImportError> {
        let url = format!(
            "{}/api/v1/courses/{course_id}/users?enrollment_type[]=student&per_page=100",
            self.base_url
        );
        self.get_paginated(url)
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Merge already-fetched `students` into `roster` under `section`.
///
/// `reported` in the summary is `students.len()`, not the number inserted.
pub fn import_students(
    roster: &mut Roster,
    students: &[CanvasStudent],
    section: &str,
    force: bool,
    directory: Option<&dyn UserDirectory>,
) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary {
        reported: students.len(),
        ..ImportSummary::default()
    };

    for student in students {
        let Some(username) = student.username() else {
            tracing::error!("Could not get username for {}", student.sortable_name);
            summary.missing_identifier += 1;
            continue;
        };
        if !force && roster.exists(username) {
            tracing::warn!("User {username} is already in the roster, skipping");
            summary.duplicates += 1;
            continue;
        }

        let record = roster.add(&student.sortable_name, username, section, force)?;
        summary.inserted += 1;
        let outcome = enrich_best_effort(record, student.display_name(), directory);
        if outcome == EnrichOutcome::Unmatched {
            summary.unmatched_accounts += 1;
        }
    }

    tracing::info!(
        returned = summary.reported,
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        missing_identifier = summary.missing_identifier,
        "Canvas import finished"
    );
    Ok(summary)
}

/// Import a Canvas course into `config.roster`.
///
/// Credentials are validated first; `connect` (and therefore any network
/// call) only runs once they are present.
pub fn import_course<S, F>(
    config: &mut Config,
    course_id: &str,
    section: &str,
    force: bool,
    connect: F,
    directory: Option<&dyn UserDirectory>,
) -> Result<ImportSummary, ImportError>
where
    S: CourseRoster,
    F: FnOnce(CanvasCredentials) -> S,
{
    let credentials = CanvasCredentials::from_config(config)?;
    let source = connect(credentials);
    let students = source.course_students(course_id)?;
    import_students(&mut config.roster, &students, section, force, directory)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
