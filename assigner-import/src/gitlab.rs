//! GitLab user directory used for secondary enrichment.

use serde::Deserialize;

use assigner_core::{Config, SecondaryId};

use crate::enrich::UserDirectory;
use crate::error::LookupError;
use crate::http;

/// Looks up GitLab user ids by username via `GET /api/v4/users?username=`.
pub struct GitlabDirectory {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct GitlabUser {
    id: i64,
}

impl GitlabDirectory {
    pub fn new(host: &str, token: impl Into<String>) -> Self {
        Self {
            agent: http::build_agent(),
            base_url: http::base_url(host),
            token: token.into(),
        }
    }

    /// Build from `gitlab-host` + `token`; `None` unless both are set.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.gitlab_host.as_deref().filter(|h| !h.is_empty())?;
        let token = config.token.as_deref().filter(|t| !t.is_empty())?;
        Some(Self::new(host, token))
    }
}

impl UserDirectory for GitlabDirectory {
    fn user_id(&self, username: &str) -> Result<SecondaryId, LookupError> {
        let url = format!("{}/api/v4/users", self.base_url);
        let response = self
            .agent
            .get(&url)
            .query("username", username)
            .set("PRIVATE-TOKEN", &self.token)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| LookupError::Http {
                url: url.clone(),
                message: http::describe(e),
            })?;

        let users: Vec<GitlabUser> = response.into_json().map_err(|e| LookupError::Http {
            url: url.clone(),
            message: format!("invalid JSON: {e}"),
        })?;

        users
            .first()
            .map(|u| SecondaryId::Number(u.id))
            .ok_or_else(|| LookupError::MissingSecondaryAccount {
                username: username.to_owned(),
            })
    }
}
