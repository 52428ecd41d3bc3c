pub mod canvas;
pub mod import;
pub mod roster;

use assigner_core::Config;
use assigner_import::{GitlabDirectory, UserDirectory};

/// GitLab enrichment is on only when both `gitlab-host` and `token` are set.
pub(crate) fn gitlab_directory(config: &Config) -> Option<GitlabDirectory> {
    let directory = GitlabDirectory::from_config(config);
    if directory.is_none() {
        tracing::debug!("gitlab-host/token not configured, skipping GitLab id lookup");
    }
    directory
}

pub(crate) fn as_directory(directory: &Option<GitlabDirectory>) -> Option<&dyn UserDirectory> {
    directory.as_ref().map(|d| d as &dyn UserDirectory)
}
