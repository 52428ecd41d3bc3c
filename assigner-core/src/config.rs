//! YAML config document holding the roster and service credentials.
//!
//! # File shape
//!
//! ```yaml
//! canvas-token: <token>
//! canvas-host: canvas.example.edu
//! gitlab-host: https://gitlab.example.edu
//! token: <gitlab private token>
//! roster:
//!   - name: Doe, Jane
//!     username: jdoe
//!     section: A
//!     id: 1337
//! ```
//!
//! Keys this crate does not know about are carried through load/save
//! untouched, since other tools share the same document.
//!
//! # API pattern
//!
//! A command runs inside [`edit_at`]: the document is loaded, handed to the
//! command as `&mut Config`, and written back only if the command succeeded.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::roster::Roster;

/// Root of the config document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub roster: Roster,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab_host: Option<String>,

    /// GitLab private token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load the config at `path`.
///
/// A missing file is an empty config; malformed YAML is
/// [`ConfigError::Parse`] with the path attached.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically save `config` to `path`.
///
/// Write flow: serialize → `<file>.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config.yml".to_owned());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Load, mutate, and save the config at `path`.
///
/// `f` decides whether anything is persisted: on `Err` the file is left as it
/// was and the error is returned unchanged. A document `f` did not change is
/// not rewritten.
pub fn edit_at<T, E, F>(path: &Path, f: F) -> Result<T, E>
where
    F: FnOnce(&mut Config) -> Result<T, E>,
    E: From<ConfigError>,
{
    let mut config = load_at(path)?;
    let before = config.clone();
    let out = f(&mut config)?;
    if config != before {
        save_at(path, &config)?;
    }
    Ok(out)
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
