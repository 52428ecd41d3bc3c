//! `assigner import <file> <section> [--force]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use assigner_core::config;
use assigner_import::csv_import;

use super::{as_directory, gitlab_directory};

/// Import students from a registrar CSV export.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file to import from.
    pub file: PathBuf,

    /// Section being imported.
    pub section: String,

    /// Import duplicate students anyway.
    #[arg(long)]
    pub force: bool,
}

impl ImportArgs {
    pub fn run(self, config_path: &Path) -> Result<()> {
        let summary = config::edit_at(config_path, |conf| {
            let directory = gitlab_directory(conf);
            csv_import::import_csv_file(
                &self.file,
                &mut conf.roster,
                &self.section,
                self.force,
                as_directory(&directory),
            )
            .with_context(|| format!("import from '{}' failed", self.file.display()))
        })?;

        println!("Imported {} students.", summary.reported);
        Ok(())
    }
}
