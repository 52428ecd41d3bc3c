//! `assigner canvas list` and `assigner canvas import <course_id> <section>`

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use assigner_core::config;
use assigner_import::{canvas, CanvasClient, CanvasCredentials, ImportError};

use super::{as_directory, gitlab_directory};

#[derive(Subcommand, Debug)]
pub enum CanvasCommand {
    /// List Canvas courses where you are a teacher or TA.
    List,

    /// Import the roster from a specific Canvas course.
    Import(CanvasImportArgs),
}

#[derive(Args, Debug)]
pub struct CanvasImportArgs {
    /// Canvas ID for course to import from.
    pub course_id: String,

    /// Section being imported.
    pub section: String,

    /// Import duplicate students anyway.
    #[arg(long)]
    pub force: bool,
}

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

pub fn run(cmd: CanvasCommand, config_path: &Path) -> Result<()> {
    match cmd {
        CanvasCommand::List => list(config_path),
        CanvasCommand::Import(args) => import(args, config_path),
    }
}

fn list(config_path: &Path) -> Result<()> {
    let conf = config::load_at(config_path)
        .with_context(|| format!("failed to load '{}'", config_path.display()))?;

    let credentials = match CanvasCredentials::from_config(&conf) {
        Ok(c) => c,
        Err(err @ ImportError::MissingCredential { .. }) => {
            tracing::error!(
                "canvas-token configuration is missing! Please set the Canvas API access \
                 token before attempting to use Canvas API functionality"
            );
            return Err(anyhow::Error::new(err)
                .context("Canvas course listing failed: missing Canvas API access token."));
        }
        Err(err) => return Err(err.into()),
    };

    let courses = CanvasClient::new(credentials)
        .instructor_courses()
        .context("failed to fetch Canvas courses")?;

    if courses.is_empty() {
        println!("No courses found where current user is a teacher.");
        return Ok(());
    }

    let rows: Vec<CourseRow> = courses
        .into_iter()
        .enumerate()
        .map(|(idx, c)| CourseRow {
            index: idx + 1,
            id: c.id,
            name: c.name,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::ascii());
    println!("{table}");
    Ok(())
}

fn import(args: CanvasImportArgs, config_path: &Path) -> Result<()> {
    let summary = config::edit_at(config_path, |conf| {
        let directory = gitlab_directory(conf);
        match canvas::import_course(
            conf,
            &args.course_id,
            &args.section,
            args.force,
            CanvasClient::new,
            as_directory(&directory),
        ) {
            Ok(summary) => Ok(summary),
            Err(err @ ImportError::MissingCredential { .. }) => {
                tracing::error!(
                    "canvas-token configuration is missing! Please set the Canvas API access \
                     token before attempting to import users from Canvas"
                );
                Err(anyhow::Error::new(err)
                    .context("Import from canvas failed: missing Canvas API access token."))
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("import of Canvas course '{}' failed", args.course_id))),
        }
    })?;

    tracing::info!(
        "{} of {} Canvas students added to the roster",
        summary.inserted,
        summary.reported
    );
    println!("Imported {} students.", summary.reported);
    Ok(())
}
