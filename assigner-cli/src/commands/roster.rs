//! `assigner roster list|add|remove`

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use assigner_core::{config, RosterError};
use assigner_import::enrich_best_effort;

use super::{as_directory, gitlab_directory};

/// Manage the class roster.
#[derive(Subcommand, Debug)]
pub enum RosterCommand {
    /// Print the roster.
    List(ListArgs),

    /// Add a student to the roster.
    Add(AddArgs),

    /// Remove a student from the roster.
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Section to list.
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of student.
    pub name: String,

    /// Username of student.
    pub username: String,

    /// Section of student.
    pub section: String,

    /// Add duplicate student anyway.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Username of student to remove.
    pub username: String,
}

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Section")]
    section: String,
}

pub fn run(cmd: RosterCommand, config_path: &Path) -> Result<()> {
    match cmd {
        RosterCommand::List(args) => list(args, config_path),
        RosterCommand::Add(args) => add(args, config_path),
        RosterCommand::Remove(args) => remove(args, config_path),
    }
}

fn list(args: ListArgs, config_path: &Path) -> Result<()> {
    let conf = config::load_at(config_path)
        .with_context(|| format!("failed to load '{}'", config_path.display()))?;

    let rows: Vec<RosterRow> = conf
        .roster
        .list(args.section.as_deref())
        .enumerate()
        .map(|(idx, student)| RosterRow {
            index: idx + 1,
            name: student.name.clone(),
            username: student.username.clone(),
            section: student.section.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::ascii());
    println!("{table}");
    Ok(())
}

fn add(args: AddArgs, config_path: &Path) -> Result<()> {
    config::edit_at(config_path, |conf| {
        let directory = gitlab_directory(conf);
        match conf
            .roster
            .add(&args.name, &args.username, &args.section, args.force)
        {
            Ok(student) => {
                enrich_best_effort(student, &args.name, as_directory(&directory));
                tracing::info!(username = %args.username, section = %args.section, "added student");
                Ok(())
            }
            Err(RosterError::DuplicateUser { .. }) => {
                tracing::error!("Student already exists in roster!");
                Ok(())
            }
            Err(err) => Err(anyhow::Error::new(err).context("cannot add student")),
        }
    })
}

fn remove(args: RemoveArgs, config_path: &Path) -> Result<()> {
    let removed = config::edit_at(config_path, |conf| {
        Ok::<_, anyhow::Error>(conf.roster.remove(&args.username))
    })?;

    tracing::info!("Removed {removed} entries from the roster");
    Ok(())
}
