use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::Subcommand;
use roster_lib::{
    Repository, Result,
    notice::Notice,
    repository::{export_file_name, storage::StorageError},
};
use tracing::info;

use crate::{confirm::confirm, notice::show};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export all members as JSON
    Export {
        /// File to write, or "-" for stdout. Defaults to a dated file in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete every member
    Clear {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn handle(repo: &Repository, cmd: &Command, today: NaiveDate) -> Result<()> {
    match cmd {
        Command::Export { output } => {
            let json = repo.export()?;
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(export_file_name(today)));

            if path == Path::new("-") {
                println!("{json}");
            } else {
                fs::write(&path, json).map_err(StorageError::from)?;
                info!("Exported members to {}", path.display());
            }

            show(&Notice::exported());
        }
        Command::Clear { yes } => {
            let confirmed = *yes || confirm("Are you sure you want to delete all members?");

            if repo.clear_all(confirmed)? {
                show(&Notice::cleared());
            }
        }
    }

    Ok(())
}
