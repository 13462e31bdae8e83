use std::{path::PathBuf, process::ExitCode};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use roster_lib::{
    Error, Repository,
    locale::Locale,
    notice::Notice,
    repository::{LoadWarning, config::CoreConfig},
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod confirm;
mod data;
mod member;
mod notice;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Override the language used for month names
    #[arg(short, long, global = true, value_enum)]
    locale: Option<Locale>,

    /// Override the directory the member list is stored in
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(short, long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on members
    #[command(subcommand)]
    Member(member::Command),
    /// Export or wipe the stored data
    #[command(subcommand)]
    Data(data::Command),
}

fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let result = open(&cli).and_then(|repo| match &cli.command {
        Command::Member(cmd) => member::handle(&repo, cmd, today),
        Command::Data(cmd) => data::handle(&repo, cmd, today),
    });

    match result {
        Ok(()) => sysexits::ExitCode::Ok.into(),
        Err(err) => {
            tracing::debug!("{err}");
            notice::show(&Notice::from(&err));
            exit_code(&err).into()
        }
    }
}

fn open(cli: &Cli) -> roster_lib::Result<Repository> {
    let mut cfg = CoreConfig::load()?;

    if let Some(locale) = cli.locale {
        cfg.locale = locale;
    }
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = Some(dir.clone());
    }

    Repository::open(cfg)
}

fn exit_code(err: &Error) -> sysexits::ExitCode {
    use sysexits::ExitCode::*;

    match err {
        Error::Validation(_) | Error::Duplicate { .. } => DataErr,
        Error::NotFound(_) => NoInput,
        Error::Load(LoadWarning::Malformed(_)) => DataErr,
        Error::Load(LoadWarning::Unreadable(_)) | Error::Storage(_) => IoErr,
        Error::Serialization(_) => Software,
        Error::Config(_) => Config,
    }
}
