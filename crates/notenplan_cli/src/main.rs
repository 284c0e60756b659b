//! Terminal front end for Notenplan.
//!
//! # Responsibility
//! - Resolve database and log locations from arguments/environment.
//! - Load the gradebook once and hand it to the interactive session.

mod command;
mod session;

use clap::Parser;
use log::{error, info};
use notenplan_core::db::open_db;
use notenplan_core::{
    core_version, default_log_level, init_logging, GradebookService, SqliteGradebookRepository,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const APP_DIR_NAME: &str = "notenplan";
const DB_FILE_NAME: &str = "notenplan.sqlite3";

#[derive(Debug, Parser)]
#[command(
    name = "notenplan",
    about = "Noten pro Fach erfassen und Durchschnitte anzeigen",
    version
)]
struct Cli {
    /// SQLite file holding the gradebook.
    #[arg(long, env = "NOTENPLAN_DB")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "NOTENPLAN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "NOTENPLAN_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("notenplan: logging disabled: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("notenplan: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => default_app_dir(dirs::data_dir())?.join(DB_FILE_NAME),
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let conn = open_db(&db_path)?;
    let mut service = GradebookService::load(SqliteGradebookRepository::new(&conn))?;
    info!(
        "event=app_ready module=cli status=ok version={}",
        core_version()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    session::run_session(&mut service, &mut input, &mut output)?;
    Ok(())
}

fn start_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => default_app_dir(dirs::data_local_dir())?.join("logs"),
    };
    let log_dir = log_dir
        .to_str()
        .ok_or("log directory is not valid UTF-8")?
        .to_string();
    init_logging(level, &log_dir)?;
    Ok(())
}

fn default_app_dir(base: Option<PathBuf>) -> Result<PathBuf, &'static str> {
    base.map(|dir| dir.join(APP_DIR_NAME))
        .ok_or("no user data directory found; pass --db and --log-dir explicitly")
}
