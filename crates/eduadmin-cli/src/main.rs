//! eduadmin - manage an education platform's tests, textbooks and notes
//! from the terminal.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::{run_login, run_logout, run_register, run_status};
use crate::commands::common::GlobalOptions;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::dashboard::run_dashboard;
use crate::commands::notes::run_notes;
use crate::commands::open::run_open;
use crate::commands::tests_cmd::{run_questions, run_tests};
use crate::commands::textbooks::run_textbooks;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "warn,eduadmin=info,eduadmin_core=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = GlobalOptions {
        profile: cli.profile,
        api_url: cli.api_url,
        token_file: cli.token_file,
    };

    match cli.command {
        Commands::Login { username, password } => {
            run_login(&options, &username, &password).await?;
        }
        Commands::Logout => run_logout(&options)?,
        Commands::Status => run_status(&options)?,
        Commands::Register { username, password } => {
            run_register(&options, &username, &password).await?;
        }
        Commands::Open { path } => run_open(&options, &path).await?,
        Commands::Dashboard { json } => run_dashboard(&options, json).await?,
        Commands::Tests { command } => run_tests(&options, command).await?,
        Commands::Questions { command } => run_questions(&options, command).await?,
        Commands::Textbooks { command } => run_textbooks(&options, command).await?,
        Commands::Notes { command } => run_notes(&options, command).await?,
        Commands::Config { command } => run_config(command, &options)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
