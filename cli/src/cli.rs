//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::domain::error::{
    CommandError, ConfigError, InputError, ManifestError, MetadataError, StepError,
};

/// Stemcell smoke tests against a BOSH director
#[derive(Parser)]
#[command(
    name = "stemcell-smoke",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also `NO_COLOR=1`)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate configuration and show what a run would apply
    Check,

    /// Log in, upload artifacts, apply cloud config and deploy
    Setup,

    /// Delete the smoke deployment and clean up the director
    Teardown,

    /// Setup, run tests, then always tear down
    Run(commands::run::RunArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// The environment is captured once here and every command works from
    /// that snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
            ..
        } = self;
        let env = crate::infra::env::capture();
        let app = AppContext::new(
            &AppFlags {
                no_color,
                quiet,
                json,
            },
            &env,
        )?;

        match command {
            Command::Check => commands::check::run(&app),
            Command::Setup => commands::setup::run(&app).await,
            Command::Teardown => commands::teardown::run(&app).await,
            Command::Run(args) => commands::run::run(&args, &app).await,
        }
    }
}

/// Stable machine-readable code for the first known error in the chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return "config";
        }
        if cause.is::<CommandError>() {
            return "command";
        }
        if cause.is::<StepError>() {
            return "step_failed";
        }
        if cause.is::<ManifestError>() {
            return "manifest";
        }
        if cause.is::<MetadataError>() {
            return "metadata";
        }
        if cause.is::<InputError>() {
            return "input";
        }
    }
    "error"
}
