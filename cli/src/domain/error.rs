//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::phase::Step;

// ── Configuration errors ──────────────────────────────────────────────────────

/// Errors raised while capturing and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} was not set")]
    Missing { name: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ── Command errors ────────────────────────────────────────────────────────────

/// Failures of the process itself, as opposed to a nonzero exit.
///
/// A nonzero exit is data and travels inside `std::process::Output`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {after:?}")]
    TimedOut { program: String, after: Duration },
}

impl CommandError {
    /// Returns `true` when the executable could not be started at all.
    #[must_use]
    pub fn is_launch(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }
}

// ── Step errors ───────────────────────────────────────────────────────────────

/// A director step ran to completion but did not succeed.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{step} failed (exit {exit})\nstdOut: {stdout} \n stdErr: {stderr}", exit = display_code(*.code))]
    Exit {
        step: Step,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("test command failed (exit {})", display_code(*.0))]
    Tests(Option<i32>),
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

// ── Input errors ──────────────────────────────────────────────────────────────

/// Errors rendering the deployment manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed placeholder at byte {offset}: {snippet}")]
    Syntax { offset: usize, snippet: String },

    #[error("template references unknown variable '{name}'")]
    UnknownPlaceholder { name: String },

    #[error("cannot write rendered manifest: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading the environment metadata record.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("cannot read environment metadata {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse environment metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A version file could not be read.
#[derive(Debug, Error)]
#[error("cannot read {what} from {path}: {source}")]
pub struct InputError {
    pub what: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// ── Session errors ────────────────────────────────────────────────────────────

/// An attempted phase transition that breaks the linear order.
#[derive(Debug, Error)]
#[error("cannot move from {from} to {to}")]
pub struct PhaseError {
    pub from: crate::domain::phase::Phase,
    pub to: crate::domain::phase::Phase,
}
