//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()` from the top-level flags and a
//! single snapshot of the process environment. Building it validates the
//! configuration, so no command can start a director step without it.

use anyhow::Result;

use crate::application::services::Ports;
use crate::domain::config::{EnvSnapshot, SmokeConfig};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::director::BoshDirector;
use crate::infra::fs::LocalFs;
use crate::infra::manifest::TempManifestRenderer;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Validated run settings.
    pub config: SmokeConfig,
    /// BOSH CLI adapter.
    pub director: BoshDirector<TokioCommandRunner>,
    /// Reader for version and metadata files.
    pub files: LocalFs,
    /// Manifest renderer writing to the system temp dir.
    pub renderer: TempManifestRenderer,
}

impl AppContext {
    /// Construct an `AppContext` from CLI flags and an environment snapshot.
    ///
    /// JSON mode silences progress output so stdout carries only JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or an optional
    /// one cannot be parsed.
    pub fn new(flags: &AppFlags, env: &EnvSnapshot) -> Result<Self> {
        let config = SmokeConfig::from_snapshot(env)?;
        tracing::debug!(?config, "configuration loaded");

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // In JSON mode stdout carries only the report.
        let runner = TokioCommandRunner::new(config.command_timeout())
            .with_status_stdout_to_stderr(flags.json);

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            director: BoshDirector::new(runner, &config.bosh_binary_path),
            files: LocalFs,
            renderer: TempManifestRenderer::default(),
            config,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// A progress reporter bound to this context's output.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Bundle the production ports with `reporter`.
    #[must_use]
    pub fn ports<'a, R>(
        &'a self,
        reporter: &'a R,
    ) -> Ports<'a, BoshDirector<TokioCommandRunner>, LocalFs, TempManifestRenderer, R> {
        Ports {
            director: &self.director,
            files: &self.files,
            renderer: &self.renderer,
            reporter,
        }
    }
}
