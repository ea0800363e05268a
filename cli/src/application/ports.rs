//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use crate::domain::error::{CommandError, ManifestError};
use crate::domain::manifest::TemplateVars;
use crate::domain::platform::VarOverride;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// A nonzero exit is not an error: it comes back inside `Output` for the
/// caller to judge. Only launch, wait and timeout failures are `Err`.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output, CommandError>;
    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// Implementations may redirect the child's stdout to stderr.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus, CommandError>;
}

// ── Director Port ─────────────────────────────────────────────────────────────

/// One method per director CLI invocation the smoke workflow makes.
#[allow(async_fn_in_trait)]
pub trait Director {
    async fn login(&self) -> Result<Output, CommandError>;
    async fn upload_release(&self, path: &Path) -> Result<Output, CommandError>;
    async fn upload_stemcell(&self, path: &Path) -> Result<Output, CommandError>;
    async fn update_cloud_config(
        &self,
        file: &Path,
        overrides: &[VarOverride],
    ) -> Result<Output, CommandError>;
    /// Deploy `manifest` as the smoke deployment.
    async fn deploy(&self, manifest: &Path) -> Result<Output, CommandError>;
    /// Delete the smoke deployment.
    async fn delete_deployment(&self) -> Result<Output, CommandError>;
    /// Remove every unused release, stemcell and disk from the director.
    async fn clean_up(&self) -> Result<Output, CommandError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. The trait is sync.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Reads the small text inputs of a run: version files, metadata.
pub trait InputFiles {
    /// Read a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Renders the manifest template to a fresh file.
pub trait ManifestRenderer {
    /// Render `template` with `vars` and return the absolute path written.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` if the template cannot be read, is malformed,
    /// or the output file cannot be created.
    fn render(&self, template: &Path, vars: &TemplateVars) -> Result<PathBuf, ManifestError>;
}
