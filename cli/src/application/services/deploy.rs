//! Application service: manifest rendering for the deploy step.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{InputFiles, ManifestRenderer};
use crate::domain::config::SmokeConfig;
use crate::domain::error::InputError;
use crate::domain::manifest::manifest_vars;

fn read_input(
    files: &impl InputFiles,
    what: &'static str,
    path: &Path,
) -> Result<String, InputError> {
    files.read_to_string(path).map_err(|source| InputError {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Read both version files and render the manifest template.
///
/// # Errors
///
/// Returns an error if a version file or the template cannot be read, the
/// template is malformed, or the output file cannot be written.
pub fn render_manifest(
    files: &impl InputFiles,
    renderer: &impl ManifestRenderer,
    config: &SmokeConfig,
) -> Result<PathBuf> {
    let release = read_input(files, "release version", &config.syslog_release_version_file)?;
    let stemcell = read_input(files, "stemcell version", &config.stemcell_version_file)?;
    let vars = manifest_vars(&release, &stemcell);
    let template = config.manifest_template();
    renderer
        .render(&template, &vars)
        .with_context(|| format!("rendering {}", template.display()))
}
