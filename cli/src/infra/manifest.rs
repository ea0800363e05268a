//! Infrastructure implementation of the `ManifestRenderer` port.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::application::ports::ManifestRenderer;
use crate::domain::error::ManifestError;
use crate::domain::manifest::{TemplateVars, render_template};

/// Renders into a uniquely named, persisted temp file.
///
/// The file outlives the renderer; nothing in this crate deletes it.
#[derive(Debug, Default)]
pub struct TempManifestRenderer {
    dir: Option<PathBuf>,
}

impl TempManifestRenderer {
    /// Render into `dir` instead of the system temp directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl ManifestRenderer for TempManifestRenderer {
    fn render(&self, template: &Path, vars: &TemplateVars) -> Result<PathBuf, ManifestError> {
        let text = std::fs::read_to_string(template).map_err(|source| ManifestError::Read {
            path: template.to_path_buf(),
            source,
        })?;
        let rendered = render_template(&text, vars)?;

        let dir = self.dir.clone().unwrap_or_else(std::env::temp_dir);
        let mut file = tempfile::Builder::new()
            .prefix("manifest")
            .suffix(".yml")
            .tempfile_in(&dir)
            .map_err(|source| ManifestError::TempFile { source })?;
        file.write_all(rendered.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| ManifestError::TempFile { source })?;
        let (_, path) = file
            .keep()
            .map_err(|e| ManifestError::TempFile { source: e.error })?;

        let path = std::path::absolute(&path).map_err(|source| ManifestError::TempFile { source })?;
        tracing::debug!(path = %path.display(), "manifest written");
        Ok(path)
    }
}
