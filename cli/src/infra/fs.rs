//! Filesystem infrastructure: implements `InputFiles`.

use std::path::Path;

use crate::application::ports::InputFiles;

/// Production filesystem implementation of `InputFiles`.
pub struct LocalFs;

impl InputFiles for LocalFs {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tracing::debug!(path = %path.display(), "reading input");
        std::fs::read_to_string(path)
    }
}
