//! Process environment capture.

use crate::domain::config::EnvSnapshot;

/// Snapshot the current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped; none of the
/// settings this tool reads can be non-UTF-8.
#[must_use]
pub fn capture() -> EnvSnapshot {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
