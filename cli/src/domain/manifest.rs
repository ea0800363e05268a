//! Manifest template substitution.
//!
//! Placeholders are `{{ .Name }}` and are replaced verbatim. There are no
//! expressions, pipelines or conditionals.

#![allow(clippy::expect_used)] // Pattern is a compile-time constant

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ManifestError;

/// Variable names the bundled manifest uses.
pub const RELEASE_VERSION_VAR: &str = "SyslogReleaseVersion";
pub const STEMCELL_VERSION_VAR: &str = "StemcellVersion";

pub type TemplateVars = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder pattern")
});

/// Variables for the smoke manifest. Versions are trimmed.
#[must_use]
pub fn manifest_vars(release_version: &str, stemcell_version: &str) -> TemplateVars {
    TemplateVars::from([
        (RELEASE_VERSION_VAR.to_string(), release_version.trim().to_string()),
        (STEMCELL_VERSION_VAR.to_string(), stemcell_version.trim().to_string()),
    ])
}

/// Substitute every placeholder in `template`.
///
/// # Errors
///
/// - `ManifestError::UnknownPlaceholder` if a placeholder names a variable
///   absent from `vars`.
/// - `ManifestError::Syntax` if `{{` opens anything other than a placeholder.
pub fn render_template(template: &str, vars: &TemplateVars) -> Result<String, ManifestError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let literal = &template[last..whole.start()];
        reject_stray_braces(literal, last)?;
        let value = vars
            .get(name.as_str())
            .ok_or_else(|| ManifestError::UnknownPlaceholder {
                name: name.as_str().to_string(),
            })?;
        out.push_str(literal);
        out.push_str(value);
        last = whole.end();
    }

    let tail = &template[last..];
    reject_stray_braces(tail, last)?;
    out.push_str(tail);
    Ok(out)
}

fn reject_stray_braces(literal: &str, base: usize) -> Result<(), ManifestError> {
    match literal.find("{{") {
        Some(i) => Err(ManifestError::Syntax {
            offset: base + i,
            snippet: literal[i..].chars().take(24).collect(),
        }),
        None => Ok(()),
    }
}
