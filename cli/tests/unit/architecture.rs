//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries hold:
//! domain is pure, application sees only domain and its own ports.

use std::path::Path;

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Non-comment lines before the first `#[cfg(test)]`.
fn production_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .take_while(|l| !l.trim().starts_with("#[cfg(test)]") && !l.trim().starts_with("#[cfg(all(test"))
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

fn src(layer: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer)
}

fn assert_no_forbidden(layer: &str, forbidden: &[&str]) {
    let files = collect_rs_files(&src(layer));
    assert!(!files.is_empty(), "no sources found under src/{layer}");
    let mut violations = Vec::new();
    for file in files {
        for (n, line) in production_lines(&file).iter().enumerate() {
            for pattern in forbidden {
                if line.contains(pattern) {
                    violations.push(format!("{}:{}: {}", file.display(), n + 1, line.trim()));
                }
            }
        }
    }
    assert!(violations.is_empty(), "boundary violations:\n{}", violations.join("\n"));
}

#[test]
fn test_domain_has_no_io_or_outer_layer_imports() {
    assert_no_forbidden(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "tokio",
            "std::fs",
            "std::process",
        ],
    );
}

#[test]
fn test_application_does_not_import_infra_or_presentation() {
    assert_no_forbidden(
        "application",
        &["crate::infra", "crate::commands", "crate::output", "std::fs"],
    );
}
