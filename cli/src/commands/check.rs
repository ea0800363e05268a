//! `stemcell-smoke check`: validate configuration without touching the director.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::services::cloud_config;
use crate::domain::config::{ConfigSummary, DEPLOYMENT_NAME};
use crate::domain::platform::CloudConfigSelection;
use crate::output::json;

#[derive(Serialize)]
struct CheckReport {
    config: ConfigSummary,
    deployment: &'static str,
    cloud_config: CloudConfigSelection,
    missing_inputs: Vec<PathBuf>,
}

/// Run `stemcell-smoke check`.
///
/// Loads metadata for platforms that need it and checks that every input file
/// the setup reads is present.
///
/// # Errors
///
/// Returns an error if metadata cannot be loaded or an input file is missing.
pub fn run(app: &AppContext) -> Result<()> {
    let selection = cloud_config::resolve(&app.files, &app.config)?;
    let config = &app.config;
    let missing_inputs: Vec<PathBuf> = [
        config.manifest_template(),
        config.syslog_release_version_file.clone(),
        config.stemcell_version_file.clone(),
        selection.config_file.clone(),
    ]
    .into_iter()
    .filter(|p| !p.is_file())
    .collect();

    let report = CheckReport {
        config: config.summary(),
        deployment: DEPLOYMENT_NAME,
        cloud_config: selection,
        missing_inputs,
    };

    if app.is_json() {
        println!("{}", json::to_pretty(&report)?);
    } else {
        print_report(app, &report);
    }

    if !report.missing_inputs.is_empty() {
        anyhow::bail!("{} input file(s) missing", report.missing_inputs.len());
    }
    Ok(())
}

fn print_report(app: &AppContext, report: &CheckReport) {
    let ctx = &app.output;
    let summary = &report.config;
    ctx.header("Configuration");
    ctx.kv("Environment", &summary.environment);
    ctx.kv("Client", &summary.client);
    ctx.kv("Binary", &summary.binary);
    ctx.kv("Release", &summary.release);
    ctx.kv("Stemcell", &summary.stemcell);
    ctx.kv("Deployment", report.deployment);
    if let Some(secs) = summary.timeout_secs {
        ctx.kv("Timeout", &format!("{secs}s"));
    }

    ctx.header("Cloud config");
    ctx.kv("Platform", &report.cloud_config.platform.to_string());
    ctx.kv("File", &report.cloud_config.config_file.display().to_string());
    for o in &report.cloud_config.overrides {
        ctx.kv("-v", &o.to_arg());
    }

    for path in &report.missing_inputs {
        ctx.warn(&format!("missing input: {}", path.display()));
    }
    if report.missing_inputs.is_empty() {
        ctx.success("configuration looks complete");
    }
}
