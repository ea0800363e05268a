//! Application service: the setup half of a smoke run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};

use crate::application::ports::{Director, InputFiles, ManifestRenderer, ProgressReporter};
use crate::application::services::step::run_step;
use crate::application::services::{cloud_config, deploy};
use crate::domain::config::SmokeConfig;
use crate::domain::phase::{Session, Step};

/// The ports setup needs, bundled so signatures stay short.
pub struct Ports<'a, D, F, M, R> {
    pub director: &'a D,
    pub files: &'a F,
    pub renderer: &'a M,
    pub reporter: &'a R,
}

/// Drive the director from login through deploy.
///
/// Steps run strictly in order and the first failure stops the sequence.
/// Nothing is retried or rolled back; `session` records how far it got.
///
/// # Errors
///
/// Returns the first failing step's error. Exit failures carry the
/// director's stdout and stderr.
pub async fn run_setup<D, F, M, R>(
    ports: &Ports<'_, D, F, M, R>,
    config: &SmokeConfig,
    session: &mut Session,
) -> Result<()>
where
    D: Director,
    F: InputFiles,
    M: ManifestRenderer,
    R: ProgressReporter,
{
    let Ports {
        director,
        files,
        renderer,
        reporter,
    } = *ports;

    reporter.step("logging in to director...");
    run_step(session, Step::Login, director.login()).await?;
    reporter.success("logged in");

    reporter.step(&format!(
        "uploading release {}...",
        config.syslog_release_path.display()
    ));
    run_step(
        session,
        Step::UploadRelease,
        director.upload_release(&config.syslog_release_path),
    )
    .await?;
    reporter.success("release uploaded");

    reporter.step(&format!(
        "uploading stemcell {}...",
        config.stemcell_path.display()
    ));
    run_step(
        session,
        Step::UploadStemcell,
        director.upload_stemcell(&config.stemcell_path),
    )
    .await?;
    reporter.success("stemcell uploaded");

    let selection = cloud_config::resolve(files, config)?;
    reporter.step(&format!(
        "applying {} cloud config {}...",
        selection.platform,
        selection.config_file.display()
    ));
    run_step(
        session,
        Step::UpdateCloudConfig,
        director.update_cloud_config(&selection.config_file, &selection.overrides),
    )
    .await?;
    reporter.success("cloud config applied");

    let manifest =
        deploy::render_manifest(files, renderer, config).context("preparing deployment manifest")?;
    tracing::debug!(manifest = %manifest.display(), "manifest rendered");
    reporter.step("deploying smoke deployment...");
    run_step(session, Step::Deploy, director.deploy(&manifest)).await?;
    reporter.success("deployed");

    Ok(())
}
