//! Application service: cloud-config selection.

use anyhow::{Context, Result};

use crate::application::ports::InputFiles;
use crate::domain::config::SmokeConfig;
use crate::domain::error::MetadataError;
use crate::domain::metadata::{EnvironmentMetadata, VsphereEnvironment};
use crate::domain::platform::{self, CloudConfigSelection, Platform};

/// Read the metadata file and attach the datacenter and cluster names.
///
/// # Errors
///
/// Returns `MetadataError` if the file is unreadable or not valid JSON.
pub fn load_environment(
    files: &impl InputFiles,
    config: &SmokeConfig,
) -> Result<VsphereEnvironment, MetadataError> {
    let path = &config.environment_metadata_file;
    let text = files
        .read_to_string(path)
        .map_err(|source| MetadataError::Read {
            path: path.clone(),
            source,
        })?;
    let metadata = EnvironmentMetadata::parse(&text)?;
    Ok(VsphereEnvironment::new(
        metadata,
        &config.bosh_vsphere_vcenter_dc,
        &config.bosh_vsphere_vcenter_cluster,
    ))
}

/// Resolve the platform from `IAAS` and build its cloud-config selection.
///
/// Metadata is only read for platforms that need it.
///
/// # Errors
///
/// Returns an error if the platform needs metadata and it cannot be loaded.
pub fn resolve(files: &impl InputFiles, config: &SmokeConfig) -> Result<CloudConfigSelection> {
    let platform = Platform::from_id(config.iaas.as_deref());
    let env = if platform.profile().needs_metadata() {
        Some(load_environment(files, config).context("loading environment metadata")?)
    } else {
        None
    };
    Ok(platform::select(
        platform,
        &config.smoke_assets_dir,
        env.as_ref(),
    )?)
}
