//! Cloud-config selection per IaaS.
//!
//! Each supported platform is one row in [`PROFILES`]. Adding a platform
//! means adding a row; nothing else dispatches on the identifier.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::metadata::VsphereEnvironment;

/// One `-v key=value` pair passed to `update-cloud-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarOverride {
    pub key: String,
    pub value: String,
}

impl VarOverride {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }

    /// Rendered as the director CLI expects: `key=value`.
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Supported platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Vbox,
    Vsphere,
}

impl Platform {
    /// Resolve an `IAAS` value. Unset or unrecognized falls back to vSphere.
    #[must_use]
    pub fn from_id(id: Option<&str>) -> Self {
        match id {
            Some("vbox") => Self::Vbox,
            _ => Self::Vsphere,
        }
    }

    #[must_use]
    pub fn profile(self) -> &'static PlatformProfile {
        match self {
            Self::Vbox => &PROFILES[0],
            Self::Vsphere => &PROFILES[1],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().id)
    }
}

type OverrideBuilder = fn(&VsphereEnvironment) -> Vec<VarOverride>;

/// Static description of how a platform's cloud config is applied.
pub struct PlatformProfile {
    pub platform: Platform,
    pub id: &'static str,
    /// Path relative to the assets directory.
    pub cloud_config: &'static str,
    /// `None` when the static file is applied as-is.
    pub overrides: Option<OverrideBuilder>,
}

impl PlatformProfile {
    /// Whether [`select`] needs the environment metadata for this platform.
    #[must_use]
    pub fn needs_metadata(&self) -> bool {
        self.overrides.is_some()
    }
}

pub static PROFILES: [PlatformProfile; 2] = [
    PlatformProfile {
        platform: Platform::Vbox,
        id: "vbox",
        cloud_config: "vbox/cloud-config.yml",
        overrides: None,
    },
    PlatformProfile {
        platform: Platform::Vsphere,
        id: "vsphere",
        cloud_config: "vsphere/cloud-config.yml",
        overrides: Some(vsphere_overrides),
    },
];

/// The six vSphere network overrides, in the order the director receives them.
#[must_use]
pub fn vsphere_overrides(env: &VsphereEnvironment) -> Vec<VarOverride> {
    let net = &env.metadata.network1;
    vec![
        VarOverride::new("vcenter_dc", env.datacenter.as_str()),
        VarOverride::new("vcenter_cluster", env.cluster.as_str()),
        VarOverride::new("internal_cidr", net.cidr.as_str()),
        VarOverride::new("internal_reserved", bracketed(&net.reserved_range)),
        VarOverride::new("internal_gw", net.gateway.as_str()),
        VarOverride::new("internal_vcenter_vlan", net.vlan.as_str()),
    ]
}

/// Wrap a raw range as a one-element list literal for `-v` interpolation.
#[must_use]
pub fn bracketed(range: &str) -> String {
    format!("[{range}]")
}

/// The cloud config to apply and its variable overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloudConfigSelection {
    pub platform: Platform,
    pub config_file: PathBuf,
    pub overrides: Vec<VarOverride>,
}

/// The selection was asked for a platform that needs metadata, without it.
#[derive(Debug, thiserror::Error)]
#[error("platform '{0}' needs environment metadata")]
pub struct MetadataRequired(pub Platform);

/// Pick the cloud config for `platform`.
///
/// # Errors
///
/// Returns `MetadataRequired` if the platform builds overrides from metadata
/// and `env` is `None`.
pub fn select(
    platform: Platform,
    assets_dir: &Path,
    env: Option<&VsphereEnvironment>,
) -> Result<CloudConfigSelection, MetadataRequired> {
    let profile = platform.profile();
    let overrides = match (profile.overrides, env) {
        (None, _) => Vec::new(),
        (Some(build), Some(env)) => build(env),
        (Some(_), None) => return Err(MetadataRequired(platform)),
    };
    Ok(CloudConfigSelection {
        platform,
        config_file: assets_dir.join(profile.cloud_config),
        overrides,
    })
}
