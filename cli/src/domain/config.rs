//! Smoke-run configuration: required variables, validation, typed settings.
//!
//! Pure functions only. The process environment is captured by the infra
//! layer into an [`EnvSnapshot`]; everything here works on that snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Variables that must be present before anything touches the director.
///
/// Checked in this order; the first absent one is reported.
pub const REQUIRED_VARIABLES: &[&str] = &[
    "BOSH_ENVIRONMENT",
    "BOSH_CLIENT",
    "BOSH_CLIENT_SECRET",
    "BOSH_VSPHERE_VCENTER_DC",
    "BOSH_VSPHERE_VCENTER_CLUSTER",
    "BOSH_BINARY_PATH",
    "SYSLOG_RELEASE_PATH",
    "STEMCELL_PATH",
];

/// Name of the deployment created and deleted by every run.
pub const DEPLOYMENT_NAME: &str = "bosh-stemcell-smoke-tests";

// ── Snapshot ─────────────────────────────────────────────────────────────────

/// An immutable copy of the environment, taken once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.vars.iter().map(|(k, v)| (k.clone(), v.clone()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Check that every required variable is present.
///
/// Presence only: an empty value passes.
///
/// # Errors
///
/// Returns `ConfigError::Missing` naming the first absent variable.
pub fn validate(snapshot: &EnvSnapshot) -> Result<(), ConfigError> {
    match REQUIRED_VARIABLES.iter().find(|name| !snapshot.contains(name)) {
        Some(name) => Err(ConfigError::Missing {
            name: (*name).to_string(),
        }),
        None => Ok(()),
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// Typed settings for one smoke run.
///
/// Field names map to upper-case environment variables (`bosh_client` reads
/// `BOSH_CLIENT`).
#[derive(Clone, Deserialize)]
pub struct SmokeConfig {
    pub bosh_environment: String,
    pub bosh_client: String,
    pub bosh_client_secret: String,
    pub bosh_vsphere_vcenter_dc: String,
    pub bosh_vsphere_vcenter_cluster: String,
    pub bosh_binary_path: PathBuf,
    pub syslog_release_path: PathBuf,
    pub stemcell_path: PathBuf,

    /// Platform selector; unset picks the vSphere profile.
    #[serde(default)]
    pub iaas: Option<String>,

    #[serde(default = "default_assets_dir")]
    pub smoke_assets_dir: PathBuf,

    #[serde(default = "default_release_version_file")]
    pub syslog_release_version_file: PathBuf,

    #[serde(default = "default_stemcell_version_file")]
    pub stemcell_version_file: PathBuf,

    #[serde(default = "default_metadata_file")]
    pub environment_metadata_file: PathBuf,

    /// Per-invocation timeout. Unset waits forever.
    #[serde(default)]
    pub smoke_command_timeout_secs: Option<u64>,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("../assets")
}

fn default_release_version_file() -> PathBuf {
    PathBuf::from("../syslog-release/version")
}

fn default_stemcell_version_file() -> PathBuf {
    PathBuf::from("../stemcell/version")
}

fn default_metadata_file() -> PathBuf {
    PathBuf::from("../environment/metadata")
}

impl SmokeConfig {
    /// Validate the snapshot, then deserialize it into settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for the first absent required variable,
    /// or `ConfigError::Invalid` if an optional variable cannot be parsed.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Result<Self, ConfigError> {
        validate(snapshot)?;
        envy::from_iter(snapshot.pairs()).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.smoke_command_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn manifest_template(&self) -> PathBuf {
        self.smoke_assets_dir.join("manifest.yml")
    }

    /// Serializable view with the client secret redacted.
    #[must_use]
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            environment: self.bosh_environment.clone(),
            client: self.bosh_client.clone(),
            binary: self.bosh_binary_path.display().to_string(),
            release: self.syslog_release_path.display().to_string(),
            stemcell: self.stemcell_path.display().to_string(),
            iaas: self.iaas.clone(),
            assets_dir: self.smoke_assets_dir.display().to_string(),
            timeout_secs: self.smoke_command_timeout_secs,
        }
    }
}

impl fmt::Debug for SmokeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmokeConfig")
            .field("bosh_environment", &self.bosh_environment)
            .field("bosh_client", &self.bosh_client)
            .field("bosh_client_secret", &"<redacted>")
            .field("bosh_vsphere_vcenter_dc", &self.bosh_vsphere_vcenter_dc)
            .field("bosh_vsphere_vcenter_cluster", &self.bosh_vsphere_vcenter_cluster)
            .field("bosh_binary_path", &self.bosh_binary_path)
            .field("syslog_release_path", &self.syslog_release_path)
            .field("stemcell_path", &self.stemcell_path)
            .field("iaas", &self.iaas)
            .field("smoke_assets_dir", &self.smoke_assets_dir)
            .field("smoke_command_timeout_secs", &self.smoke_command_timeout_secs)
            .finish_non_exhaustive()
    }
}

/// What `check` prints. Never carries the secret.
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub environment: String,
    pub client: String,
    pub binary: String,
    pub release: String,
    pub stemcell: String,
    pub iaas: Option<String>,
    pub assets_dir: String,
    pub timeout_secs: Option<u64>,
}
