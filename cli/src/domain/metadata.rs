//! vSphere environment metadata, as handed over by the environment lock pool.

use serde::{Deserialize, Serialize};

use crate::domain::error::MetadataError;

/// The JSON record describing a locked vSphere environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentMetadata {
    #[serde(rename = "_description")]
    pub description: String,
    #[serde(rename = "DNS")]
    pub dns: String,
    #[serde(rename = "directorIP")]
    pub director_ip: String,
    pub network1: PrimaryNetwork,
    pub network2: SecondaryNetwork,
}

/// `network1`: the internal network the smoke deployment lands on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryNetwork {
    #[serde(rename = "vCenterVLAN")]
    pub vlan: String,
    #[serde(rename = "vCenterCIDR")]
    pub cidr: String,
    #[serde(rename = "vCenterGateway")]
    pub gateway: String,
    #[serde(rename = "staticIP-1")]
    pub static_ip_1: String,
    #[serde(rename = "staticIP-2")]
    pub static_ip_2: String,
    #[serde(rename = "reservedRange")]
    pub reserved_range: String,
    #[serde(rename = "staticRange")]
    pub static_range: String,
    #[serde(rename = "_dynamicRange")]
    pub dynamic_range: String,
    #[serde(rename = "vCenterNetmask")]
    pub netmask: String,
}

/// `network2`: same shape minus the second static IP and the netmask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryNetwork {
    #[serde(rename = "vCenterVLAN")]
    pub vlan: String,
    #[serde(rename = "vCenterCIDR")]
    pub cidr: String,
    #[serde(rename = "vCenterGateway")]
    pub gateway: String,
    #[serde(rename = "staticIP-1")]
    pub static_ip_1: String,
    #[serde(rename = "reservedRange")]
    pub reserved_range: String,
    #[serde(rename = "staticRange")]
    pub static_range: String,
    #[serde(rename = "_dynamicRange")]
    pub dynamic_range: String,
}

impl EnvironmentMetadata {
    /// Parse the metadata JSON.
    ///
    /// Missing keys default to empty strings; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Parse` if the text is not a JSON object of
    /// this shape.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Metadata plus the datacenter and cluster names taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsphereEnvironment {
    pub metadata: EnvironmentMetadata,
    pub datacenter: String,
    pub cluster: String,
}

impl VsphereEnvironment {
    #[must_use]
    pub fn new(metadata: EnvironmentMetadata, datacenter: &str, cluster: &str) -> Self {
        Self {
            metadata,
            datacenter: datacenter.to_owned(),
            cluster: cluster.to_owned(),
        }
    }
}
