//! Domain layer: pure types, validation and substitution.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod phase;
pub mod platform;

pub use config::{DEPLOYMENT_NAME, EnvSnapshot, REQUIRED_VARIABLES, SmokeConfig, validate};
pub use error::{
    CommandError, ConfigError, InputError, ManifestError, MetadataError, PhaseError, StepError,
};
pub use metadata::{EnvironmentMetadata, VsphereEnvironment};
pub use phase::{Phase, Session, Step};
pub use platform::{CloudConfigSelection, Platform, VarOverride};
