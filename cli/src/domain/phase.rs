//! Deployment session state machine.
//!
//! Setup phases advance strictly one at a time. Teardown phases can be entered
//! from anywhere, because teardown runs no matter how far setup got.

use std::fmt;

use serde::Serialize;

use crate::domain::error::PhaseError;

/// How far a smoke run has progressed against the director.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unvalidated,
    Authenticated,
    ReleaseUploaded,
    StemcellUploaded,
    ConfigApplied,
    Deployed,
    Undeployed,
    CleanedUp,
}

impl Phase {
    /// The setup phase that follows this one, if any.
    #[must_use]
    pub fn next_setup(self) -> Option<Self> {
        match self {
            Self::Unvalidated => Some(Self::Authenticated),
            Self::Authenticated => Some(Self::ReleaseUploaded),
            Self::ReleaseUploaded => Some(Self::StemcellUploaded),
            Self::StemcellUploaded => Some(Self::ConfigApplied),
            Self::ConfigApplied => Some(Self::Deployed),
            Self::Deployed | Self::Undeployed | Self::CleanedUp => None,
        }
    }

    #[must_use]
    pub fn is_teardown(self) -> bool {
        matches!(self, Self::Undeployed | Self::CleanedUp)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unvalidated => "unvalidated",
            Self::Authenticated => "authenticated",
            Self::ReleaseUploaded => "release uploaded",
            Self::StemcellUploaded => "stemcell uploaded",
            Self::ConfigApplied => "cloud config applied",
            Self::Deployed => "deployed",
            Self::Undeployed => "undeployed",
            Self::CleanedUp => "cleaned up",
        };
        f.write_str(s)
    }
}

/// One director invocation in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Login,
    UploadRelease,
    UploadStemcell,
    UpdateCloudConfig,
    Deploy,
    DeleteDeployment,
    CleanUp,
}

impl Step {
    /// Phase entered when this step succeeds.
    #[must_use]
    pub fn target(self) -> Phase {
        match self {
            Self::Login => Phase::Authenticated,
            Self::UploadRelease => Phase::ReleaseUploaded,
            Self::UploadStemcell => Phase::StemcellUploaded,
            Self::UpdateCloudConfig => Phase::ConfigApplied,
            Self::Deploy => Phase::Deployed,
            Self::DeleteDeployment => Phase::Undeployed,
            Self::CleanUp => Phase::CleanedUp,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Login => "login",
            Self::UploadRelease => "upload-release",
            Self::UploadStemcell => "upload-stemcell",
            Self::UpdateCloudConfig => "update-cloud-config",
            Self::Deploy => "deploy",
            Self::DeleteDeployment => "delete-deployment",
            Self::CleanUp => "clean-up",
        };
        f.write_str(s)
    }
}

/// The local view of the remote deployment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Unvalidated,
        }
    }

    /// Furthest phase reached so far.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Record a successful step.
    ///
    /// # Errors
    ///
    /// Returns `PhaseError` if `step` would skip or repeat a setup phase, or
    /// move teardown backwards.
    pub fn complete(&mut self, step: Step) -> Result<(), PhaseError> {
        let to = step.target();
        let allowed = if to.is_teardown() {
            to > self.phase
        } else {
            self.phase.next_setup() == Some(to)
        };
        if !allowed {
            return Err(PhaseError {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}
