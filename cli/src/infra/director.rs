//! Infrastructure implementation of the `Director` port.
//!
//! `BoshDirector<R>` routes every BOSH CLI call through a `CommandRunner`.
//! Credentials are not passed as arguments: the CLI reads `BOSH_ENVIRONMENT`,
//! `BOSH_CLIENT` and `BOSH_CLIENT_SECRET` from the inherited environment.

use std::path::Path;
use std::process::Output;

use crate::application::ports::{CommandRunner, Director};
use crate::domain::config::DEPLOYMENT_NAME;
use crate::domain::error::CommandError;
use crate::domain::platform::VarOverride;

/// Infrastructure adapter over the BOSH CLI binary.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct BoshDirector<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> BoshDirector<R> {
    pub fn new(runner: R, binary: &Path) -> Self {
        Self {
            runner,
            binary: binary.to_string_lossy().into_owned(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn bosh(&self, args: &[&str]) -> Result<Output, CommandError> {
        self.runner.run(&self.binary, args).await
    }
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Argument vector for `update-cloud-config`.
#[must_use]
pub fn cloud_config_args(file: &Path, overrides: &[VarOverride]) -> Vec<String> {
    let mut args = vec![
        "-n".to_string(),
        "update-cloud-config".to_string(),
        arg(file),
    ];
    for o in overrides {
        args.push("-v".to_string());
        args.push(o.to_arg());
    }
    args
}

impl<R: CommandRunner> Director for BoshDirector<R> {
    async fn login(&self) -> Result<Output, CommandError> {
        self.bosh(&["login"]).await
    }

    async fn upload_release(&self, path: &Path) -> Result<Output, CommandError> {
        self.bosh(&["upload-release", &arg(path)]).await
    }

    async fn upload_stemcell(&self, path: &Path) -> Result<Output, CommandError> {
        self.bosh(&["upload-stemcell", &arg(path)]).await
    }

    async fn update_cloud_config(
        &self,
        file: &Path,
        overrides: &[VarOverride],
    ) -> Result<Output, CommandError> {
        let args = cloud_config_args(file, overrides);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.bosh(&args).await
    }

    async fn deploy(&self, manifest: &Path) -> Result<Output, CommandError> {
        self.bosh(&["-n", "-d", DEPLOYMENT_NAME, "deploy", &arg(manifest)])
            .await
    }

    async fn delete_deployment(&self) -> Result<Output, CommandError> {
        self.bosh(&["-n", "-d", DEPLOYMENT_NAME, "delete-deployment"])
            .await
    }

    async fn clean_up(&self) -> Result<Output, CommandError> {
        self.bosh(&["-n", "clean-up", "--all"]).await
    }
}
