//! Application services: use-case orchestration.
//!
//! Each service module implements one part of the smoke workflow by composing
//! domain logic with port trait calls. Services import only from
//! `crate::domain` and `crate::application::ports`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod cloud_config;
pub mod deploy;
pub mod setup;
pub mod step;
pub mod suite;
pub mod teardown;

pub use setup::{Ports, run_setup};
pub use suite::{Outcome, SuiteOutcome, SuiteReport, run_suite};
pub use teardown::run_teardown;
