//! Command implementations

pub mod check;
pub mod run;
pub mod setup;
pub mod teardown;
