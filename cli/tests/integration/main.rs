//! Integration tests for stemcell-smoke
//!
//! These tests spawn the actual binary and test end-to-end behavior against a
//! stand-in director CLI script.

mod cli_tests;
