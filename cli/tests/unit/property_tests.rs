//! Property-based tests for validation and manifest substitution.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use stemcell_smoke::domain::config::{EnvSnapshot, REQUIRED_VARIABLES, validate};
use stemcell_smoke::domain::error::ConfigError;
use stemcell_smoke::domain::manifest::{
    RELEASE_VERSION_VAR, STEMCELL_VERSION_VAR, manifest_vars, render_template,
};
use stemcell_smoke::domain::platform::bracketed;

// ============================================================================
// validate() property tests
// ============================================================================

proptest! {
    /// Any subset of required variables that is not the full set fails, and
    /// the reported name is the first absent one in declaration order.
    #[test]
    fn prop_missing_variable_is_named(mask in proptest::collection::vec(any::<bool>(), REQUIRED_VARIABLES.len())) {
        let snapshot: EnvSnapshot = REQUIRED_VARIABLES
            .iter()
            .zip(&mask)
            .filter(|(_, present)| **present)
            .map(|(name, _)| (*name, "x"))
            .collect();
        let first_missing = REQUIRED_VARIABLES
            .iter()
            .zip(&mask)
            .find(|(_, present)| !**present)
            .map(|(name, _)| *name);

        match (validate(&snapshot), first_missing) {
            (Ok(()), None) => {}
            (Err(ConfigError::Missing { name }), Some(expected)) => prop_assert_eq!(name, expected),
            (result, expected) => prop_assert!(false, "got {:?}, expected missing {:?}", result, expected),
        }
    }

    /// Values are never inspected, so any value (including empty) passes.
    #[test]
    fn prop_any_values_pass(value in ".*") {
        let snapshot: EnvSnapshot = REQUIRED_VARIABLES.iter().map(|n| (*n, value.as_str())).collect();
        prop_assert!(validate(&snapshot).is_ok());
    }
}

// ============================================================================
// render_template() property tests
// ============================================================================

proptest! {
    /// Both placeholders are replaced by the trimmed versions and nothing
    /// else in the template changes.
    #[test]
    fn prop_render_replaces_only_placeholders(
        prefix in "[a-z: \n-]{0,40}",
        middle in "[a-z: \n-]{0,40}",
        release in "[0-9.]{1,10}",
        stemcell in "[0-9.]{1,10}",
        pad in "[ \n\t]{0,3}",
    ) {
        let template = format!(
            "{prefix}{{{{ .{RELEASE_VERSION_VAR} }}}}{middle}{{{{.{STEMCELL_VERSION_VAR}}}}}"
        );
        let vars = manifest_vars(&format!("{pad}{release}{pad}"), &format!("{stemcell}{pad}"));
        let rendered = render_template(&template, &vars).expect("valid template");
        prop_assert_eq!(rendered, format!("{prefix}{release}{middle}{stemcell}"));
    }

    /// Rendering is deterministic.
    #[test]
    fn prop_render_is_deterministic(release in "[0-9.]{1,10}", stemcell in "[0-9.]{1,10}") {
        let template = format!("r: {{{{.{RELEASE_VERSION_VAR}}}}}\ns: {{{{.{STEMCELL_VERSION_VAR}}}}}\n");
        let vars = manifest_vars(&release, &stemcell);
        let a = render_template(&template, &vars).expect("valid template");
        let b = render_template(&template, &vars).expect("valid template");
        prop_assert_eq!(a, b);
    }

    /// Reserved ranges always reach the director as a one-element list.
    #[test]
    fn prop_bracketed_wraps_verbatim(range in "[0-9.-]{0,31}") {
        let wrapped = bracketed(&range);
        prop_assert!(wrapped.starts_with('[') && wrapped.ends_with(']'));
        prop_assert_eq!(&wrapped[1..wrapped.len() - 1], range.as_str());
    }
}
