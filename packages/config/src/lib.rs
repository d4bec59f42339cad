//! Rules-file loading for mane.
//!
//! Replacement rules can be kept in a TOML file instead of (or in addition
//! to) repeating `-r FROM TO` on the command line.
//!
//! # File Format
//!
//! ```toml
//! include_git_ignore = false
//! in_place = true
//!
//! [[replace]]
//! from = "foo"
//! to = "bar"
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mane_config::{load_rules_file, merge_rules};
//!
//! let file = load_rules_file(Path::new("mane.toml"))?;
//! let rules = merge_rules(&file, &[("Hello".into(), "Hi".into())])?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod toml_loader;
mod types;

pub use error::ConfigError;
pub use toml_loader::load_rules_file;
pub use types::{RuleEntry, RulesFile};

use mane_replace::{ReplacementRule, RuleSet};

/// Build the effective rule set: file rules first, then command-line rules.
///
/// A command-line rule with the same FROM as an earlier rule replaces it.
///
/// # Arguments
///
/// * `file` - Rules loaded from a rules file (may be empty)
/// * `cli_rules` - `(from, to)` pairs in command-line order
///
/// # Errors
///
/// * If any rule is invalid (e.g. an empty FROM)
pub fn merge_rules(file: &RulesFile, cli_rules: &[(String, String)]) -> Result<RuleSet, ConfigError> {
    let mut rules = RuleSet::from_pairs(
        file.replace
            .iter()
            .map(|entry| (entry.from.clone(), entry.to.clone())),
    )?;

    for (from, to) in cli_rules {
        rules.push_override(ReplacementRule::new(from.clone(), to.clone())?);
    }

    log::debug!(
        "Using {} replacement rules ({} from file)",
        rules.len(),
        file.replace.len()
    );

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(from: &str, to: &str) -> (String, String) {
        (from.to_string(), to.to_string())
    }

    #[test]
    fn test_merge_rules_cli_overrides_file() {
        let file = RulesFile {
            replace: vec![
                RuleEntry {
                    from: "foo".to_string(),
                    to: "bar".to_string(),
                },
                RuleEntry {
                    from: "one".to_string(),
                    to: "two".to_string(),
                },
            ],
            ..Default::default()
        };

        let rules = merge_rules(&file, &[pair("foo", "baz"), pair("x", "y")]).unwrap();
        let pairs: Vec<(&str, &str)> = rules.iter().map(|r| (r.from(), r.to())).collect();

        assert_eq!(pairs, vec![("one", "two"), ("foo", "baz"), ("x", "y")]);
    }

    #[test]
    fn test_merge_rules_rejects_empty_from() {
        let err = merge_rules(&RulesFile::default(), &[pair("", "y")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule(_)));
    }
}
