//! Rules-file types.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

/// One `[[replace]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    /// Text to replace.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

/// A parsed rules file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    /// Copy files even when ignore rules exclude them.
    #[serde(default)]
    pub include_git_ignore: bool,

    /// Rewrite file and directory names as well as contents.
    #[serde(default)]
    pub in_place: bool,

    /// Replacement rules, applied in order.
    #[serde(default)]
    pub replace: Vec<RuleEntry>,
}
