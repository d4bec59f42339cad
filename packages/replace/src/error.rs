//! Error types for replacement rules.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

/// Errors that can occur while building replacement rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The rule can never match anything.
    #[error("Invalid replacement rule {from:?} -> {to:?}: {reason}")]
    InvalidRule {
        /// The FROM literal.
        from: String,
        /// The TO literal.
        to: String,
        /// Why the rule was rejected.
        reason: String,
    },
}
