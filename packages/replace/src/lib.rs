//! Case-aware literal replacement rules.
//!
//! A [`ReplacementRule`] such as `foo -> bar` also rewrites every case-convention
//! rendering of its FROM term (`Foo`, `FOO`, `foo-item`'s `foo`, `FooBar` when the
//! rule is `foo-bar -> baz-qux`, ...) into the same convention of its TO term.
//!
//! A [`RuleSet`] applies rules in order, each rule seeing the previous rule's output.
//!
//! # Example
//!
//! ```rust
//! use mane_replace::{ReplacementRule, RuleSet};
//!
//! let rules = RuleSet::new(vec![ReplacementRule::new("HelloWorld", "GoodMorning")?]);
//! assert_eq!(rules.apply("hello_world HELLO_WORLD"), "good_morning GOOD_MORNING");
//! # Ok::<(), mane_replace::ReplaceError>(())
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod rule;
mod rule_set;

pub use error::ReplaceError;
pub use rule::{MatchKind, ReplacementRule};
pub use rule_set::RuleSet;
