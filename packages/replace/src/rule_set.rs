//! Ordered collections of replacement rules.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::is_separator;

use crate::error::ReplaceError;
use crate::rule::ReplacementRule;

/// Rules applied as a left fold: rule N+1 runs on the output of rule N.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    /// Create a rule set from already validated rules.
    #[must_use]
    pub const fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }

    /// Validate and collect `(from, to)` pairs in order.
    ///
    /// # Errors
    ///
    /// * If any pair is not a valid [`ReplacementRule`]
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self, ReplaceError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(from, to)| ReplacementRule::new(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Append a rule, replacing any earlier rule with the same FROM literal.
    pub fn push_override(&mut self, rule: ReplacementRule) {
        self.rules.retain(|existing| existing.from() != rule.from());
        self.rules.push(rule);
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &ReplacementRule> {
        self.rules.iter()
    }

    /// Apply every rule in order to arbitrary text.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.replace(&acc))
    }

    /// Apply every rule to a file or directory name.
    ///
    /// Each separator-delimited segment is rewritten on its own, so no match
    /// ever spans a path separator.
    #[must_use]
    pub fn apply_to_name(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        for segment in name.split_inclusive(is_separator) {
            let (body, separator) = match segment.chars().last() {
                Some(last) if is_separator(last) => segment.split_at(segment.len() - last.len_utf8()),
                _ => (segment, ""),
            };
            out.push_str(&self.apply(body));
            out.push_str(separator);
        }
        out
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ReplacementRule;
    type IntoIter = std::slice::Iter<'a, ReplacementRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_hello_world_to_hi_japan() {
        let set = rules(&[("Hello", "Hi"), ("World", "Japan")]);
        assert_eq!(set.apply("Hello, World"), "Hi, Japan");
    }

    #[test]
    fn test_rules_compose_sequentially() {
        // The second rule sees the first rule's output.
        let set = rules(&[("foo", "bar"), ("bar", "baz")]);
        assert_eq!(set.apply("foo Foo"), "baz Baz");
    }

    #[test]
    fn test_order_matters() {
        let set = rules(&[("bar", "baz"), ("foo", "bar")]);
        assert_eq!(set.apply("foo bar"), "bar baz");
    }

    #[test]
    fn test_from_pairs_rejects_empty_from() {
        let err = RuleSet::from_pairs([("foo", "bar"), ("", "x")]).unwrap_err();
        assert!(matches!(err, ReplaceError::InvalidRule { .. }));
    }

    #[test]
    fn test_apply_to_name() {
        let set = rules(&[("foo", "bar")]);
        assert_eq!(set.apply_to_name("foo-item.tsx"), "bar-item.tsx");
        assert_eq!(set.apply_to_name("FooService.ts"), "BarService.ts");
    }

    #[test]
    fn test_apply_to_name_never_spans_separator() {
        let set = rules(&[("a/b", "c")]);
        assert_eq!(set.apply("a/b"), "c");
        assert_eq!(set.apply_to_name("a/b"), "a/b");
    }

    #[test]
    fn test_push_override_replaces_same_from() {
        let mut set = rules(&[("foo", "bar"), ("baz", "qux")]);
        set.push_override(ReplacementRule::new("foo", "zip").unwrap());

        let pairs: Vec<(&str, &str)> = set.iter().map(|r| (r.from(), r.to())).collect();
        assert_eq!(pairs, vec![("baz", "qux"), ("foo", "zip")]);
    }

    #[test]
    fn test_empty_set_is_identity() {
        let set = RuleSet::default();
        assert!(set.is_empty());
        assert_eq!(set.apply("anything"), "anything");
    }
}
