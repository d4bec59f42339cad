//! A single case-aware replacement rule.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use mane_case::{CaseConvention, tokenize};

use crate::error::ReplaceError;

/// How a matched occurrence was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The occurrence is FROM rendered in this convention; TO is rendered the same way.
    Convention(CaseConvention),
    /// The occurrence is FROM verbatim with no convention reading; TO is used verbatim.
    Literal,
}

/// One spelling of FROM that the scanner looks for, with its precomputed substitute.
#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    replacement: String,
    kind: MatchKind,
}

/// An ordered `(from, to)` literal pair with its candidate match set.
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    from: String,
    to: String,
    /// Longest first, so the first hit at an offset is the longest one there.
    candidates: Vec<Candidate>,
}

impl ReplacementRule {
    /// Build a rule, precomputing every case rendering of `from`.
    ///
    /// A rule whose `from` equals `to` is accepted and leaves text unchanged.
    ///
    /// # Errors
    ///
    /// * If `from` is empty
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, ReplaceError> {
        let from = from.into();
        let to = to.into();

        if from.is_empty() {
            return Err(ReplaceError::InvalidRule {
                from,
                to,
                reason: "FROM must not be empty".to_string(),
            });
        }

        if from == to {
            log::debug!("Rule {from:?} -> {to:?} is a no-op");
        }

        let candidates = build_candidates(&from, &to);
        log::trace!(
            "Rule {from:?} -> {to:?} matches {:?}",
            candidates.iter().map(|c| &c.text).collect::<Vec<_>>()
        );

        Ok(Self {
            from,
            to,
            candidates,
        })
    }

    /// The FROM literal as given.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// The TO literal as given.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// How an occurrence spelled exactly `matched` would be interpreted.
    #[must_use]
    pub fn classify(&self, matched: &str) -> Option<MatchKind> {
        self.candidates
            .iter()
            .find(|c| c.text == matched)
            .map(|c| c.kind)
    }

    /// Replace every occurrence in `text`, scanning left to right.
    ///
    /// At each offset the longest candidate wins. Scanning resumes right after
    /// the substituted span, so a substitution is never rescanned by this rule.
    /// Matches are not restricted to word boundaries: `foo` inside `foobar` is replaced.
    #[must_use]
    pub fn replace(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied_up_to = 0;
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            if let Some(candidate) = self.candidates.iter().find(|c| rest.starts_with(&c.text)) {
                out.push_str(&text[copied_up_to..offset]);
                out.push_str(&candidate.replacement);
                offset += candidate.text.len();
                copied_up_to = offset;
            } else {
                offset += rest.chars().next().map_or(1, char::len_utf8);
            }
        }

        out.push_str(&text[copied_up_to..]);
        out
    }
}

/// Collect the renderings of `from` in priority order, then sort longest first.
///
/// When several conventions render to the same text the first one in priority
/// order owns it: FROM's own convention (or the verbatim literal when FROM has
/// no convention), then Pascal, Camel, Kebab, Snake, `ScreamingSnake`, and
/// finally the verbatim literal.
fn build_candidates(from: &str, to: &str) -> Vec<Candidate> {
    let from_ident = tokenize(from);
    let to_ident = tokenize(to);

    let mut order = Vec::with_capacity(CaseConvention::ALL.len() + 1);
    if from_ident.convention().is_known() {
        order.push(MatchKind::Convention(from_ident.convention()));
    } else {
        order.push(MatchKind::Literal);
    }
    order.extend(CaseConvention::ALL.into_iter().map(MatchKind::Convention));
    order.push(MatchKind::Literal);

    let mut candidates: Vec<Candidate> = Vec::with_capacity(order.len());
    for kind in order {
        let (text, replacement) = match kind {
            MatchKind::Convention(convention) => {
                (from_ident.render(convention), to_ident.render(convention))
            }
            MatchKind::Literal => (from.to_string(), to.to_string()),
        };

        if text.is_empty() || candidates.iter().any(|c| c.text == text) {
            continue;
        }

        candidates.push(Candidate {
            text,
            replacement,
            kind,
        });
    }

    candidates.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
    candidates
}
