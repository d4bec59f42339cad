//! Splitting identifiers into case-agnostic words.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crate::convention::CaseConvention;
use crate::render::render;

/// An identifier broken into lowercase words, plus the convention it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    words: Vec<String>,
    convention: CaseConvention,
}

impl Identifier {
    /// The lowercase words, in order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The convention detected on input.
    #[must_use]
    pub const fn convention(&self) -> CaseConvention {
        self.convention
    }

    /// Render the words in `convention`.
    #[must_use]
    pub fn render(&self, convention: CaseConvention) -> String {
        render(self.words.as_slice(), convention)
    }
}

/// Split `input` into lowercase words and detect its naming convention.
///
/// * A `-` anywhere makes the input kebab case (split on `-`)
/// * Otherwise a `_` makes it snake case, screaming if every letter is uppercase
/// * Otherwise words start at a lowercase/digit to uppercase transition and at
///   the last capital of an acronym run (`XMLParser` is `xml` + `parser`)
///
/// Input that yields fewer than two words is [`CaseConvention::Unknown`].
#[must_use]
pub fn tokenize(input: &str) -> Identifier {
    let (words, convention) = if input.contains('-') {
        (split_on(input, '-'), CaseConvention::Kebab)
    } else if input.contains('_') {
        let convention = if is_screaming(input) {
            CaseConvention::ScreamingSnake
        } else {
            CaseConvention::Snake
        };
        (split_on(input, '_'), convention)
    } else {
        let convention = if input.chars().next().is_some_and(char::is_uppercase) {
            CaseConvention::Pascal
        } else {
            CaseConvention::Camel
        };
        (split_on_boundaries(input), convention)
    };

    let convention = if words.len() < 2 {
        CaseConvention::Unknown
    } else {
        convention
    };

    Identifier { words, convention }
}

fn split_on(input: &str, separator: char) -> Vec<String> {
    input
        .split(separator)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_screaming(input: &str) -> bool {
    let mut letters = input.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

fn split_on_boundaries(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let starts_word = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if starts_word {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
