//! Rendering words in a naming convention.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crate::convention::CaseConvention;

/// Join `words` using `convention`.
///
/// [`CaseConvention::Unknown`] concatenates the words in lowercase.
#[must_use]
pub fn render<S: AsRef<str>>(words: &[S], convention: CaseConvention) -> String {
    let mut words = words.iter().map(AsRef::as_ref);

    match convention {
        CaseConvention::Pascal => words.map(capitalize).collect(),
        CaseConvention::Camel => {
            let mut out = words.next().map(str::to_lowercase).unwrap_or_default();
            for word in words {
                out.push_str(&capitalize(word));
            }
            out
        }
        CaseConvention::Kebab => join_lower(words, "-"),
        CaseConvention::Snake => join_lower(words, "_"),
        CaseConvention::ScreamingSnake => words
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join("_"),
        CaseConvention::Unknown => join_lower(words, ""),
    }
}

fn join_lower<'a>(words: impl Iterator<Item = &'a str>, separator: &str) -> String {
    words
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
