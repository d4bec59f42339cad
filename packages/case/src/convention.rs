//! Naming conventions for multi-word identifiers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// A textual encoding of a multi-word identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseConvention {
    /// `HelloWorld`
    Pascal,
    /// `helloWorld`
    Camel,
    /// `hello-world` (also `HELLO-WORLD` on input)
    Kebab,
    /// `hello_world`
    Snake,
    /// `HELLO_WORLD`
    ScreamingSnake,
    /// A single word, or anything with no detectable word boundary.
    Unknown,
}

impl CaseConvention {
    /// Every convention that has a well-defined rendering, in matching priority order.
    pub const ALL: [Self; 5] = [
        Self::Pascal,
        Self::Camel,
        Self::Kebab,
        Self::Snake,
        Self::ScreamingSnake,
    ];

    /// Whether this is one of the five concrete conventions.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for CaseConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pascal => write!(f, "PascalCase"),
            Self::Camel => write!(f, "camelCase"),
            Self::Kebab => write!(f, "kebab-case"),
            Self::Snake => write!(f, "snake_case"),
            Self::ScreamingSnake => write!(f, "SCREAMING_SNAKE_CASE"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
