//! Word tokenizing and case-convention rendering.
//!
//! This crate turns identifier-like strings into case-agnostic words and back:
//!
//! * [`tokenize`] splits `fooBar`, `foo-bar`, `FOO_BAR`, ... into `["foo", "bar"]`
//!   and records which [`CaseConvention`] the input used
//! * [`render`] joins words in any of the supported conventions
//!
//! # Example
//!
//! ```rust
//! use mane_case::{CaseConvention, render, tokenize};
//!
//! let ident = tokenize("HelloWorld");
//! assert_eq!(ident.convention(), CaseConvention::Pascal);
//! assert_eq!(render(ident.words(), CaseConvention::Kebab), "hello-world");
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod convention;
mod render;
mod tokenize;

pub use convention::CaseConvention;
pub use render::render;
pub use tokenize::{Identifier, tokenize};
