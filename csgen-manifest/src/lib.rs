//! Parsing and validation of `csgen.toml` manifests.
//!
//! A manifest lists generator options and the C# types to emit. Parsing
//! reports problems as [`miette`] diagnostics pointing into the file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
