//! C# source generation for csgen.
//!
//! This crate turns type descriptors from `csgen-core` into complete C#
//! source files.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware text writing (SourceWriter, Indent)
//! - [`declaration`] - Declaration headers rendered from descriptors
//! - [`naming`] - Using-directive normalization
//! - [`options`] - Layered emitter options
//! - [`spec`] - Units of work handed to emitters
//! - [`emitter`] - Body emitters and the file emitter orchestrating them

pub mod builder;
pub mod declaration;
pub mod emitter;
mod error;
pub mod naming;
pub mod options;
pub mod spec;

pub use error::{Error, Result};
