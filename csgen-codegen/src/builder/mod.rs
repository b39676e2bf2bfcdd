//! Text building blocks for generated sources.
//!
//! - [`SourceWriter`] - Indentation-tracking text accumulator
//! - [`Indent`] - Indentation configuration

mod indent;
mod source_writer;

pub use indent::Indent;
pub use source_writer::SourceWriter;
