//! Core descriptors and utilities for the csgen C# source emitter.
//!
//! This crate provides the immutable, structurally comparable values shared
//! by every stage of generation, plus the store generated files end up in.

mod collection;
mod descriptors;
mod equatable;
mod file;
mod utils;

// Generated file storage
pub use collection::SourceCollection;
// Descriptors
pub use descriptors::{
    Accessibility, PropertyDesc, SpecialType, TypeDesc, TypeDescriptor, TypeIdentity, TypeKind,
    TypeRef,
};
// Containers
pub use equatable::{EquatableArray, strings};
pub use file::{Overwrite, SourceFile, WriteResult};
// String utilities
pub use utils::{escape_keyword, first_char_to_lower, first_char_to_upper, is_csharp_keyword};

/// Alias prefix that roots a name at the global namespace.
pub const GLOBAL_ALIAS: &str = "global::";
