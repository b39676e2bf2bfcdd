//! Body emitters and the file emitter that sequences them.
//!
//! - [`BodyEmitter`] - Pluggable unit contributing one fragment of a type body
//! - [`WritingContext`] - What a body emitter sees while generating
//! - [`FileEmitter`] - Orchestrates header, usings, namespace, declarations and bodies
//! - [`builtin`] - Ready-made body emitters

pub mod builtin;
mod file_emitter;

use std::sync::{Arc, OnceLock};

pub use file_emitter::FileEmitter;
use indexmap::IndexMap;

use crate::{Result, builder::SourceWriter, options::FileEmitterOptions};
use csgen_core::TypeDescriptor;

/// Descriptors generated alongside the target, keyed by name.
pub type SiblingTypes = IndexMap<String, TypeDescriptor>;

/// Shared, read-only state handed to each body emitter.
pub struct WritingContext<'a, S> {
    pub target: &'a S,
    /// The emitter's own options: explicit ones, or those injected from the
    /// file emitter.
    pub options: &'a FileEmitterOptions,
    pub types: &'a SiblingTypes,
}

impl<S> Clone for WritingContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for WritingContext<'_, S> {}

/// A pluggable unit writing one fragment of a generated type.
///
/// Besides its body, an emitter may contribute using directives, attributes
/// and implemented interfaces. An emitter whose [`BodyEmitter::should_emit`]
/// returns `false` contributes nothing at all for that target.
pub trait BodyEmitter<S>: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    fn should_emit(&self, _ctx: &WritingContext<'_, S>) -> bool {
        true
    }

    /// Using directives written above the namespace.
    fn outer_using_directives(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        Vec::new()
    }

    /// Using directives written inside the namespace.
    fn inner_using_directives(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        Vec::new()
    }

    /// Attributes applied to the target type, without brackets.
    fn attributes(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        Vec::new()
    }

    /// Interfaces appended to the target's base list.
    fn interfaces(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        Vec::new()
    }

    /// Write the body fragment. The writer is positioned inside the target's
    /// braces.
    fn emit(&self, ctx: &WritingContext<'_, S>, writer: &mut SourceWriter) -> Result<()>;
}

/// A registered body emitter and its options.
///
/// Options are set at most once: explicitly at registration, or injected from
/// the file emitter on first use. Once set they are never replaced.
pub(crate) struct EmitterSlot<S> {
    pub(crate) emitter: Box<dyn BodyEmitter<S>>,
    pub(crate) options: OnceLock<Arc<FileEmitterOptions>>,
}

impl<S> EmitterSlot<S> {
    pub(crate) fn new(emitter: Box<dyn BodyEmitter<S>>) -> Self {
        Self {
            emitter,
            options: OnceLock::new(),
        }
    }

    /// Set the options unless already set. Returns whether they were set.
    pub(crate) fn set_options_if_none(&self, options: Arc<FileEmitterOptions>) -> bool {
        self.options.set(options).is_ok()
    }
}
