//! Layered emitter configuration.
//!
//! Each layer embeds the previous one and dereferences to it, so every field
//! of [`BaseOptions`] is reachable from [`FileEmitterOptions`] and
//! [`TypeFileEmitterOptions`] under the same name.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use crate::builder::Indent;

/// Options shared by every file emitter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BaseOptions {
    /// Header written at the top of each file (`// <auto-generated/>` when unset).
    pub source_file_header: Option<String>,
    pub enable_nullable_annotations: bool,
    pub enable_nullable_warnings: bool,
    pub use_file_scoped_namespace: bool,
    /// Blank lines written between top-level sections.
    pub blank_lines_between_declarations: usize,
    /// Warning codes written to a `#pragma warning disable` line.
    pub suppress_warnings: Vec<String>,
    /// Using directives written above the namespace.
    pub default_outer_using_directives: Vec<String>,
    /// Using directives written inside the namespace.
    pub default_inner_using_directives: Vec<String>,
}

impl Default for BaseOptions {
    fn default() -> Self {
        Self {
            source_file_header: None,
            enable_nullable_annotations: true,
            enable_nullable_warnings: false,
            use_file_scoped_namespace: false,
            blank_lines_between_declarations: 1,
            suppress_warnings: Vec::new(),
            default_outer_using_directives: Vec::new(),
            default_inner_using_directives: Vec::new(),
        }
    }
}

/// Identity written into the generated-code marker attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct AssemblyName {
    pub name: String,
    pub version: String,
}

impl AssemblyName {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// `[global::System.CodeDom.Compiler.GeneratedCodeAttribute("name", "version")]`
    pub fn generated_code_attribute(&self) -> String {
        format!(
            "[global::System.CodeDom.Compiler.GeneratedCodeAttribute(\"{}\", \"{}\")]",
            self.name, self.version
        )
    }
}

/// Options for emitters that sequence body emitters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileEmitterOptions {
    #[serde(flatten)]
    pub base: BaseOptions,
    /// Blank lines between the output of two body emitters.
    pub blank_lines_between_code_emitters: usize,
    /// When set, the target type is marked with a generated-code attribute.
    pub assembly_name: Option<AssemblyName>,
    /// Base type added when the declaration has no base list yet.
    pub default_base_type: Option<String>,
    /// Give the file options to body emitters registered without their own.
    pub inject_options_on_code_emitters: bool,
    /// Write `[A, B]` instead of one `[A]` line per attribute.
    pub use_combined_attribute_declaration: bool,
    pub default_attributes: Vec<String>,
    pub default_interfaces: Vec<String>,
}

impl Default for FileEmitterOptions {
    fn default() -> Self {
        Self {
            base: BaseOptions::default(),
            blank_lines_between_code_emitters: 1,
            assembly_name: None,
            default_base_type: None,
            inject_options_on_code_emitters: true,
            use_combined_attribute_declaration: false,
            default_attributes: Vec::new(),
            default_interfaces: Vec::new(),
        }
    }
}

impl Deref for FileEmitterOptions {
    type Target = BaseOptions;

    fn deref(&self) -> &BaseOptions {
        &self.base
    }
}

/// Options for emitters producing one file per target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFileEmitterOptions {
    pub file: Arc<FileEmitterOptions>,
    /// Appended to the target name to form the file name.
    pub file_name_suffix: String,
    pub indent: Indent,
}

impl TypeFileEmitterOptions {
    pub fn new(file: FileEmitterOptions) -> Self {
        Self {
            file: Arc::new(file),
            ..Self::default()
        }
    }

    pub fn with_file_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_name_suffix = suffix.into();
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for TypeFileEmitterOptions {
    fn default() -> Self {
        Self {
            file: Arc::new(FileEmitterOptions::default()),
            file_name_suffix: ".g.cs".to_string(),
            indent: Indent::default(),
        }
    }
}

impl Deref for TypeFileEmitterOptions {
    type Target = FileEmitterOptions;

    fn deref(&self) -> &FileEmitterOptions {
        &self.file
    }
}
