//! Manifest types and parsing for csgen.toml files.

mod file;
mod options;
mod parse;
mod plan;
mod types;
mod validate;

pub use file::CsgenToml;
pub use options::{GeneratorConfig, IndentConfig, IndentStyle, OptionsConfig};
pub use parse::parse_manifest;
use serde::Deserialize;
pub use types::{ContainingEntry, EmitterKind, MemberEntry, Modifier, SnippetEntry, TypeEntry};
pub use validate::ParseContext;

/// Root manifest for csgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Identity written into the generated-code attribute
    pub generator: Option<GeneratorConfig>,

    /// Emitter options shared by every type
    #[serde(default)]
    pub options: OptionsConfig,

    /// Types to generate, one file each
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

impl Manifest {
    /// Find a type by simple or namespace-qualified name.
    pub fn find_type(&self, name: &str) -> Option<&TypeEntry> {
        let name = name.strip_prefix(csgen_core::GLOBAL_ALIAS).unwrap_or(name);
        self.types
            .iter()
            .find(|entry| entry.name == name || entry.full_name() == name)
    }
}
