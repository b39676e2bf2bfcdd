//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub types: Vec<TypeSummary>,
}

/// One declared type.
#[derive(Debug)]
pub struct TypeSummary {
    /// Namespace-qualified name.
    pub name: String,
    /// `class`, `record struct`, ...
    pub kind: String,
    pub file_name: String,
    pub emitters: Vec<String>,
    pub member_count: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        let count = self.types.len();
        out.section(&format!(
            "{} type{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for ty in &self.types {
            let emitters = if ty.emitters.is_empty() {
                "no emitters".to_string()
            } else {
                ty.emitters.join(", ")
            };
            out.list_item(&format!(
                "{} ({}, {} member{}; {}) -> {}",
                ty.name,
                ty.kind,
                ty.member_count,
                if ty.member_count == 1 { "" } else { "s" },
                emitters,
                ty.file_name
            ));
        }
    }
}
