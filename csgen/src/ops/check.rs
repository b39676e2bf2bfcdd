//! Check operation - manifest summary.

use std::path::Path;

use csgen_core::SourceCollection;
use csgen_manifest::{Manifest, TypeEntry};

use crate::reports::{CheckReport, TypeSummary};

/// Summarize a manifest whose sources were generated without error.
///
/// `sources` must come from [`Manifest::generate`], which registers one file
/// per type in declaration order.
pub fn check(manifest: &Manifest, sources: &SourceCollection, config_path: &Path) -> CheckReport {
    let types = manifest
        .types
        .iter()
        .zip(sources.iter())
        .map(|(entry, (file_name, _))| TypeSummary {
            name: entry.full_name(),
            kind: kind_label(entry),
            file_name: file_name.to_string(),
            emitters: entry.emitters.iter().map(ToString::to_string).collect(),
            member_count: entry.members.len(),
        })
        .collect();

    CheckReport {
        config_path: config_path.to_path_buf(),
        types,
    }
}

fn kind_label(entry: &TypeEntry) -> String {
    let kind = entry.kind().as_str().to_lowercase();
    if entry.record {
        if kind == "class" {
            "record".to_string()
        } else {
            format!("record {kind}")
        }
    } else {
        kind
    }
}
