//! Bake operation - exporting generated sources.

use std::path::{Path, PathBuf};

use csgen_core::{Overwrite, SourceCollection, WriteResult};
use eyre::{Context, Result};
use tracing::debug;

use crate::reports::{BakeReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Directory generated files are written under.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to write files concurrently.
    pub parallel: bool,
    /// Whether existing files are left untouched.
    pub skip_existing: bool,
}

/// Execute the bake operation.
///
/// Either previews the sources or writes them to `output_dir`.
pub fn bake(sources: &SourceCollection, opts: BakeOptions) -> Result<BakeReport> {
    debug!(
        output_dir = %opts.output_dir.display(),
        dry_run = opts.dry_run,
        parallel = opts.parallel,
        skip_existing = opts.skip_existing,
        "baking sources"
    );
    let result = if opts.dry_run {
        let files = sources
            .iter()
            .map(|(name, content)| PreviewFile {
                path: name.to_string(),
                content: content.to_string(),
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let overwrite = if opts.skip_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };
        let results = if opts.parallel {
            sources.export_to_parallel(opts.output_dir, overwrite)
        } else {
            sources.export_to_with(opts.output_dir, overwrite)
        }
        .wrap_err("Failed to export generated sources")?;

        let (written, skipped): (Vec<_>, Vec<_>) =
            results.into_iter().partition(WriteResult::is_written);
        let relative = |results: Vec<WriteResult>| -> Vec<PathBuf> {
            results
                .iter()
                .map(|r| {
                    r.path()
                        .strip_prefix(opts.output_dir)
                        .unwrap_or(r.path())
                        .to_path_buf()
                })
                .collect()
        };

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: relative(written),
            skipped: relative(skipped),
        })
    };

    Ok(BakeReport {
        file_count: sources.len(),
        result,
    })
}
