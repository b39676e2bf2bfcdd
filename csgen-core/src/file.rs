use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// A generated source file: a file name plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    name: String,
    content: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the file name (may contain `/` separated sub directories)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.content)
    }

    /// Write the file under `dir` according to `overwrite`.
    pub fn write_to(&self, dir: &Path, overwrite: Overwrite) -> Result<WriteResult> {
        write_entry(dir, &self.name, &self.content, overwrite)
    }
}

pub(crate) fn write_entry(
    dir: &Path,
    name: &str,
    content: &str,
    overwrite: Overwrite,
) -> Result<WriteResult> {
    let path = dir.join(name);
    match overwrite {
        Overwrite::Always => {
            write_file(&path, content)?;
            Ok(WriteResult::Written(path))
        }
        Overwrite::IfMissing => {
            if path.exists() {
                Ok(WriteResult::Skipped(path))
            } else {
                write_file(&path, content)?;
                Ok(WriteResult::Written(path))
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written(PathBuf),
    /// File was skipped (already exists)
    Skipped(PathBuf),
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written(path) | WriteResult::Skipped(path) => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteResult::Written(_))
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite
    #[default]
    Always,
    /// Only create if file doesn't exist
    IfMissing,
}
