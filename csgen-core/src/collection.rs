//! Keyed store of generated files with bulk export.

use std::path::Path;

use eyre::Result;
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::file::{Overwrite, SourceFile, WriteResult, write_entry};

/// Generated sources keyed by file name.
///
/// Registering a name twice replaces the earlier content; the entry keeps its
/// original position so iteration stays deterministic.
///
/// # Example
///
/// ```
/// use csgen_core::SourceCollection;
///
/// let mut sources = SourceCollection::new();
/// sources.register("Widget.g.cs", "// first");
/// sources.register("Widget.g.cs", "// second");
///
/// assert_eq!(sources.len(), 1);
/// assert_eq!(sources.get("Widget.g.cs"), Some("// second"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCollection {
    sources: IndexMap<String, String>,
}

impl SourceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a source.
    pub fn register(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        let name = name.into();
        if self.sources.insert(name.clone(), content.into()).is_some() {
            debug!(%name, "replaced registered source");
        }
        self
    }

    pub fn register_file(&mut self, file: SourceFile) -> &mut Self {
        let (name, content) = file.into_parts();
        self.register(name, content)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterate over `(name, content)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write every source to `dir/<name>`, overwriting existing files.
    pub fn export_to(&self, dir: impl AsRef<Path>) -> Result<Vec<WriteResult>> {
        self.export_to_with(dir, Overwrite::Always)
    }

    /// Write every source sequentially, in registration order.
    pub fn export_to_with(
        &self,
        dir: impl AsRef<Path>,
        overwrite: Overwrite,
    ) -> Result<Vec<WriteResult>> {
        let dir = dir.as_ref();
        let results = self
            .sources
            .iter()
            .map(|(name, content)| write_entry(dir, name, content, overwrite))
            .collect::<Result<Vec<_>>>()?;
        info!(dir = %dir.display(), files = results.len(), "exported sources");
        Ok(results)
    }

    /// Write every source, fanning out across the rayon thread pool.
    ///
    /// Each file is written exactly as [`SourceCollection::export_to_with`]
    /// would; only the order in which files hit the disk differs. Results are
    /// still returned in registration order.
    pub fn export_to_parallel(
        &self,
        dir: impl AsRef<Path>,
        overwrite: Overwrite,
    ) -> Result<Vec<WriteResult>> {
        let dir = dir.as_ref();
        let results = self
            .sources
            .par_iter()
            .map(|(name, content)| write_entry(dir, name, content, overwrite))
            .collect::<Result<Vec<_>>>()?;
        info!(dir = %dir.display(), files = results.len(), "exported sources in parallel");
        Ok(results)
    }
}

impl Extend<SourceFile> for SourceCollection {
    fn extend<I: IntoIterator<Item = SourceFile>>(&mut self, iter: I) {
        for file in iter {
            self.register_file(file);
        }
    }
}

impl FromIterator<SourceFile> for SourceCollection {
    fn from_iter<I: IntoIterator<Item = SourceFile>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn sample() -> SourceCollection {
        let mut sources = SourceCollection::new();
        sources
            .register("Widget.g.cs", "class Widget {}")
            .register("Models/Gadget.g.cs", "class Gadget {}");
        sources
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut sources = sample();
        sources.register("Widget.g.cs", "class Widget2 {}");

        assert_eq!(sources.len(), 2);
        assert_eq!(sources.get("Widget.g.cs"), Some("class Widget2 {}"));
        let names: Vec<&str> = sources.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Widget.g.cs", "Models/Gadget.g.cs"]);
    }

    #[test]
    fn test_collect_from_source_files() {
        let sources: SourceCollection = vec![
            SourceFile::new("A.g.cs", "a"),
            SourceFile::new("B.g.cs", "b"),
            SourceFile::new("A.g.cs", "a2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources.get("A.g.cs"), Some("a2"));
        assert!(sources.contains("B.g.cs"));
    }

    #[test]
    fn test_export_to_writes_every_file() {
        let temp = TempDir::new().unwrap();

        let results = sample().export_to(temp.path()).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(WriteResult::is_written));
        assert_eq!(
            fs::read_to_string(temp.path().join("Widget.g.cs")).unwrap(),
            "class Widget {}"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("Models/Gadget.g.cs")).unwrap(),
            "class Gadget {}"
        );
    }

    #[test]
    fn test_export_creates_missing_output_dir() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("obj").join("generated");

        sample().export_to(&out).unwrap();

        assert!(out.join("Widget.g.cs").exists());
    }

    #[test]
    fn test_export_parallel_matches_sequential() {
        let sequential = TempDir::new().unwrap();
        let parallel = TempDir::new().unwrap();
        let sources = sample();

        sources.export_to(sequential.path()).unwrap();
        let results = sources
            .export_to_parallel(parallel.path(), Overwrite::Always)
            .unwrap();

        assert_eq!(results.len(), 2);
        for (name, _) in sources.iter() {
            assert_eq!(
                fs::read_to_string(sequential.path().join(name)).unwrap(),
                fs::read_to_string(parallel.path().join(name)).unwrap()
            );
        }
    }

    #[test]
    fn test_export_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Widget.g.cs"), "hand written").unwrap();

        let results = sample()
            .export_to_with(temp.path(), Overwrite::IfMissing)
            .unwrap();

        assert!(!results[0].is_written());
        assert!(results[1].is_written());
        assert_eq!(
            fs::read_to_string(temp.path().join("Widget.g.cs")).unwrap(),
            "hand written"
        );
    }
}
