//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use tracing::debug;

use super::{Manifest, TypeEntry, validate::ParseContext};
use crate::{Error, Result, error::SourceContext, manifest::validate::find_name_spans};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "csgen.toml")
    }
}

impl Manifest {
    /// Parse a csgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a csgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    debug!(filename, types = manifest.types.len(), "parsed manifest");
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if let Err(e) = manifest.options.indent.to_indent() {
        return Err(ctx.source_context().validation_error(
            format!("invalid [options.indent]: {e}"),
            None,
        ));
    }

    let mut seen = HashSet::new();
    for entry in &manifest.types {
        ctx.validate_name(&entry.name, "type")?;
        if !seen.insert(entry.name.as_str()) {
            let spans = find_name_spans(src, &entry.name);
            return Err(match (spans.first(), spans.get(1)) {
                (Some(first), Some(second)) => {
                    ctx.source_context()
                        .duplicate_type_error(&entry.name, *first, *second)
                }
                _ => ctx.source_context().validation_error(
                    format!("duplicate type '{}'", entry.name),
                    ctx.find_span(&entry.name),
                ),
            });
        }

        let type_ctx = ctx.push(&entry.name);
        validate_type(entry, &type_ctx)?;
    }
    Ok(())
}

fn validate_type<'a>(entry: &'a TypeEntry, ctx: &ParseContext<'a>) -> Result<()> {
    if let Some(namespace) = &entry.namespace {
        ctx.validate_namespace(namespace)?;
    }
    ctx.validate_declarable_kind(entry.kind(), entry.record)?;
    ctx.validate_accessibility(entry.accessibility())?;

    for generic in &entry.generics {
        ctx.validate_name(generic, "generic parameter")?;
    }

    for containing in &entry.containing {
        ctx.validate_name(&containing.name, "containing type")?;
        let containing_ctx = ctx.push(&containing.name);
        containing_ctx.validate_declarable_kind(containing.kind(), containing.record)?;
        containing_ctx.validate_accessibility(containing.accessibility())?;
    }

    let members_ctx = ctx.push("members");
    for member in &entry.members {
        members_ctx.validate_member_name(&member.name)?;
        if member.ty.trim().is_empty() {
            return Err(ctx.source_context().validation_error(
                format!(
                    "{} '{}' has an empty type",
                    members_ctx.context_for("member"),
                    member.name
                ),
                ctx.find_span(&member.name),
            ));
        }
        for accessibility in [Some(member.accessibility()), member.getter, member.setter]
            .into_iter()
            .flatten()
        {
            members_ctx.validate_accessibility(accessibility)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let manifest: Manifest = r#"
            [[types]]
            name = "Widget"
            "#
        .parse()
        .unwrap();

        assert_eq!(manifest.types.len(), 1);
        assert!(manifest.generator.is_none());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = parse_manifest("[[types]]\nname = ", "csgen.toml").unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_unknown_top_level_table_rejected() {
        let result = parse_manifest("[cli]\nname = \"x\"", "csgen.toml");
        assert!(matches!(result.map_err(|e| *e), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_duplicate_type_names() {
        let src = r#"
[[types]]
name = "Widget"
namespace = "A"

[[types]]
name = "Widget"
namespace = "B"
"#;
        let err = parse_manifest(src, "csgen.toml").unwrap_err();
        match *err {
            Error::DuplicateType {
                first_span,
                second_span,
                name,
                ..
            } => {
                assert_eq!(name, "Widget");
                assert!(first_span.offset() < second_span.offset());
            }
            other => panic!("expected duplicate type error, got {other:?}"),
        }
    }

    #[test]
    fn test_keyword_type_name_rejected() {
        let err = parse_manifest("[[types]]\nname = \"struct\"", "csgen.toml").unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_undeclarable_kind_rejected() {
        let err = parse_manifest(
            "[[types]]\nname = \"Handler\"\nkind = \"delegate\"",
            "csgen.toml",
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot be declared"));
    }

    #[test]
    fn test_zero_indent_width_rejected() {
        let err = parse_manifest("[options.indent]\nwidth = 0", "csgen.toml").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_member_accessor_accessibility_checked() {
        let src = r#"
[[types]]
name = "Widget"

[[types.members]]
name = "Count"
type = "int"
setter = "protected_or_internal"
"#;
        let err = parse_manifest(src, "csgen.toml").unwrap_err();
        assert!(err.to_string().contains("Widget.members"));
    }
}
