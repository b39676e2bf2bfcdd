//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use csgen_core::{Accessibility, TypeKind, is_csharp_keyword};
use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source content, file name and the current path through the
/// manifest, so nested checks report where they happened.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "csgen.toml");
/// ctx.validate_name("Widget", "type")?;
///
/// let nested = ctx.push("Widget").push("members");
/// nested.validate_member_name("Count")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments (e.g., ["Widget", "members"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "member in 'Widget'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate a type-level name: a C# identifier that is not a keyword.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_csharp_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        self.validate_identifier(name, kind)
    }

    /// Validate a member name. Keywords are allowed since they are escaped
    /// with `@` when written.
    pub fn validate_member_name(&self, name: &str) -> Result<()> {
        self.validate_identifier(name, "member")
    }

    /// Validate a dotted namespace; each segment must be a valid name.
    pub fn validate_namespace(&self, namespace: &str) -> Result<()> {
        if namespace.trim().is_empty() {
            return Err(self.source.validation_error(
                format!("{} must not be empty", self.context_for("namespace")),
                self.find_span(namespace),
            ));
        }
        for segment in namespace.split('.') {
            self.validate_name(segment, "namespace segment")?;
        }
        Ok(())
    }

    /// Reject kinds that have no declaration keyword.
    pub fn validate_declarable_kind(&self, kind: TypeKind, record: bool) -> Result<()> {
        let declarable = matches!(
            kind,
            TypeKind::Class | TypeKind::Struct | TypeKind::Interface | TypeKind::Enum
        );
        if !declarable {
            return Err(self.source.validation_error(
                format!(
                    "{} cannot be declared with kind '{}'",
                    self.context_for("type"),
                    kind.as_str()
                ),
                None,
            ));
        }
        if record && !matches!(kind, TypeKind::Class | TypeKind::Struct) {
            return Err(self.source.validation_error(
                format!(
                    "{} of kind '{}' cannot be a record",
                    self.context_for("type"),
                    kind.as_str()
                ),
                None,
            ));
        }
        Ok(())
    }

    /// Reject accessibilities with no single keyword.
    pub fn validate_accessibility(&self, accessibility: Accessibility) -> Result<()> {
        match accessibility {
            Accessibility::NotApplicable | Accessibility::ProtectedOrInternal => {
                Err(self.source.validation_error(
                    format!(
                        "{} cannot use accessibility '{}'",
                        self.context_for("declaration"),
                        accessibility.as_str()
                    ),
                    None,
                ))
            }
            _ => Ok(()),
        }
    }

    fn validate_identifier(&self, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }
}

/// Find the span of a name in the TOML source.
///
/// Looks for `name = "value"` first, then for the quoted value anywhere.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("name = {quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            // Skip 'name = "'
            return Some(SourceSpan::from((pos + 8, name.len())));
        }
    }

    for quote in ['"', '\''] {
        let pattern = format!("{quote}{name}{quote}");
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    None
}

/// Spans of every `name = "value"` occurrence.
pub(crate) fn find_name_spans(src: &str, name: &str) -> Vec<SourceSpan> {
    let pattern = format!("name = \"{name}\"");
    src.match_indices(&pattern)
        .map(|(pos, _)| SourceSpan::from((pos + 8, name.len())))
        .collect()
}

/// Validate that a name is a valid C# identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
