//! `[[types]]` entries.

use std::fmt;

use csgen_core::{Accessibility, TypeKind};
use serde::Deserialize;

/// A type to generate.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,

    /// Namespace, or the global namespace when unset
    pub namespace: Option<String>,

    /// Kind of type (default: class)
    pub kind: Option<TypeKind>,

    #[serde(default)]
    pub record: bool,

    /// Accessibility (default: public)
    pub accessibility: Option<Accessibility>,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    /// Base type, written verbatim
    pub base: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Generic type parameters
    #[serde(default)]
    pub generics: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<String>,

    /// Summary written as an XML doc comment above the declaration
    pub doc: Option<String>,

    /// Enclosing types, immediate parent first
    #[serde(default)]
    pub containing: Vec<ContainingEntry>,

    /// Body emitters to run, in order (default: properties)
    #[serde(default = "default_emitters")]
    pub emitters: Vec<EmitterKind>,

    #[serde(default)]
    pub members: Vec<MemberEntry>,

    /// Verbatim snippets, emitted after the built-in emitters
    #[serde(default)]
    pub snippets: Vec<SnippetEntry>,
}

fn default_emitters() -> Vec<EmitterKind> {
    vec![EmitterKind::Properties]
}

impl TypeEntry {
    pub fn kind(&self) -> TypeKind {
        self.kind.unwrap_or(TypeKind::Class)
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility.unwrap_or(Accessibility::Public)
    }

    /// `Namespace.Name`, or just the name in the global namespace.
    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.trim().is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A type enclosing the generated type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainingEntry {
    pub name: String,

    pub kind: Option<TypeKind>,

    #[serde(default)]
    pub record: bool,

    pub accessibility: Option<Accessibility>,

    /// Defaults to `["partial"]`, since a containing type is always declared
    /// elsewhere too
    #[serde(default = "default_containing_modifiers")]
    pub modifiers: Vec<Modifier>,
}

fn default_containing_modifiers() -> Vec<Modifier> {
    vec![Modifier::Partial]
}

impl ContainingEntry {
    pub fn kind(&self) -> TypeKind {
        self.kind.unwrap_or(TypeKind::Class)
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility.unwrap_or(Accessibility::Public)
    }
}

/// Type modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Static,
    Abstract,
    Sealed,
    Readonly,
    Partial,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Sealed => "sealed",
            Modifier::Readonly => "readonly",
            Modifier::Partial => "partial",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Built-in body emitter selectable per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterKind {
    /// Auto-properties and fields for `[[types.members]]`
    Properties,
    /// `IEquatable<T>` over the members
    Equatable,
}

impl EmitterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmitterKind::Properties => "properties",
            EmitterKind::Equatable => "equatable",
        }
    }
}

impl fmt::Display for EmitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `[[types.members]]`: a property or field.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberEntry {
    pub name: String,

    /// C# keyword (`int`, `string`, ...), a type from this manifest, or a
    /// namespace-qualified name
    #[serde(rename = "type")]
    pub ty: String,

    /// Declare a field instead of a property
    #[serde(default)]
    pub field: bool,

    pub accessibility: Option<Accessibility>,

    /// Getter accessibility when it differs from the member's
    pub getter: Option<Accessibility>,

    /// Setter accessibility when it differs from the member's
    pub setter: Option<Accessibility>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub readonly: bool,

    /// Use `init` instead of `set`
    #[serde(default)]
    pub init: bool,

    #[serde(default)]
    pub attributes: Vec<String>,
}

impl MemberEntry {
    pub fn accessibility(&self) -> Accessibility {
        self.accessibility.unwrap_or(Accessibility::Public)
    }
}

/// `[[types.snippets]]`: hand-written code carried into the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetEntry {
    pub name: Option<String>,

    pub text: String,

    /// Using directives written above the namespace
    #[serde(default)]
    pub usings: Vec<String>,

    /// Using directives written inside the namespace
    #[serde(default)]
    pub inner_usings: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_entry_defaults() {
        let entry: TypeEntry = toml::from_str(r#"name = "Widget""#).unwrap();

        assert_eq!(entry.kind(), TypeKind::Class);
        assert_eq!(entry.accessibility(), Accessibility::Public);
        assert_eq!(entry.emitters, vec![EmitterKind::Properties]);
        assert_eq!(entry.full_name(), "Widget");
        assert!(entry.members.is_empty());
    }

    #[test]
    fn test_full_name_with_namespace() {
        let entry: TypeEntry = toml::from_str(
            r#"
            name = "Widget"
            namespace = "Demo.Parts"
            "#,
        )
        .unwrap();

        assert_eq!(entry.full_name(), "Demo.Parts.Widget");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<TypeEntry, _> = toml::from_str(
            r#"
            name = "Widget"
            colour = "blue"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_member_keywords() {
        let member: MemberEntry = toml::from_str(
            r#"
            name = "Total"
            type = "decimal"
            virtual = true
            setter = "private"
            "#,
        )
        .unwrap();

        assert_eq!(member.ty, "decimal");
        assert!(member.is_virtual);
        assert!(!member.is_abstract);
        assert_eq!(member.setter, Some(Accessibility::Private));
    }

    #[test]
    fn test_containing_defaults_to_partial() {
        let containing: ContainingEntry = toml::from_str(r#"name = "Outer""#).unwrap();

        assert_eq!(containing.modifiers, vec![Modifier::Partial]);
        assert_eq!(containing.kind(), TypeKind::Class);
    }

    #[test]
    fn test_accessibility_spellings() {
        let member: MemberEntry = toml::from_str(
            r#"
            name = "Secret"
            type = "string"
            accessibility = "private protected"
            "#,
        )
        .unwrap();

        assert_eq!(member.accessibility(), Accessibility::ProtectedAndInternal);
    }
}
