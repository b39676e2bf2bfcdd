//! Symbol classifications shared by every descriptor.

use serde::Deserialize;

/// Declared accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    NotApplicable,
    Private,
    /// `private protected`
    #[serde(alias = "private protected")]
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    #[serde(alias = "protected internal")]
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    /// Variant name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accessibility::NotApplicable => "NotApplicable",
            Accessibility::Private => "Private",
            Accessibility::ProtectedAndInternal => "ProtectedAndInternal",
            Accessibility::Protected => "Protected",
            Accessibility::Internal => "Internal",
            Accessibility::ProtectedOrInternal => "ProtectedOrInternal",
            Accessibility::Public => "Public",
        }
    }
}

/// Kind of a type symbol.
///
/// Only [`TypeKind::Class`], [`TypeKind::Struct`], [`TypeKind::Interface`] and
/// [`TypeKind::Enum`] can be declared; the remaining kinds exist so descriptors
/// can faithfully describe any symbol a producer hands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Unknown,
    Array,
    Class,
    Delegate,
    Dynamic,
    Enum,
    Error,
    Interface,
    Module,
    Pointer,
    Struct,
    TypeParameter,
    Submission,
    FunctionPointer,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Unknown => "Unknown",
            TypeKind::Array => "Array",
            TypeKind::Class => "Class",
            TypeKind::Delegate => "Delegate",
            TypeKind::Dynamic => "Dynamic",
            TypeKind::Enum => "Enum",
            TypeKind::Error => "Error",
            TypeKind::Interface => "Interface",
            TypeKind::Module => "Module",
            TypeKind::Pointer => "Pointer",
            TypeKind::Struct => "Struct",
            TypeKind::TypeParameter => "TypeParameter",
            TypeKind::Submission => "Submission",
            TypeKind::FunctionPointer => "FunctionPointer",
        }
    }

    /// Whether instances of this kind are value types.
    pub fn is_value_kind(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum | TypeKind::Pointer)
    }
}

/// Built-in types the C# language gives special treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    #[default]
    None,
    Object,
    Void,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    /// `System.Nullable<T>`
    NullableT,
}

const KEYWORDS: &[(SpecialType, &str, &str)] = &[
    (SpecialType::Object, "object", "System.Object"),
    (SpecialType::Void, "void", "System.Void"),
    (SpecialType::Boolean, "bool", "System.Boolean"),
    (SpecialType::Char, "char", "System.Char"),
    (SpecialType::SByte, "sbyte", "System.SByte"),
    (SpecialType::Byte, "byte", "System.Byte"),
    (SpecialType::Int16, "short", "System.Int16"),
    (SpecialType::UInt16, "ushort", "System.UInt16"),
    (SpecialType::Int32, "int", "System.Int32"),
    (SpecialType::UInt32, "uint", "System.UInt32"),
    (SpecialType::Int64, "long", "System.Int64"),
    (SpecialType::UInt64, "ulong", "System.UInt64"),
    (SpecialType::Decimal, "decimal", "System.Decimal"),
    (SpecialType::Single, "float", "System.Single"),
    (SpecialType::Double, "double", "System.Double"),
    (SpecialType::String, "string", "System.String"),
];

impl SpecialType {
    /// The C# keyword aliasing this type, if any.
    pub fn keyword(&self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(ty, _, _)| ty == self)
            .map(|(_, keyword, _)| *keyword)
    }

    /// The metadata name of this type (e.g. `System.Int32`).
    pub fn metadata_name(&self) -> Option<&'static str> {
        match self {
            SpecialType::NullableT => Some("System.Nullable"),
            _ => KEYWORDS
                .iter()
                .find(|(ty, _, _)| ty == self)
                .map(|(_, _, name)| *name),
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(_, kw, _)| *kw == keyword)
            .map(|(ty, _, _)| *ty)
    }

    /// Look up a special type by metadata name, with or without the
    /// `global::` alias.
    pub fn from_metadata_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(crate::GLOBAL_ALIAS).unwrap_or(name);
        if name == "System.Nullable" {
            return Some(SpecialType::NullableT);
        }
        KEYWORDS
            .iter()
            .find(|(_, _, metadata)| *metadata == name)
            .map(|(ty, _, _)| *ty)
    }

    pub fn is_value_type(&self) -> bool {
        !matches!(
            self,
            SpecialType::None | SpecialType::Object | SpecialType::String
        )
    }
}
