use std::{
    fmt,
    hash::{Hash, Hasher},
};

use super::{SpecialType, TypeDesc, TypeIdentity, TypeKind};
use crate::GLOBAL_ALIAS;

/// Identity-only reference to a type.
///
/// Two references are equal when their fully-qualified names are equal,
/// whatever the other fields say.
#[derive(Clone)]
pub struct TypeRef {
    name: String,
    fully_qualified_name: String,
    is_value_type: bool,
    type_kind: TypeKind,
    special_type: SpecialType,
    /// Written instead of the qualified name when set.
    source_name: Option<String>,
}

impl TypeRef {
    /// Create a reference from a fully-qualified name.
    ///
    /// The `global::` alias is added when missing; the simple name is the
    /// segment after the last `.` outside of any generic argument list.
    pub fn new(fully_qualified_name: impl AsRef<str>, type_kind: TypeKind) -> Self {
        let input = fully_qualified_name.as_ref().trim();
        let unaliased = input.strip_prefix(GLOBAL_ALIAS).unwrap_or(input);

        let generic_start = unaliased.find('<').unwrap_or(unaliased.len());
        let name = match unaliased[..generic_start].rfind('.') {
            Some(dot) => &unaliased[dot + 1..],
            None => unaliased,
        };

        Self {
            name: name.to_string(),
            fully_qualified_name: format!("{GLOBAL_ALIAS}{unaliased}"),
            is_value_type: type_kind.is_value_kind(),
            type_kind,
            special_type: SpecialType::None,
            source_name: None,
        }
    }

    /// Reference a type written exactly as given, without the `global::`
    /// alias, e.g. a name brought into scope by a using directive.
    pub fn unqualified(name: impl AsRef<str>, type_kind: TypeKind) -> Self {
        let name = name.as_ref().trim();
        Self {
            source_name: Some(name.to_string()),
            ..Self::new(name, type_kind)
        }
    }

    /// Create a reference from a namespace and a simple name.
    pub fn from_parts(name: &str, namespace: Option<&str>, type_kind: TypeKind) -> Self {
        match namespace.filter(|ns| !ns.trim().is_empty()) {
            Some(ns) => Self::new(format!("{ns}.{name}"), type_kind),
            None => Self::new(name, type_kind),
        }
    }

    /// Reference a C# built-in type by keyword (`int`, `string`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let special = SpecialType::from_keyword(keyword)?;
        let metadata = special.metadata_name()?;
        let kind = if special.is_value_type() {
            TypeKind::Struct
        } else {
            TypeKind::Class
        };
        Some(Self::new(metadata, kind).with_special_type(special))
    }

    pub fn with_special_type(mut self, special_type: SpecialType) -> Self {
        self.special_type = special_type;
        if special_type.is_value_type() {
            self.is_value_type = true;
        }
        self
    }

    pub fn with_value_type(mut self, is_value_type: bool) -> Self {
        self.is_value_type = is_value_type;
        self
    }

    /// Apply nullable (`?`) and array (`[]`, `[,]`) suffixes.
    ///
    /// An array suffix makes the reference an array type; a lone `?` on a
    /// value type makes it `Nullable<T>`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        let suffix = suffix.trim();
        if suffix.is_empty() {
            return self;
        }

        let source_name = format!("{}{suffix}", self.source_name());
        self.name.push_str(suffix);
        self.fully_qualified_name.push_str(suffix);
        self.source_name = Some(source_name);

        if suffix.contains('[') {
            self.type_kind = TypeKind::Array;
            self.is_value_type = false;
            self.special_type = SpecialType::None;
        } else if self.is_value_type {
            self.special_type = SpecialType::NullableT;
        }
        self
    }

    /// The name to write in source: the keyword for built-in types, the
    /// `global::` qualified name otherwise.
    pub fn source_name(&self) -> &str {
        if let Some(name) = &self.source_name {
            return name;
        }
        self.special_type
            .keyword()
            .unwrap_or(&self.fully_qualified_name)
    }
}

impl TypeIdentity for TypeRef {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    fn is_value_type(&self) -> bool {
        self.is_value_type
    }

    fn type_kind(&self) -> TypeKind {
        self.type_kind
    }

    fn special_type(&self) -> SpecialType {
        self.special_type
    }
}

impl From<&TypeDesc> for TypeRef {
    fn from(desc: &TypeDesc) -> Self {
        Self {
            name: desc.name().to_string(),
            fully_qualified_name: desc.fully_qualified_assembly_name().to_string(),
            is_value_type: desc.is_value_type(),
            type_kind: desc.type_kind(),
            special_type: desc.special_type(),
            source_name: None,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.fully_qualified_name == other.fully_qualified_name
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fully_qualified_name.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef")
            .field(&self.fully_qualified_name)
            .finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_last_segment() {
        let ty = TypeRef::new("System.Collections.Generic.List", TypeKind::Class);

        assert_eq!(ty.name(), "List");
        assert_eq!(
            ty.fully_qualified_name(),
            "global::System.Collections.Generic.List"
        );
    }

    #[test]
    fn test_global_alias_not_duplicated() {
        let ty = TypeRef::new("global::System.String", TypeKind::Class);

        assert_eq!(ty.name(), "String");
        assert_eq!(ty.fully_qualified_name(), "global::System.String");
    }

    #[test]
    fn test_generic_arguments_do_not_split_name() {
        let ty = TypeRef::new(
            "System.Collections.Generic.Dictionary<System.String, System.Int32>",
            TypeKind::Class,
        );

        assert_eq!(ty.name(), "Dictionary<System.String, System.Int32>");
    }

    #[test]
    fn test_name_without_namespace() {
        let ty = TypeRef::from_parts("Widget", None, TypeKind::Struct);

        assert_eq!(ty.name(), "Widget");
        assert_eq!(ty.fully_qualified_name(), "global::Widget");
        assert!(ty.is_value_type());
    }

    #[test]
    fn test_equality_uses_fully_qualified_name_only() {
        let a = TypeRef::new("Demo.Widget", TypeKind::Class);
        let b = TypeRef::new("global::Demo.Widget", TypeKind::Struct);
        let c = TypeRef::new("Other.Widget", TypeKind::Class);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_keyword_reference() {
        let ty = TypeRef::from_keyword("int").unwrap();

        assert_eq!(ty.source_name(), "int");
        assert_eq!(ty.fully_qualified_name(), "global::System.Int32");
        assert!(ty.is_value_type());
        assert!(!ty.can_be_null());
        assert!(TypeRef::from_keyword("Widget").is_none());
    }

    #[test]
    fn test_nullable_keyword_suffix() {
        let ty = TypeRef::from_keyword("int").unwrap().with_suffix("?");

        assert_eq!(ty.source_name(), "int?");
        assert!(ty.is_value_type());
        assert!(ty.can_be_null());
        assert_ne!(ty, TypeRef::from_keyword("int").unwrap());

        let label = TypeRef::from_keyword("string").unwrap().with_suffix("?");
        assert_eq!(label.source_name(), "string?");
        assert_eq!(label.special_type(), SpecialType::String);
    }

    #[test]
    fn test_array_suffix() {
        let ty = TypeRef::from_keyword("int").unwrap().with_suffix("[]");

        assert_eq!(ty.source_name(), "int[]");
        assert_eq!(ty.type_kind(), TypeKind::Array);
        assert!(!ty.is_value_type());
        assert!(ty.can_be_null());

        let grid = TypeRef::new("Demo.Cell", TypeKind::Struct).with_suffix("[,]?");
        assert_eq!(grid.source_name(), "global::Demo.Cell[,]?");
        assert_eq!(grid.type_kind(), TypeKind::Array);
    }

    #[test]
    fn test_unqualified_reference() {
        let ty = TypeRef::unqualified("List<int>", TypeKind::Class);

        assert_eq!(ty.source_name(), "List<int>");
        assert_eq!(ty.name(), "List<int>");
        assert_eq!(ty.with_suffix("?").source_name(), "List<int>?");
    }

    #[test]
    fn test_reference_types_can_be_null() {
        let ty = TypeRef::new("Demo.Widget", TypeKind::Class);
        let nullable =
            TypeRef::new("System.Nullable", TypeKind::Struct).with_special_type(SpecialType::NullableT);

        assert!(ty.can_be_null());
        assert!(nullable.can_be_null());
        assert_eq!(ty.source_name(), "global::Demo.Widget");
    }
}
