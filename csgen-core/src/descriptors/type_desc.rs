use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};

use super::{Accessibility, PropertyDesc, SpecialType, TypeIdentity, TypeKind};
use crate::{EquatableArray, GLOBAL_ALIAS};

/// Structural description of a type.
///
/// Built once by whoever inspects the source symbols, immutable afterwards.
/// Equality and hashing cover every field (lists compared in order) and
/// ignore the memoized fully-qualified names.
///
/// # Example
///
/// ```
/// use csgen_core::{Accessibility, TypeDesc, TypeIdentity, TypeKind};
///
/// let desc = TypeDesc::new("Widget")
///     .with_namespace("Demo.Models")
///     .with_kind(TypeKind::Struct)
///     .with_accessibility(Accessibility::Internal)
///     .with_partial(true);
///
/// assert_eq!(desc.fully_qualified_type_name(), "Demo.Models.Widget");
/// assert_eq!(desc.fully_qualified_name(), "global::Demo.Models.Widget");
/// assert!(desc.is_value_type());
/// ```
#[derive(Clone)]
pub struct TypeDesc {
    name: String,
    namespace: Option<String>,
    type_kind: TypeKind,
    special_type: SpecialType,
    accessibility: Accessibility,
    is_value_type: bool,
    is_record: bool,
    is_static: bool,
    is_abstract: bool,
    is_sealed: bool,
    is_readonly: bool,
    is_partial: bool,
    attributes: EquatableArray<String>,
    base_types: EquatableArray<TypeDesc>,
    interfaces: EquatableArray<TypeDesc>,
    generic_types: EquatableArray<TypeDesc>,
    containing_types: EquatableArray<TypeDesc>,
    members: EquatableArray<PropertyDesc>,
    fully_qualified_type_name: OnceLock<String>,
    fully_qualified_assembly_name: OnceLock<String>,
}

impl TypeDesc {
    /// A public, non-generic class named `name` in the global namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            type_kind: TypeKind::Class,
            special_type: SpecialType::None,
            accessibility: Accessibility::Public,
            is_value_type: false,
            is_record: false,
            is_static: false,
            is_abstract: false,
            is_sealed: false,
            is_readonly: false,
            is_partial: false,
            attributes: EquatableArray::empty(),
            base_types: EquatableArray::empty(),
            interfaces: EquatableArray::empty(),
            generic_types: EquatableArray::empty(),
            containing_types: EquatableArray::empty(),
            members: EquatableArray::empty(),
            fully_qualified_type_name: OnceLock::new(),
            fully_qualified_assembly_name: OnceLock::new(),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.reset_names();
        self
    }

    /// Set the namespace. Blank namespaces mean the global namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        self.namespace = (!namespace.trim().is_empty()).then_some(namespace);
        self.reset_names();
        self
    }

    /// Set the kind; value-typeness follows the kind unless overridden later
    /// with [`TypeDesc::with_value_type`].
    pub fn with_kind(mut self, type_kind: TypeKind) -> Self {
        self.type_kind = type_kind;
        self.is_value_type = type_kind.is_value_kind();
        self
    }

    pub fn with_special_type(mut self, special_type: SpecialType) -> Self {
        self.special_type = special_type;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_value_type(mut self, is_value_type: bool) -> Self {
        self.is_value_type = is_value_type;
        self
    }

    pub fn with_record(mut self, is_record: bool) -> Self {
        self.is_record = is_record;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_sealed(mut self, is_sealed: bool) -> Self {
        self.is_sealed = is_sealed;
        self
    }

    pub fn with_readonly(mut self, is_readonly: bool) -> Self {
        self.is_readonly = is_readonly;
        self
    }

    pub fn with_partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = crate::equatable::strings(attributes);
        self
    }

    pub fn with_base_type(mut self, base_type: TypeDesc) -> Self {
        self.base_types = EquatableArray::from([base_type]);
        self
    }

    pub fn with_base_types(mut self, base_types: impl IntoIterator<Item = TypeDesc>) -> Self {
        self.base_types = base_types.into_iter().collect();
        self
    }

    pub fn with_interfaces(mut self, interfaces: impl IntoIterator<Item = TypeDesc>) -> Self {
        self.interfaces = interfaces.into_iter().collect();
        self
    }

    pub fn with_generic_types(mut self, generic_types: impl IntoIterator<Item = TypeDesc>) -> Self {
        self.generic_types = generic_types.into_iter().collect();
        self
    }

    /// Set the enclosing types, immediate parent first and outermost last.
    pub fn with_containing_types(
        mut self,
        containing_types: impl IntoIterator<Item = TypeDesc>,
    ) -> Self {
        self.containing_types = containing_types.into_iter().collect();
        self
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = PropertyDesc>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    fn reset_names(&mut self) {
        self.fully_qualified_type_name = OnceLock::new();
        self.fully_qualified_assembly_name = OnceLock::new();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn is_record(&self) -> bool {
        self.is_record
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_sealed(&self) -> bool {
        self.is_sealed
    }

    pub fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn attributes(&self) -> &EquatableArray<String> {
        &self.attributes
    }

    pub fn base_types(&self) -> &EquatableArray<TypeDesc> {
        &self.base_types
    }

    pub fn interfaces(&self) -> &EquatableArray<TypeDesc> {
        &self.interfaces
    }

    pub fn generic_types(&self) -> &EquatableArray<TypeDesc> {
        &self.generic_types
    }

    pub fn containing_types(&self) -> &EquatableArray<TypeDesc> {
        &self.containing_types
    }

    pub fn members(&self) -> &EquatableArray<PropertyDesc> {
        &self.members
    }

    /// `Namespace.Name`, or just `Name` in the global namespace.
    pub fn fully_qualified_type_name(&self) -> &str {
        self.fully_qualified_type_name
            .get_or_init(|| match &self.namespace {
                Some(ns) => format!("{ns}.{}", self.name),
                None => self.name.clone(),
            })
    }

    /// `global::Namespace.Name`
    pub fn fully_qualified_assembly_name(&self) -> &str {
        self.fully_qualified_assembly_name
            .get_or_init(|| format!("{GLOBAL_ALIAS}{}", self.fully_qualified_type_name()))
    }
}

impl TypeIdentity for TypeDesc {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> &str {
        self.fully_qualified_assembly_name()
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

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.type_kind == other.type_kind
            && self.special_type == other.special_type
            && self.accessibility == other.accessibility
            && self.is_value_type == other.is_value_type
            && self.is_record == other.is_record
            && self.is_static == other.is_static
            && self.is_abstract == other.is_abstract
            && self.is_sealed == other.is_sealed
            && self.is_readonly == other.is_readonly
            && self.is_partial == other.is_partial
            && self.attributes == other.attributes
            && self.base_types == other.base_types
            && self.interfaces == other.interfaces
            && self.generic_types == other.generic_types
            && self.containing_types == other.containing_types
            && self.members == other.members
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.namespace.hash(state);
        self.type_kind.hash(state);
        self.special_type.hash(state);
        self.accessibility.hash(state);
        self.is_value_type.hash(state);
        self.is_record.hash(state);
        self.is_static.hash(state);
        self.is_abstract.hash(state);
        self.is_sealed.hash(state);
        self.is_readonly.hash(state);
        self.is_partial.hash(state);
        self.attributes.hash(state);
        self.base_types.hash(state);
        self.interfaces.hash(state);
        self.generic_types.hash(state);
        self.containing_types.hash(state);
        self.members.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDesc")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("type_kind", &self.type_kind)
            .field("accessibility", &self.accessibility)
            .field("is_record", &self.is_record)
            .field("generic_types", &self.generic_types)
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}
