use super::{Accessibility, TypeRef};
use crate::{EquatableArray, utils::escape_keyword};

/// A property or field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDesc {
    /// Name as declared.
    pub name: String,
    /// Name safe to write in source (`@class` for `class`).
    pub escaped_name: String,
    pub member_type: TypeRef,
    pub declaring_type: TypeRef,
    pub accessibility: Accessibility,
    pub getter_accessibility: Accessibility,
    pub setter_accessibility: Accessibility,
    pub attributes: EquatableArray<String>,
    pub is_property: bool,
    pub is_virtual: bool,
    pub is_abstract: bool,
    pub is_required: bool,
    pub is_read_only: bool,
    pub is_init_only: bool,
}

impl PropertyDesc {
    /// A public `{ get; set; }` property.
    pub fn property(name: impl Into<String>, member_type: TypeRef, declaring_type: TypeRef) -> Self {
        let name = name.into();
        Self {
            escaped_name: escape_keyword(&name),
            name,
            member_type,
            declaring_type,
            accessibility: Accessibility::Public,
            getter_accessibility: Accessibility::Public,
            setter_accessibility: Accessibility::Public,
            attributes: EquatableArray::empty(),
            is_property: true,
            is_virtual: false,
            is_abstract: false,
            is_required: false,
            is_read_only: false,
            is_init_only: false,
        }
    }

    /// A public field.
    pub fn field(name: impl Into<String>, member_type: TypeRef, declaring_type: TypeRef) -> Self {
        Self {
            is_property: false,
            ..Self::property(name, member_type, declaring_type)
        }
    }

    /// Set the member accessibility; accessor accessibilities follow it.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self.getter_accessibility = accessibility;
        self.setter_accessibility = accessibility;
        self
    }

    pub fn with_getter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.getter_accessibility = accessibility;
        self
    }

    pub fn with_setter_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.setter_accessibility = accessibility;
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

    pub fn with_virtual(mut self, is_virtual: bool) -> Self {
        self.is_virtual = is_virtual;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    pub fn with_read_only(mut self, is_read_only: bool) -> Self {
        self.is_read_only = is_read_only;
        self
    }

    pub fn with_init_only(mut self, is_init_only: bool) -> Self {
        self.is_init_only = is_init_only;
        self
    }
}
