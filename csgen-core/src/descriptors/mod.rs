//! Structural descriptions of types and their members.

mod member;
mod symbols;
mod type_desc;
mod type_ref;

use std::sync::Arc;

pub use member::PropertyDesc;
pub use symbols::{Accessibility, SpecialType, TypeKind};
pub use type_desc::TypeDesc;
pub use type_ref::TypeRef;

/// Identity shared by every type descriptor.
pub trait TypeIdentity {
    fn name(&self) -> &str;

    /// The `global::` qualified name.
    fn fully_qualified_name(&self) -> &str;

    fn is_value_type(&self) -> bool;

    fn type_kind(&self) -> TypeKind;

    fn special_type(&self) -> SpecialType;

    fn can_be_null(&self) -> bool {
        !self.is_value_type() || self.special_type() == SpecialType::NullableT
    }
}

/// Either a full structural description or a bare reference.
///
/// Values of different variants never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Desc(Arc<TypeDesc>),
    Ref(TypeRef),
}

impl TypeDescriptor {
    /// The full description, when available.
    pub fn as_desc(&self) -> Option<&TypeDesc> {
        match self {
            TypeDescriptor::Desc(desc) => Some(desc),
            TypeDescriptor::Ref(_) => None,
        }
    }

    fn identity(&self) -> &dyn TypeIdentity {
        match self {
            TypeDescriptor::Desc(desc) => desc.as_ref(),
            TypeDescriptor::Ref(ty) => ty,
        }
    }
}

impl TypeIdentity for TypeDescriptor {
    fn name(&self) -> &str {
        self.identity().name()
    }

    fn fully_qualified_name(&self) -> &str {
        self.identity().fully_qualified_name()
    }

    fn is_value_type(&self) -> bool {
        self.identity().is_value_type()
    }

    fn type_kind(&self) -> TypeKind {
        self.identity().type_kind()
    }

    fn special_type(&self) -> SpecialType {
        self.identity().special_type()
    }
}

impl From<TypeDesc> for TypeDescriptor {
    fn from(desc: TypeDesc) -> Self {
        TypeDescriptor::Desc(Arc::new(desc))
    }
}

impl From<Arc<TypeDesc>> for TypeDescriptor {
    fn from(desc: Arc<TypeDesc>) -> Self {
        TypeDescriptor::Desc(desc)
    }
}

impl From<TypeRef> for TypeDescriptor {
    fn from(ty: TypeRef) -> Self {
        TypeDescriptor::Ref(ty)
    }
}
