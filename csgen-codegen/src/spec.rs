//! Units of work handed to a file emitter.

use std::sync::Arc;

use csgen_core::{EquatableArray, PropertyDesc, TypeDesc, TypeDescriptor, TypeIdentity};

use crate::{Result, declaration::type_declarations_with_containing_types};

/// Anything that can be placed in a namespace.
pub trait GenerationSpec {
    /// The namespace to declare; `None` emits into the global namespace.
    fn namespace(&self) -> Option<&str>;
}

/// A spec emitting one target type, possibly nested in containing types.
pub trait DeclarationSpec: GenerationSpec {
    /// Declaration headers: index 0 is the target, followed by its containing
    /// types from the immediate parent outward. Never empty when emitted.
    ///
    /// The target entry may span several lines; every line but the last is
    /// written above the attributes (doc comments, preprocessor lines).
    fn type_declarations(&self) -> &EquatableArray<String>;

    /// Name used for the default file name.
    fn target_name(&self) -> &str;

    /// Attributes requested by the spec itself.
    fn attributes(&self) -> &[String] {
        &[]
    }
}

/// Spec for a single type, built from its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeGenerationSpec {
    pub namespace: Option<String>,
    pub type_declarations: EquatableArray<String>,
    pub target_type: TypeDescriptor,
    pub attributes: EquatableArray<String>,
    pub members: EquatableArray<PropertyDesc>,
    /// Other types generated in the same run.
    pub generated_types: EquatableArray<TypeDescriptor>,
}

impl TypeGenerationSpec {
    /// Build a spec from a descriptor, rendering its declaration and those of
    /// its containing types.
    ///
    /// Attributes and members are taken from the descriptor.
    pub fn from_type_desc(
        target: impl Into<Arc<TypeDesc>>,
        generated_types: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<Self> {
        let target: Arc<TypeDesc> = target.into();
        let type_declarations =
            type_declarations_with_containing_types(&target).collect::<Result<_>>()?;

        Ok(Self {
            namespace: target.namespace().map(str::to_string),
            type_declarations,
            attributes: target.attributes().clone(),
            members: target.members().clone(),
            generated_types: generated_types.into_iter().collect(),
            target_type: TypeDescriptor::Desc(target),
        })
    }

    /// Build a spec from raw declaration strings.
    pub fn from_declarations<I, S>(
        namespace: Option<&str>,
        target_type: impl Into<TypeDescriptor>,
        declarations: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.map(str::to_string),
            type_declarations: csgen_core::strings(declarations),
            target_type: target_type.into(),
            attributes: EquatableArray::empty(),
            members: EquatableArray::empty(),
            generated_types: EquatableArray::empty(),
        }
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = csgen_core::strings(attributes);
        self
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = PropertyDesc>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

impl GenerationSpec for TypeGenerationSpec {
    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl DeclarationSpec for TypeGenerationSpec {
    fn type_declarations(&self) -> &EquatableArray<String> {
        &self.type_declarations
    }

    fn target_name(&self) -> &str {
        self.target_type.name()
    }

    fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use csgen_core::{Accessibility, TypeKind, TypeRef};

    use super::*;

    #[test]
    fn test_from_type_desc() {
        let desc = TypeDesc::new("Widget")
            .with_namespace("Demo")
            .with_partial(true)
            .with_attributes(["Serializable"])
            .with_containing_types([TypeDesc::new("Outer")
                .with_partial(true)
                .with_accessibility(Accessibility::Internal)]);

        let spec = TypeGenerationSpec::from_type_desc(desc, []).unwrap();

        assert_eq!(spec.namespace(), Some("Demo"));
        assert_eq!(spec.target_name(), "Widget");
        assert_eq!(
            spec.type_declarations().as_slice(),
            ["public partial class Widget", "internal partial class Outer"]
        );
        assert_eq!(DeclarationSpec::attributes(&spec), ["Serializable"]);
    }

    #[test]
    fn test_from_type_desc_propagates_declaration_errors() {
        let desc = TypeDesc::new("Widget").with_accessibility(Accessibility::NotApplicable);

        assert!(TypeGenerationSpec::from_type_desc(desc, []).is_err());
    }

    #[test]
    fn test_specs_built_from_equal_inputs_are_equal() {
        let make = || {
            let desc = TypeDesc::new("Widget").with_namespace("Demo");
            let sibling = TypeRef::new("Demo.Gadget", TypeKind::Class);
            TypeGenerationSpec::from_type_desc(desc, [sibling.into()]).unwrap()
        };

        assert_eq!(make(), make());
    }

    #[test]
    fn test_from_declarations() {
        let spec = TypeGenerationSpec::from_declarations(
            None,
            TypeRef::new("Widget", TypeKind::Class),
            ["public class Widget"],
        );

        assert_eq!(spec.namespace(), None);
        assert_eq!(spec.target_name(), "Widget");
        assert!(DeclarationSpec::attributes(&spec).is_empty());
    }
}
