use csgen_core::{Accessibility, PropertyDesc};

use crate::{
    Result,
    builder::SourceWriter,
    declaration::accessibility_keyword,
    emitter::{BodyEmitter, WritingContext},
    spec::TypeGenerationSpec,
};

/// Declares every member of the target as an auto-property or a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesEmitter;

impl PropertiesEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl BodyEmitter<TypeGenerationSpec> for PropertiesEmitter {
    fn name(&self) -> &str {
        "properties"
    }

    fn should_emit(&self, ctx: &WritingContext<'_, TypeGenerationSpec>) -> bool {
        !ctx.target.members.is_empty()
    }

    fn emit(
        &self,
        ctx: &WritingContext<'_, TypeGenerationSpec>,
        writer: &mut SourceWriter,
    ) -> Result<()> {
        for member in &ctx.target.members {
            for attribute in &member.attributes {
                writer.write_line(&format!("[{attribute}]"));
            }
            let line = if member.is_property {
                property_declaration(member)?
            } else {
                field_declaration(member)?
            };
            writer.write_line(&line);
        }
        Ok(())
    }
}

/// `public required string Name { get; private set; }`
pub(crate) fn property_declaration(member: &PropertyDesc) -> Result<String> {
    let accessibility = member.accessibility;
    let mut line = format!("{} ", accessibility_keyword(accessibility)?);
    if member.is_required {
        line.push_str("required ");
    }
    if member.is_abstract {
        line.push_str("abstract ");
    } else if member.is_virtual {
        line.push_str("virtual ");
    }
    line.push_str(member.member_type.source_name());
    line.push(' ');
    line.push_str(&member.escaped_name);

    line.push_str(" { ");
    line.push_str(&accessor(member.getter_accessibility, accessibility, "get")?);
    if !member.is_read_only {
        let keyword = if member.is_init_only { "init" } else { "set" };
        line.push(' ');
        line.push_str(&accessor(member.setter_accessibility, accessibility, keyword)?);
    }
    line.push_str(" }");
    Ok(line)
}

/// `public readonly int Count;`
pub(crate) fn field_declaration(member: &PropertyDesc) -> Result<String> {
    let mut line = format!("{} ", accessibility_keyword(member.accessibility)?);
    if member.is_required {
        line.push_str("required ");
    }
    if member.is_read_only {
        line.push_str("readonly ");
    }
    line.push_str(member.member_type.source_name());
    line.push(' ');
    line.push_str(&member.escaped_name);
    line.push(';');
    Ok(line)
}

fn accessor(
    accessibility: Accessibility,
    member_accessibility: Accessibility,
    keyword: &str,
) -> Result<String> {
    if accessibility == member_accessibility {
        Ok(format!("{keyword};"))
    } else {
        Ok(format!("{} {keyword};", accessibility_keyword(accessibility)?))
    }
}

#[cfg(test)]
mod tests {
    use csgen_core::{TypeKind, TypeRef};

    use super::*;

    fn member(name: &str, keyword: &str) -> PropertyDesc {
        PropertyDesc::property(
            name,
            TypeRef::from_keyword(keyword).unwrap(),
            TypeRef::new("Demo.Widget", TypeKind::Class),
        )
    }

    #[test]
    fn test_plain_property() {
        assert_eq!(
            property_declaration(&member("Name", "string")).unwrap(),
            "public string Name { get; set; }"
        );
    }

    #[test]
    fn test_property_modifiers_and_accessors() {
        let desc = member("Count", "int")
            .with_required(true)
            .with_virtual(true)
            .with_setter_accessibility(Accessibility::Private);

        assert_eq!(
            property_declaration(&desc).unwrap(),
            "public required virtual int Count { get; private set; }"
        );
    }

    #[test]
    fn test_read_only_and_init_only_properties() {
        assert_eq!(
            property_declaration(&member("Id", "long").with_read_only(true)).unwrap(),
            "public long Id { get; }"
        );
        assert_eq!(
            property_declaration(&member("Id", "long").with_init_only(true)).unwrap(),
            "public long Id { get; init; }"
        );
    }

    #[test]
    fn test_keyword_names_are_escaped() {
        let desc = member("class", "string").with_accessibility(Accessibility::Internal);

        assert_eq!(
            property_declaration(&desc).unwrap(),
            "internal string @class { get; set; }"
        );
    }

    #[test]
    fn test_non_keyword_types_are_fully_qualified() {
        let desc = PropertyDesc::field(
            "Owner",
            TypeRef::new("Demo.Person", TypeKind::Class),
            TypeRef::new("Demo.Widget", TypeKind::Class),
        )
        .with_read_only(true);

        assert_eq!(
            field_declaration(&desc).unwrap(),
            "public readonly global::Demo.Person Owner;"
        );
    }

    #[test]
    fn test_unsupported_accessibility_fails() {
        let desc = member("Name", "string").with_accessibility(Accessibility::NotApplicable);

        assert!(property_declaration(&desc).is_err());
    }
}
