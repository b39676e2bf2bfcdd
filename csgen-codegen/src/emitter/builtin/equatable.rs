use csgen_core::{TypeDesc, TypeIdentity, TypeKind};

use crate::{
    Result,
    builder::SourceWriter,
    declaration::generic_name,
    emitter::{BodyEmitter, WritingContext},
    spec::TypeGenerationSpec,
};

const EQUALITY_COMPARER: &str = "global::System.Collections.Generic.EqualityComparer";

/// Implements `IEquatable<T>` over the target's members.
///
/// Records, static classes, interfaces and enums are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquatableEmitter;

impl EquatableEmitter {
    pub fn new() -> Self {
        Self
    }
}

fn target_desc(spec: &TypeGenerationSpec) -> Option<&TypeDesc> {
    spec.target_type
        .as_desc()
        .filter(|desc| !desc.is_record() && !desc.is_static())
        .filter(|desc| matches!(desc.type_kind(), TypeKind::Class | TypeKind::Struct))
}

impl BodyEmitter<TypeGenerationSpec> for EquatableEmitter {
    fn name(&self) -> &str {
        "equatable"
    }

    fn should_emit(&self, ctx: &WritingContext<'_, TypeGenerationSpec>) -> bool {
        target_desc(ctx.target).is_some()
    }

    fn interfaces(&self, ctx: &WritingContext<'_, TypeGenerationSpec>) -> Vec<String> {
        target_desc(ctx.target)
            .map(|desc| vec![format!("global::System.IEquatable<{}>", generic_name(desc))])
            .unwrap_or_default()
    }

    fn emit(
        &self,
        ctx: &WritingContext<'_, TypeGenerationSpec>,
        writer: &mut SourceWriter,
    ) -> Result<()> {
        let Some(desc) = target_desc(ctx.target) else {
            return Ok(());
        };

        let self_type = generic_name(desc);
        let is_reference = !desc.is_value_type();
        let annotate = ctx.options.enable_nullable_annotations;
        let other_suffix = if is_reference && annotate { "?" } else { "" };
        let object_suffix = if annotate { "?" } else { "" };
        let members = &ctx.target.members;

        writer.write_line(&format!("public bool Equals({self_type}{other_suffix} other)"));
        writer.open_block();
        if is_reference {
            writer.write_line("if (other is null) return false;");
            writer.write_line("if (ReferenceEquals(this, other)) return true;");
        }
        if members.is_empty() {
            writer.write_line("return true;");
        } else {
            let comparisons: Vec<String> = members
                .iter()
                .map(|m| {
                    format!(
                        "{EQUALITY_COMPARER}<{}>.Default.Equals({name}, other.{name})",
                        m.member_type.source_name(),
                        name = m.escaped_name
                    )
                })
                .collect();
            let separator = format!("\n{}&& ", writer.indent().as_str());
            writer.write_line(&format!("return {};", comparisons.join(&separator)));
        }
        writer.close_block()?;
        writer.write_blank_line();

        writer.write_line(&format!(
            "public override bool Equals(object{object_suffix} obj) => obj is {self_type} other && Equals(other);"
        ));
        writer.write_blank_line();

        writer.write_line("public override int GetHashCode()");
        writer.open_block();
        writer.write_line("var hash = new global::System.HashCode();");
        for member in members {
            writer.write_line(&format!("hash.Add({});", member.escaped_name));
        }
        writer.write_line("return hash.ToHashCode();");
        writer.close_block()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use csgen_core::{PropertyDesc, TypeRef};

    use super::*;
    use crate::{emitter::SiblingTypes, options::FileEmitterOptions};

    fn spec(desc: TypeDesc) -> TypeGenerationSpec {
        TypeGenerationSpec::from_type_desc(desc, []).unwrap()
    }

    #[test]
    fn test_declines_records_static_classes_interfaces_and_enums() {
        let options = FileEmitterOptions::default();
        let types = SiblingTypes::new();
        for desc in [
            TypeDesc::new("A").with_record(true),
            TypeDesc::new("B").with_kind(TypeKind::Interface),
            TypeDesc::new("C").with_kind(TypeKind::Enum),
            TypeDesc::new("Util").with_static(true).with_partial(true),
        ] {
            let target = spec(desc);
            let ctx = WritingContext {
                target: &target,
                options: &options,
                types: &types,
            };
            assert!(!EquatableEmitter.should_emit(&ctx));
            assert!(EquatableEmitter.interfaces(&ctx).is_empty());
        }
    }

    #[test]
    fn test_contributes_generic_interface() {
        let options = FileEmitterOptions::default();
        let types = SiblingTypes::new();
        let target = spec(TypeDesc::new("Pair").with_generic_types([TypeDesc::new("T")]));
        let ctx = WritingContext {
            target: &target,
            options: &options,
            types: &types,
        };

        assert_eq!(
            EquatableEmitter.interfaces(&ctx),
            vec!["global::System.IEquatable<Pair<T>>"]
        );
    }

    #[test]
    fn test_struct_equality_has_no_null_checks() {
        let options = FileEmitterOptions::default();
        let types = SiblingTypes::new();
        let target = spec(
            TypeDesc::new("Point")
                .with_namespace("Demo")
                .with_kind(TypeKind::Struct)
                .with_members([PropertyDesc::property(
                    "X",
                    TypeRef::from_keyword("int").unwrap(),
                    TypeRef::new("Demo.Point", TypeKind::Struct),
                )]),
        );
        let ctx = WritingContext {
            target: &target,
            options: &options,
            types: &types,
        };
        let mut writer = SourceWriter::new();
        writer.set_indentation(1).unwrap();

        EquatableEmitter.emit(&ctx, &mut writer).unwrap();

        let out = writer.as_str();
        assert!(out.contains("public bool Equals(Point other)"));
        assert!(out.contains("public override bool Equals(object? obj)"));
        assert!(!out.contains("is null"));
        assert!(out.contains("EqualityComparer<int>.Default.Equals(X, other.X)"));
        assert!(out.contains("hash.Add(X);"));
    }
}
