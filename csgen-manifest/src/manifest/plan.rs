//! Turning a manifest into descriptors, specs and generated files.

use csgen_codegen::{
    emitter::{
        FileEmitter, SiblingTypes,
        builtin::{EquatableEmitter, PropertiesEmitter, RawTextEmitter},
    },
    options::{AssemblyName, TypeFileEmitterOptions},
    spec::TypeGenerationSpec,
};
use csgen_core::{
    EquatableArray, PropertyDesc, SourceCollection, TypeDesc, TypeDescriptor, TypeKind, TypeRef,
};
use tracing::{debug, info};

use super::{ContainingEntry, EmitterKind, Manifest, MemberEntry, Modifier, TypeEntry};
use crate::{Error, Result};

impl Manifest {
    /// File emitter options built from `[generator]` and `[options]`.
    pub fn emitter_options(&self) -> Result<TypeFileEmitterOptions> {
        let mut file = self.options.emitter.clone();
        if let Some(generator) = &self.generator {
            file.assembly_name = Some(AssemblyName::new(&generator.assembly, &generator.version));
        }

        let indent = self
            .options
            .indent
            .to_indent()
            .map_err(|e| Error::emit("options.indent", e))?;
        let mut options = TypeFileEmitterOptions::new(file).with_indent(indent);
        if let Some(suffix) = &self.options.file_name_suffix {
            options = options.with_file_name_suffix(suffix);
        }
        Ok(options)
    }

    /// Every declared type, keyed by name.
    pub fn sibling_types(&self) -> SiblingTypes {
        self.types
            .iter()
            .map(|entry| (entry.name.clone(), TypeDescriptor::from(self.type_ref(entry))))
            .collect()
    }

    /// Structural descriptor of an entry.
    pub fn type_desc(&self, entry: &TypeEntry) -> TypeDesc {
        let declaring = self.type_ref(entry);
        let mut desc = TypeDesc::new(&entry.name)
            .with_kind(entry.kind())
            .with_record(entry.record)
            .with_accessibility(entry.accessibility())
            .with_attributes(&entry.attributes)
            .with_interfaces(entry.interfaces.iter().map(TypeDesc::new))
            .with_generic_types(entry.generics.iter().map(TypeDesc::new))
            .with_containing_types(entry.containing.iter().map(containing_desc))
            .with_members(
                entry
                    .members
                    .iter()
                    .map(|member| self.member_desc(member, &declaring)),
            );
        if let Some(namespace) = &entry.namespace {
            desc = desc.with_namespace(namespace);
        }
        if let Some(base) = &entry.base {
            desc = desc.with_base_type(TypeDesc::new(base));
        }
        apply_modifiers(desc, &entry.modifiers)
    }

    /// Generation spec of an entry, with every other type as a sibling.
    pub fn spec(&self, entry: &TypeEntry) -> Result<TypeGenerationSpec> {
        let others = self
            .types
            .iter()
            .filter(|other| other.name != entry.name)
            .map(|other| TypeDescriptor::from(self.type_ref(other)));

        let mut spec = TypeGenerationSpec::from_type_desc(self.type_desc(entry), others)
            .map_err(|e| Error::emit(&entry.name, e))?;

        if let Some(doc) = &entry.doc {
            let mut declarations = spec.type_declarations.to_vec();
            if let Some(target) = declarations.first_mut() {
                *target = format!("{}\n{target}", doc_comment(doc));
            }
            spec.type_declarations = EquatableArray::from(declarations);
        }
        Ok(spec)
    }

    /// File emitter running the entry's body emitters, then its snippets.
    pub fn file_emitter(
        &self,
        entry: &TypeEntry,
        options: &TypeFileEmitterOptions,
    ) -> FileEmitter<TypeGenerationSpec> {
        let mut emitter = FileEmitter::new(options.clone());
        for kind in &entry.emitters {
            match kind {
                EmitterKind::Properties => emitter.add_emitter(PropertiesEmitter),
                EmitterKind::Equatable => emitter.add_emitter(EquatableEmitter),
            };
        }
        for (i, snippet) in entry.snippets.iter().enumerate() {
            let name = snippet
                .name
                .clone()
                .unwrap_or_else(|| format!("snippet{}", i + 1));
            emitter.add_emitter(
                RawTextEmitter::new(name, &snippet.text)
                    .with_outer_usings(&snippet.usings)
                    .with_inner_usings(&snippet.inner_usings)
                    .with_attributes(&snippet.attributes)
                    .with_interfaces(&snippet.interfaces),
            );
        }
        emitter
    }

    /// Generate a file for every declared type.
    pub fn generate(&self) -> Result<SourceCollection> {
        let options = self.emitter_options()?;
        let siblings = self.sibling_types();
        let mut collection = SourceCollection::new();

        for entry in &self.types {
            let spec = self.spec(entry)?;
            let emitter = self.file_emitter(entry, &options);
            debug!(
                target_name = %entry.name,
                emitters = ?emitter.emitter_names().collect::<Vec<_>>(),
                "emitting type"
            );
            let file = emitter
                .generate_source(&spec, &siblings)
                .map_err(|e| Error::emit(&entry.name, e))?;
            collection.register_file(file);
        }

        info!(files = collection.len(), "generated sources");
        Ok(collection)
    }

    fn type_ref(&self, entry: &TypeEntry) -> TypeRef {
        TypeRef::from_parts(&entry.name, entry.namespace.as_deref(), entry.kind())
    }

    /// Resolve a member type: a keyword, a declared type, a qualified name, or
    /// a name written as-is. Nullable and array suffixes are kept.
    fn resolve_type(&self, ty: &str) -> TypeRef {
        let (base, suffix) = split_type_suffix(ty.trim());
        let resolved = if let Some(keyword) = TypeRef::from_keyword(base) {
            keyword
        } else if let Some(entry) = self.find_type(base) {
            self.type_ref(entry)
        } else if is_qualified(base) {
            TypeRef::new(base, TypeKind::Class)
        } else {
            TypeRef::unqualified(base, TypeKind::Class)
        };
        resolved.with_suffix(&suffix)
    }

    fn member_desc(&self, member: &MemberEntry, declaring: &TypeRef) -> PropertyDesc {
        let member_type = self.resolve_type(&member.ty);
        let desc = if member.field {
            PropertyDesc::field(&member.name, member_type, declaring.clone())
        } else {
            PropertyDesc::property(&member.name, member_type, declaring.clone())
        };

        let mut desc = desc
            .with_accessibility(member.accessibility())
            .with_required(member.required)
            .with_virtual(member.is_virtual)
            .with_abstract(member.is_abstract)
            .with_read_only(member.readonly)
            .with_init_only(member.init)
            .with_attributes(&member.attributes);
        if let Some(getter) = member.getter {
            desc = desc.with_getter_accessibility(getter);
        }
        if let Some(setter) = member.setter {
            desc = desc.with_setter_accessibility(setter);
        }
        desc
    }
}

/// Split trailing `?`, `[]` and `[,]` off a type name.
///
/// `int[]?` gives `("int", "[]?")`; whitespace inside the suffix is dropped.
fn split_type_suffix(ty: &str) -> (&str, String) {
    let mut end = ty.len();
    loop {
        let head = ty[..end].trim_end();
        if let Some(rest) = head.strip_suffix('?') {
            end = rest.len();
        } else if let Some(rest) = head.strip_suffix(']') {
            match rest.rfind('[') {
                Some(open) if rest[open + 1..].chars().all(|c| c == ',' || c.is_whitespace()) => {
                    end = open;
                }
                _ => break,
            }
        } else {
            break;
        }
    }
    let suffix = ty[end..].chars().filter(|c| !c.is_whitespace()).collect();
    (ty[..end].trim_end(), suffix)
}

/// Whether a name carries a namespace (`Ns.Name`, `global::Name`).
fn is_qualified(name: &str) -> bool {
    let generic_start = name.find('<').unwrap_or(name.len());
    name.starts_with(csgen_core::GLOBAL_ALIAS) || name[..generic_start].contains('.')
}

fn containing_desc(entry: &ContainingEntry) -> TypeDesc {
    let desc = TypeDesc::new(&entry.name)
        .with_kind(entry.kind())
        .with_record(entry.record)
        .with_accessibility(entry.accessibility());
    apply_modifiers(desc, &entry.modifiers)
}

fn apply_modifiers(desc: TypeDesc, modifiers: &[Modifier]) -> TypeDesc {
    modifiers.iter().fold(desc, |desc, modifier| match modifier {
        Modifier::Static => desc.with_static(true),
        Modifier::Abstract => desc.with_abstract(true),
        Modifier::Sealed => desc.with_sealed(true),
        Modifier::Readonly => desc.with_readonly(true),
        Modifier::Partial => desc.with_partial(true),
    })
}

/// `/// <summary>` block, one line per input line.
fn doc_comment(doc: &str) -> String {
    let mut lines = vec!["/// <summary>".to_string()];
    lines.extend(doc.trim().lines().map(|line| format!("/// {}", line.trim())));
    lines.push("/// </summary>".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use csgen_core::{SpecialType, TypeIdentity};

    use super::*;

    fn manifest(src: &str) -> Manifest {
        src.parse().unwrap()
    }

    #[test]
    fn test_member_types_resolve_to_declared_types() {
        let manifest = manifest(
            r#"
[[types]]
name = "Point"
namespace = "Geo"
kind = "struct"

[[types]]
name = "Shape"
namespace = "Geo"

[[types.members]]
name = "Origin"
type = "Point"

[[types.members]]
name = "Label"
type = "string"
"#,
        );
        let desc = manifest.type_desc(&manifest.types[1]);
        let members = desc.members();

        assert_eq!(members[0].member_type.fully_qualified_name(), "global::Geo.Point");
        assert!(members[0].member_type.is_value_type());
        assert_eq!(members[1].member_type.source_name(), "string");
        assert_eq!(members[0].declaring_type.name(), "Shape");
    }

    #[test]
    fn test_modifiers_and_base() {
        let manifest = manifest(
            r#"
[[types]]
name = "Repository"
modifiers = ["abstract", "partial"]
base = "RepositoryBase"
interfaces = ["IDisposable"]
generics = ["TEntity"]
"#,
        );
        let desc = manifest.type_desc(&manifest.types[0]);

        assert!(desc.is_abstract());
        assert!(desc.is_partial());
        assert_eq!(
            csgen_codegen::declaration::to_type_declaration(&desc).unwrap(),
            "public abstract partial class Repository<TEntity> : RepositoryBase, IDisposable"
        );
    }

    #[test]
    fn test_doc_comment_prefixes_target_declaration() {
        let manifest = manifest(
            r#"
[[types]]
name = "Widget"
doc = "A widget."
"#,
        );
        let spec = manifest.spec(&manifest.types[0]).unwrap();

        assert_eq!(
            spec.type_declarations[0],
            "/// <summary>\n/// A widget.\n/// </summary>\npublic class Widget"
        );
    }

    #[test]
    fn test_spec_lists_other_types() {
        let manifest = manifest(
            r#"
[[types]]
name = "A"

[[types]]
name = "B"
"#,
        );
        let spec = manifest.spec(&manifest.types[0]).unwrap();

        assert_eq!(spec.generated_types.len(), 1);
        assert_eq!(spec.generated_types[0].name(), "B");
        assert_eq!(manifest.sibling_types().len(), 2);
    }

    #[test]
    fn test_generator_sets_assembly_name() {
        let manifest = manifest(
            r#"
[generator]
assembly = "Demo.Gen"
version = "2.0.0"

[options]
file_name_suffix = ".cs"
"#,
        );
        let options = manifest.emitter_options().unwrap();

        assert_eq!(
            options.assembly_name,
            Some(AssemblyName::new("Demo.Gen", "2.0.0"))
        );
        assert_eq!(options.file_name_suffix, ".cs");
    }

    #[test]
    fn test_file_emitter_registers_snippets_after_builtins() {
        let manifest = manifest(
            r#"
[[types]]
name = "Widget"
emitters = ["properties", "equatable"]

[[types.snippets]]
text = "// custom"

[[types.snippets]]
name = "extra"
text = "// extra"
"#,
        );
        let options = manifest.emitter_options().unwrap();
        let emitter = manifest.file_emitter(&manifest.types[0], &options);

        assert_eq!(
            emitter.emitter_names().collect::<Vec<_>>(),
            vec!["properties", "equatable", "snippet1", "extra"]
        );
    }

    #[test]
    fn test_unknown_member_type_is_qualified_class() {
        let manifest = manifest(
            r#"
[[types]]
name = "Widget"

[[types.members]]
name = "Created"
type = "System.DateTime"
"#,
        );
        let desc = manifest.type_desc(&manifest.types[0]);
        let member_type = &desc.members()[0].member_type;

        assert_eq!(member_type.source_name(), "global::System.DateTime");
        assert_eq!(member_type.type_kind(), TypeKind::Class);
    }

    #[test]
    fn test_nullable_and_array_member_types() {
        let manifest = manifest(
            r#"
[[types]]
name = "Order"
namespace = "Shop"

[[types.members]]
name = "Count"
type = "int?"

[[types.members]]
name = "Label"
type = "string?"

[[types.members]]
name = "Tags"
type = "string[]"

[[types.members]]
name = "Parent"
type = "Order?"

[[types.members]]
name = "Lines"
type = "List<int>"

[[types.members]]
name = "Shipped"
type = "System.DateTime?"
"#,
        );
        let desc = manifest.type_desc(&manifest.types[0]);
        let names: Vec<&str> = desc
            .members()
            .iter()
            .map(|m| m.member_type.source_name())
            .collect();

        assert_eq!(
            names,
            vec![
                "int?",
                "string?",
                "string[]",
                "global::Shop.Order?",
                "List<int>",
                "global::System.DateTime?",
            ]
        );
        let count = &desc.members()[0].member_type;
        assert!(count.is_value_type());
        assert_eq!(count.special_type(), SpecialType::NullableT);
        assert_eq!(desc.members()[2].member_type.type_kind(), TypeKind::Array);

        let sources = manifest.generate().unwrap();
        let order = sources.get("Order.g.cs").unwrap();
        assert!(order.contains("    public int? Count { get; set; }\n"));
        assert!(order.contains("    public string? Label { get; set; }\n"));
        assert!(order.contains("    public string[] Tags { get; set; }\n"));
        assert!(!order.contains("global::int"));
        assert!(!order.contains("global::string"));
    }

    #[test]
    fn test_split_type_suffix() {
        assert_eq!(split_type_suffix("int"), ("int", String::new()));
        assert_eq!(split_type_suffix("int[]?"), ("int", "[]?".to_string()));
        assert_eq!(split_type_suffix("Cell[ , ]"), ("Cell", "[,]".to_string()));
        assert_eq!(split_type_suffix("List<int?>"), ("List<int?>", String::new()));
        assert_eq!(split_type_suffix("Index[0]"), ("Index[0]", String::new()));
    }
}
