//! Render type descriptors into C# declaration headers.
//!
//! Every function here is pure: the same descriptor always renders to the
//! same string.

use std::iter;

use csgen_core::{Accessibility, TypeDesc, TypeIdentity, TypeKind};

use crate::{Error, Result};

/// The C# keyword for an accessibility.
///
/// `NotApplicable` has no textual form and `ProtectedOrInternal` is rejected
/// as ambiguous; both fail with [`Error::UnsupportedKind`].
pub fn accessibility_keyword(accessibility: Accessibility) -> Result<&'static str> {
    match accessibility {
        Accessibility::Public => Ok("public"),
        Accessibility::Internal => Ok("internal"),
        Accessibility::Protected => Ok("protected"),
        Accessibility::Private => Ok("private"),
        Accessibility::ProtectedAndInternal => Ok("private protected"),
        Accessibility::NotApplicable | Accessibility::ProtectedOrInternal => {
            Err(Error::unsupported("accessibility", accessibility.as_str()))
        }
    }
}

/// The declaration keyword for a type kind.
pub fn type_kind_keyword(kind: TypeKind, is_record: bool) -> Result<&'static str> {
    match kind {
        TypeKind::Class if is_record => Ok("record"),
        TypeKind::Class => Ok("class"),
        TypeKind::Struct if is_record => Ok("record struct"),
        TypeKind::Struct => Ok("struct"),
        TypeKind::Interface => Ok("interface"),
        TypeKind::Enum => Ok("enum"),
        other => Err(Error::unsupported("type kind", other.as_str())),
    }
}

/// The modifiers of a type, each followed by a space (e.g. `"static partial "`).
///
/// Value types are never `static` or `sealed`; `static` excludes `abstract`
/// and `sealed`; `abstract` excludes `sealed`; `readonly` only applies to
/// value types; `partial` always comes last.
pub fn type_modifiers(desc: &TypeDesc) -> String {
    let mut modifiers = String::new();
    let is_value_type = desc.is_value_type();

    if desc.is_static() && !is_value_type {
        modifiers.push_str("static ");
    } else if desc.is_abstract() && !is_value_type {
        modifiers.push_str("abstract ");
    } else if desc.is_sealed() && !is_value_type {
        modifiers.push_str("sealed ");
    }

    if desc.is_readonly() && is_value_type {
        modifiers.push_str("readonly ");
    }

    if desc.is_partial() {
        modifiers.push_str("partial ");
    }

    modifiers
}

/// The name with its generic argument list, rendered recursively
/// (e.g. `Generic<T1, T2<T3>>`).
pub fn generic_name(desc: &TypeDesc) -> String {
    let mut out = String::new();
    push_generic_name(desc, &mut out);
    out
}

fn push_generic_name(desc: &TypeDesc, out: &mut String) {
    out.push_str(desc.name());

    let generics = desc.generic_types();
    if generics.is_empty() {
        return;
    }

    out.push('<');
    for (i, generic) in generics.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_generic_name(generic, out);
    }
    out.push('>');
}

/// Render the full declaration header of a type.
///
/// ```
/// use csgen_codegen::declaration::to_type_declaration;
/// use csgen_core::{TypeDesc, TypeKind};
///
/// let desc = TypeDesc::new("Widget")
///     .with_partial(true)
///     .with_base_type(TypeDesc::new("Component"))
///     .with_interfaces([TypeDesc::new("IDisposable").with_kind(TypeKind::Interface)]);
///
/// assert_eq!(
///     to_type_declaration(&desc).unwrap(),
///     "public partial class Widget : Component, IDisposable"
/// );
/// ```
pub fn to_type_declaration(desc: &TypeDesc) -> Result<String> {
    let accessibility = accessibility_keyword(desc.accessibility())?;
    let kind = type_kind_keyword(desc.type_kind(), desc.is_record())?;

    let mut declaration = format!(
        "{accessibility} {}{kind} {}",
        type_modifiers(desc),
        generic_name(desc)
    );

    let bases: Vec<String> = desc
        .base_types()
        .iter()
        .chain(desc.interfaces().iter())
        .map(generic_name)
        .collect();
    if !bases.is_empty() {
        declaration.push_str(" : ");
        declaration.push_str(&bases.join(", "));
    }

    Ok(declaration)
}

/// Declarations of a type followed by those of its containing types, from
/// the immediate parent outward.
///
/// The iterator is lazy: each declaration is rendered when pulled.
pub fn type_declarations_with_containing_types(
    desc: &TypeDesc,
) -> impl Iterator<Item = Result<String>> + '_ {
    iter::once(desc)
        .chain(desc.containing_types().iter())
        .map(to_type_declaration)
}
