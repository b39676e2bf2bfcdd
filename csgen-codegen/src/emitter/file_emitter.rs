use std::{fmt, sync::Arc};

use csgen_core::{SourceCollection, SourceFile};
use indexmap::IndexSet;
use tracing::{debug, trace};

use super::{BodyEmitter, EmitterSlot, SiblingTypes, WritingContext};
use crate::{
    Error, Result,
    builder::SourceWriter,
    naming::distinct_using_directives,
    options::{FileEmitterOptions, TypeFileEmitterOptions},
    spec::DeclarationSpec,
};

const DEFAULT_HEADER: &str = "// <auto-generated/>";

type FileNameFn<S> = Box<dyn Fn(&S) -> String + Send + Sync>;

/// Produces one C# source file per target spec.
///
/// The file is laid out as header, nullable directives, warning suppression,
/// outer usings, namespace, inner usings, containing type declarations,
/// attributes, the target declaration and finally the body, written by each
/// registered [`BodyEmitter`] in registration order.
///
/// # Example
///
/// ```
/// use csgen_codegen::{
///     emitter::{FileEmitter, builtin::RawTextEmitter},
///     spec::TypeGenerationSpec,
/// };
/// use csgen_core::{TypeKind, TypeRef};
///
/// let emitter = FileEmitter::<TypeGenerationSpec>::default()
///     .with_emitter(RawTextEmitter::new("id", "public int Id { get; set; }"));
/// let spec = TypeGenerationSpec::from_declarations(
///     Some("Demo"),
///     TypeRef::new("Demo.Widget", TypeKind::Class),
///     ["public partial class Widget"],
/// );
///
/// let file = emitter.generate(&spec).unwrap();
/// assert_eq!(file.name(), "Widget.g.cs");
/// assert!(file.content().contains("        public int Id { get; set; }\n"));
/// ```
pub struct FileEmitter<S> {
    options: TypeFileEmitterOptions,
    slots: Vec<EmitterSlot<S>>,
    file_name: Option<FileNameFn<S>>,
}

impl<S: DeclarationSpec> FileEmitter<S> {
    pub fn new(options: TypeFileEmitterOptions) -> Self {
        Self {
            options,
            slots: Vec::new(),
            file_name: None,
        }
    }

    pub fn options(&self) -> &TypeFileEmitterOptions {
        &self.options
    }

    /// Register a body emitter. With option injection enabled it receives the
    /// file options right away.
    pub fn with_emitter(mut self, emitter: impl BodyEmitter<S> + 'static) -> Self {
        self.add_emitter(emitter);
        self
    }

    /// Register a body emitter with its own options; injection never
    /// replaces them.
    pub fn with_emitter_options(
        mut self,
        emitter: impl BodyEmitter<S> + 'static,
        options: FileEmitterOptions,
    ) -> Self {
        let slot = EmitterSlot::new(Box::new(emitter));
        slot.set_options_if_none(Arc::new(options));
        self.slots.push(slot);
        self
    }

    pub fn add_emitter(&mut self, emitter: impl BodyEmitter<S> + 'static) -> &mut Self {
        let slot = EmitterSlot::new(Box::new(emitter));
        if self.options.inject_options_on_code_emitters {
            slot.set_options_if_none(Arc::clone(&self.options.file));
        }
        self.slots.push(slot);
        self
    }

    /// Derive file names from the spec instead of `target_name + suffix`.
    pub fn with_file_name(mut self, f: impl Fn(&S) -> String + Send + Sync + 'static) -> Self {
        self.file_name = Some(Box::new(f));
        self
    }

    /// Names of the registered emitters, in order.
    pub fn emitter_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.emitter.name())
    }

    /// Options held by the emitter at `index`, if any were set.
    pub fn emitter_options(&self, index: usize) -> Option<&FileEmitterOptions> {
        self.slots
            .get(index)
            .and_then(|slot| slot.options.get())
            .map(Arc::as_ref)
    }

    /// Generate a file with no sibling types.
    pub fn generate(&self, spec: &S) -> Result<SourceFile> {
        self.generate_source(spec, &SiblingTypes::new())
    }

    /// Generate the file for `spec`.
    ///
    /// # Panics
    ///
    /// Panics if the spec has no type declarations.
    pub fn generate_source(&self, spec: &S, types: &SiblingTypes) -> Result<SourceFile> {
        let declarations = spec.type_declarations();
        assert!(
            !declarations.is_empty(),
            "declaration spec for '{}' has no type declarations",
            spec.target_name()
        );

        let active = self.active_emitters(spec, types)?;
        debug!(
            target_name = spec.target_name(),
            emitters = active.len(),
            "generating source"
        );

        let spacing = self.options.blank_lines_between_declarations;
        let mut writer = SourceWriter::with_indent(self.options.indent.clone());

        self.write_preamble(&mut writer);

        let outer = distinct_using_directives(
            self.options
                .default_outer_using_directives
                .iter()
                .cloned()
                .chain(active.iter().flat_map(|(e, ctx)| e.outer_using_directives(ctx))),
        )?;
        if !outer.is_empty() {
            writer.write_line(&outer.join("\n"));
            writer.write_blank_lines(spacing);
        }

        if let Some(namespace) = spec.namespace() {
            if self.options.use_file_scoped_namespace {
                writer.write_line(&format!("namespace {namespace};"));
                writer.write_blank_lines(spacing);
            } else {
                writer.write_line(&format!("namespace {namespace}"));
                writer.open_block();
            }

            let inner = distinct_using_directives(
                self.options
                    .default_inner_using_directives
                    .iter()
                    .cloned()
                    .chain(active.iter().flat_map(|(e, ctx)| e.inner_using_directives(ctx))),
            )?;
            if !inner.is_empty() {
                writer.write_line(&inner.join("\n"));
                writer.write_blank_lines(spacing);
            }
        }

        for containing in declarations.iter().skip(1).rev() {
            writer.write_line(containing);
            writer.open_block();
        }

        let (leading, declaration) = split_target_declaration(&declarations[0]);
        if let Some(leading) = leading {
            writer.write_line(&leading);
        }

        self.write_attributes(&mut writer, spec, &active);
        if let Some(assembly) = &self.options.assembly_name {
            writer.write_line(&assembly.generated_code_attribute());
        }

        let interfaces: IndexSet<String> = self
            .options
            .default_interfaces
            .iter()
            .cloned()
            .chain(active.iter().flat_map(|(e, ctx)| e.interfaces(ctx)))
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        writer.write_line(&append_base_list(
            declaration,
            self.options.default_base_type.as_deref(),
            &interfaces,
        ));
        writer.open_block();

        self.write_bodies(&mut writer, &active)?;
        writer.close_all_blocks();

        let name = match &self.file_name {
            Some(f) => f(spec),
            None => format!("{}{}", spec.target_name(), self.options.file_name_suffix),
        };
        trace!(file = %name, bytes = writer.len(), "generated source");
        Ok(SourceFile::new(name, writer.into_string()))
    }

    /// Generate every spec and register the results in `collection`.
    ///
    /// Returns the number of files registered.
    pub fn populate<'s>(
        &self,
        collection: &mut SourceCollection,
        specs: impl IntoIterator<Item = &'s S>,
        types: &SiblingTypes,
    ) -> Result<usize>
    where
        S: 's,
    {
        let mut count = 0;
        for spec in specs {
            collection.register_file(self.generate_source(spec, types)?);
            count += 1;
        }
        debug!(count, "populated source collection");
        Ok(count)
    }

    /// Resolve each emitter's options and keep those that want to emit.
    fn active_emitters<'a>(
        &'a self,
        spec: &'a S,
        types: &'a SiblingTypes,
    ) -> Result<Vec<(&'a dyn BodyEmitter<S>, WritingContext<'a, S>)>> {
        let mut active = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let options = if self.options.inject_options_on_code_emitters {
                slot.options.get_or_init(|| Arc::clone(&self.options.file))
            } else {
                slot.options.get().ok_or_else(|| Error::MissingOptions {
                    emitter: slot.emitter.name().to_string(),
                })?
            };

            let ctx = WritingContext {
                target: spec,
                options: options.as_ref(),
                types,
            };
            if slot.emitter.should_emit(&ctx) {
                active.push((slot.emitter.as_ref(), ctx));
            } else {
                trace!(emitter = slot.emitter.name(), "emitter declined target");
            }
        }
        Ok(active)
    }

    fn write_preamble(&self, writer: &mut SourceWriter) {
        let header = self
            .options
            .source_file_header
            .as_deref()
            .unwrap_or(DEFAULT_HEADER);
        writer.write_line(header);
        writer.write_blank_line();

        writer.write_line(&format!(
            "#nullable {} annotations",
            enable_or_disable(self.options.enable_nullable_annotations)
        ));
        writer.write_line(&format!(
            "#nullable {} warnings",
            enable_or_disable(self.options.enable_nullable_warnings)
        ));
        writer.write_blank_lines(self.options.blank_lines_between_declarations);

        if !self.options.suppress_warnings.is_empty() {
            writer.write_line(&format!(
                "#pragma warning disable {}",
                self.options.suppress_warnings.join(", ")
            ));
            writer.write_blank_lines(self.options.blank_lines_between_declarations);
        }
    }

    fn write_attributes(
        &self,
        writer: &mut SourceWriter,
        spec: &S,
        active: &[(&dyn BodyEmitter<S>, WritingContext<'_, S>)],
    ) {
        let attributes: IndexSet<String> = self
            .options
            .default_attributes
            .iter()
            .chain(spec.attributes())
            .cloned()
            .chain(active.iter().flat_map(|(e, ctx)| e.attributes(ctx)))
            .flat_map(|a| normalize_attribute(&a))
            .collect();

        if attributes.is_empty() {
            return;
        }
        if self.options.use_combined_attribute_declaration {
            let joined: Vec<&str> = attributes.iter().map(String::as_str).collect();
            writer.write_line(&format!("[{}]", joined.join(", ")));
        } else {
            for attribute in &attributes {
                writer.write_line(&format!("[{attribute}]"));
            }
        }
    }

    /// Write each emitter's body. Blank lines separate two emitters only when
    /// both wrote something.
    fn write_bodies(
        &self,
        writer: &mut SourceWriter,
        active: &[(&dyn BodyEmitter<S>, WritingContext<'_, S>)],
    ) -> Result<()> {
        let mut wrote_any = false;
        for (emitter, ctx) in active {
            let checkpoint = writer.len();
            if wrote_any {
                writer.write_blank_lines(self.options.blank_lines_between_code_emitters);
            }

            let body_start = writer.len();
            emitter.emit(ctx, writer)?;
            if writer.len() == body_start {
                writer.truncate(checkpoint);
            } else {
                wrote_any = true;
            }
        }
        Ok(())
    }
}

impl<S: DeclarationSpec> Default for FileEmitter<S> {
    fn default() -> Self {
        Self::new(TypeFileEmitterOptions::default())
    }
}

impl<S> fmt::Debug for FileEmitter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEmitter")
            .field("options", &self.options)
            .field(
                "emitters",
                &self
                    .slots
                    .iter()
                    .map(|slot| slot.emitter.name())
                    .collect::<Vec<_>>(),
            )
            .field("file_name", &self.file_name.is_some())
            .finish()
    }
}

fn enable_or_disable(flag: bool) -> &'static str {
    if flag { "enable" } else { "disable" }
}

/// Split a multi-line target declaration into the lines written above the
/// attributes and the declaration itself.
///
/// The leading lines are returned with `\n` line endings only.
fn split_target_declaration(target: &str) -> (Option<String>, &str) {
    match target.trim_end().rsplit_once('\n') {
        Some((leading, last)) => {
            let leading = leading
                .lines()
                .map(|line| line.trim_end_matches('\r'))
                .collect::<Vec<_>>()
                .join("\n");
            (Some(leading), last.trim_end_matches('\r'))
        }
        None => (None, target.trim_end()),
    }
}

/// Strip surrounding whitespace and brackets.
///
/// A bracketed input may hold several sections (`[A][B]`); each becomes its
/// own attribute. Input whose brackets do not balance is kept verbatim.
fn normalize_attribute(attribute: &str) -> Vec<String> {
    let attribute = attribute.trim();
    if attribute.starts_with('[')
        && let Some(sections) = attribute_sections(attribute)
    {
        return sections
            .into_iter()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
    }
    if attribute.is_empty() {
        Vec::new()
    } else {
        vec![attribute.to_string()]
    }
}

/// Contents of each top-level `[...]` section, or `None` when anything but
/// whitespace sits between sections or a bracket is left open.
fn attribute_sections(input: &str) -> Option<Vec<&str>> {
    let mut sections = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if depth > 0 => in_string = true,
            '[' => {
                if depth == 0 {
                    start = i + 1;
                }
                depth += 1;
            }
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    sections.push(&input[start..i]);
                }
            }
            c if depth == 0 && !c.is_whitespace() => return None,
            _ => {}
        }
    }
    (depth == 0 && !in_string).then_some(sections)
}

/// Append the default base type and extra interfaces to a declaration.
///
/// A declaration that already has a base list only gets the interfaces it does
/// not list yet. Generic constraints (`where ...`) stay at the end.
pub(crate) fn append_base_list(
    declaration: &str,
    default_base_type: Option<&str>,
    interfaces: &IndexSet<String>,
) -> String {
    let (head, constraints) = match declaration.find(" where ") {
        Some(i) => declaration.split_at(i),
        None => (declaration, ""),
    };

    let mut out = head.to_string();
    match base_list_start(head) {
        Some(colon) => {
            let existing: Vec<&str> = split_top_level(&head[colon + 1..])
                .map(str::trim)
                .collect();
            for interface in interfaces {
                if !existing.contains(&interface.as_str()) {
                    out.push_str(", ");
                    out.push_str(interface);
                }
            }
        }
        None => {
            let mut list: Vec<&str> = Vec::new();
            if let Some(base) = default_base_type.map(str::trim).filter(|b| !b.is_empty()) {
                list.push(base);
            }
            list.extend(interfaces.iter().map(String::as_str));
            if !list.is_empty() {
                out.push_str(" : ");
                out.push_str(&list.join(", "));
            }
        }
    }

    out.push_str(constraints);
    out
}

/// Byte offset of the `:` opening the base list, ignoring `::` and anything
/// inside generic brackets, parameter lists or attribute sections.
fn base_list_start(head: &str) -> Option<usize> {
    let bytes = head.as_bytes();
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => {
                let prev_colon = i > 0 && bytes[i - 1] == b':';
                let next_colon = bytes.get(i + 1) == Some(&b':');
                if !prev_colon && !next_colon {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas outside generic brackets, parentheses and square brackets.
fn split_top_level(list: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    list.split(move |c| match c {
        '<' | '(' | '[' => {
            depth += 1;
            false
        }
        '>' | ')' | ']' => {
            depth = depth.saturating_sub(1);
            false
        }
        ',' => depth == 0,
        _ => false,
    })
}
