use crate::{
    Result,
    builder::SourceWriter,
    emitter::{BodyEmitter, WritingContext},
};

/// Writes a fixed snippet into every target body.
///
/// Useful for hand-written members that should travel with generated ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTextEmitter {
    name: String,
    text: String,
    outer_usings: Vec<String>,
    inner_usings: Vec<String>,
    attributes: Vec<String>,
    interfaces: Vec<String>,
}

impl RawTextEmitter {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_outer_usings<I, S>(mut self, usings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outer_usings = usings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inner_usings<I, S>(mut self, usings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner_usings = usings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<S> BodyEmitter<S> for RawTextEmitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn outer_using_directives(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        self.outer_usings.clone()
    }

    fn inner_using_directives(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        self.inner_usings.clone()
    }

    fn attributes(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        self.attributes.clone()
    }

    fn interfaces(&self, _ctx: &WritingContext<'_, S>) -> Vec<String> {
        self.interfaces.clone()
    }

    fn emit(&self, _ctx: &WritingContext<'_, S>, writer: &mut SourceWriter) -> Result<()> {
        let text = self.text.trim_end();
        if !text.is_empty() {
            writer.write_line(text);
        }
        Ok(())
    }
}
