//! Indentation-tracking text accumulator.

use std::fmt;

use super::Indent;
use crate::{Error, Result};

/// Accumulates source text, prefixing every line with the current indentation.
///
/// Blocks are paired: [`SourceWriter::open_block`] writes `{` and indents,
/// [`SourceWriter::close_block`] dedents and writes `}`. The outermost closing
/// brace is written without a trailing newline so callers can keep appending.
///
/// # Example
///
/// ```
/// use csgen_codegen::builder::SourceWriter;
///
/// let mut writer = SourceWriter::new();
/// writer.write_line("namespace Demo").open_block();
/// writer.write_line("public class Widget").open_block();
/// writer.write_line("public int Id { get; set; }");
/// writer.close_all_blocks();
///
/// assert_eq!(
///     writer.as_str(),
///     "namespace Demo\n{\n    public class Widget\n    {\n        public int Id { get; set; }\n    }\n}"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceWriter {
    buffer: String,
    indentation: usize,
    indent: Indent,
}

impl SourceWriter {
    /// Create a writer indenting with four spaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with a custom indent unit.
    pub fn with_indent(indent: Indent) -> Self {
        Self {
            buffer: String::new(),
            indentation: 0,
            indent,
        }
    }

    /// Current indentation level.
    pub fn indentation(&self) -> usize {
        self.indentation
    }

    /// Set the indentation level; negative levels are rejected.
    pub fn set_indentation(&mut self, level: isize) -> Result<&mut Self> {
        self.indentation = usize::try_from(level).map_err(|_| {
            Error::invalid_argument("indentation", format!("{level} is negative"))
        })?;
        Ok(self)
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    /// Write `text` followed by a newline.
    ///
    /// Multi-line text is split on `\n` (a trailing `\r` on each piece is
    /// dropped) and every piece is indented on its own. At indentation zero
    /// the text is appended as is.
    pub fn write_line(&mut self, text: &str) -> &mut Self {
        if self.indentation == 0 {
            self.buffer.push_str(text);
            self.buffer.push('\n');
            return self;
        }

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            self.write_indent();
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
        self
    }

    /// Write a single indented character followed by a newline.
    pub fn write_char_line(&mut self, c: char) -> &mut Self {
        self.write_indent();
        self.buffer.push(c);
        self.buffer.push('\n');
        self
    }

    /// Write a bare newline.
    pub fn write_blank_line(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn write_blank_lines(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.write_blank_line();
        }
        self
    }

    /// Write `{` and increase the indentation.
    pub fn open_block(&mut self) -> &mut Self {
        self.write_char_line('{');
        self.indentation += 1;
        self
    }

    /// Decrease the indentation and write `}`.
    ///
    /// When this closes the outermost block, no newline follows the brace.
    /// Fails when no block is open.
    pub fn close_block(&mut self) -> Result<&mut Self> {
        if self.indentation == 0 {
            return Err(Error::invalid_argument(
                "indentation",
                "no open block to close",
            ));
        }

        self.indentation -= 1;
        if self.indentation == 0 {
            self.buffer.push('}');
        } else {
            self.write_char_line('}');
        }
        Ok(self)
    }

    /// Close every open block.
    pub fn close_all_blocks(&mut self) -> &mut Self {
        while self.indentation > 0 {
            self.indentation -= 1;
            if self.indentation == 0 {
                self.buffer.push('}');
            } else {
                self.write_char_line('}');
            }
        }
        self
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything written after `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indentation {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl fmt::Display for SourceWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_at_zero_indentation() {
        let mut writer = SourceWriter::new();
        writer.write_line("using System;");

        assert_eq!(writer.as_str(), "using System;\n");
    }

    #[test]
    fn test_write_line_indents_every_line() {
        let mut writer = SourceWriter::new();
        writer.set_indentation(2).unwrap();
        writer.write_line("first\r\nsecond\nthird");

        assert_eq!(
            writer.as_str(),
            "        first\n        second\n        third\n"
        );
        for line in writer.as_str().lines() {
            assert!(line.starts_with("        "));
        }
    }

    #[test]
    fn test_write_line_indents_empty_pieces() {
        let mut writer = SourceWriter::new();
        writer.set_indentation(1).unwrap();
        writer.write_line("a\n\nb");

        assert_eq!(writer.as_str(), "    a\n    \n    b\n");
    }

    #[test]
    fn test_write_char_line() {
        let mut writer = SourceWriter::with_indent(Indent::tab());
        writer.set_indentation(1).unwrap();
        writer.write_char_line(';');

        assert_eq!(writer.as_str(), "\t;\n");
    }

    #[test]
    fn test_blank_lines_are_not_indented() {
        let mut writer = SourceWriter::new();
        writer.set_indentation(3).unwrap();
        writer.write_blank_lines(2);

        assert_eq!(writer.as_str(), "\n\n");
    }

    #[test]
    fn test_open_and_close_block() {
        let mut writer = SourceWriter::new();
        writer.write_line("class A").open_block();
        assert_eq!(writer.indentation(), 1);

        writer.close_block().unwrap();
        assert_eq!(writer.indentation(), 0);
        assert_eq!(writer.as_str(), "class A\n{\n}");
    }

    #[test]
    fn test_inner_close_block_ends_with_newline() {
        let mut writer = SourceWriter::new();
        writer.open_block().open_block();
        writer.close_block().unwrap();

        assert_eq!(writer.as_str(), "{\n    {\n    }\n");
    }

    #[test]
    fn test_close_block_without_open_block_fails() {
        let mut writer = SourceWriter::new();

        assert!(matches!(
            writer.close_block(),
            Err(Error::InvalidArgument {
                name: "indentation",
                ..
            })
        ));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_close_all_blocks_balances_open_blocks() {
        let mut writer = SourceWriter::new();
        for _ in 0..3 {
            writer.open_block();
        }
        writer.close_all_blocks();

        assert_eq!(writer.indentation(), 0);
        assert_eq!(writer.as_str().matches('{').count(), 3);
        assert_eq!(writer.as_str().matches('}').count(), 3);
        assert!(writer.as_str().ends_with("    }\n}"));
    }

    #[test]
    fn test_close_all_blocks_with_nothing_open() {
        let mut writer = SourceWriter::new();
        writer.write_line("x").close_all_blocks();

        assert_eq!(writer.as_str(), "x\n");
    }

    #[test]
    fn test_negative_indentation_is_rejected() {
        let mut writer = SourceWriter::new();
        writer.set_indentation(2).unwrap();

        assert!(writer.set_indentation(-1).is_err());
        assert_eq!(writer.indentation(), 2);
    }

    #[test]
    fn test_len_tracks_writes() {
        let mut writer = SourceWriter::new();
        let before = writer.len();
        writer.write_line("abc");

        assert_eq!(writer.len(), before + 4);
        writer.truncate(before);
        assert!(writer.is_empty());
    }

    #[test]
    fn test_display_matches_buffer() {
        let mut writer = SourceWriter::new();
        writer.write_line("// hi");

        assert_eq!(writer.to_string(), "// hi\n");
        assert_eq!(writer.into_string(), "// hi\n");
    }
}
