//! Indentation configuration for the source writer.

use crate::{Error, Result};

/// One level of indentation: a whitespace character repeated `width` times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indent {
    ch: char,
    width: usize,
    unit: String,
}

impl Indent {
    /// Create an indent unit.
    ///
    /// Fails with [`Error::InvalidArgument`] when `ch` is not whitespace or
    /// `width` is zero.
    pub fn new(ch: char, width: usize) -> Result<Self> {
        if !ch.is_whitespace() {
            return Err(Error::invalid_argument(
                "indent_char",
                format!("{ch:?} is not a whitespace character"),
            ));
        }
        if width < 1 {
            return Err(Error::invalid_argument(
                "indent_width",
                "at least one character per indentation level is required",
            ));
        }
        Ok(Self {
            ch,
            width,
            unit: ch.to_string().repeat(width),
        })
    }

    /// Four spaces per level.
    pub fn spaces() -> Self {
        Self {
            ch: ' ',
            width: 4,
            unit: "    ".to_string(),
        }
    }

    /// One tab per level.
    pub fn tab() -> Self {
        Self {
            ch: '\t',
            width: 1,
            unit: "\t".to_string(),
        }
    }

    pub fn char(&self) -> char {
        self.ch
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The string written for one indentation level.
    pub fn as_str(&self) -> &str {
        &self.unit
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::spaces()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::new(' ', 2).unwrap().as_str(), "  ");
        assert_eq!(Indent::spaces().as_str(), "    ");
        assert_eq!(Indent::tab().as_str(), "\t");
    }

    #[test]
    fn test_default_is_four_spaces() {
        assert_eq!(Indent::default(), Indent::new(' ', 4).unwrap());
    }

    #[test]
    fn test_rejects_non_whitespace() {
        let err = Indent::new('x', 4).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "indent_char",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_width() {
        let err = Indent::new(' ', 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "indent_width",
                ..
            }
        ));
    }
}
