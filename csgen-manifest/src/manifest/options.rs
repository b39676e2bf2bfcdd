//! The `[generator]` and `[options]` tables.

use std::{fmt, str::FromStr};

use csgen_codegen::{builder::Indent, options::FileEmitterOptions};
use serde::Deserialize;

/// `[generator]`: who generated the files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Assembly name written into the generated-code attribute
    pub assembly: String,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// `[options]`: every file emitter option plus file layout settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    #[serde(flatten)]
    pub emitter: FileEmitterOptions,

    /// Replaces the default `.g.cs` file name suffix
    pub file_name_suffix: Option<String>,

    pub indent: IndentConfig,
}

/// `[options.indent]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndentConfig {
    pub style: IndentStyle,

    /// Characters per level (4 for spaces, 1 for tabs when unset)
    pub width: Option<usize>,
}

impl IndentConfig {
    /// Build the writer indent unit.
    pub fn to_indent(&self) -> csgen_codegen::Result<Indent> {
        let (ch, default_width) = match self.style {
            IndentStyle::Spaces => (' ', 4),
            IndentStyle::Tab => ('\t', 1),
        };
        Indent::new(ch, self.width.unwrap_or(default_width))
    }
}

/// Indentation character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tab,
}

impl IndentStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces => "spaces",
            IndentStyle::Tab => "tab",
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IndentStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spaces" | "space" => Ok(IndentStyle::Spaces),
            "tab" | "tabs" => Ok(IndentStyle::Tab),
            _ => Err(format!(
                "unknown indent style '{}', expected 'spaces' or 'tab'",
                s
            )),
        }
    }
}
