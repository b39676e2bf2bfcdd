//! Identifier helpers for generated C# code.

/// Reserved C# keywords. Contextual keywords (`var`, `record`, ...) are valid
/// identifiers and are not listed.
/// Source: https://learn.microsoft.com/dotnet/csharp/language-reference/keywords/
pub(crate) const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Check if a name is a reserved C# keyword
pub fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Prefix reserved keywords with `@` so they can be used as identifiers
/// (e.g., "class" -> "@class")
pub fn escape_keyword(name: &str) -> String {
    if is_csharp_keyword(name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Uppercase the first character (e.g., "name" -> "Name")
pub fn first_char_to_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character (e.g., "Name" -> "name")
pub fn first_char_to_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
