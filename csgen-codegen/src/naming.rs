//! Using-directive normalization.

use crate::{Error, Result};

/// Normalize a namespace or directive into `using X;` form.
///
/// Input already starting with `using ` (including `using static`) or
/// `global using ` keeps its prefix; a missing `;` is appended.
///
/// # Example
///
/// ```
/// use csgen_codegen::naming::make_using_directive;
///
/// assert_eq!(make_using_directive("System.Linq").unwrap(), "using System.Linq;");
/// assert_eq!(make_using_directive(" using System; ").unwrap(), "using System;");
/// assert_eq!(
///     make_using_directive("using static System.Math").unwrap(),
///     "using static System.Math;"
/// );
/// ```
pub fn make_using_directive(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::invalid_argument(
            "using_directive",
            "namespace must not be empty",
        ));
    }

    let has_prefix = input.starts_with("using ") || input.starts_with("global using ");
    let has_semicolon = input.ends_with(';');

    Ok(match (has_prefix, has_semicolon) {
        (true, true) => input.to_string(),
        (true, false) => format!("{input};"),
        (false, true) => format!("using {input}"),
        (false, false) => format!("using {input};"),
    })
}

/// Normalize, de-duplicate and order using directives.
///
/// Directives are sorted by descending length; ties keep their first-seen
/// order, and duplicates after normalization are dropped.
pub fn distinct_using_directives<I, S>(directives: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = indexmap::IndexSet::new();
    for directive in directives {
        normalized.insert(make_using_directive(directive.as_ref())?);
    }

    let mut ordered: Vec<String> = normalized.into_iter().collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_using_directive_adds_prefix_and_semicolon() {
        assert_eq!(make_using_directive("System").unwrap(), "using System;");
        assert_eq!(
            make_using_directive("  System.Text.Json  ").unwrap(),
            "using System.Text.Json;"
        );
    }

    #[test]
    fn test_make_using_directive_does_not_duplicate_semicolon() {
        for input in [
            "using System.Net.Http;",
            "using System.Text.Json",
            "System.Linq.Expressions",
            "System.Linq.Expressions;",
        ] {
            let result = make_using_directive(input).unwrap();
            assert!(result.starts_with("using "));
            assert!(result.ends_with(';'));
            assert!(!result.contains(";;"));
            assert!(!result.contains("using using"));
        }
    }

    #[test]
    fn test_make_using_directive_keeps_global_prefix() {
        assert_eq!(
            make_using_directive("global using System").unwrap(),
            "global using System;"
        );
    }

    #[test]
    fn test_make_using_directive_rejects_blank_input() {
        for input in ["", " ", "\t\n"] {
            assert!(matches!(
                make_using_directive(input),
                Err(Error::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_distinct_using_directives_orders_by_length() {
        let directives = distinct_using_directives([
            "System",
            "MyNamespace1",
            "SourceGeneratorUtils",
            "MyNamespace1",
            "SecondNamespace.WithSubNamespace",
        ])
        .unwrap();

        assert_eq!(
            directives,
            vec![
                "using SecondNamespace.WithSubNamespace;",
                "using SourceGeneratorUtils;",
                "using MyNamespace1;",
                "using System;",
            ]
        );
    }

    #[test]
    fn test_distinct_using_directives_dedups_after_normalizing() {
        let directives =
            distinct_using_directives(["System", "using System;", " System "]).unwrap();

        assert_eq!(directives, vec!["using System;"]);
    }

    #[test]
    fn test_distinct_using_directives_stable_for_equal_lengths() {
        let directives = distinct_using_directives(["Bbb", "Aaa", "Ccc"]).unwrap();

        assert_eq!(
            directives,
            vec!["using Bbb;", "using Aaa;", "using Ccc;"]
        );
    }
}
