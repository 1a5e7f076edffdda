//! Common utilities for TypeScript code generation.
//!
//! Identifier checks, quoting, doc-comment formatting and the naming helpers
//! shared by the resolver and the synthesizer.

use std::collections::HashSet;
use std::sync::LazyLock;

use inflections::Inflect;
use regex::Regex;

use super::types::TsLiteral;
use crate::spec::EnumValue;

#[allow(clippy::expect_used)]
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").expect("identifier regex"));

#[allow(clippy::expect_used)]
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("word separator regex"));

/// TypeScript reserved words that cannot name a binding.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if a name needs bracket notation (or quoting) for property/key access.
pub fn needs_bracket_notation(name: &str) -> bool {
    !IDENTIFIER_RE.is_match(name)
}

/// Escape a string for use in JavaScript/TypeScript double-quoted literals.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key when it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Member access on a record: `props.id` or `props["x-id"]`.
pub fn format_member_access(obj: &str, prop: &str) -> String {
    if needs_bracket_notation(prop) {
        format!("{obj}[\"{}\"]", escape_js_string(prop))
    } else {
        format!("{obj}.{prop}")
    }
}

/// PascalCase name for types and hook suffixes (`get-pet by id` -> `GetPetById`).
pub fn pascal_case(name: &str) -> String {
    let words = NON_WORD_RE.replace_all(name, "_");
    let pascal = words.trim_matches('_').to_snake_case().to_pascal_case();
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{pascal}")
    } else {
        pascal
    }
}

/// camelCase name for accessor functions. Reserved words get a `_` prefix.
pub fn camel_case(name: &str) -> String {
    let pascal = pascal_case(name);
    let mut chars = pascal.chars();
    let camel: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    if TS_RESERVED_WORDS.contains(camel.as_str()) {
        format!("_{camel}")
    } else {
        camel
    }
}

/// Multi-line JSDoc block, or `None` for missing/blank text.
pub fn format_doc_block(text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    let body: String = text
        .replace("*/", "*\\/")
        .lines()
        .map(|line| format!(" * {line}").trim_end().to_string() + "\n")
        .collect();
    Some(format!("/**\n{body} */"))
}

/// Single-line JSDoc for inline object members.
pub fn format_doc_inline(text: &str) -> String {
    let flat = text
        .replace("*/", "*\\/")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("/** {flat} */")
}

/// Convert an OpenAPI enum value to a TypeScript literal.
pub fn enum_value_to_literal(v: &EnumValue) -> TsLiteral {
    match v {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(n) => TsLiteral::Int(*n),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_bracket_notation() {
        assert!(!needs_bracket_notation("foo"));
        assert!(!needs_bracket_notation("_foo"));
        assert!(!needs_bracket_notation("$foo"));
        assert!(!needs_bracket_notation("foo123"));

        assert!(needs_bracket_notation(""));
        assert!(needs_bracket_notation("123foo"));
        assert!(needs_bracket_notation("foo-bar"));
        assert!(needs_bracket_notation("X-Request-Id"));
        assert!(needs_bracket_notation("foo bar"));
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("foo"), "foo");
        assert_eq!(quote_if_needed("foo-bar"), "\"foo-bar\"");
        assert_eq!(quote_if_needed("say\"hi"), "\"say\\\"hi\"");
    }

    #[test]
    fn test_format_member_access() {
        assert_eq!(format_member_access("props", "id"), "props.id");
        assert_eq!(format_member_access("props", "pet-id"), "props[\"pet-id\"]");
    }

    #[test]
    fn test_pascal_and_camel_case() {
        assert_eq!(pascal_case("getPetById"), "GetPetById");
        assert_eq!(pascal_case("get_pet"), "GetPet");
        assert_eq!(pascal_case("pet-status"), "PetStatus");
        assert_eq!(camel_case("GetPetById"), "getPetById");
        assert_eq!(camel_case("list pets"), "listPets");
        assert_eq!(camel_case("delete"), "_delete");
        assert_eq!(camel_case("New"), "_new");
        assert_eq!(camel_case("deleteAll"), "deleteAll");
    }

    #[test]
    fn test_format_doc_block() {
        assert_eq!(format_doc_block(None), None);
        assert_eq!(format_doc_block(Some("  ")), None);
        assert_eq!(
            format_doc_block(Some("first\nsecond")).unwrap(),
            "/**\n * first\n * second\n */"
        );
        assert_eq!(format_doc_inline("a pet\n name"), "/** a pet name */");
    }
}
