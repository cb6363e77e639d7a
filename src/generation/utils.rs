//! String transformation utilities for code generation
//!
//! These back the identifier namer: every parameter name declared in the
//! API description goes through [`to_js_identifier`] before it becomes a
//! field of a generated function's argument object.

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input. Any
/// character that is not alphanumeric acts as a word separator.
///
/// # Examples
/// ```
/// use sdkgen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
/// assert_eq!(to_snake_case("X-API-Version"), "x_api_version");
/// assert_eq!(to_snake_case("filter[name]"), "filter_name");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_numeric();
        } else {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to UpperCamelCase (PascalCase).
///
/// # Examples
/// ```
/// use sdkgen::generation::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
/// assert_eq!(to_proper_case("find-pets-by-status"), "FindPetsByStatus");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a string to camelCase for JavaScript identifiers.
///
/// # Examples
/// ```
/// use sdkgen::generation::utils::to_camel_case;
///
/// assert_eq!(to_camel_case("find_pets_by_status"), "findPetsByStatus");
/// assert_eq!(to_camel_case("X-API-Version"), "xApiVersion");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_proper_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Words that cannot be used as a binding name in strict-mode JavaScript
const JS_RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// Makes an arbitrary string usable as a JavaScript binding name.
///
/// Reserved words get a trailing underscore, a leading digit gets a leading
/// underscore and an empty string becomes `_`.
///
/// # Examples
/// ```
/// use sdkgen::generation::utils::sanitize_js_identifier;
///
/// assert_eq!(sanitize_js_identifier("class"), "class_");
/// assert_eq!(sanitize_js_identifier("2fa"), "_2fa");
/// assert_eq!(sanitize_js_identifier("petId"), "petId");
/// ```
pub fn sanitize_js_identifier(s: &str) -> String {
    if s.is_empty() {
        return "_".to_string();
    }
    if JS_RESERVED_WORDS.contains(&s) {
        return format!("{s}_");
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{s}");
    }
    s.to_string()
}

/// Converts a declared parameter name into a JavaScript identifier
pub fn to_js_identifier(name: &str) -> String {
    sanitize_js_identifier(&to_camel_case(name))
}

/// Returns true when `s` is a plain JavaScript identifier (ASCII subset)
pub fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !JS_RESERVED_WORDS.contains(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
        assert_eq!(to_snake_case("find_pets_by_status"), "find_pets_by_status");
        assert_eq!(to_snake_case("HTTPResponse"), "httpresponse");
        assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
        assert_eq!(to_snake_case("X-API-Version"), "x_api_version");
        assert_eq!(to_snake_case("page.size"), "page_size");
        assert_eq!(to_snake_case("--"), "");
    }

    #[test]
    fn test_to_proper_case() {
        assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
        assert_eq!(to_proper_case("findPetsByStatus"), "FindPetsByStatus");
        assert_eq!(to_proper_case("FIND_PETS_BY_STATUS"), "FindPetsByStatus");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("duration"), "duration");
        assert_eq!(to_camel_case("petId"), "petId");
        assert_eq!(to_camel_case("user_id"), "userId");
        assert_eq!(to_camel_case("X-Request-Id"), "xRequestId");
        assert_eq!(to_camel_case("get /pets/{petId}"), "getPetsPetId");
    }

    #[test]
    fn test_sanitize_js_identifier() {
        assert_eq!(sanitize_js_identifier("delete"), "delete_");
        assert_eq!(sanitize_js_identifier("await"), "await_");
        assert_eq!(sanitize_js_identifier("9lives"), "_9lives");
        assert_eq!(sanitize_js_identifier(""), "_");
        assert_eq!(sanitize_js_identifier("limit"), "limit");
    }

    #[test]
    fn test_to_js_identifier_is_deterministic() {
        for name in ["X-API-Version", "page[size]", "class", "42"] {
            assert_eq!(to_js_identifier(name), to_js_identifier(name));
        }
        assert_eq!(to_js_identifier("class"), "class_");
        assert_eq!(to_js_identifier("42"), "_42");
    }

    #[test]
    fn test_is_js_identifier() {
        assert!(is_js_identifier("getPing"));
        assert!(is_js_identifier("$ref_1"));
        assert!(!is_js_identifier("get-ping"));
        assert!(!is_js_identifier("1st"));
        assert!(!is_js_identifier("delete"));
        assert!(!is_js_identifier(""));
    }
}
