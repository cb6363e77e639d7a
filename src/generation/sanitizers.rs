//! Sanitization helpers applied to a request before dispatch
//!
//! Values are modelled as `Option<JsonValue>`: `None` stands for an
//! undefined value (the argument was never supplied) while `Some(Null)` is an
//! explicit null. The generated JavaScript module embeds equivalent helpers.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Ordered entries whose values may be undefined
pub type Entries = Vec<(String, Option<JsonValue>)>;

/// Sets `key` to `value`, overriding an earlier entry in place.
///
/// An overridden key keeps its original position, so the assembled order
/// only depends on the order keys were first written.
pub fn assign(entries: &mut Entries, key: &str, value: Option<JsonValue>) {
    match entries.iter_mut().find(|(existing, _)| existing == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key.to_string(), value)),
    }
}

/// Keeps defined values, dropping empty arrays.
///
/// Falsy but defined scalars (`0`, `false`, `""`) and `null` are kept.
pub fn clean_query(query: Entries) -> JsonMap<String, JsonValue> {
    query
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .filter(|(_, value)| !matches!(value, JsonValue::Array(items) if items.is_empty()))
        .collect()
}

/// Keeps defined values. Array emptiness does not matter for headers.
pub fn clean_headers(headers: Entries) -> JsonMap<String, JsonValue> {
    headers
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}

fn rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Number(_) => 0,
        JsonValue::String(_) => 1,
        _ => 2,
    }
}

/// Three-way comparator for ordered query values.
///
/// Numbers sort numerically before strings, strings sort lexicographically,
/// anything else sorts last by its JSON text. Equal inputs compare `Equal`.
pub fn ordered_compare(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        _ => rank(a)
            .cmp(&rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

/// Returns a sorted copy of an array value; other values pass through.
pub fn sort_ordered(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(mut items) => {
            items.sort_by(ordered_compare);
            JsonValue::Array(items)
        }
        other => other,
    }
}

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Flattens free text so it can sit inside a `/** ... */` block.
///
/// Smart quotes and em-dashes are normalized, whitespace is collapsed onto
/// one line and comment terminators are escaped.
pub fn sanitize_doc_comment(input: &str) -> String {
    let normalized: String = input
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2014}' => '-',
            other => other,
        })
        .collect();
    WHITESPACE_RE
        .replace_all(normalized.trim(), " ")
        .replace("*/", "*\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_query() {
        let query = vec![
            ("a".to_string(), None),
            ("b".to_string(), Some(json!([]))),
            ("c".to_string(), Some(json!(0))),
            ("d".to_string(), Some(json!(false))),
            ("e".to_string(), Some(json!("x"))),
        ];
        let cleaned = clean_query(query);
        assert_eq!(JsonValue::Object(cleaned), json!({"c": 0, "d": false, "e": "x"}));
    }

    #[test]
    fn test_clean_query_keeps_null_and_empty_string() {
        let query = vec![
            ("n".to_string(), Some(JsonValue::Null)),
            ("s".to_string(), Some(json!(""))),
            ("l".to_string(), Some(json!(["a"]))),
        ];
        let cleaned = clean_query(query);
        assert_eq!(cleaned.len(), 3);
    }

    #[test]
    fn test_clean_headers_keeps_empty_arrays() {
        let headers = vec![
            ("X-Empty".to_string(), Some(json!([]))),
            ("X-Missing".to_string(), None),
            ("X-Zero".to_string(), Some(json!(0))),
        ];
        let cleaned = clean_headers(headers);
        assert_eq!(
            JsonValue::Object(cleaned),
            json!({"X-Empty": [], "X-Zero": 0})
        );
    }

    #[test]
    fn test_assign_overrides_in_place() {
        let mut entries = Entries::new();
        assign(&mut entries, "X-API-Version", Some(json!("old")));
        assign(&mut entries, "Foo", Some(json!("1")));
        assign(&mut entries, "X-API-Version", Some(json!("2.0.0")));
        assign(&mut entries, "Foo", None);
        assert_eq!(
            entries,
            vec![
                ("X-API-Version".to_string(), Some(json!("2.0.0"))),
                ("Foo".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_ordered_compare_equal_inputs() {
        for value in [json!("a"), json!(1), json!(1.5), json!(null), json!({"k": 1})] {
            assert_eq!(ordered_compare(&value, &value), Ordering::Equal);
        }
    }

    #[test]
    fn test_ordered_compare_is_antisymmetric() {
        let values = [json!("b"), json!("a"), json!(10), json!(2), json!(true), json!(null)];
        for a in &values {
            for b in &values {
                assert_eq!(ordered_compare(a, b), ordered_compare(b, a).reverse());
            }
        }
    }

    #[test]
    fn test_sort_ordered() {
        assert_eq!(
            sort_ordered(json!(["pear", "apple", "fig"])),
            json!(["apple", "fig", "pear"])
        );
        assert_eq!(sort_ordered(json!([10, 2, 33])), json!([2, 10, 33]));
        assert_eq!(sort_ordered(json!(["b", 1, "a", 0])), json!([0, 1, "a", "b"]));
        assert_eq!(sort_ordered(json!("single")), json!("single"));
    }

    #[test]
    fn test_sort_ordered_is_input_order_independent() {
        let first = sort_ordered(json!(["c", "a", "b", "a"]));
        let second = sort_ordered(json!(["a", "b", "a", "c"]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sanitize_doc_comment() {
        assert_eq!(
            sanitize_doc_comment("Checks API\u{2019}s   availability.\n\nReally."),
            "Checks API's availability. Really."
        );
        assert_eq!(sanitize_doc_comment("ends here */ or not"), "ends here *\\/ or not");
        assert_eq!(sanitize_doc_comment("a\u{2014}b"), "a-b");
    }
}
