use oxc::syntax::identifier;

use crate::concat_string;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Renders `value` as a double-quoted JS string literal.
pub fn js_string_literal(value: &str) -> String {
  // JSON string escaping is a subset of what a JS string literal accepts.
  serde_json::Value::String(value.to_string()).to_string()
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    concat_string!(obj, ".", prop)
  } else {
    concat_string!(obj, "[", js_string_literal(prop), "]")
  }
}

/// Renders a property key of an object literal.
pub fn to_property_key(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { js_string_literal(name) }
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("mod", "default"), "mod.default");
  assert_eq!(property_access_str("mod", "a-b"), "mod[\"a-b\"]");
  assert_eq!(to_property_key("a\"b"), "\"a\\\"b\"");
}
