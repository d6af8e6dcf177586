//! Class-name joining.

use serde_json::Value;

/// Join class names into one space-separated string.
///
/// Strings are used as-is, `null` is skipped, and for a mapping every key
/// whose value is truthy is included. `false`, `0`, `""` and `null` are falsy.
///
/// ```
/// use freestyle::join::join;
/// use serde_json::{json, Value};
///
/// let classes = join(&[json!("a"), json!({"b": true, "c": false}), Value::Null, json!("d")]);
/// assert_eq!(classes, "a b d");
/// ```
pub fn join(args: &[Value]) -> String {
  let mut names: Vec<&str> = Vec::new();
  for arg in args {
    match arg {
      Value::String(name) => names.push(name),
      Value::Object(map) => names.extend(map.iter().filter(|(_, v)| is_truthy(v)).map(|(k, _)| k.as_str())),
      _ => {}
    }
  }
  names.join(" ")
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}
