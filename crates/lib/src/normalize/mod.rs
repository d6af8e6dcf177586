//! Normalization of raw style descriptions into a [`StyleTree`].
//!
//! Sources are merged left to right. For the same key a later source wins,
//! except that nested mappings are merged recursively instead of replaced.
//!
//! # Keys
//!
//! Keys are trimmed and camel case is hyphenated (`backgroundColor` becomes
//! `background-color`). The Internet Explorer prefix `ms` gains its leading
//! dash (`msTransform` becomes `-ms-transform`).
//!
//! # Values
//!
//! - `null` is dropped and never erases an earlier value
//! - numbers, booleans and strings are converted to strings
//! - a nonzero number on a property that needs a unit gets `px` appended
//! - `{`, `}`, `[` and `]` are backslash escaped
//! - a sequence is normalized element-wise and becomes a [`StyleValue::List`]
//! - a mapping becomes a [`StyleValue::Nested`] block

mod number;

use serde_json::{Number, Value};
use tracing::trace;

use crate::types::{StyleTree, StyleValue};

pub use number::{is_nonzero_number, is_unitless};

/// Normalize one or more raw style descriptions into a canonical tree.
///
/// Sources that are not mappings are skipped.
pub fn normalize(sources: &[Value]) -> StyleTree {
  let mut dest = StyleTree::new();
  for source in sources {
    merge_into(&mut dest, source);
  }
  dest
}

fn merge_into(dest: &mut StyleTree, source: &Value) {
  let Value::Object(map) = source else {
    if !source.is_null() {
      trace!(source = %source, "skipping non-mapping style source");
    }
    return;
  };

  for (key, value) in map {
    let property = normalize_property_name(key);

    match value {
      Value::Null => {}
      Value::Object(_) => {
        if let Some(StyleValue::Nested(existing)) = dest.entry_mut(&property) {
          merge_into(existing, value);
          continue;
        }
        let mut nested = StyleTree::new();
        merge_into(&mut nested, value);
        dest.insert(property, StyleValue::Nested(nested));
      }
      Value::Array(items) => {
        let values = items
          .iter()
          .filter_map(|item| normalize_property_value(item, &property))
          .collect();
        dest.insert(property, StyleValue::List(values));
      }
      scalar => {
        if let Some(value) = normalize_property_value(scalar, &property) {
          dest.insert(property, StyleValue::Leaf(value));
        }
      }
    }
  }
}

/// Normalize a property, selector or at-rule name.
pub fn normalize_property_name(name: &str) -> String {
  let name = name.trim();
  let mut hyphenated = String::with_capacity(name.len() + 4);
  for c in name.chars() {
    if c.is_ascii_uppercase() {
      hyphenated.push('-');
    }
    hyphenated.push(c);
  }

  let hyphenated = match hyphenated.strip_prefix("ms-") {
    Some(rest) => format!("-ms-{rest}"),
    None => hyphenated,
  };

  hyphenated.to_lowercase()
}

/// Normalize a scalar value for `property`.
///
/// Returns `None` for `null` and for compound values, which cannot be a
/// single declaration value.
pub fn normalize_property_value(value: &Value, property: &str) -> Option<String> {
  let mut value = match value {
    Value::String(s) => s.clone(),
    Value::Number(n) => number_to_string(n),
    Value::Bool(b) => b.to_string(),
    Value::Null => return None,
    Value::Array(_) | Value::Object(_) => {
      trace!(property, "skipping compound value inside a list");
      return None;
    }
  };

  if is_nonzero_number(&value) && !is_unitless(property) {
    value.push_str("px");
  }

  Some(escape(&value))
}

/// Render a JSON number the way browser scripting converts numbers to
/// strings: integral values carry no fraction, and magnitudes outside
/// `[1e-6, 1e21)` use exponent form with an explicit sign (`1e+21`, `1e-7`).
fn number_to_string(n: &Number) -> String {
  if n.is_i64() || n.is_u64() {
    return n.to_string();
  }
  match n.as_f64() {
    Some(f) if f != 0.0 && (f.abs() >= 1e21 || f.abs() < 1e-6) => exponent_form(f),
    Some(f) if f.fract() == 0.0 => format!("{f:.0}"),
    Some(f) => f.to_string(),
    None => n.to_string(),
  }
}

fn exponent_form(f: f64) -> String {
  let formatted = format!("{f:e}");
  match formatted.split_once('e') {
    Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
    _ => formatted,
  }
}

fn escape(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    if matches!(c, '{' | '}' | '[' | ']') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}
