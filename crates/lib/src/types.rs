//! The canonical style tree.
//!
//! Raw descriptions (`serde_json::Value`) are resolved into these types once,
//! by the normalizer. Nothing downstream inspects raw shapes again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized value in a [`StyleTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
  /// A single declaration value.
  Leaf(String),
  /// The same property declared once per element.
  List(Vec<String>),
  /// A nested selector, at-rule or keyframe block.
  Nested(StyleTree),
}

impl StyleValue {
  pub fn as_nested(&self) -> Option<&StyleTree> {
    match self {
      StyleValue::Nested(tree) => Some(tree),
      _ => None,
    }
  }

  /// Declaration values in render order. Empty for nested values.
  pub fn declarations(&self) -> &[String] {
    match self {
      StyleValue::Leaf(value) => std::slice::from_ref(value),
      StyleValue::List(values) => values,
      StyleValue::Nested(_) => &[],
    }
  }

  fn to_json(&self) -> Value {
    match self {
      StyleValue::Leaf(value) => Value::String(value.clone()),
      StyleValue::List(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
      StyleValue::Nested(tree) => tree.to_json(),
    }
  }
}

/// A normalized style description with keys held in sorted order.
///
/// Two descriptions with the same semantic content always produce equal
/// trees, whatever their key order or the number of sources they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTree(BTreeMap<String, StyleValue>);

impl StyleTree {
  pub fn new() -> Self {
    Self(BTreeMap::new())
  }

  pub fn get(&self, key: &str) -> Option<&StyleValue> {
    self.0.get(key)
  }

  pub fn insert(&mut self, key: String, value: StyleValue) -> Option<StyleValue> {
    self.0.insert(key, value)
  }

  pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut StyleValue> {
    self.0.get_mut(key)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Entries in canonical (lexicographic) key order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// The JSON form of the tree with keys in canonical order.
  pub fn to_json(&self) -> Value {
    let map: Map<String, Value> = self.0.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
    Value::Object(map)
  }

  /// Compact, deterministic serialization used as hash input.
  pub fn canonical_string(&self) -> String {
    self.to_json().to_string()
  }
}

impl FromIterator<(String, StyleValue)> for StyleTree {
  fn from_iter<I: IntoIterator<Item = (String, StyleValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
