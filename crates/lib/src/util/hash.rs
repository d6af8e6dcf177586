//! Content hashing for computed entities.
//!
//! This module provides:
//! - `hash()`: the 32-bit FNV-style hash of a string, rendered as 8 hex digits
//! - `ObjectHash`: a content hash of a canonical style tree
//! - `ContentHashable`: anything with a canonical string form can be hashed
//!
//! Characters are fed to the accumulator as UTF-16 code units so identifiers
//! agree with those produced by browser-side style generators.

use serde::{Deserialize, Serialize};

use crate::consts::{HASH_HEX_LEN, HASH_SEED};
use crate::types::StyleTree;

/// A content-derived hash identifying a canonical style tree.
///
/// # Format
///
/// Eight lowercase hexadecimal digits, e.g. `"0b5f1a33"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait ContentHashable {
  /// Deterministic serialization of the value. Equal content must produce equal strings.
  fn canonical_form(&self) -> String;

  fn compute_hash(&self) -> ObjectHash {
    ObjectHash(hash(&self.canonical_form()))
  }
}

impl ContentHashable for StyleTree {
  fn canonical_form(&self) -> String {
    self.canonical_string()
  }
}

/// Hash a string.
///
/// The accumulator starts at [`HASH_SEED`]; each code unit is XORed in and the
/// accumulator is multiplied by the FNV prime using shifts, all in wrapping
/// 32-bit arithmetic.
pub fn hash(input: &str) -> String {
  let mut value = HASH_SEED;
  for unit in input.encode_utf16() {
    value ^= u32::from(unit);
    value = value
      .wrapping_add(value << 1)
      .wrapping_add(value << 4)
      .wrapping_add(value << 7)
      .wrapping_add(value << 8)
      .wrapping_add(value << 24);
  }
  format!("{:0width$x}", value, width = HASH_HEX_LEN)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::StyleValue;

  #[test]
  fn empty_input_is_the_seed() {
    assert_eq!(hash(""), "811c9dc5");
  }

  #[test]
  fn matches_known_vectors() {
    assert_eq!(hash("a"), "e40c292c");
    assert_eq!(hash(r#"{"color":"red"}"#), "0b5f1a33");
    assert_eq!(hash(r#"{"width":"10px"}"#), "fd6ae896");
  }

  #[test]
  fn non_ascii_is_hashed_per_utf16_unit() {
    assert_eq!(hash("é"), "6c0b6c44");
    // Surrogate pair: two code units.
    assert_eq!(hash("😀"), "cb31c4b8");
  }

  #[test]
  fn output_is_always_eight_lowercase_hex_digits() {
    for input in ["", "a", "color", "{}", "some much longer input string"] {
      let h = hash(input);
      assert_eq!(h.len(), 8, "{input:?} -> {h}");
      assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
  }

  #[test]
  fn tree_hash_uses_canonical_form() {
    let mut tree = StyleTree::new();
    tree.insert("color".to_string(), StyleValue::Leaf("red".to_string()));
    assert_eq!(tree.compute_hash(), ObjectHash("0b5f1a33".to_string()));
  }

  #[test]
  fn different_content_different_hash() {
    assert_ne!(hash(r#"{"color":"red"}"#), hash(r#"{"color":"blue"}"#));
  }
}
