//! Numeric value handling: which properties take bare numbers, and which
//! strings count as numbers.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::consts::VENDOR_PREFIXES;

/// Properties that accept unit-less numbers.
const UNITLESS_PROPERTIES: &[&str] = &[
  "box-flex",
  "box-flex-group",
  "column-count",
  "flex",
  "flex-grow",
  "flex-positive",
  "flex-shrink",
  "flex-negative",
  "font-weight",
  "line-clamp",
  "line-height",
  "opacity",
  "order",
  "orphans",
  "tab-size",
  "widows",
  "z-index",
  "zoom",
  // SVG
  "fill-opacity",
  "stroke-dashoffset",
  "stroke-opacity",
  "stroke-width",
];

/// [`UNITLESS_PROPERTIES`] plus every vendor-prefixed variant.
static UNITLESS: LazyLock<HashSet<String>> = LazyLock::new(|| {
  let mut set: HashSet<String> = UNITLESS_PROPERTIES.iter().map(|p| p.to_string()).collect();
  for prefix in VENDOR_PREFIXES {
    for property in UNITLESS_PROPERTIES {
      set.insert(format!("{prefix}{property}"));
    }
  }
  set
});

pub fn is_unitless(property: &str) -> bool {
  UNITLESS.contains(property)
}

/// Whether `value` reads as a number other than zero.
///
/// Follows the loose string-to-number conversion of browser scripting: the
/// string is trimmed, the empty string is zero, `Infinity` is accepted, and
/// `0x`/`0o`/`0b` integer literals are accepted.
pub fn is_nonzero_number(value: &str) -> bool {
  let value = value.trim();
  if value.is_empty() {
    return false;
  }

  if matches!(value, "Infinity" | "+Infinity" | "-Infinity") {
    return true;
  }

  for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
    if let Some(digits) = value.strip_prefix(prefix) {
      return !digits.is_empty()
        && digits.chars().all(|c| c.is_digit(radix))
        && digits.chars().any(|c| c != '0');
    }
  }

  // Rust also accepts `inf`/`nan` spellings; restrict to plain decimal syntax first.
  if !value
    .chars()
    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
  {
    return false;
  }

  match value.parse::<f64>() {
    Ok(n) => n != 0.0 && !n.is_nan(),
    Err(_) => false,
  }
}
