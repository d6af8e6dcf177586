//! Placeholder substitution inside style-sheet values.
//!
//! A style can name a keyframes entry of the same sheet before its
//! identifier is known. The placeholder is replaced by the identifier when the
//! sheet is compiled.
//!
//! # Placeholder Formats
//!
//! - `${keyframes:<name>}` - identifier of the keyframes entry `<name>`
//!
//! # Escaping
//!
//! Use `$${` to produce a literal `${`. Single `$` characters pass through.
//!
//! # Example
//!
//! ```
//! use freestyle::sheet::placeholder::{parse, Segment};
//!
//! let segments = parse("${keyframes:spin} 1s linear").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Keyframes("spin".to_string()),
//!     Segment::Literal(" 1s linear".to_string()),
//! ]);
//! ```

use indexmap::IndexMap;
use serde_json::Value;

use super::SheetError;

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// `${keyframes:<name>}`
  Keyframes(String),
}

/// Errors from parsing a single string, before the owning entry is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  Unclosed(usize),
  UnknownType(String),
}

/// Parse a string containing placeholders into segments.
pub fn parse(input: &str) -> Result<Vec<Segment>, ParseError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut rest = input;
  let mut offset = 0;

  while let Some(start) = rest.find('$') {
    literal.push_str(&rest[..start]);
    let tail = &rest[start..];

    if let Some(after) = tail.strip_prefix("$${") {
      literal.push_str("${");
      offset += start + 3;
      rest = after;
      continue;
    }

    let Some(body) = tail.strip_prefix("${") else {
      literal.push('$');
      offset += start + 1;
      rest = &tail[1..];
      continue;
    };

    let Some(end) = body.find('}') else {
      return Err(ParseError::Unclosed(offset + start));
    };

    let inner = &body[..end];
    let Some(name) = inner.strip_prefix("keyframes:") else {
      return Err(ParseError::UnknownType(inner.to_string()));
    };

    if !literal.is_empty() {
      segments.push(Segment::Literal(std::mem::take(&mut literal)));
    }
    segments.push(Segment::Keyframes(name.to_string()));

    offset += start + 2 + end + 1;
    rest = &body[end + 1..];
  }

  literal.push_str(rest);
  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }
  Ok(segments)
}

/// Replace placeholders in `text` using `keyframes` (name → identifier).
pub fn substitute(text: &str, keyframes: &IndexMap<String, String>, entry: &str) -> Result<String, SheetError> {
  let segments = parse(text).map_err(|e| match e {
    ParseError::Unclosed(position) => SheetError::UnclosedPlaceholder {
      entry: entry.to_string(),
      position,
    },
    ParseError::UnknownType(placeholder) => SheetError::UnknownPlaceholder {
      entry: entry.to_string(),
      placeholder,
    },
  })?;

  let mut out = String::with_capacity(text.len());
  for segment in segments {
    match segment {
      Segment::Literal(s) => out.push_str(&s),
      Segment::Keyframes(name) => match keyframes.get(&name) {
        Some(id) => out.push_str(id),
        None => {
          return Err(SheetError::UnknownKeyframes {
            entry: entry.to_string(),
            name,
          });
        }
      },
    }
  }
  Ok(out)
}

/// Substitute every string value (not key) in a raw description.
pub fn substitute_value(value: &Value, keyframes: &IndexMap<String, String>, entry: &str) -> Result<Value, SheetError> {
  Ok(match value {
    Value::String(s) => Value::String(substitute(s, keyframes, entry)?),
    Value::Array(items) => Value::Array(
      items
        .iter()
        .map(|item| substitute_value(item, keyframes, entry))
        .collect::<Result<_, _>>()?,
    ),
    Value::Object(map) => Value::Object(
      map
        .iter()
        .map(|(k, v)| Ok((k.clone(), substitute_value(v, keyframes, entry)?)))
        .collect::<Result<_, SheetError>>()?,
    ),
    other => other.clone(),
  })
}
