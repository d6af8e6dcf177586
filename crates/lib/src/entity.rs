//! Computed entities: immutable styles and keyframes.
//!
//! An entity wraps a canonical tree, the identifier derived from the tree's
//! content and the CSS text rendered once at construction. Handles are cheap
//! to clone and share the same record.

use std::rc::Rc;

use serde::Serialize;

use crate::consts::{KEYFRAMES_PREFIX, KEYFRAMES_RULES, STYLE_PREFIX};
use crate::render::{render, render_nested};
use crate::types::StyleTree;
use crate::util::hash::ContentHashable;

/// Read access shared by every computed entity.
pub trait Computed {
  /// Content-derived identifier, e.g. `n0b5f1a33`.
  fn id(&self) -> &str;

  fn tree(&self) -> &StyleTree;

  /// The precomputed CSS text.
  fn css(&self) -> &str;
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Record {
  id: String,
  tree: StyleTree,
  css: String,
}

/// A class-scoped style.
///
/// The identifier doubles as the class name; the rules are scoped to `.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Style(Rc<Record>);

impl Style {
  pub fn new(tree: StyleTree) -> Self {
    let id = format!("{STYLE_PREFIX}{}", tree.compute_hash());
    let css = render(&tree, &format!(".{id}"));
    Self(Rc::new(Record { id, tree, css }))
  }

  #[cfg(test)]
  pub(crate) fn with_id(id: &str, tree: StyleTree) -> Self {
    let css = render(&tree, &format!(".{id}"));
    Self(Rc::new(Record {
      id: id.to_string(),
      tree,
      css,
    }))
  }

  pub fn class_name(&self) -> &str {
    &self.0.id
  }

  pub fn selector(&self) -> String {
    format!(".{}", self.0.id)
  }
}

impl Computed for Style {
  fn id(&self) -> &str {
    &self.0.id
  }

  fn tree(&self) -> &StyleTree {
    &self.0.tree
  }

  fn css(&self) -> &str {
    &self.0.css
  }
}

/// A named keyframes animation, rendered once with the `-webkit-` prefix and
/// once without.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyframes(Rc<Record>);

impl Keyframes {
  pub fn new(tree: StyleTree) -> Self {
    let id = format!("{KEYFRAMES_PREFIX}{}", tree.compute_hash());
    let css = KEYFRAMES_RULES
      .iter()
      .map(|rule| render_nested(&tree, &format!("{rule} {id}")))
      .collect();
    Self(Rc::new(Record { id, tree, css }))
  }

  /// The animation name to use in `animation-name`.
  pub fn name(&self) -> &str {
    &self.0.id
  }
}

impl Computed for Keyframes {
  fn id(&self) -> &str {
    &self.0.id
  }

  fn tree(&self) -> &StyleTree {
    &self.0.tree
  }

  fn css(&self) -> &str {
    &self.0.css
  }
}

/// Any entity a [`Cache`](crate::cache::Cache) can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
  Style(Style),
  Keyframes(Keyframes),
}

impl Computed for Entity {
  fn id(&self) -> &str {
    match self {
      Entity::Style(s) => s.id(),
      Entity::Keyframes(k) => k.id(),
    }
  }

  fn tree(&self) -> &StyleTree {
    match self {
      Entity::Style(s) => s.tree(),
      Entity::Keyframes(k) => k.tree(),
    }
  }

  fn css(&self) -> &str {
    match self {
      Entity::Style(s) => s.css(),
      Entity::Keyframes(k) => k.css(),
    }
  }
}

impl From<Style> for Entity {
  fn from(style: Style) -> Self {
    Entity::Style(style)
  }
}

impl From<Keyframes> for Entity {
  fn from(keyframes: Keyframes) -> Self {
    Entity::Keyframes(keyframes)
  }
}
