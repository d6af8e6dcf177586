//! Cache identifiers.
//!
//! Identifiers come from an explicitly passed [`CacheIds`] generator rather
//! than a process-wide counter. Caches built from clones of one generator
//! share its sequence.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::consts::CACHE_PREFIX;

/// Identifier of a [`Cache`](super::Cache), e.g. `f0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CacheId(String);

impl CacheId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CacheId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Monotonic generator of [`CacheId`]s.
#[derive(Debug, Clone, Default)]
pub struct CacheIds {
  next: Rc<Cell<u64>>,
}

impl CacheIds {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn starting_at(first: u64) -> Self {
    Self {
      next: Rc::new(Cell::new(first)),
    }
  }

  pub fn next_id(&self) -> CacheId {
    let n = self.next.get();
    self.next.set(n + 1);
    CacheId(format!("{CACHE_PREFIX}{n}"))
  }
}
