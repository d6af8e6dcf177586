//! Shared helpers for library integration tests.

use freestyle::{Cache, CacheIds, Style};
use serde_json::json;

/// A root cache and `n` children from one id generator.
pub fn cache_tree(n: usize) -> (Cache, Vec<Cache>) {
  let ids = CacheIds::new();
  let root = Cache::new(&ids);
  let children = (0..n).map(|_| Cache::new(&ids)).collect();
  (root, children)
}

pub fn color_style(cache: &Cache, color: &str) -> Style {
  cache.register_style(&[json!({ "color": color })])
}
