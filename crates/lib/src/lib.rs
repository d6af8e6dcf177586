//! freestyle: deduplicated, composable CSS generated from structured style descriptions.
//!
//! This crate provides:
//! - `normalize`: raw descriptions into a canonical, sorted [`StyleTree`]
//! - `util::hash`: the content hash behind every identifier
//! - `Style` / `Keyframes`: immutable entities with precomputed CSS
//! - `render`: tree-to-CSS rendering with nested selectors and at-rules
//! - `Cache`: a reference-counted registry that can aggregate child caches
//! - `sheet`: JSON style-sheet definition files
//!
//! # Example
//!
//! ```
//! use freestyle::{Cache, CacheIds, Computed};
//! use serde_json::json;
//!
//! let cache = Cache::new(&CacheIds::new());
//! let style = cache.register_style(&[json!({"width": 10}), json!({"zIndex": 10})]);
//!
//! assert_eq!(cache.css(), format!(".{}{{width:10px;z-index:10;}}", style.class_name()));
//! assert_eq!(style.id(), style.class_name());
//! ```

pub mod cache;
pub mod consts;
pub mod entity;
pub mod join;
pub mod normalize;
pub mod render;
pub mod sheet;
pub mod types;
pub mod util;

pub use cache::{Cache, CacheId, CacheIds, Change, ListenerId};
pub use entity::{Computed, Entity, Keyframes, Style};
pub use join::join;
pub use normalize::normalize;
pub use types::{StyleTree, StyleValue};
