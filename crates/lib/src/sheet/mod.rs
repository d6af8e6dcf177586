//! Style-sheet definition files.
//!
//! A sheet is a JSON document naming styles and keyframes:
//!
//! ```json
//! {
//!   "keyframes": {
//!     "spin": { "from": { "transform": "rotate(0deg)" }, "to": { "transform": "rotate(360deg)" } }
//!   },
//!   "styles": {
//!     "button": [{ "color": "red" }, { "animation": "${keyframes:spin} 1s linear" }]
//!   }
//! }
//! ```
//!
//! Each entry is a single description or a list of descriptions merged in
//! order. Styles can refer to keyframes of the same sheet with placeholders
//! (see [`placeholder`]).
//!
//! Compiling a sheet either produces every entity or fails without touching
//! any cache.

pub mod placeholder;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::entity::{Computed, Keyframes, Style};
use crate::normalize::normalize;

/// One entry's raw descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sources {
  Many(Vec<Value>),
  One(Value),
}

impl Sources {
  pub fn as_slice(&self) -> &[Value] {
    match self {
      Sources::Many(values) => values,
      Sources::One(value) => std::slice::from_ref(value),
    }
  }
}

/// A parsed, not yet compiled, sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDef {
  #[serde(default)]
  pub keyframes: IndexMap<String, Sources>,
  #[serde(default)]
  pub styles: IndexMap<String, Sources>,
}

/// Errors that can occur when loading or compiling a sheet.
#[derive(Debug, Error)]
pub enum SheetError {
  /// Failed to read the sheet file.
  #[error("failed to read sheet {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse sheet JSON.
  #[error("failed to parse sheet {origin}: {source}")]
  Parse {
    origin: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("style '{entry}' refers to unknown keyframes '{name}'")]
  UnknownKeyframes { entry: String, name: String },

  #[error("style '{entry}' has an unclosed placeholder at position {position}")]
  UnclosedPlaceholder { entry: String, position: usize },

  #[error("style '{entry}' has an unknown placeholder '${{{placeholder}}}'")]
  UnknownPlaceholder { entry: String, placeholder: String },
}

impl SheetDef {
  /// Read and parse a sheet file.
  pub fn load(path: &Path) -> Result<Self, SheetError> {
    info!(path = %path.display(), "loading sheet");
    let content = fs::read_to_string(path).map_err(|source| SheetError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::parse(&content, &path.display().to_string())
  }

  /// Parse sheet JSON. `origin` names the source in errors.
  pub fn parse(content: &str, origin: &str) -> Result<Self, SheetError> {
    let sheet: SheetDef = serde_json::from_str(content).map_err(|source| SheetError::Parse {
      origin: origin.to_string(),
      source,
    })?;
    debug!(
      origin,
      keyframes = sheet.keyframes.len(),
      styles = sheet.styles.len(),
      "parsed sheet"
    );
    Ok(sheet)
  }

  /// Compute every entity of the sheet.
  pub fn compile(&self) -> Result<CompiledSheet, SheetError> {
    let keyframes: IndexMap<String, Keyframes> = self
      .keyframes
      .iter()
      .map(|(name, sources)| (name.clone(), Keyframes::new(normalize(sources.as_slice()))))
      .collect();

    let names: IndexMap<String, String> = keyframes
      .iter()
      .map(|(name, k)| (name.clone(), k.name().to_string()))
      .collect();

    let mut styles = IndexMap::with_capacity(self.styles.len());
    for (name, sources) in &self.styles {
      let resolved = sources
        .as_slice()
        .iter()
        .map(|source| placeholder::substitute_value(source, &names, name))
        .collect::<Result<Vec<_>, _>>()?;
      styles.insert(name.clone(), Style::new(normalize(&resolved)));
    }

    Ok(CompiledSheet { keyframes, styles })
  }

  /// Compile the sheet and add every entity to `cache`.
  pub fn register(&self, cache: &Cache) -> Result<Registered, SheetError> {
    Ok(self.compile()?.register(cache))
  }
}

/// Every entity of a sheet, by entry name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledSheet {
  pub keyframes: IndexMap<String, Keyframes>,
  pub styles: IndexMap<String, Style>,
}

impl CompiledSheet {
  /// Add every entity to `cache`, keyframes first.
  pub fn register(&self, cache: &Cache) -> Registered {
    for keyframes in self.keyframes.values() {
      cache.add(keyframes.clone());
    }
    for style in self.styles.values() {
      cache.add(style.clone());
    }
    debug!(cache = %cache.id(), entries = self.len(), "registered sheet");
    self.names()
  }

  /// Remove one reference to every entity from `cache`.
  pub fn unregister(&self, cache: &Cache) {
    for style in self.styles.values() {
      cache.remove(style);
    }
    for keyframes in self.keyframes.values() {
      cache.remove(keyframes);
    }
  }

  pub fn names(&self) -> Registered {
    Registered {
      classes: self
        .styles
        .iter()
        .map(|(name, s)| (name.clone(), s.id().to_string()))
        .collect(),
      keyframes: self
        .keyframes
        .iter()
        .map(|(name, k)| (name.clone(), k.id().to_string()))
        .collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.keyframes.len() + self.styles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Entry names mapped to identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registered {
  /// Style name → class name.
  pub classes: IndexMap<String, String>,
  /// Keyframes name → animation name.
  pub keyframes: IndexMap<String, String>,
}
