//! Implementation of the `fstyle build` command.
//!
//! Every sheet is registered into its own cache and each cache is attached to
//! one root cache, so entries shared between sheets are emitted once.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use freestyle::sheet::{Registered, SheetDef};
use freestyle::{Cache, CacheIds};

use crate::output::{OutputFormat, format_bytes, print_json, print_success};

#[derive(Debug, Serialize)]
struct SheetReport {
  file: PathBuf,
  cache: String,
  #[serde(flatten)]
  registered: Registered,
}

#[derive(Debug, Serialize)]
struct BuildReport {
  sheets: Vec<SheetReport>,
  entries: usize,
  css: String,
}

pub fn cmd_build(files: &[PathBuf], out: Option<&Path>, output: OutputFormat) -> Result<()> {
  let ids = CacheIds::new();
  let root = Cache::new(&ids);
  let mut sheets = Vec::with_capacity(files.len());

  for file in files {
    let sheet = SheetDef::load(file).with_context(|| format!("Failed to load sheet: {}", file.display()))?;
    let cache = Cache::new(&ids);
    let registered = sheet
      .register(&cache)
      .with_context(|| format!("Failed to compile sheet: {}", file.display()))?;
    root.attach(&cache);

    sheets.push(SheetReport {
      file: file.clone(),
      cache: cache.id().to_string(),
      registered,
    });
  }

  let css = root.css();
  info!(sheets = sheets.len(), entries = root.len(), bytes = css.len(), "built stylesheet");

  if let Some(path) = out {
    fs::write(path, &css).with_context(|| format!("Failed to write stylesheet: {}", path.display()))?;
  }

  if output.is_json() {
    print_json(&BuildReport {
      sheets,
      entries: root.len(),
      css,
    })?;
  } else if let Some(path) = out {
    print_success(&format!(
      "Wrote {} entries ({}) to {}",
      root.len(),
      format_bytes(css.len()),
      path.display()
    ));
  } else {
    println!("{css}");
  }

  Ok(())
}
