//! Implementation of the `fstyle inspect` command.

use std::path::Path;

use anyhow::{Context, Result};

use freestyle::Computed;
use freestyle::sheet::SheetDef;

use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

pub fn cmd_inspect(file: &Path, output: OutputFormat) -> Result<()> {
  let sheet = SheetDef::load(file).with_context(|| format!("Failed to load sheet: {}", file.display()))?;
  let compiled = sheet
    .compile()
    .with_context(|| format!("Failed to compile sheet: {}", file.display()))?;

  if output.is_json() {
    return print_json(&compiled);
  }

  let entries = compiled
    .keyframes
    .iter()
    .map(|(name, k)| ("keyframes", name, k as &dyn Computed))
    .chain(compiled.styles.iter().map(|(name, s)| ("style", name, s as &dyn Computed)));

  for (kind, name, entity) in entries {
    print_info(&format!("{kind} {name} {} {}", symbols::ARROW, entity.id()));
    let tree = serde_json::to_string(entity.tree()).context("Failed to serialize style tree")?;
    print_stat("tree", &tree);
    print_stat("css", entity.css());
  }

  Ok(())
}
