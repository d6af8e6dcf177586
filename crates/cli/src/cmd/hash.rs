//! Implementation of the `fstyle hash` command.

use anyhow::Result;
use serde::Serialize;

use freestyle::util::hash::hash;

use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
struct HashReport<'a> {
  input: &'a str,
  hash: String,
}

pub fn cmd_hash(input: &str, output: OutputFormat) -> Result<()> {
  let hash = hash(input);
  if output.is_json() {
    print_json(&HashReport { input, hash })?;
  } else {
    println!("{hash}");
  }
  Ok(())
}
