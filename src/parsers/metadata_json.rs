use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::TypeMetadata;

/// Parse the metadata processor's output: a JSON array of type-metadata
/// records with their precomputed mismatch flags.
pub fn parse_metadata(input: &str) -> Result<Vec<TypeMetadata>> {
    serde_json::from_str(input).context("Failed to parse type metadata JSON")
}

/// Load a metadata file produced by the metadata processor.
pub fn load_metadata_file(path: &Path) -> Result<Vec<TypeMetadata>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file {}", path.display()))?;
    parse_metadata(&content).with_context(|| format!("Invalid metadata file {}", path.display()))
}
