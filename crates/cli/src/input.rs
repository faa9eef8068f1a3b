//! Reading input items: a JSON array or JSON Lines.

use std::path::Path;

use anyhow::{Context, Result};

use noesis_core::{ArtworkItem, NoesisError};

/// Parse items from text. A leading `[` means a JSON array; otherwise every
/// non-blank line is one JSON object.
pub fn parse_items(content: &str) -> Result<Vec<ArtworkItem>, NoesisError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| NoesisError::InvalidInput {
                index: index + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

pub fn read_items(path: &Path) -> Result<Vec<ArtworkItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    parse_items(&content).with_context(|| format!("failed to parse input file {}", path.display()))
}

/// Read a single text from a file, or stdin for `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut text)
            .context("failed to read text from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read text file {}", path.display()))
    }
}
