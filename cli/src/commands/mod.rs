pub mod render;
pub mod validate;

use anyhow::{Context, Result};
use doc_model::Document;
use std::path::Path;

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub(crate) fn load_document(path: &Path) -> Result<Document> {
    let json = read_to_string(path)?;
    Document::from_json(&json).with_context(|| format!("{} is not a valid template", path.display()))
}
