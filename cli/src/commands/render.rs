//! `formwright render` - template or instance playback to HTML

use super::{load_document, read_to_string};
use crate::cli::Mode;
use anyhow::{Context, Result};
use render_model::{to_html, DocumentRenderer, RenderConfig, SignatureArtifact};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub signatures: Option<PathBuf>,
    pub mode: Option<Mode>,
    pub scale: f64,
    pub out: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let document = load_document(&args.template)?;

    let config = RenderConfig::default().with_scale(args.scale);
    config.validate()?;
    let renderer = DocumentRenderer::new(config);

    let mode = resolve_mode(args.mode, args.data.is_some());
    let model = match mode {
        Mode::Template => renderer.render_template(&document),
        Mode::Instance => {
            let data = match &args.data {
                Some(path) => load_json(path)?,
                None => Value::Object(Default::default()),
            };
            let signatures = match &args.signatures {
                Some(path) => SignatureArtifact::list_from_json(&read_to_string(path)?)
                    .with_context(|| format!("{} is not a signature list", path.display()))?,
                None => Vec::new(),
            };
            renderer.render_instance(&document, &data, &signatures)
        }
    };

    let html = to_html(&model)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(out = %path.display(), pages = model.pages.len(), ?mode, "rendered");
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// An explicit mode wins; otherwise data switches to instance mode
fn resolve_mode(requested: Option<Mode>, has_data: bool) -> Mode {
    match requested {
        Some(mode) => mode,
        None if has_data => Mode::Instance,
        None => Mode::Template,
    }
}

fn load_json(path: &Path) -> Result<Value> {
    let json = read_to_string(path)?;
    serde_json::from_str(&json).with_context(|| format!("{} is not valid JSON", path.display()))
}
