//! `formwright validate` - repairs, invariants, and expression lint

use super::read_to_string;
use anyhow::{bail, Context, Result};
use doc_model::{Block, BlockKind, Document, MAX_TABLE_ROWS};
use expr_engine::{markers, Condition, Expression};
use std::path::Path;

/// A problem found in a template that rendering would silently paper over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub location: String,
    pub message: String,
}

pub fn run(template: &Path, strict: bool) -> Result<()> {
    let json = read_to_string(template)?;
    let mut document: Document = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid template", template.display()))?;

    let report = document.normalize();
    document
        .validate()
        .context("template still violates document invariants after repair")?;

    println!(
        "{}: {} page(s), {} block(s)",
        template.display(),
        document.page_count(),
        document.blocks().count()
    );
    if report.added_page {
        println!("  repaired: added an empty page");
    }
    for id in &report.clamped_blocks {
        println!("  repaired: block {id} raised to the minimum size");
    }
    for (old, new) in &report.reminted_ids {
        println!("  repaired: duplicate id {old} renamed to {new}");
    }

    let findings = lint(&document);
    for finding in &findings {
        println!("  warning: {}: {}", finding.location, finding.message);
    }

    tracing::info!(repaired = !report.is_clean(), warnings = findings.len(), "template validated");
    if strict && (!report.is_clean() || !findings.is_empty()) {
        bail!("template needs attention ({} warning(s))", findings.len());
    }
    Ok(())
}

/// Report every `{{...}}` marker and `visibleIf` condition that does not
/// parse, and tables declaring more rows than are drawn
pub fn lint(document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    let settings = &document.page_settings;
    check_markers(&mut findings, "header band", &settings.header.content);
    check_markers(&mut findings, "footer band", &settings.footer.content);

    for (page_index, page) in document.pages.iter().enumerate() {
        for block in &page.blocks {
            let location = format!("page {} block {}", page_index + 1, block.id);
            if let Some(condition) = block.visible_if.as_deref() {
                if let Err(err) = Condition::parse(condition) {
                    findings.push(Finding {
                        location: location.clone(),
                        message: format!("visibleIf {condition:?} is ignored ({err})"),
                    });
                }
            }
            for text in template_texts(block) {
                check_markers(&mut findings, &location, text);
            }
            if let Some(rows) = declared_rows(block).filter(|rows| *rows > MAX_TABLE_ROWS) {
                findings.push(Finding {
                    location: location.clone(),
                    message: format!("{rows} rows is more than the {MAX_TABLE_ROWS} a table draws"),
                });
            }
        }
    }

    findings
}

fn check_markers(findings: &mut Vec<Finding>, location: &str, text: &str) {
    for marker in markers(text) {
        if let Err(err) = Expression::parse(marker) {
            findings.push(Finding {
                location: location.to_string(),
                message: format!("expression {{{{{marker}}}}} renders empty ({err})"),
            });
        }
    }
}

fn declared_rows(block: &Block) -> Option<u32> {
    match &block.kind {
        BlockKind::Table { rows, .. } => Some(*rows),
        BlockKind::RepeaterTable { max_rows, .. } => Some(*max_rows),
        BlockKind::Header { .. }
        | BlockKind::Title { .. }
        | BlockKind::Paragraph { .. }
        | BlockKind::Text { .. }
        | BlockKind::Number { .. }
        | BlockKind::DateTime { .. }
        | BlockKind::Checkbox { .. }
        | BlockKind::Select { .. }
        | BlockKind::Group { .. }
        | BlockKind::Signature { .. }
        | BlockKind::Image { .. }
        | BlockKind::Divider { .. }
        | BlockKind::Spacer {}
        | BlockKind::DynamicText { .. }
        | BlockKind::PageBreak {} => None,
    }
}

/// Text of a block that goes through template substitution
fn template_texts(block: &Block) -> Vec<&str> {
    let mut texts: Vec<&str> = block.label.as_deref().into_iter().collect();
    match &block.kind {
        BlockKind::Header { text, subtitle } => {
            texts.push(text);
            texts.extend(subtitle.as_deref());
        }
        BlockKind::Title { text, .. } => texts.push(text),
        BlockKind::Paragraph { html } => texts.push(html),
        BlockKind::Group { title } => texts.extend(title.as_deref()),
        BlockKind::DynamicText { expression } => texts.push(expression),
        BlockKind::Text { .. }
        | BlockKind::Number { .. }
        | BlockKind::DateTime { .. }
        | BlockKind::Checkbox { .. }
        | BlockKind::Select { .. }
        | BlockKind::Table { .. }
        | BlockKind::RepeaterTable { .. }
        | BlockKind::Signature { .. }
        | BlockKind::Image { .. }
        | BlockKind::Divider { .. }
        | BlockKind::Spacer {}
        | BlockKind::PageBreak {} => {}
    }
    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lint_flags_bad_conditions_and_expressions() {
        let mut doc = Document::new("t");
        doc.page_settings.footer.content = "Printed {{formatDate(meta.printed)}}".into();
        doc.pages[0].blocks.push(
            Block::new(BlockKind::DynamicText {
                expression: "Hi {{shout(name)}} and {{name}}".into(),
            })
            .with_id("d")
            .with_visible_if("status = 'open'"),
        );

        let findings = lint(&doc);
        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["page 1 block d", "page 1 block d"]);
        assert!(findings[0].message.starts_with("visibleIf"));
        assert!(findings[1].message.contains("{{shout(name)}}"));
    }

    #[test]
    fn test_lint_flags_oversized_tables() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(
            Block::new(BlockKind::Table {
                columns: Vec::new(),
                rows: 4_000_000_000,
            })
            .with_id("grid"),
        );
        doc.pages[0].blocks.push(
            Block::new(BlockKind::Table {
                columns: Vec::new(),
                rows: MAX_TABLE_ROWS,
            })
            .with_id("ok"),
        );

        let findings = lint(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location, "page 1 block grid");
        assert!(findings[0].message.starts_with("4000000000 rows"));
    }

    #[test]
    fn test_clean_template_has_no_findings() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(
            Block::new(BlockKind::Header {
                text: "Job {{job.code}}".into(),
                subtitle: Some("{{formatDateTime(job.at)}}".into()),
            })
            .with_visible_if("job.kind === 'full'"),
        );
        assert!(lint(&doc).is_empty());
    }
}
