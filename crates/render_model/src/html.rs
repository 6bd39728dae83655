//! HTML print surface
//!
//! Writes a render model as a standalone HTML document: one fixed-size
//! container per page, `page-break-after` between pages, every block
//! absolutely positioned inside its page.

use crate::sanitize::{escape_attr, escape_text};
use crate::{
    BandRender, FontRender, PageRender, RenderContent, RenderItem, RenderModel, Result, SignatureRender,
};
use std::fmt::Write;

const STYLESHEET: &str = "\
@page { size: A4; margin: 0; }
body { margin: 0; background: #e5e5e5; }
.fw-page { position: relative; overflow: hidden; background: #fff; margin: 0 auto 16px; page-break-after: always; break-after: page; }
.fw-page:last-child { page-break-after: auto; break-after: auto; }
.fw-block, .fw-band { position: absolute; box-sizing: border-box; display: flex; flex-direction: column; overflow: hidden; }
.fw-label { font-size: 0.75em; color: #555; }
.fw-blank { flex: 1; border-bottom: 1px solid #999; color: #aaa; }
.fw-blank.fw-multiline { border: 1px solid #999; }
.fw-table { width: 100%; border-collapse: collapse; table-layout: fixed; }
.fw-table th, .fw-table td { border: 1px solid #999; height: 1.6em; padding: 0 2px; text-align: left; }
.fw-signature { flex: 1; border-bottom: 1px solid #333; }
.fw-signature img { max-width: 100%; max-height: 70%; object-fit: contain; }
.fw-meta { font-size: 0.7em; color: #555; }
.fw-page-break { border-top: 1px dashed #c00; color: #c00; font-size: 0.7em; }
@media print { body { background: none; } .fw-page { margin: 0; } .fw-page-break { display: none; } }
";

/// Write the whole model as an HTML document
pub fn to_html(model: &RenderModel) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape_text(&model.title))?;
    writeln!(out, "<style>\n{}</style></head><body>", STYLESHEET)?;
    for page in &model.pages {
        write_page(&mut out, page)?;
    }
    writeln!(out, "</body></html>")?;
    Ok(out)
}

fn css(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// Family list as CSS. Names with anything beyond letters, digits, spaces,
/// `-`, `_` or `.` are dropped; names with spaces are quoted.
fn font_family_css(family: &str) -> String {
    let names: Vec<String> = family
        .split(',')
        .map(|name| name.trim().trim_matches(&['"', '\''][..]))
        .filter(|name| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        })
        .map(|name| {
            if name.contains(' ') {
                format!("'{name}'")
            } else {
                name.to_string()
            }
        })
        .collect();

    if names.is_empty() {
        "sans-serif".to_string()
    } else {
        names.join(", ")
    }
}

fn font_css(font: &FontRender) -> String {
    format!(
        "font-family:{};font-size:{}pt;font-weight:{};font-style:{};",
        font_family_css(&font.family),
        css(font.size_pt),
        if font.bold { "bold" } else { "normal" },
        if font.italic { "italic" } else { "normal" },
    )
}

fn write_page(out: &mut String, page: &PageRender) -> Result<()> {
    writeln!(
        out,
        "<div class=\"fw-page\" data-page=\"{}\" style=\"width:{}px;height:{}px;\">",
        page.page_index,
        css(page.width),
        css(page.height)
    )?;
    for band in [&page.header, &page.footer, &page.page_number].into_iter().flatten() {
        write_band(out, band)?;
    }
    for item in &page.items {
        write_item(out, item)?;
    }
    writeln!(out, "</div>")?;
    Ok(())
}

fn write_band(out: &mut String, band: &BandRender) -> Result<()> {
    writeln!(
        out,
        "<div class=\"fw-band\" style=\"left:{}px;top:{}px;width:{}px;height:{}px;justify-content:center;text-align:{};{}\">{}</div>",
        css(band.bounds.x),
        css(band.bounds.y),
        css(band.bounds.width),
        css(band.bounds.height),
        band.align.as_css(),
        escape_attr(&font_css(&band.font)),
        escape_text(&band.text)
    )?;
    Ok(())
}

fn write_item(out: &mut String, item: &RenderItem) -> Result<()> {
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;padding:{}px;text-align:{};justify-content:{};{}",
        css(item.bounds.x),
        css(item.bounds.y),
        css(item.bounds.width),
        css(item.bounds.height),
        css(item.padding),
        item.align.as_css(),
        item.valign.as_css(),
        font_css(&item.font),
    );
    if let Some(border) = item.border.as_css() {
        write!(style, "border:1px {border} #333;")?;
    }

    write!(
        out,
        "<div class=\"fw-block\" data-block=\"{}\" style=\"{}\">",
        escape_attr(item.block_id.as_str()),
        escape_attr(&style)
    )?;
    if let Some(label) = &item.label {
        write!(out, "<div class=\"fw-label\">{}</div>", escape_text(label))?;
    }
    write_content(out, &item.content)?;
    writeln!(out, "</div>")?;
    Ok(())
}

fn write_content(out: &mut String, content: &RenderContent) -> Result<()> {
    match content {
        RenderContent::Header { text, subtitle } => {
            write!(out, "<div>{}</div>", escape_text(text))?;
            if let Some(subtitle) = subtitle {
                write!(out, "<div class=\"fw-meta\">{}</div>", escape_text(subtitle))?;
            }
        }
        RenderContent::Title { text, level } => {
            let tag = level.tag();
            write!(out, "<{tag} style=\"margin:0;font:inherit;\">{}</{tag}>", escape_text(text))?;
        }
        RenderContent::RichText { html } => out.push_str(html),
        RenderContent::FilledField { value } => {
            write!(out, "<div class=\"fw-value\">{}</div>", escape_text(value))?;
        }
        RenderContent::BlankField { hint, multiline } => {
            let class = if *multiline { "fw-blank fw-multiline" } else { "fw-blank" };
            write!(
                out,
                "<div class=\"{class}\">{}</div>",
                escape_text(hint.as_deref().unwrap_or(""))
            )?;
        }
        RenderContent::Checkbox { checked } => {
            write!(out, "<span class=\"fw-checkbox\">{}</span>", if *checked { "☑" } else { "☐" })?;
        }
        RenderContent::Table { columns, rows, .. } => {
            write!(out, "<table class=\"fw-table\"><colgroup>")?;
            for column in columns {
                write!(out, "<col style=\"width:{}%\">", css(column.fraction * 100.0))?;
            }
            write!(out, "</colgroup><thead><tr>")?;
            for column in columns {
                let marker = if column.required { " *" } else { "" };
                write!(out, "<th>{}{marker}</th>", escape_text(&column.header))?;
            }
            write!(out, "</tr></thead><tbody>")?;
            for _ in 0..*rows {
                write!(out, "<tr>")?;
                for _ in columns {
                    write!(out, "<td></td>")?;
                }
                write!(out, "</tr>")?;
            }
            write!(out, "</tbody></table>")?;
        }
        RenderContent::Group { title } => {
            if let Some(title) = title {
                write!(out, "<div class=\"fw-label\">{}</div>", escape_text(title))?;
            }
        }
        RenderContent::Signature(SignatureRender::Signed {
            role,
            image_url,
            signed_at,
            hash,
        }) => {
            write!(out, "<div class=\"fw-signature\">")?;
            if !image_url.is_empty() {
                write!(out, "<img src=\"{}\" alt=\"{}\">", escape_attr(image_url), escape_attr(role))?;
            }
            write!(
                out,
                "</div><div class=\"fw-meta\">{} · {}</div><div class=\"fw-meta\">{}</div>",
                escape_text(role),
                escape_text(signed_at),
                escape_text(hash)
            )?;
        }
        RenderContent::Signature(SignatureRender::Unsigned { role }) => {
            write!(
                out,
                "<div class=\"fw-signature\"></div><div class=\"fw-meta\">{}</div>",
                escape_text(role)
            )?;
        }
        RenderContent::Image { src, fit } => {
            if !src.is_empty() {
                write!(
                    out,
                    "<img src=\"{}\" style=\"width:100%;height:100%;object-fit:{};\">",
                    escape_attr(src),
                    fit.as_css()
                )?;
            }
        }
        RenderContent::Divider { thickness } => {
            write!(
                out,
                "<hr style=\"margin:auto 0;border:0;border-top:{}px solid #333;\">",
                css(*thickness)
            )?;
        }
        RenderContent::Spacer => {}
        RenderContent::Text { text } => {
            write!(out, "<div>{}</div>", escape_text(text))?;
        }
        RenderContent::PageBreak => {
            write!(out, "<div class=\"fw-page-break\">Page break</div>")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentRenderer;
    use doc_model::{Block, BlockKind, BlockStyle, Document, Page, TableColumn};

    #[test]
    fn test_one_container_per_page() {
        let mut doc = Document::new("Two <pages>");
        doc.pages.push(Page::new());
        let html = to_html(&DocumentRenderer::default().render_template(&doc)).unwrap();

        assert_eq!(html.matches("class=\"fw-page\"").count(), 2);
        assert!(html.contains("page-break-after: always"));
        assert!(html.contains("<title>Two &lt;pages&gt;</title>"));
    }

    #[test]
    fn test_table_columns_as_percentages() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(Block::new(BlockKind::Table {
            columns: vec![
                TableColumn::new("a", "A", 1.0),
                TableColumn::new("b", "B", 1.0).required(),
                TableColumn::new("c", "C", 2.0),
            ],
            rows: 2,
        }));
        let html = to_html(&DocumentRenderer::default().render_template(&doc)).unwrap();

        assert!(html.contains("<col style=\"width:25%\"><col style=\"width:25%\"><col style=\"width:50%\">"));
        assert!(html.contains("<th>B *</th>"));
        assert_eq!(html.matches("<tr><td></td><td></td><td></td></tr>").count(), 2);
    }

    #[test]
    fn test_font_family_cannot_carry_css() {
        assert_eq!(font_family_css("x;background:url(https://evil/)"), "sans-serif");
        assert_eq!(
            font_family_css("\"Times New Roman\", Georgia, x}y, serif"),
            "'Times New Roman', Georgia, serif"
        );

        let mut doc = Document::new("t");
        let style = BlockStyle {
            font_family: Some("Arial;background:url(https://evil/)".into()),
            ..BlockStyle::default()
        };
        doc.pages[0].blocks.push(Block::new(BlockKind::Spacer {}).with_style(style));
        let html = to_html(&DocumentRenderer::default().render_template(&doc)).unwrap();
        assert!(!html.contains("evil"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new("t");
        doc.pages[0].blocks.push(Block::new(BlockKind::DynamicText {
            expression: "<b>not markup</b>".into(),
        }));
        let html = to_html(&DocumentRenderer::default().render_template(&doc)).unwrap();
        assert!(html.contains("&lt;b&gt;not markup&lt;/b&gt;"));
    }
}
