//! Document renderer - plays a document back in template or instance mode
//!
//! Template mode draws structural placeholders only. Instance mode resolves
//! every bind, substitutes every `{{...}}` template, drops blocks whose
//! `visibleIf` is false, ticks checkboxes from boolean data and overlays
//! signatures. Rendering never fails because of a single block: anything
//! that cannot be evaluated falls back to its blank form.

use crate::fields::{format_date_time, format_number};
use crate::sanitize::{escape_attr, is_safe_image_src, sanitize_html};
use crate::{
    BandRender, ColumnRender, FontRender, PageRender, Rect, RenderContent, RenderError, RenderItem,
    RenderMode, RenderModel, Result, SignatureArtifact, SignatureOverlay, SignatureRender,
};
use doc_model::{
    column_fractions, mm_to_px, BandSettings, Block, BlockKind, Document, HorizontalAlign, Page,
    RectMm, TableColumn, DEFAULT_FONT_SIZE_PT, MAX_TABLE_ROWS,
};
use expr_engine::{is_visible, lookup, substitute, substitute_with, value_to_string};
use serde_json::Value;

/// Configuration for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Zoom applied to positions, sizes, fonts, padding and margins alike
    pub scale: f64,
    /// Font family for blocks and bands that do not set one
    pub font_family: String,
    /// Base font size in points
    pub font_size_pt: f64,
    /// Prompt shown in an empty select field
    pub select_prompt: String,
    /// Width reserved at the right of the footer for the page stamp
    pub page_number_width_mm: f64,
    /// Characters of a signature hash to show
    pub hash_len: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            select_prompt: "Select…".to_string(),
            page_number_width_mm: 20.0,
            hash_len: 12,
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(())
        } else {
            Err(RenderError::InvalidScale(self.scale))
        }
    }
}

/// What one render pass reads besides the document
struct Pass<'a> {
    mode: RenderMode,
    data: Option<&'a Value>,
    signatures: SignatureOverlay<'a>,
    scale: f64,
}

impl<'a> Pass<'a> {
    fn template(scale: f64) -> Self {
        Self {
            mode: RenderMode::Template,
            data: None,
            signatures: SignatureOverlay::default(),
            scale,
        }
    }

    fn instance(data: &'a Value, signatures: &'a [SignatureArtifact], scale: f64) -> Self {
        Self {
            mode: RenderMode::Instance,
            data: Some(data),
            signatures: SignatureOverlay::new(signatures),
            scale,
        }
    }

    /// Substitute templates in instance mode; show them raw in template mode
    fn text(&self, text: &str) -> String {
        match self.data {
            Some(data) => substitute(text, data),
            None => text.to_string(),
        }
    }

    /// Markup with templates; substituted values are escaped so data stays text
    fn markup(&self, html: &str) -> String {
        match self.data {
            Some(data) => substitute_with(html, data, |value| escape_attr(&value)),
            None => html.to_string(),
        }
    }

    fn bound(&self, bind: Option<&str>) -> Option<&'a Value> {
        let data = self.data?;
        let path = bind.map(str::trim).filter(|p| !p.is_empty())?;
        lookup(data, path)
    }

    fn px(&self, mm: f64) -> f64 {
        mm_to_px(mm) * self.scale
    }

    fn rect(&self, rect: RectMm) -> Rect {
        Rect::new(
            self.px(rect.x),
            self.px(rect.y),
            self.px(rect.width),
            self.px(rect.height),
        )
    }
}

/// Converts documents to render models
pub struct DocumentRenderer {
    config: RenderConfig,
}

impl DocumentRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn scale(&self) -> f64 {
        match self.config.validate() {
            Ok(()) => self.config.scale,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to scale 1");
                1.0
            }
        }
    }

    /// Render every page with placeholders only
    pub fn render_template(&self, document: &Document) -> RenderModel {
        self.render(document, &Pass::template(self.scale()))
    }

    /// Render every page against a data context and signature artifacts
    pub fn render_instance(
        &self,
        document: &Document,
        data: &Value,
        signatures: &[SignatureArtifact],
    ) -> RenderModel {
        self.render(document, &Pass::instance(data, signatures, self.scale()))
    }

    /// Render a single page in template mode
    pub fn render_template_page(&self, document: &Document, index: usize) -> Result<PageRender> {
        let page = document.pages.get(index).ok_or(RenderError::PageOutOfRange {
            index,
            count: document.page_count(),
        })?;
        Ok(self.page(document, index, page, &Pass::template(self.scale())))
    }

    fn render(&self, document: &Document, pass: &Pass<'_>) -> RenderModel {
        let mut model = RenderModel::new(pass.mode, document.title.clone(), pass.scale);
        for (index, page) in document.pages.iter().enumerate() {
            model.add_page(self.page(document, index, page, pass));
        }
        tracing::debug!(
            mode = ?pass.mode,
            pages = model.pages.len(),
            items = model.pages.iter().map(|p| p.items.len()).sum::<usize>(),
            "document rendered"
        );
        model
    }

    fn page(&self, document: &Document, index: usize, page: &Page, pass: &Pass<'_>) -> PageRender {
        let settings = &document.page_settings;
        let size = settings.page_size();
        let margins = settings.margins;
        let usable = settings.usable_area();

        let header = settings.header.enabled.then(|| {
            let height = settings.header.height_mm.min(margins.top).max(0.0);
            let area = RectMm::new(usable.x, margins.top - height, usable.width, height);
            self.band(&settings.header, area, pass.text(&settings.header.content), pass)
        });

        // Footer and page stamp share the bottom margin
        let footer_height = settings.footer.height_mm.min(margins.bottom).max(0.0);
        let footer_y = size.height - margins.bottom;
        let stamp_width = if settings.page_numbers {
            self.config.page_number_width_mm.min(usable.width).max(0.0)
        } else {
            0.0
        };

        let footer = settings.footer.enabled.then(|| {
            let area = RectMm::new(usable.x, footer_y, usable.width - stamp_width, footer_height);
            self.band(&settings.footer, area, pass.text(&settings.footer.content), pass)
        });

        let page_number = settings.page_numbers.then(|| {
            let area = RectMm::new(usable.right() - stamp_width, footer_y, stamp_width, footer_height);
            let text = page_stamp(index, document.page_count());
            let mut stamp = self.band(&settings.footer, area, text, pass);
            stamp.align = HorizontalAlign::Right;
            stamp
        });

        let items = page
            .paint_order()
            .into_iter()
            .filter_map(|block| self.item(block, pass))
            .collect();

        PageRender {
            page_index: index,
            width: pass.px(size.width),
            height: pass.px(size.height),
            content_area: pass.rect(usable),
            header,
            footer,
            page_number,
            items,
        }
    }

    fn band(&self, band: &BandSettings, area: RectMm, text: String, pass: &Pass<'_>) -> BandRender {
        BandRender {
            bounds: pass.rect(area),
            text,
            font: FontRender {
                family: band
                    .font_family
                    .clone()
                    .unwrap_or_else(|| self.config.font_family.clone()),
                size_pt: band.font_size * pass.scale,
                bold: false,
                italic: false,
            },
            align: band.align,
        }
    }

    fn item(&self, block: &Block, pass: &Pass<'_>) -> Option<RenderItem> {
        if let Some(data) = pass.data {
            if !is_visible(block.visible_if.as_deref(), data) {
                tracing::debug!(block = %block.id, "hidden by visibleIf");
                return None;
            }
        }

        let bounds = pass.rect(block.rect());
        let content = self.content(block, bounds, pass)?;
        let font = block.effective_font(Some(self.config.font_size_pt));

        Some(RenderItem {
            block_id: block.id.clone(),
            bounds,
            z: block.z,
            font: FontRender {
                family: font.family.unwrap_or_else(|| self.config.font_family.clone()),
                size_pt: font.size_pt * pass.scale,
                bold: font.bold,
                italic: font.italic,
            },
            align: block.style.align,
            valign: block.style.valign,
            border: block.style.border,
            padding: pass.px(block.style.padding_mm.max(0.0)),
            label: block
                .label
                .as_deref()
                .map(|label| pass.text(label))
                .filter(|label| !label.trim().is_empty()),
            content,
        })
    }

    /// Content for a block, or `None` when the kind draws nothing in this mode
    fn content(&self, block: &Block, bounds: Rect, pass: &Pass<'_>) -> Option<RenderContent> {
        let content = match &block.kind {
            BlockKind::Header { text, subtitle } => RenderContent::Header {
                text: pass.text(text),
                subtitle: subtitle.as_deref().map(|s| pass.text(s)),
            },
            BlockKind::Title { text, level } => RenderContent::Title {
                text: pass.text(text),
                level: *level,
            },
            BlockKind::Paragraph { html } => RenderContent::RichText {
                html: sanitize_html(&pass.markup(html)),
            },
            BlockKind::Text {
                bind,
                placeholder,
                multiline,
            } => field(pass.bound(bind.as_deref()).map(value_to_string), || {
                RenderContent::BlankField {
                    hint: placeholder.clone(),
                    multiline: *multiline,
                }
            }),
            BlockKind::Number { bind, unit, decimals } => field(
                pass.bound(bind.as_deref())
                    .map(|v| format_number(v, *decimals, unit.as_deref())),
                || RenderContent::BlankField {
                    hint: unit.clone(),
                    multiline: false,
                },
            ),
            BlockKind::DateTime { bind, mode } => field(
                pass.bound(bind.as_deref()).map(|v| format_date_time(v, *mode)),
                || RenderContent::BlankField {
                    hint: None,
                    multiline: false,
                },
            ),
            BlockKind::Checkbox { bind } => RenderContent::Checkbox {
                checked: matches!(pass.bound(bind.as_deref()), Some(Value::Bool(true))),
            },
            BlockKind::Select { bind, .. } => field(pass.bound(bind.as_deref()).map(value_to_string), || {
                RenderContent::BlankField {
                    hint: Some(self.config.select_prompt.clone()),
                    multiline: false,
                }
            }),
            BlockKind::Table { columns, rows } => RenderContent::Table {
                columns: render_columns(columns, bounds.width),
                rows: table_rows(block, *rows),
                repeater: false,
            },
            BlockKind::RepeaterTable {
                columns,
                min_rows,
                max_rows,
                ..
            } => RenderContent::Table {
                columns: render_columns(columns, bounds.width),
                rows: repeater_preview_rows(*min_rows, *max_rows),
                repeater: true,
            },
            BlockKind::Group { title } => RenderContent::Group {
                title: title.as_deref().map(|t| pass.text(t)),
            },
            BlockKind::Signature { role } => {
                RenderContent::Signature(self.signature(block, role, pass))
            }
            BlockKind::Image { src, fit } => RenderContent::Image {
                src: safe_image_src(block, src),
                fit: *fit,
            },
            BlockKind::Divider { thickness_mm } => RenderContent::Divider {
                thickness: pass.px(thickness_mm.max(0.0)),
            },
            BlockKind::Spacer {} => RenderContent::Spacer,
            BlockKind::DynamicText { expression } => RenderContent::Text {
                text: pass.text(expression),
            },
            BlockKind::PageBreak {} => match pass.mode {
                RenderMode::Template => RenderContent::PageBreak,
                RenderMode::Instance => return None,
            },
        };
        Some(content)
    }

    fn signature(&self, block: &Block, role: &str, pass: &Pass<'_>) -> SignatureRender {
        match pass.signatures.get(&block.id) {
            Some(artifact) => SignatureRender::Signed {
                role: role.to_string(),
                image_url: if is_safe_image_src(&artifact.signature_png_url) {
                    artifact.signature_png_url.clone()
                } else {
                    tracing::warn!(block = %block.id, "unsafe signature image url dropped");
                    String::new()
                },
                signed_at: artifact.signed_at_display(),
                hash: artifact.short_hash(self.config.hash_len),
            },
            None => SignatureRender::Unsigned {
                role: role.to_string(),
            },
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// A resolved value renders filled; a missing or blank one renders `blank`
fn field(value: Option<String>, blank: impl FnOnce() -> RenderContent) -> RenderContent {
    match value {
        Some(value) if !value.trim().is_empty() => RenderContent::FilledField { value },
        _ => blank(),
    }
}

fn render_columns(columns: &[TableColumn], block_width: f64) -> Vec<ColumnRender> {
    columns
        .iter()
        .zip(column_fractions(columns))
        .map(|(column, fraction)| ColumnRender {
            header: column.header.clone(),
            fraction,
            width: block_width * fraction,
            required: column.required,
        })
        .collect()
}

/// Rows shown for a repeater in preview: `min_rows`, at least one, at most
/// `max_rows` and never more than `MAX_TABLE_ROWS`
pub fn repeater_preview_rows(min_rows: u32, max_rows: u32) -> u32 {
    min_rows.clamp(1, max_rows.clamp(1, MAX_TABLE_ROWS))
}

fn table_rows(block: &Block, rows: u32) -> u32 {
    if rows > MAX_TABLE_ROWS {
        tracing::warn!(block = %block.id, rows, max = MAX_TABLE_ROWS, "table row count capped");
    }
    rows.min(MAX_TABLE_ROWS)
}

/// Page stamp text for a zero-based page index
pub fn page_stamp(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}

fn safe_image_src(block: &Block, src: &str) -> String {
    if is_safe_image_src(src) {
        src.to_string()
    } else {
        tracing::warn!(block = %block.id, "unsafe image source dropped");
        String::new()
    }
}
