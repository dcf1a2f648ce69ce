mod header_band;
pub mod sections;
mod side_photo;
mod text;
mod types;

pub use sections::{Item, Row, Section, build_sections};
pub use types::*;

use crate::config::{LayoutConfig, SizeProfile};
use crate::labels::{LabelKey, LabelTable};
use crate::photo::decode_data_uri;
use crate::record::BiodataRecord;
use crate::templates::{DividerStyle, HeaderLayout, SectionDecoration, StyleConfig};

use text::{Font, measure_block};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
const CSS_PX_PER_MM: f32 = 96.0 / 25.4;

const LABEL_COLOR: &str = "#4B5563";
const VALUE_COLOR: &str = "#1F2937";
const MUTED_COLOR: &str = "#6B7280";
const RULE_COLOR: &str = "#E5E7EB";
const INVERTED_TEXT: &str = "#FFFFFF";

/// Page size in CSS pixels for a render mode.
pub fn page_size(mode: RenderMode, config: &LayoutConfig) -> (f32, f32) {
    match mode {
        RenderMode::Print => (A4_WIDTH_MM * CSS_PX_PER_MM, A4_HEIGHT_MM * CSS_PX_PER_MM),
        RenderMode::Preview => {
            let width = config.preview_width.max(1.0);
            (width, width * A4_HEIGHT_MM / A4_WIDTH_MM)
        }
    }
}

pub fn compute_layout(
    record: &BiodataRecord,
    style: &StyleConfig,
    labels: &LabelTable,
    background: &str,
    mode: RenderMode,
    config: &LayoutConfig,
) -> Document {
    let sizes = match mode {
        RenderMode::Preview => &config.preview,
        RenderMode::Print => &config.print,
    };
    let (width, height) = page_size(mode, config);
    let ctx = Ctx {
        style,
        sizes,
        config,
        labels,
        family: style.font_family.stack(),
    };
    let sections = build_sections(record, labels);

    let mut background_block = Block::new(BlockKind::Background, 0.0, 0.0, width);
    background_block.height = height;
    background_block.elements.push(Element::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        radius: 0.0,
        fill: background.to_string(),
        opacity: 1.0,
    });

    let mut blocks = vec![background_block];
    match style.header_layout {
        HeaderLayout::SidePhoto => {
            blocks.extend(side_photo::layout(&ctx, record, &sections, width, height))
        }
        HeaderLayout::Centered | HeaderLayout::LeftAligned => {
            blocks.extend(header_band::layout(&ctx, record, &sections, width, height))
        }
    }

    Document {
        mode,
        header_layout: style.header_layout,
        width,
        height,
        page_mm: (mode == RenderMode::Print).then_some((A4_WIDTH_MM, A4_HEIGHT_MM)),
        background: background.to_string(),
        font_family: style.font_family,
        blocks,
    }
}

/// Shared painting helpers for both macro-layouts.
pub(super) struct Ctx<'a> {
    style: &'a StyleConfig,
    sizes: &'a SizeProfile,
    config: &'a LayoutConfig,
    labels: &'a LabelTable,
    family: &'a str,
}

impl Ctx<'_> {
    fn font(&self, size: f32, bold: bool, letter_spacing: f32) -> Font<'_> {
        Font {
            family: self.family,
            size,
            bold,
            letter_spacing,
            fast_metrics: self.config.fast_text_metrics,
        }
    }

    fn accent(&self) -> String {
        self.style.accent_color.to_string()
    }

    /// Place wrapped text whose top edge is `top`. Returns the height used.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        block: &mut Block,
        content: &str,
        x: f32,
        top: f32,
        max_width: f32,
        font: Font<'_>,
        weight: u16,
        fill: &str,
        anchor: TextAnchor,
        line_height: f32,
    ) -> f32 {
        let measured = measure_block(content, max_width, font, line_height);
        block.elements.push(Element::Text {
            x,
            y: baseline(top, font.size, line_height),
            lines: measured.lines,
            style: TextStyle {
                font_size: font.size,
                weight,
                fill: fill.to_string(),
                anchor,
                letter_spacing: font.letter_spacing,
                line_height,
            },
        });
        measured.height
    }

    /// Small uppercase "Biodata" caption above the name.
    fn caption(&self, block: &mut Block, x: f32, top: f32, width: f32, anchor: TextAnchor) -> f32 {
        let size = self.sizes.text_xs;
        let caption = self.labels.get(LabelKey::Biodata).to_uppercase();
        self.text(
            block,
            &caption,
            x,
            top,
            width,
            self.font(size, false, size * 0.15),
            400,
            &self.accent(),
            anchor,
            self.config.line_height,
        )
    }

    fn heading(&self, block: &mut Block, label: &str, x: f32, top: f32, width: f32) -> f32 {
        let size = self.sizes.text_base;
        let lh = self.config.line_height;
        let accent = self.accent();
        let pad = self.sizes.heading_padding;
        let used = match self.style.section_decoration {
            SectionDecoration::Underlined => {
                let text_h = self.text(
                    block,
                    label,
                    x,
                    top,
                    width,
                    self.font(size, true, 0.0),
                    600,
                    &accent,
                    TextAnchor::Start,
                    lh,
                );
                let rule_y = top + text_h + pad + 1.0;
                block.elements.push(Element::Line {
                    x1: x,
                    y1: rule_y,
                    x2: x + width,
                    y2: rule_y,
                    stroke: accent.clone(),
                    width: 2.0,
                    opacity: 1.0,
                });
                text_h + pad + 2.0
            }
            SectionDecoration::Boxed => {
                let inset = 8.0;
                let index = block.elements.len();
                let text_h = self.text(
                    block,
                    label,
                    x + inset,
                    top + inset,
                    width - inset * 2.0,
                    self.font(size, true, 0.0),
                    600,
                    &accent,
                    TextAnchor::Start,
                    lh,
                );
                let height = text_h + inset * 2.0;
                block.elements.insert(
                    index,
                    Element::Rect {
                        x,
                        y: top,
                        width,
                        height,
                        radius: 4.0,
                        fill: accent.clone(),
                        opacity: 0.08,
                    },
                );
                height
            }
            SectionDecoration::AccentBackground => {
                let (inset_x, inset_y) = (16.0, 12.0);
                let index = block.elements.len();
                let text_h = self.text(
                    block,
                    label,
                    x + inset_x,
                    top + inset_y,
                    width - inset_x * 2.0,
                    self.font(size, true, 0.0),
                    600,
                    INVERTED_TEXT,
                    TextAnchor::Start,
                    lh,
                );
                let height = text_h + inset_y * 2.0;
                block.elements.insert(
                    index,
                    Element::Rect {
                        x,
                        y: top,
                        width,
                        height,
                        radius: 2.0,
                        fill: accent.clone(),
                        opacity: 1.0,
                    },
                );
                height
            }
            SectionDecoration::Minimal => {
                let text_h = self.text(
                    block,
                    &label.to_uppercase(),
                    x,
                    top,
                    width,
                    self.font(size, true, size * 0.1),
                    600,
                    &accent,
                    TextAnchor::Start,
                    lh,
                );
                text_h + pad
            }
        };
        used + self.sizes.heading_gap
    }

    fn row(&self, block: &mut Block, row: &Row, x: f32, top: f32, width: f32) -> f32 {
        let size = self.sizes.text_sm;
        let lh = self.config.line_height;
        let pad = self.sizes.row_padding;
        let label_w = width * 0.4;
        let value_w = width - label_w;
        let label_h = self.text(
            block,
            &row.label,
            x,
            top + pad,
            label_w - 4.0,
            self.font(size, false, 0.0),
            400,
            LABEL_COLOR,
            TextAnchor::Start,
            lh,
        );
        let value_h = self.text(
            block,
            &row.value,
            x + label_w,
            top + pad,
            value_w,
            self.font(size, false, 0.0),
            500,
            VALUE_COLOR,
            TextAnchor::Start,
            lh,
        );
        label_h.max(value_h) + pad * 2.0
    }

    fn paragraph(&self, block: &mut Block, content: &str, x: f32, top: f32, width: f32, size: f32) -> f32 {
        self.text(
            block,
            content,
            x,
            top,
            width,
            self.font(size, false, 0.0),
            400,
            LABEL_COLOR,
            TextAnchor::Start,
            self.config.paragraph_line_height,
        ) + 8.0
    }

    /// Heading plus items of one section.
    fn section(&self, section: &Section, x: f32, top: f32, width: f32, paragraph_size: f32) -> Block {
        let mut block = Block::new(BlockKind::Section(section.kind), x, top, width);
        let mut y = top + self.heading(&mut block, &section.heading, x, top, width);
        for item in &section.items {
            y += match item {
                Item::Row(row) => self.row(&mut block, row, x, y, width),
                Item::Paragraph(content) => {
                    self.paragraph(&mut block, content, x, y, width, paragraph_size)
                }
            };
        }
        block.height = y - top;
        block
    }

    fn photo(&self, record: &BiodataRecord, x: f32, y: f32, width: f32, height: f32) -> Element {
        let source = match record.photo.as_deref() {
            Some(uri) if decode_data_uri(uri).is_some() => PhotoSource::Image(uri.trim().to_string()),
            Some(_) => {
                tracing::debug!("photo is not a decodable image, drawing placeholder");
                self.placeholder()
            }
            None => self.placeholder(),
        };
        Element::Photo {
            x,
            y,
            width,
            height,
            shape: self.style.photo_shape,
            border: self.accent(),
            source,
        }
    }

    fn placeholder(&self) -> PhotoSource {
        PhotoSource::Placeholder {
            icon_size: self.sizes.icon_size,
        }
    }

    fn divider(&self, x: f32, top: f32, width: f32) -> Option<Block> {
        let margin = self.config.divider_margin;
        let mut block = Block::new(BlockKind::Divider, x, top, width);
        match self.style.divider_style {
            DividerStyle::None => return None,
            DividerStyle::Line => {
                let y = top + margin + 0.5;
                block.elements.push(Element::Line {
                    x1: x,
                    y1: y,
                    x2: x + width,
                    y2: y,
                    stroke: self.accent(),
                    width: 1.0,
                    opacity: 0.19,
                });
                block.height = margin * 2.0 + 1.0;
            }
            DividerStyle::Dots => {
                let r = 3.0;
                let cx = x + width / 2.0;
                let cy = top + margin + r;
                for offset in [-10.0, 0.0, 10.0] {
                    block.elements.push(Element::Circle {
                        cx: cx + offset,
                        cy,
                        r,
                        fill: self.accent(),
                    });
                }
                block.height = margin * 2.0 + r * 2.0;
            }
        }
        Some(block)
    }
}

/// Baseline of the first line for text whose line box starts at `top`.
fn baseline(top: f32, size: f32, line_height: f32) -> f32 {
    top + size * (line_height - 1.0) / 2.0 + size * 0.8
}
