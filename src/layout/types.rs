use serde::Serialize;

use crate::templates::{FontFamily, HeaderLayout, PhotoShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Width-constrained on-screen render.
    Preview,
    /// Full-size A4 render that feeds the export pipeline.
    Print,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f32,
    pub weight: u16,
    pub fill: String,
    pub anchor: TextAnchor,
    /// Extra spacing between glyphs, in pixels.
    pub letter_spacing: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhotoSource {
    /// Validated data URI.
    Image(String),
    Placeholder { icon_size: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: String,
        opacity: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: String,
        width: f32,
        opacity: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: String,
    },
    /// Multi-line text; `y` is the baseline of the first line.
    Text {
        x: f32,
        y: f32,
        lines: Vec<String>,
        style: TextStyle,
    },
    Photo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shape: PhotoShape,
        border: String,
        source: PhotoSource,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Personal,
    Career,
    Family,
    AboutMe,
    Preferences,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "section", rename_all = "camelCase")]
pub enum BlockKind {
    Background,
    Sidebar,
    Header,
    Divider,
    Section(SectionKind),
    Footer,
}

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
}

impl Block {
    pub fn new(kind: BlockKind, x: f32, y: f32, width: f32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height: 0.0,
            elements: Vec::new(),
        }
    }

    /// All text lines in paint order.
    pub fn text(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { lines, .. } => Some(lines.iter().map(String::as_str)),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

/// A positioned page, ready to be painted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub mode: RenderMode,
    pub header_layout: HeaderLayout,
    pub width: f32,
    pub height: f32,
    /// Physical page size, only set for print renders.
    pub page_mm: Option<(f32, f32)>,
    pub background: String,
    pub font_family: FontFamily,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn section(&self, kind: SectionKind) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.kind == BlockKind::Section(kind))
    }

    pub fn sections(&self) -> Vec<SectionKind> {
        self.blocks
            .iter()
            .filter_map(|block| match block.kind {
                BlockKind::Section(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|block| block.kind == kind)
    }

    pub fn photo(&self) -> Option<&Element> {
        self.blocks
            .iter()
            .flat_map(|block| block.elements.iter())
            .find(|element| matches!(element, Element::Photo { .. }))
    }
}
