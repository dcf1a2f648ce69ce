use crate::labels::Language;
use crate::layout::{BlockKind, Document, Element};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub template: String,
    pub language: Language,
    pub mode: String,
    pub header_layout: String,
    pub width: f32,
    pub height: f32,
    pub page_mm: Option<[f32; 2]>,
    pub background: String,
    pub blocks: Vec<BlockDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDump {
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub text: Vec<String>,
    pub element_count: usize,
    pub photo: Option<PhotoDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape: String,
    pub placeholder: bool,
}

impl LayoutDump {
    pub fn from_document(doc: &Document, template: &str, language: Language) -> Self {
        let blocks = doc
            .blocks
            .iter()
            .map(|block| BlockDump {
                kind: match block.kind {
                    BlockKind::Section(section) => format!("{section:?}"),
                    other => format!("{other:?}"),
                },
                x: block.x,
                y: block.y,
                width: block.width,
                height: block.height,
                text: block.text().into_iter().map(str::to_string).collect(),
                element_count: block.elements.len(),
                photo: block.elements.iter().find_map(|element| match element {
                    Element::Photo {
                        x,
                        y,
                        width,
                        height,
                        shape,
                        source,
                        ..
                    } => Some(PhotoDump {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                        shape: format!("{shape:?}"),
                        placeholder: !matches!(source, crate::layout::PhotoSource::Image(_)),
                    }),
                    _ => None,
                }),
            })
            .collect();

        LayoutDump {
            template: template.to_string(),
            language,
            mode: format!("{:?}", doc.mode),
            header_layout: format!("{:?}", doc.header_layout),
            width: doc.width,
            height: doc.height,
            page_mm: doc.page_mm.map(|(w, h)| [w, h]),
            background: doc.background.clone(),
            blocks,
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    doc: &Document,
    template: &str,
    language: Language,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_document(doc, template, language);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
