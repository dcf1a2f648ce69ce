use crate::config::{ExportConfig, MIN_OVERSAMPLE};
use once_cell::sync::Lazy;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use serde::Serialize;
use std::io::BufWriter;
use std::sync::Arc;
use thiserror::Error;
use usvg::fontdb;

static FONT_DB: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts for rasterization");
    Arc::new(db)
});

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to parse rendered svg: {0}")]
    Parse(#[from] usvg::Error),
    #[error("invalid background color {0:?}")]
    Color(String),
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocate { width: u32, height: u32 },
    #[error("failed to encode png: {0}")]
    Encode(String),
    #[error("failed to decode png: {0}")]
    Decode(String),
    #[error("failed to build pdf: {0}")]
    Document(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Image rectangle on the page, in millimetres from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub pdf: Vec<u8>,
    pub png: Vec<u8>,
    pub placement: Placement,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Parse `#RGB` or `#RRGGBB` into an opaque color.
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&format!("{c}{c}")));
            (it.next()??, it.next()??, it.next()??)
        }
        6 => (
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        ),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, 255))
}

/// Rasterize `svg` at `scale`, on a canvas pre-filled with `background`.
pub fn rasterize(svg: &str, background: &str, scale: f32) -> Result<Pixmap, ExportError> {
    let fill = parse_hex_color(background).ok_or_else(|| ExportError::Color(background.to_string()))?;
    let mut opt = usvg::Options::default();
    opt.fontdb = FONT_DB.clone();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size();
    let scale = scale.max(0.1);
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Allocate { width, height })?;
    pixmap.fill(fill);
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    tracing::debug!(width, height, scale, "rasterized document");
    Ok(pixmap)
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    pixmap
        .encode_png()
        .map_err(|err| ExportError::Encode(err.to_string()))
}

/// Fit an image into the page keeping its aspect ratio, centring the spare
/// margin on the axis that is not filled.
pub fn fit_to_page(image_width: f32, image_height: f32, page_width: f32, page_height: f32) -> Placement {
    if image_width <= 0.0 || image_height <= 0.0 {
        return Placement {
            x: 0.0,
            y: 0.0,
            width: page_width,
            height: page_height,
        };
    }
    let ratio = (page_width / image_width).min(page_height / image_height);
    let width = image_width * ratio;
    let height = image_height * ratio;
    Placement {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    }
}

/// Single-page PDF holding the PNG at `placement`.
pub fn build_pdf(png: &[u8], placement: Placement, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    use printpdf::{Image, ImageTransform, Mm, PdfDocument};

    let image = printpdf::image_crate::load_from_memory(png)
        .map_err(|err| ExportError::Decode(err.to_string()))?;
    // The canvas is opaque, so alpha carries nothing.
    let image = printpdf::image_crate::DynamicImage::ImageRgb8(image.to_rgb8());
    let dpi = config.image_dpi.max(1.0);
    let natural_width_mm = image.width() as f32 / dpi * 25.4;
    let natural_height_mm = image.height() as f32 / dpi * 25.4;

    let (doc, page, layer) = PdfDocument::new(
        config.title.as_str(),
        Mm(config.page_width_mm),
        Mm(config.page_height_mm),
        "Layer 1",
    );
    let current_layer = doc.get_page(page).get_layer(layer);
    let transform = ImageTransform {
        translate_x: Some(Mm(placement.x)),
        // PDF space grows upwards from the bottom edge.
        translate_y: Some(Mm(config.page_height_mm - placement.y - placement.height)),
        rotate: None,
        scale_x: Some(placement.width / natural_width_mm),
        scale_y: Some(placement.height / natural_height_mm),
        dpi: Some(dpi),
    };
    Image::from_dynamic_image(&image).add_to_layer(current_layer, transform);

    let mut buffer = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buffer);
        doc.save(&mut writer)
            .map_err(|err| ExportError::Document(err.to_string()))?;
    }
    compress_streams(&buffer)
}

/// Flate-compress every stream that has no filter yet. printpdf leaves the
/// raw RGB image stream uncompressed outside release builds.
fn compress_streams(pdf: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut document = printpdf::lopdf::Document::load_mem(pdf)
        .map_err(|err| ExportError::Document(err.to_string()))?;
    document.compress();
    let mut buffer = Vec::with_capacity(pdf.len() / 4);
    document
        .save_to(&mut buffer)
        .map_err(|err| ExportError::Document(err.to_string()))?;
    Ok(buffer)
}

/// Rasterize a print render and package it as PNG and PDF.
pub fn export_document(svg: &str, background: &str, config: &ExportConfig) -> Result<ExportArtifact, ExportError> {
    let pixmap = rasterize(svg, background, config.oversample.max(MIN_OVERSAMPLE))?;
    let png = encode_png(&pixmap)?;
    let placement = fit_to_page(
        pixmap.width() as f32,
        pixmap.height() as f32,
        config.page_width_mm,
        config.page_height_mm,
    );
    let pdf = build_pdf(&png, placement, config)?;
    tracing::info!(
        width = pixmap.width(),
        height = pixmap.height(),
        pdf_bytes = pdf.len(),
        "exported document"
    );
    Ok(ExportArtifact {
        pdf,
        png,
        placement,
        pixel_width: pixmap.width(),
        pixel_height: pixmap.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"21\" height=\"29.7\" viewBox=\"0 0 21 29.7\"><rect x=\"2\" y=\"2\" width=\"5\" height=\"5\" fill=\"#800020\"/></svg>";

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(parse_hex_color("#fff"), Some(Color::WHITE));
        assert_eq!(
            parse_hex_color("#F0F9FF"),
            Some(Color::from_rgba8(0xF0, 0xF9, 0xFF, 255))
        );
        assert_eq!(parse_hex_color("F0F9FF"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn wide_content_is_letterboxed() {
        let placement = fit_to_page(400.0, 100.0, 210.0, 297.0);
        assert_eq!(placement.x, 0.0);
        assert!(placement.y > 0.0);
        assert!((placement.width - 210.0).abs() < 1e-4);
        assert!((placement.height - 52.5).abs() < 1e-4);
    }

    #[test]
    fn tall_content_is_pillarboxed() {
        let placement = fit_to_page(100.0, 400.0, 210.0, 297.0);
        assert_eq!(placement.y, 0.0);
        assert!(placement.x > 0.0);
        assert!((placement.height - 297.0).abs() < 1e-4);
    }

    #[test]
    fn a4_content_fills_page() {
        let placement = fit_to_page(2381.0, 2381.0 * 297.0 / 210.0, 210.0, 297.0);
        assert!(placement.x.abs() < 1e-3 && placement.y.abs() < 1e-3);
    }

    #[test]
    fn rasterize_applies_scale_and_background() {
        let pixmap = rasterize(TINY_SVG, "#F0F9FF", 3.0).expect("pixmap");
        assert_eq!(pixmap.width(), 63);
        assert_eq!(pixmap.height(), 90);
        let corner = pixmap.pixel(62, 89).expect("pixel");
        assert_eq!((corner.red(), corner.green(), corner.blue()), (0xF0, 0xF9, 0xFF));
    }

    #[test]
    fn rasterize_rejects_bad_input() {
        assert!(matches!(rasterize(TINY_SVG, "blue", 1.0), Err(ExportError::Color(_))));
        assert!(matches!(rasterize("<nope", "#FFFFFF", 1.0), Err(ExportError::Parse(_))));
    }

    #[test]
    fn export_produces_png_and_pdf() {
        let artifact = export_document(TINY_SVG, "#FFFFFF", &ExportConfig::default()).expect("export");
        assert!(artifact.png.starts_with(&[0x89, b'P', b'N', b'G']));
        assert!(artifact.pdf.starts_with(b"%PDF"));
        assert_eq!(artifact.pixel_width, 63);
    }

    #[test]
    fn export_never_rasterizes_below_minimum() {
        let config = ExportConfig {
            oversample: 1.0,
            ..Default::default()
        };
        let artifact = export_document(TINY_SVG, "#FFFFFF", &config).expect("export");
        assert_eq!((artifact.pixel_width, artifact.pixel_height), (63, 90));
    }

    #[test]
    fn pdf_image_stream_is_flate_compressed() {
        let artifact = export_document(TINY_SVG, "#FFFFFF", &ExportConfig::default()).expect("export");
        let raw_rgb = (artifact.pixel_width * artifact.pixel_height * 3) as usize;
        assert!(artifact.pdf.windows(11).any(|w| w == b"FlateDecode"));
        let document = printpdf::lopdf::Document::load_mem(&artifact.pdf).expect("reload");
        let image = document
            .objects
            .values()
            .filter_map(|object| object.as_stream().ok())
            .find(|stream| {
                stream.dict.get(b"Subtype").and_then(|s| s.as_name_str()).ok() == Some("Image")
            })
            .expect("image stream");
        assert!(image.content.len() < raw_rgb);
    }

    #[test]
    fn build_pdf_rejects_garbage() {
        let placement = fit_to_page(1.0, 1.0, 210.0, 297.0);
        assert!(matches!(
            build_pdf(b"not a png", placement, &ExportConfig::default()),
            Err(ExportError::Decode(_))
        ));
    }
}
