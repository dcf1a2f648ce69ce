use crate::config::RenderConfig;
use crate::export;
use crate::layout::{Document, Element, PhotoSource, TextStyle};
use crate::templates::PhotoShape;
use anyhow::Result;
use std::fmt::Write as _;
use std::path::Path;

const USER_ICON: &str = "<path d=\"M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2\"/><circle cx=\"12\" cy=\"7\" r=\"4\"/>";

pub fn render_svg(doc: &Document) -> String {
    let mut svg = String::new();
    let (width, height) = (doc.width, doc.height);
    let (outer_w, outer_h) = match doc.page_mm {
        Some((w_mm, h_mm)) => (format!("{w_mm}mm"), format!("{h_mm}mm")),
        None => (format!("{width:.2}"), format!("{height:.2}")),
    };

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{outer_w}\" height=\"{outer_h}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    );

    let photos: Vec<&Element> = doc
        .blocks
        .iter()
        .flat_map(|block| block.elements.iter())
        .filter(|element| matches!(element, Element::Photo { .. }))
        .collect();
    if !photos.is_empty() {
        svg.push_str("<defs>");
        for (idx, photo) in photos.iter().enumerate() {
            if let Element::Photo {
                x,
                y,
                width,
                height,
                shape,
                ..
            } = photo
            {
                let _ = write!(
                    svg,
                    "<clipPath id=\"photo-clip-{idx}\">{}</clipPath>",
                    shape_svg(*shape, *x, *y, *width, *height, "")
                );
            }
        }
        svg.push_str("</defs>");
    }

    let _ = write!(
        svg,
        "<g font-family=\"{}\">",
        escape_xml(doc.font_family.stack())
    );
    let mut photo_idx = 0;
    for block in &doc.blocks {
        for element in &block.elements {
            match element {
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    radius,
                    fill,
                    opacity,
                } => {
                    let _ = write!(
                        svg,
                        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" fill=\"{}\"{}/>",
                        escape_xml(fill),
                        opacity_attr("fill-opacity", *opacity)
                    );
                }
                Element::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                    width,
                    opacity,
                } => {
                    let _ = write!(
                        svg,
                        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{width:.2}\"{}/>",
                        escape_xml(stroke),
                        opacity_attr("stroke-opacity", *opacity)
                    );
                }
                Element::Circle { cx, cy, r, fill } => {
                    let _ = write!(
                        svg,
                        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
                        escape_xml(fill)
                    );
                }
                Element::Text { x, y, lines, style } => {
                    svg.push_str(&text_svg(*x, *y, lines, style));
                }
                Element::Photo {
                    x,
                    y,
                    width,
                    height,
                    shape,
                    border,
                    source,
                } => {
                    svg.push_str(&photo_svg(
                        photo_idx, *x, *y, *width, *height, *shape, border, source,
                    ));
                    photo_idx += 1;
                }
            }
        }
    }
    svg.push_str("</g></svg>");
    svg
}

fn opacity_attr(name: &str, opacity: f32) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(" {name}=\"{opacity:.2}\"")
    }
}

fn shape_svg(shape: PhotoShape, x: f32, y: f32, width: f32, height: f32, attrs: &str) -> String {
    match shape {
        PhotoShape::Circle => format!(
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\"{attrs}/>",
            x + width / 2.0,
            y + height / 2.0,
            width / 2.0,
            height / 2.0
        ),
        PhotoShape::Rounded => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"12\"{attrs}/>"
        ),
        PhotoShape::Square => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\"{attrs}/>"
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn photo_svg(
    idx: usize,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    shape: PhotoShape,
    border: &str,
    source: &PhotoSource,
) -> String {
    let border = escape_xml(border);
    let mut out = String::new();
    let _ = write!(out, "<g clip-path=\"url(#photo-clip-{idx})\">");
    out.push_str(&shape_svg(
        shape,
        x,
        y,
        width,
        height,
        &format!(" fill=\"{border}\" fill-opacity=\"0.06\""),
    ));
    match source {
        PhotoSource::Image(uri) => {
            let _ = write!(
                out,
                "<image x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" preserveAspectRatio=\"xMidYMid slice\" xlink:href=\"{}\"/>",
                escape_xml(uri)
            );
        }
        PhotoSource::Placeholder { icon_size } => {
            let scale = icon_size / 24.0;
            let ix = x + (width - icon_size) / 2.0;
            let iy = y + (height - icon_size) / 2.0;
            let _ = write!(
                out,
                "<g transform=\"translate({ix:.2} {iy:.2}) scale({scale:.4})\" fill=\"none\" stroke=\"{border}\" stroke-opacity=\"0.5\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\">{USER_ICON}</g>"
            );
        }
    }
    out.push_str("</g>");
    // Border is drawn outside the clip so the full stroke stays visible.
    out.push_str(&shape_svg(
        shape,
        x,
        y,
        width,
        height,
        &format!(" fill=\"none\" stroke=\"{border}\" stroke-width=\"2\""),
    ));
    out
}

fn text_svg(x: f32, y: f32, lines: &[String], style: &TextStyle) -> String {
    let mut text = String::new();
    let spacing = if style.letter_spacing > 0.0 {
        format!(" letter-spacing=\"{:.2}\"", style.letter_spacing)
    } else {
        String::new()
    };
    let _ = write!(
        text,
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\"{spacing}>",
        style.anchor.as_svg(),
        style.font_size,
        style.weight,
        escape_xml(&style.fill)
    );
    let dy = style.font_size * style.line_height;
    for (idx, line) in lines.iter().enumerate() {
        let offset = if idx == 0 { 0.0 } else { dy };
        let _ = write!(
            text,
            "<tspan x=\"{x:.2}\" dy=\"{offset:.2}\">{}</tspan>",
            escape_xml(line)
        );
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let raster = export::rasterize(svg, &render_cfg.background, render_cfg.png_scale)?;
    std::fs::write(output, export::encode_png(&raster)?)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::labels::{LabelTable, Language};
    use crate::layout::{RenderMode, compute_layout};
    use crate::record::BiodataRecord;
    use crate::templates::resolve_template;

    fn document(record: &BiodataRecord, template: &str, mode: RenderMode) -> Document {
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..Default::default()
        };
        compute_layout(
            record,
            &resolve_template(template),
            LabelTable::for_language(Language::English),
            "#F0F9FF",
            mode,
            &config,
        )
    }

    #[test]
    fn render_svg_basic() {
        let record = BiodataRecord {
            full_name: "Asha & Co".to_string(),
            ..Default::default()
        };
        let svg = render_svg(&document(&record, "traditional-1", RenderMode::Preview));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Asha &amp; Co"));
        assert!(svg.contains("fill=\"#F0F9FF\""));
        assert!(svg.contains("Playfair Display"));
    }

    #[test]
    fn print_render_declares_millimetres() {
        let svg = render_svg(&document(&BiodataRecord::default(), "modern-1", RenderMode::Print));
        assert!(svg.contains("width=\"210mm\" height=\"297mm\""));
        assert!(svg.contains("viewBox=\"0 0 793.70 1122.52\""));
    }

    #[test]
    fn placeholder_photo_is_clipped_and_bordered() {
        let svg = render_svg(&document(&BiodataRecord::default(), "traditional-1", RenderMode::Preview));
        assert!(svg.contains("<clipPath id=\"photo-clip-0\"><ellipse"));
        assert!(svg.contains("clip-path=\"url(#photo-clip-0)\""));
        assert!(svg.contains("<circle cx=\"12\" cy=\"7\" r=\"4\"/>"));
        assert!(svg.contains("stroke=\"#8B4513\" stroke-width=\"2\""));
    }

    #[test]
    fn photos_are_cropped_to_fill() {
        let uri = crate::photo::encode_data_uri(&crate::photo::tests::sample_png()).expect("uri");
        let record = BiodataRecord {
            photo: Some(uri),
            ..Default::default()
        };
        let svg = render_svg(&document(&record, "modern-2", RenderMode::Preview));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid slice\""));
        assert!(svg.contains("xlink:href=\"data:image/png;base64,"));
    }

    #[test]
    fn minimal_headings_are_letter_spaced() {
        let record = BiodataRecord {
            age: "27".to_string(),
            ..Default::default()
        };
        let svg = render_svg(&document(&record, "minimalist-1", RenderMode::Preview));
        assert!(svg.contains("PERSONAL DETAILS"));
        assert!(svg.contains("letter-spacing="));
    }

    #[test]
    fn write_output_svg_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.svg");
        write_output_svg("<svg/>", Some(&path)).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "<svg/>");
    }
}
