use biodata_renderer::config::{Config, ExportConfig, LayoutConfig};
use biodata_renderer::export::{ExportError, export_document, fit_to_page, rasterize};
use biodata_renderer::{
    BiodataRecord, LabelTable, Language, RenderMode, compute_layout, render_svg, resolve_template,
};

fn print_svg(template: &str, background: &str) -> String {
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..Default::default()
    };
    let record = BiodataRecord {
        full_name: "Asha Rao".to_string(),
        occupation: "Architect".to_string(),
        city: "Pune".to_string(),
        ..Default::default()
    };
    render_svg(&compute_layout(
        &record,
        &resolve_template(template),
        LabelTable::for_language(Language::Hindi),
        background,
        RenderMode::Print,
        &config,
    ))
}

fn quick_export() -> ExportConfig {
    ExportConfig {
        title: "Asha Rao".to_string(),
        ..Default::default()
    }
}

#[test]
fn fit_centres_on_the_unfilled_axis() {
    let page = ExportConfig::default();
    let wide = fit_to_page(3000.0, 1000.0, page.page_width_mm, page.page_height_mm);
    assert_eq!(wide.x, 0.0);
    assert!(wide.y > 0.0);
    assert!((wide.y * 2.0 + wide.height - page.page_height_mm).abs() < 1e-3);

    let tall = fit_to_page(1000.0, 3000.0, page.page_width_mm, page.page_height_mm);
    assert_eq!(tall.y, 0.0);
    assert!(tall.x > 0.0);
    assert!((tall.x * 2.0 + tall.width - page.page_width_mm).abs() < 1e-3);

    for placement in [wide, tall] {
        assert!(placement.width <= page.page_width_mm + 1e-3);
        assert!(placement.height <= page.page_height_mm + 1e-3);
    }
}

#[test]
fn print_render_rasterizes_at_a4_ratio() {
    let svg = print_svg("traditional-2", "#FFF8E7");
    let pixmap = rasterize(&svg, "#FFF8E7", 1.0).expect("raster");
    let ratio = pixmap.width() as f32 / pixmap.height() as f32;
    assert!((ratio - 210.0 / 297.0).abs() < 0.002, "ratio {ratio}");
}

#[test]
fn oversampling_multiplies_pixels() {
    let svg = print_svg("modern-1", "#FFFFFF");
    let one = rasterize(&svg, "#FFFFFF", 1.0).expect("1x");
    let three = rasterize(&svg, "#FFFFFF", 3.0).expect("3x");
    assert!(three.width() >= one.width() * 3 - 3);
    assert!(Config::default().export.oversample >= 3.0);
}

#[test]
fn export_writes_pdf_and_png() {
    let svg = print_svg("minimalist-2", "#F0F9FF");
    let artifact = export_document(&svg, "#F0F9FF", &quick_export()).expect("export");
    assert!(artifact.pdf.starts_with(b"%PDF"));
    assert!(artifact.png.starts_with(&[0x89, b'P', b'N', b'G']));
    assert!(artifact.placement.x.abs() < 0.5 && artifact.placement.y.abs() < 0.5);
    assert!(artifact.pdf.windows(5).any(|w| w == b"%%EOF"));
}

#[test]
fn pdf_stays_close_to_png_size() {
    let svg = print_svg("traditional-1", "#FFFFFF");
    let artifact = export_document(&svg, "#FFFFFF", &quick_export()).expect("export");
    assert!(artifact.pixel_width >= 2380);
    let raw_rgb = artifact.pixel_width as usize * artifact.pixel_height as usize * 3;
    assert!(
        artifact.pdf.len() < artifact.png.len() * 6 + 64 * 1024,
        "pdf {} bytes, png {} bytes",
        artifact.pdf.len(),
        artifact.png.len()
    );
    assert!(artifact.pdf.len() * 10 < raw_rgb);
}

#[test]
fn invalid_svg_is_a_recoverable_error() {
    let err = export_document("not svg", "#FFFFFF", &quick_export()).unwrap_err();
    assert!(matches!(err, ExportError::Parse(_)));
    assert!(err.to_string().contains("svg"));
}
