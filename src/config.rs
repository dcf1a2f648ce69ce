use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel sizes for one output profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeProfile {
    pub text_xs: f32,
    pub text_sm: f32,
    pub text_base: f32,
    pub text_lg: f32,
    pub text_xl: f32,
    pub text_2xl: f32,
    pub padding_base: f32,
    pub padding_lg: f32,
    pub row_padding: f32,
    pub heading_gap: f32,
    pub heading_padding: f32,
    pub photo_size: f32,
    pub side_photo_width: f32,
    pub side_photo_height: f32,
    pub icon_size: f32,
}

impl SizeProfile {
    pub fn preview() -> Self {
        Self {
            text_xs: 10.0,
            text_sm: 12.0,
            text_base: 14.0,
            text_lg: 16.0,
            text_xl: 18.0,
            text_2xl: 24.0,
            padding_base: 24.0,
            padding_lg: 32.0,
            row_padding: 4.0,
            heading_gap: 12.0,
            heading_padding: 4.0,
            photo_size: 96.0,
            side_photo_width: 112.0,
            side_photo_height: 144.0,
            icon_size: 40.0,
        }
    }

    pub fn print() -> Self {
        Self {
            text_xs: 12.0,
            text_sm: 14.0,
            text_base: 16.0,
            text_lg: 18.0,
            text_xl: 20.0,
            text_2xl: 28.0,
            padding_base: 32.0,
            padding_lg: 48.0,
            row_padding: 8.0,
            heading_gap: 16.0,
            heading_padding: 8.0,
            photo_size: 128.0,
            side_photo_width: 160.0,
            side_photo_height: 200.0,
            icon_size: 56.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Page width of the on-screen preview; height follows the A4 ratio.
    pub preview_width: f32,
    pub line_height: f32,
    pub paragraph_line_height: f32,
    pub column_gap: f32,
    pub section_gap: f32,
    pub header_gap: f32,
    pub divider_margin: f32,
    /// Skip font lookups and use the built-in width table.
    pub fast_text_metrics: bool,
    pub preview: SizeProfile,
    pub print: SizeProfile,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            preview_width: 595.0,
            line_height: 1.5,
            paragraph_line_height: 1.6,
            column_gap: 32.0,
            section_gap: 16.0,
            header_gap: 24.0,
            divider_margin: 16.0,
            fast_text_metrics: false,
            preview: SizeProfile::preview(),
            print: SizeProfile::print(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub background: String,
    /// Scale applied by the plain PNG writer.
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            png_scale: 1.0,
        }
    }
}

/// Lowest rasterization factor an export accepts.
pub const MIN_OVERSAMPLE: f32 = 3.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    pub oversample: f32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub image_dpi: f32,
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            oversample: MIN_OVERSAMPLE,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            image_dpi: 300.0,
            title: "Marriage Biodata".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    pub chat_base_url: String,
    pub chat_message: String,
    pub share_title: String,
    pub share_text: String,
    pub email_subject: String,
    pub email_body: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            chat_base_url: "https://wa.me/".to_string(),
            chat_message:
                "Here's my marriage biodata. Please review and let me know your thoughts!"
                    .to_string(),
            share_title: "Marriage Biodata".to_string(),
            share_text: "Here is my marriage biodata".to_string(),
            email_subject: "Marriage Biodata".to_string(),
            email_body: "Dear,\n\nPlease find attached my marriage biodata for your review.\n\nLooking forward to hearing from you.\n\nBest regards".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SizeProfileFile {
    text_xs: Option<f32>,
    text_sm: Option<f32>,
    text_base: Option<f32>,
    text_lg: Option<f32>,
    text_xl: Option<f32>,
    text_2xl: Option<f32>,
    padding_base: Option<f32>,
    padding_lg: Option<f32>,
    row_padding: Option<f32>,
    heading_gap: Option<f32>,
    heading_padding: Option<f32>,
    photo_size: Option<f32>,
    side_photo_width: Option<f32>,
    side_photo_height: Option<f32>,
    icon_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    preview_width: Option<f32>,
    line_height: Option<f32>,
    paragraph_line_height: Option<f32>,
    column_gap: Option<f32>,
    section_gap: Option<f32>,
    header_gap: Option<f32>,
    divider_margin: Option<f32>,
    fast_text_metrics: Option<bool>,
    preview: Option<SizeProfileFile>,
    print: Option<SizeProfileFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportConfigFile {
    oversample: Option<f32>,
    page_width_mm: Option<f32>,
    page_height_mm: Option<f32>,
    image_dpi: Option<f32>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareConfigFile {
    chat_base_url: Option<String>,
    chat_message: Option<String>,
    share_title: Option<String>,
    share_text: Option<String>,
    email_subject: Option<String>,
    email_body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    background: Option<String>,
    png_scale: Option<f32>,
    layout: Option<LayoutConfigFile>,
    export: Option<ExportConfigFile>,
    share: Option<ShareConfigFile>,
}

macro_rules! override_fields {
    ($target:expr, $source:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(v) = $source.$field {
                $target.$field = v;
            }
        )*
    };
}

fn apply_profile(profile: &mut SizeProfile, file: SizeProfileFile) {
    override_fields!(
        profile,
        file,
        [
            text_xs,
            text_sm,
            text_base,
            text_lg,
            text_xl,
            text_2xl,
            padding_base,
            padding_lg,
            row_padding,
            heading_gap,
            heading_padding,
            photo_size,
            side_photo_width,
            side_photo_height,
            icon_size,
        ]
    );
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(v) = parsed.background {
        config.render.background = v;
    }
    if let Some(v) = parsed.png_scale {
        config.render.png_scale = v.max(0.1);
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(preview) = layout.preview {
            apply_profile(&mut target.preview, preview);
        }
        if let Some(print) = layout.print {
            apply_profile(&mut target.print, print);
        }
        override_fields!(
            target,
            layout,
            [
                preview_width,
                line_height,
                paragraph_line_height,
                column_gap,
                section_gap,
                header_gap,
                divider_margin,
                fast_text_metrics,
            ]
        );
    }

    if let Some(export) = parsed.export {
        override_fields!(
            config.export,
            export,
            [oversample, page_width_mm, page_height_mm, image_dpi, title]
        );
        config.export.oversample = config.export.oversample.max(MIN_OVERSAMPLE);
    }

    if let Some(share) = parsed.share {
        override_fields!(
            config.share,
            share,
            [
                chat_base_url,
                chat_message,
                share_title,
                share_text,
                email_subject,
                email_body,
            ]
        );
    }

    Ok(config)
}
