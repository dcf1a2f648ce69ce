use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE_ID: &str = "traditional-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Traditional,
    Modern,
    Minimalist,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Traditional, Category::Modern, Category::Minimalist];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Traditional => "traditional",
            Category::Modern => "modern",
            Category::Minimalist => "minimalist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderLayout {
    Centered,
    LeftAligned,
    SidePhoto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionDecoration {
    Underlined,
    Boxed,
    Minimal,
    AccentBackground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoShape {
    Circle,
    Rounded,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoPosition {
    TopCenter,
    TopRight,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    Line,
    Dots,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Serif,
    Sans,
}

impl FontFamily {
    pub fn stack(self) -> &'static str {
        match self {
            FontFamily::Serif => "Playfair Display, Georgia, Noto Serif Devanagari, serif",
            FontFamily::Sans => "Outfit, Helvetica, Arial, Noto Sans Devanagari, sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub accent_color: &'static str,
    pub header_layout: HeaderLayout,
    pub section_decoration: SectionDecoration,
    pub photo_shape: PhotoShape,
    pub photo_position: PhotoPosition,
    pub divider_style: DividerStyle,
    pub font_family: FontFamily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub style: StyleConfig,
}

impl TemplateDescriptor {
    pub fn accent_color(&self) -> &'static str {
        self.style.accent_color
    }
}

const fn style(
    accent_color: &'static str,
    header_layout: HeaderLayout,
    section_decoration: SectionDecoration,
    photo_shape: PhotoShape,
    photo_position: PhotoPosition,
    divider_style: DividerStyle,
    font_family: FontFamily,
) -> StyleConfig {
    StyleConfig {
        accent_color,
        header_layout,
        section_decoration,
        photo_shape,
        photo_position,
        divider_style,
        font_family,
    }
}

static TEMPLATES: [TemplateDescriptor; 9] = [
    TemplateDescriptor {
        id: "traditional-1",
        name: "Royal Gold",
        category: Category::Traditional,
        style: style(
            "#8B4513",
            HeaderLayout::Centered,
            SectionDecoration::Underlined,
            PhotoShape::Circle,
            PhotoPosition::TopCenter,
            DividerStyle::Line,
            FontFamily::Serif,
        ),
    },
    TemplateDescriptor {
        id: "traditional-2",
        name: "Classic Maroon",
        category: Category::Traditional,
        style: style(
            "#800020",
            HeaderLayout::Centered,
            SectionDecoration::AccentBackground,
            PhotoShape::Rounded,
            PhotoPosition::TopCenter,
            DividerStyle::Line,
            FontFamily::Serif,
        ),
    },
    TemplateDescriptor {
        id: "traditional-3",
        name: "Heritage Green",
        category: Category::Traditional,
        style: style(
            "#2F5233",
            HeaderLayout::LeftAligned,
            SectionDecoration::Boxed,
            PhotoShape::Circle,
            PhotoPosition::TopRight,
            DividerStyle::Line,
            FontFamily::Serif,
        ),
    },
    TemplateDescriptor {
        id: "modern-1",
        name: "Clean Blue",
        category: Category::Modern,
        style: style(
            "#3B82F6",
            HeaderLayout::SidePhoto,
            SectionDecoration::Minimal,
            PhotoShape::Rounded,
            PhotoPosition::Side,
            DividerStyle::None,
            FontFamily::Sans,
        ),
    },
    TemplateDescriptor {
        id: "modern-2",
        name: "Soft Rose",
        category: Category::Modern,
        style: style(
            "#7C3AED",
            HeaderLayout::LeftAligned,
            SectionDecoration::Underlined,
            PhotoShape::Square,
            PhotoPosition::TopRight,
            DividerStyle::Line,
            FontFamily::Sans,
        ),
    },
    TemplateDescriptor {
        id: "modern-3",
        name: "Urban Gray",
        category: Category::Modern,
        style: style(
            "#0D9488",
            HeaderLayout::Centered,
            SectionDecoration::Boxed,
            PhotoShape::Circle,
            PhotoPosition::TopCenter,
            DividerStyle::Dots,
            FontFamily::Sans,
        ),
    },
    TemplateDescriptor {
        id: "minimalist-1",
        name: "Pure White",
        category: Category::Minimalist,
        style: style(
            "#374151",
            HeaderLayout::Centered,
            SectionDecoration::Minimal,
            PhotoShape::Circle,
            PhotoPosition::TopCenter,
            DividerStyle::None,
            FontFamily::Sans,
        ),
    },
    TemplateDescriptor {
        id: "minimalist-2",
        name: "Warm Beige",
        category: Category::Minimalist,
        style: style(
            "#78716C",
            HeaderLayout::LeftAligned,
            SectionDecoration::Underlined,
            PhotoShape::Rounded,
            PhotoPosition::TopRight,
            DividerStyle::Line,
            FontFamily::Sans,
        ),
    },
    TemplateDescriptor {
        id: "minimalist-3",
        name: "Sage Green",
        category: Category::Minimalist,
        style: style(
            "#1F2937",
            HeaderLayout::SidePhoto,
            SectionDecoration::Minimal,
            PhotoShape::Square,
            PhotoPosition::Side,
            DividerStyle::None,
            FontFamily::Sans,
        ),
    },
];

pub fn templates() -> &'static [TemplateDescriptor] {
    &TEMPLATES
}

pub fn templates_in(category: Category) -> impl Iterator<Item = &'static TemplateDescriptor> {
    TEMPLATES.iter().filter(move |t| t.category == category)
}

pub fn find_template(id: &str) -> Option<&'static TemplateDescriptor> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn default_template() -> &'static TemplateDescriptor {
    &TEMPLATES[0]
}

/// Look up a template id. Unknown ids resolve to the default template
/// without error.
pub fn resolve_template(id: &str) -> StyleConfig {
    match find_template(id) {
        Some(template) => template.style,
        None => {
            tracing::debug!(template = id, "unknown template, using {DEFAULT_TEMPLATE_ID}");
            default_template().style
        }
    }
}
