pub mod about_me;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod labels;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod photo;
pub mod record;
pub mod render;
pub mod share;
pub mod templates;
pub mod text_metrics;
pub mod wizard;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use export::{ExportArtifact, ExportError, export_document};
pub use labels::{LabelTable, Language};
pub use layout::{Document, RenderMode, compute_layout};
pub use record::{BiodataRecord, RecordPatch, parse_record};
pub use render::render_svg;
pub use templates::{StyleConfig, resolve_template};
pub use wizard::{Step, WizardController, WizardError};
