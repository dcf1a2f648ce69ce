use crate::about_me::{AboutMeGenerator, AboutMeHints};
use crate::config::{Config, ExportConfig};
use crate::export::{self, ExportArtifact, ExportError};
use crate::labels::{LabelTable, Language};
use crate::layout::{Document, RenderMode, compute_layout};
use crate::record::{BiodataRecord, RecordPatch};
use crate::render::render_svg;
use crate::share::{self, ShareCapability, ShareOutcome, ShareTarget};
use crate::templates::{DEFAULT_TEMPLATE_ID, StyleConfig, resolve_template};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Form,
    Template,
    Download,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Form, Step::Template, Step::Download];

    pub fn next(self) -> Self {
        match self {
            Step::Form => Step::Template,
            Step::Template | Step::Download => Step::Download,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Step::Form | Step::Template => Step::Form,
            Step::Download => Step::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message for the user (a toast in a graphical host).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn info(title: &str, description: &str) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    fn error(title: &str, description: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("{0} is already running")]
    Busy(&'static str),
    #[error("no exported document yet")]
    NotExported,
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Everything the CPU-bound export stage needs, detached from the controller.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub svg: String,
    pub background: String,
    pub config: ExportConfig,
}

impl ExportJob {
    pub fn run(&self) -> Result<ExportArtifact, ExportError> {
        export::export_document(&self.svg, &self.background, &self.config)
    }
}

/// Session state for the three-step flow.
#[derive(Debug)]
pub struct WizardController {
    step: Step,
    record: BiodataRecord,
    template_id: String,
    language: Language,
    background: String,
    artifact: Option<ExportArtifact>,
    download_ready: bool,
    generating_about_me: bool,
    exporting: bool,
    notifications: Vec<Notification>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(BiodataRecord::default())
    }
}

impl WizardController {
    pub fn new(mut record: BiodataRecord) -> Self {
        record.normalize();
        Self {
            step: Step::Form,
            record,
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            language: Language::default(),
            background: DEFAULT_BACKGROUND.to_string(),
            artifact: None,
            download_ready: false,
            generating_about_me: false,
            exporting: false,
            notifications: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn next(&mut self) -> Step {
        self.go_to(self.step.next())
    }

    pub fn previous(&mut self) -> Step {
        self.go_to(self.step.previous())
    }

    pub fn go_to(&mut self, step: Step) -> Step {
        tracing::debug!(from = ?self.step, to = ?step, "wizard step");
        self.step = step;
        step
    }

    pub fn record(&self) -> &BiodataRecord {
        &self.record
    }

    pub fn update(&mut self, patch: RecordPatch) {
        self.record.merge(patch);
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn select_template(&mut self, id: impl Into<String>) {
        self.template_id = id.into();
    }

    pub fn style(&self) -> StyleConfig {
        resolve_template(&self.template_id)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = color.into();
    }

    pub fn is_generating_about_me(&self) -> bool {
        self.generating_about_me
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn download_ready(&self) -> bool {
        self.download_ready
    }

    pub fn artifact(&self) -> Option<&ExportArtifact> {
        self.artifact.as_ref()
    }

    pub fn file_name(&self) -> String {
        self.record.export_file_name()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn begin_about_me(&mut self) -> Result<AboutMeHints, WizardError> {
        if self.generating_about_me {
            return Err(WizardError::Busy("about-me generation"));
        }
        self.generating_about_me = true;
        Ok(AboutMeHints::from_record(&self.record))
    }

    pub fn finish_about_me(&mut self, result: anyhow::Result<String>) {
        self.generating_about_me = false;
        match result {
            Ok(text) => {
                self.update(RecordPatch {
                    about_me: Some(text),
                    ..Default::default()
                });
                self.notifications.push(Notification::info(
                    "About Me Generated",
                    "You can edit the text to personalize it.",
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "about-me generation failed");
                self.notifications.push(Notification::error(
                    "Generation Failed",
                    "Generation failed, please try again.",
                ));
            }
        }
    }

    pub async fn generate_about_me(&mut self, generator: &dyn AboutMeGenerator) -> Result<(), WizardError> {
        let hints = self.begin_about_me()?;
        let result = generator.generate(&hints).await;
        self.finish_about_me(result);
        Ok(())
    }

    pub fn document(&self, mode: RenderMode, config: &Config) -> Document {
        compute_layout(
            &self.record,
            &self.style(),
            LabelTable::for_language(self.language),
            &self.background,
            mode,
            &config.layout,
        )
    }

    pub fn preview_svg(&self, config: &Config) -> String {
        render_svg(&self.document(RenderMode::Preview, config))
    }

    /// Snapshot the print render for the export stage and mark export busy.
    pub fn begin_export(&mut self, config: &Config) -> Result<ExportJob, WizardError> {
        if self.exporting {
            return Err(WizardError::Busy("export"));
        }
        self.exporting = true;
        Ok(ExportJob {
            svg: render_svg(&self.document(RenderMode::Print, config)),
            background: self.background.clone(),
            config: config.export.clone(),
        })
    }

    /// Store a finished export. On failure the previous artifact stays.
    pub fn finish_export(
        &mut self,
        result: Result<ExportArtifact, ExportError>,
    ) -> Result<&ExportArtifact, WizardError> {
        self.exporting = false;
        match result {
            Ok(artifact) => {
                self.download_ready = true;
                self.notifications.push(Notification::info(
                    "PDF Downloaded",
                    "Your biodata has been saved in high quality.",
                ));
                Ok(self.artifact.insert(artifact))
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.notifications.push(Notification::error(
                    "PDF Generation Failed",
                    "Generation failed, please try again.",
                ));
                Err(err.into())
            }
        }
    }

    pub fn export(&mut self, config: &Config) -> Result<&ExportArtifact, WizardError> {
        let job = self.begin_export(config)?;
        let result = job.run();
        self.finish_export(result)
    }

    /// Write the last exported PDF into `dir`.
    pub fn download(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let artifact = self.artifact.as_ref().ok_or(WizardError::NotExported)?;
        share::write_download(&artifact.pdf, dir, &self.file_name())
    }

    pub async fn share(
        &self,
        target: ShareTarget,
        capability: &dyn ShareCapability,
        config: &Config,
    ) -> Result<ShareOutcome, WizardError> {
        let artifact = self.artifact.as_ref().ok_or(WizardError::NotExported)?;
        Ok(share::share(&artifact.pdf, &self.file_name(), target, capability, &config.share).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::about_me::TemplateAboutMeGenerator;

    #[test]
    fn steps_move_both_ways_without_gates() {
        let mut wizard = WizardController::default();
        assert_eq!(wizard.step(), Step::Form);
        assert_eq!(wizard.next(), Step::Template);
        assert_eq!(wizard.next(), Step::Download);
        assert_eq!(wizard.next(), Step::Download);
        assert_eq!(wizard.previous(), Step::Template);
        assert_eq!(wizard.go_to(Step::Form), Step::Form);
        assert_eq!(wizard.previous(), Step::Form);
    }

    #[test]
    fn navigation_keeps_entered_data() {
        let mut wizard = WizardController::default();
        wizard.update(RecordPatch {
            full_name: Some("Asha Rao".to_string()),
            ..Default::default()
        });
        wizard.next();
        wizard.previous();
        assert_eq!(wizard.record().full_name, "Asha Rao");
    }

    #[test]
    fn update_truncates_pasted_narratives() {
        let mut wizard = WizardController::default();
        wizard.update(RecordPatch {
            partner_preferences: Some("p".repeat(500)),
            ..Default::default()
        });
        assert_eq!(wizard.record().partner_preferences.chars().count(), 200);
    }

    #[test]
    fn unknown_template_renders_default_style() {
        let mut wizard = WizardController::default();
        wizard.select_template("royal-purple");
        assert_eq!(wizard.template_id(), "royal-purple");
        assert_eq!(wizard.style(), resolve_template(DEFAULT_TEMPLATE_ID));
    }

    #[test]
    fn second_about_me_trigger_is_rejected() {
        let mut wizard = WizardController::default();
        wizard.begin_about_me().expect("first");
        assert!(matches!(wizard.begin_about_me(), Err(WizardError::Busy(_))));
        wizard.finish_about_me(Err(anyhow::anyhow!("offline")));
        assert!(!wizard.is_generating_about_me());
        let notes = wizard.drain_notifications();
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert!(wizard.begin_about_me().is_ok());
    }

    #[tokio::test]
    async fn generated_about_me_lands_in_record() {
        let mut wizard = WizardController::default();
        wizard.update(RecordPatch {
            occupation: Some("Teacher".to_string()),
            city: Some("Indore".to_string()),
            ..Default::default()
        });
        wizard
            .generate_about_me(&TemplateAboutMeGenerator::immediate())
            .await
            .expect("generated");
        assert!(wizard.record().about_me.starts_with("I am a Teacher based in Indore."));
        assert_eq!(
            wizard.drain_notifications(),
            vec![Notification::info(
                "About Me Generated",
                "You can edit the text to personalize it."
            )]
        );
        assert!(wizard.drain_notifications().is_empty());
    }

    #[test]
    fn export_busy_flag_blocks_reentry() {
        let mut wizard = WizardController::default();
        let config = Config::default();
        let _job = wizard.begin_export(&config).expect("job");
        assert!(wizard.is_exporting());
        assert!(matches!(wizard.begin_export(&config), Err(WizardError::Busy("export"))));
    }

    #[test]
    fn download_requires_an_export() {
        let wizard = WizardController::default();
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(wizard.download(dir.path()).is_err());
    }
}
