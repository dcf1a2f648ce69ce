use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use biodata_renderer::about_me::{AboutMeGenerator, AboutMeHints, TemplateAboutMeGenerator};
use biodata_renderer::config::{Config, LayoutConfig};
use biodata_renderer::share::{NoNativeShare, ShareOutcome, ShareTarget};
use biodata_renderer::wizard::NotificationLevel;
use biodata_renderer::{RecordPatch, Step, WizardController, WizardError};

fn quick_config() -> Config {
    Config {
        layout: LayoutConfig {
            fast_text_metrics: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn named_wizard() -> WizardController {
    let mut wizard = WizardController::default();
    wizard.update(RecordPatch {
        full_name: Some("Asha Rao".to_string()),
        city: Some("Pune".to_string()),
        ..Default::default()
    });
    wizard
}

struct Unreachable;

#[async_trait]
impl AboutMeGenerator for Unreachable {
    async fn generate(&self, _hints: &AboutMeHints) -> Result<String> {
        anyhow::bail!("service unreachable")
    }
}

#[test]
fn reexport_keeps_download_ready() {
    let config = quick_config();
    let mut wizard = named_wizard();
    wizard.go_to(Step::Download);
    assert!(!wizard.download_ready());

    let first = wizard.export(&config).expect("first export").pdf.clone();
    assert!(wizard.download_ready());

    let job = wizard.begin_export(&config).expect("job");
    assert!(wizard.download_ready());
    assert!(wizard.is_exporting());
    let second = wizard.finish_export(job.run()).expect("second export");
    assert!(second.pdf.starts_with(b"%PDF"));
    assert!(!first.is_empty());
    assert!(wizard.download_ready());
}

#[test]
fn failed_export_keeps_previous_artifact() {
    let config = quick_config();
    let mut wizard = named_wizard();
    let before = wizard.export(&config).expect("export").png.clone();
    wizard.drain_notifications();

    wizard.set_background("not-a-color");
    let err = wizard.export(&config).unwrap_err();
    assert!(matches!(err, WizardError::Export(_)));
    assert!(!wizard.is_exporting());
    assert!(wizard.download_ready());
    assert_eq!(wizard.artifact().map(|a| a.png.clone()), Some(before));

    let notes = wizard.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].description, "Generation failed, please try again.");
}

#[test]
fn download_uses_name_based_file() {
    let config = quick_config();
    let mut wizard = named_wizard();
    wizard.export(&config).expect("export");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = wizard.download(dir.path()).expect("download");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Asha Rao_biodata.pdf"));

    let mut anonymous = WizardController::default();
    anonymous.export(&config).expect("export");
    assert_eq!(anonymous.file_name(), "biodata.pdf");
}

#[tokio::test]
async fn share_without_native_support_opens_compose_url() {
    let config = quick_config();
    let mut wizard = named_wizard();
    assert!(matches!(
        wizard.share(ShareTarget::Chat, &NoNativeShare, &config).await,
        Err(WizardError::NotExported)
    ));
    wizard.export(&config).expect("export");
    let outcome = wizard
        .share(ShareTarget::Email, &NoNativeShare, &config)
        .await
        .expect("share");
    assert!(matches!(outcome, ShareOutcome::OpenUrl(url) if url.starts_with("mailto:?subject=")));
}

#[tokio::test(start_paused = true)]
async fn about_me_generation_waits_and_fills_record() {
    let mut wizard = named_wizard();
    wizard.update(RecordPatch {
        occupation: Some("Architect".to_string()),
        ..Default::default()
    });
    let generator = TemplateAboutMeGenerator {
        delay: Duration::from_millis(1500),
    };
    let started = tokio::time::Instant::now();
    wizard.generate_about_me(&generator).await.expect("generate");
    assert!(started.elapsed() >= Duration::from_millis(1500));
    assert_eq!(
        wizard.record().about_me,
        "I am a Architect based in Pune. I value family, growth, and balance in life."
    );
    assert!(!wizard.is_generating_about_me());
}

#[tokio::test]
async fn failed_generation_leaves_about_me_untouched() {
    let mut wizard = named_wizard();
    wizard.update(RecordPatch {
        about_me: Some("Hand written.".to_string()),
        ..Default::default()
    });
    wizard.generate_about_me(&Unreachable).await.expect("completes");
    assert_eq!(wizard.record().about_me, "Hand written.");
    let notes = wizard.drain_notifications();
    assert_eq!(notes[0].level, NotificationLevel::Error);
}
