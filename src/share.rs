use crate::config::ShareConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    Chat,
    Email,
}

impl std::str::FromStr for ShareTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" | "whatsapp" => Ok(ShareTarget::Chat),
            "email" | "mail" => Ok(ShareTarget::Email),
            other => anyhow::bail!("unknown share target: {other}"),
        }
    }
}

/// A file handed to the host's share facility.
#[derive(Debug, Clone)]
pub struct SharedFile<'a> {
    pub name: &'a str,
    pub mime: &'static str,
    pub bytes: &'a [u8],
    pub title: &'a str,
    pub text: &'a str,
}

/// Native share facility of the host environment.
#[async_trait]
pub trait ShareCapability: Send + Sync {
    fn can_share_files(&self) -> bool;
    async fn share_files(&self, file: SharedFile<'_>) -> Result<()>;
}

/// Host without any native share facility.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeShare;

#[async_trait]
impl ShareCapability for NoNativeShare {
    fn can_share_files(&self) -> bool {
        false
    }

    async fn share_files(&self, _file: SharedFile<'_>) -> Result<()> {
        anyhow::bail!("native sharing is not available")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The file went through the native share facility.
    Shared,
    /// Text-only compose URL for the host to open.
    OpenUrl(String),
}

/// Characters URI components may carry unescaped besides `A-Z a-z 0-9 - _ . ~`.
const SUB_DELIMS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a query component, leaving `!'()*` as they are.
pub fn encode_component(value: &str) -> String {
    // Input `%` is itself escaped to `%25`, so these sequences only come from the encoder.
    SUB_DELIMS
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escaped, raw)| {
            encoded.replace(escaped, raw)
        })
}

pub fn chat_url(config: &ShareConfig) -> String {
    format!(
        "{}?text={}",
        config.chat_base_url,
        encode_component(&config.chat_message)
    )
}

pub fn email_url(config: &ShareConfig) -> String {
    format!(
        "mailto:?subject={}&body={}",
        encode_component(&config.email_subject),
        encode_component(&config.email_body)
    )
}

pub async fn share(
    pdf: &[u8],
    file_name: &str,
    target: ShareTarget,
    capability: &dyn ShareCapability,
    config: &ShareConfig,
) -> ShareOutcome {
    if capability.can_share_files() {
        let file = SharedFile {
            name: file_name,
            mime: "application/pdf",
            bytes: pdf,
            title: &config.share_title,
            text: &config.share_text,
        };
        match capability.share_files(file).await {
            Ok(()) => return ShareOutcome::Shared,
            Err(err) => tracing::warn!(error = %err, "native share failed, using compose url"),
        }
    } else {
        tracing::debug!(?target, "no native file sharing, using compose url");
    }
    ShareOutcome::OpenUrl(match target {
        ShareTarget::Chat => chat_url(config),
        ShareTarget::Email => email_url(config),
    })
}

/// Save the exported PDF into `dir`, returning the written path.
pub fn write_download(pdf: &[u8], dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    std::fs::write(&path, pdf).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = pdf.len(), "saved download");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingShare {
        fail: bool,
        shared: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl ShareCapability for RecordingShare {
        fn can_share_files(&self) -> bool {
            true
        }

        async fn share_files(&self, file: SharedFile<'_>) -> Result<()> {
            if self.fail {
                anyhow::bail!("cancelled");
            }
            let mut shared = self.shared.lock().expect("lock");
            shared.push((file.name.to_string(), file.bytes.len()));
            Ok(())
        }
    }

    #[test]
    fn chat_url_encodes_message() {
        let url = chat_url(&ShareConfig::default());
        assert!(url.starts_with("https://wa.me/?text=Here's%20my%20marriage%20biodata."));
        assert!(!url.contains(' '));
    }

    #[test]
    fn component_encoding_keeps_sub_delims() {
        assert_eq!(encode_component("Hi! (it's me)*"), "Hi!%20(it's%20me)*");
        assert_eq!(encode_component("100%27 & a/b"), "100%2527%20%26%20a%2Fb");
        assert_eq!(encode_component("नमस्ते"), urlencoding::encode("नमस्ते"));
    }

    #[test]
    fn email_url_carries_subject_and_body() {
        let url = email_url(&ShareConfig::default());
        assert!(url.starts_with("mailto:?subject=Marriage%20Biodata&body=Dear%2C%0A%0A"));
    }

    #[test]
    fn share_target_parses_aliases() {
        assert_eq!("WhatsApp".parse::<ShareTarget>().unwrap(), ShareTarget::Chat);
        assert_eq!("email".parse::<ShareTarget>().unwrap(), ShareTarget::Email);
        assert!("fax".parse::<ShareTarget>().is_err());
    }

    #[tokio::test]
    async fn native_share_takes_the_file() {
        let native = RecordingShare::default();
        let outcome = share(b"%PDF", "Asha_biodata.pdf", ShareTarget::Chat, &native, &ShareConfig::default()).await;
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(
            native.shared.lock().unwrap().as_slice(),
            &[("Asha_biodata.pdf".to_string(), 4)]
        );
    }

    #[tokio::test]
    async fn falls_back_to_urls() {
        let config = ShareConfig::default();
        let chat = share(b"%PDF", "a.pdf", ShareTarget::Chat, &NoNativeShare, &config).await;
        assert_eq!(chat, ShareOutcome::OpenUrl(chat_url(&config)));
        let failing = RecordingShare {
            fail: true,
            ..Default::default()
        };
        let email = share(b"%PDF", "a.pdf", ShareTarget::Email, &failing, &config).await;
        assert_eq!(email, ShareOutcome::OpenUrl(email_url(&config)));
    }

    #[test]
    fn write_download_creates_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_download(b"%PDF-1.3", &dir.path().join("out"), "biodata.pdf").expect("write");
        assert_eq!(std::fs::read(path).expect("read"), b"%PDF-1.3");
    }
}
