use crate::record::{BiodataRecord, truncate_narrative};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_millis(1500);

/// Record fields a generator may draw on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutMeHints {
    pub occupation: String,
    pub city: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub linkedin_url: String,
}

impl AboutMeHints {
    pub fn from_record(record: &BiodataRecord) -> Self {
        Self {
            occupation: record.occupation.trim().to_string(),
            city: record.city.trim().to_string(),
            instagram_url: record.instagram_url.trim().to_string(),
            facebook_url: record.facebook_url.trim().to_string(),
            linkedin_url: record.linkedin_url.trim().to_string(),
        }
    }
}

#[async_trait]
pub trait AboutMeGenerator: Send + Sync {
    async fn generate(&self, hints: &AboutMeHints) -> Result<String>;
}

/// Offline generator that fills a fixed sentence after a short delay.
#[derive(Debug, Clone)]
pub struct TemplateAboutMeGenerator {
    pub delay: Duration,
}

impl Default for TemplateAboutMeGenerator {
    fn default() -> Self {
        Self {
            delay: DEFAULT_GENERATION_DELAY,
        }
    }
}

impl TemplateAboutMeGenerator {
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }
}

pub fn compose_about_me(hints: &AboutMeHints) -> String {
    let occupation = if hints.occupation.is_empty() {
        "professional"
    } else {
        hints.occupation.as_str()
    };
    let city = if hints.city.is_empty() {
        "India"
    } else {
        hints.city.as_str()
    };
    truncate_narrative(&format!(
        "I am a {occupation} based in {city}. I value family, growth, and balance in life."
    ))
}

#[async_trait]
impl AboutMeGenerator for TemplateAboutMeGenerator {
    async fn generate(&self, hints: &AboutMeHints) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(compose_about_me(hints))
    }
}
