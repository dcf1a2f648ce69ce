use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of the about-me and partner-preference texts.
pub const NARRATIVE_LIMIT: usize = 200;

pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_CONTACT_LABEL: &str = "Contact details available on request";
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Everything the user types into the biodata form. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BiodataRecord {
    pub full_name: String,
    pub date_of_birth: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub complexion: String,
    pub marital_status: String,
    pub religion: String,
    pub caste: String,
    pub mother_tongue: String,

    pub city: String,
    pub state: String,
    pub country: String,

    pub education: String,
    pub occupation: String,
    pub company_name: String,
    pub annual_income: String,

    pub father_name: String,
    pub father_occupation: String,
    pub mother_name: String,
    pub mother_occupation: String,
    pub siblings: String,
    pub family_type: String,
    pub family_status: String,

    pub about_me: String,
    pub hobbies: String,
    pub partner_preferences: String,

    pub contact_label: String,

    /// Data URI of the selected photo, if any.
    pub photo: Option<String>,

    pub instagram_url: String,
    pub facebook_url: String,
    pub linkedin_url: String,
}

impl Default for BiodataRecord {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            date_of_birth: String::new(),
            age: String::new(),
            gender: String::new(),
            height: String::new(),
            complexion: String::new(),
            marital_status: String::new(),
            religion: String::new(),
            caste: String::new(),
            mother_tongue: String::new(),
            city: String::new(),
            state: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            education: String::new(),
            occupation: String::new(),
            company_name: String::new(),
            annual_income: String::new(),
            father_name: String::new(),
            father_occupation: String::new(),
            mother_name: String::new(),
            mother_occupation: String::new(),
            siblings: String::new(),
            family_type: String::new(),
            family_status: String::new(),
            about_me: String::new(),
            hobbies: String::new(),
            partner_preferences: String::new(),
            contact_label: DEFAULT_CONTACT_LABEL.to_string(),
            photo: None,
            instagram_url: String::new(),
            facebook_url: String::new(),
            linkedin_url: String::new(),
        }
    }
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub height: Option<String>,
    pub complexion: Option<String>,
    pub marital_status: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub mother_tongue: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub company_name: Option<String>,
    pub annual_income: Option<String>,
    pub father_name: Option<String>,
    pub father_occupation: Option<String>,
    pub mother_name: Option<String>,
    pub mother_occupation: Option<String>,
    pub siblings: Option<String>,
    pub family_type: Option<String>,
    pub family_status: Option<String>,
    pub about_me: Option<String>,
    pub hobbies: Option<String>,
    pub partner_preferences: Option<String>,
    pub contact_label: Option<String>,
    /// `Some(None)` clears the photo.
    pub photo: Option<Option<String>>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub linkedin_url: Option<String>,
}

macro_rules! apply_fields {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )*
    };
}

impl BiodataRecord {
    /// Merge a patch into the record. Narrative fields are silently capped.
    pub fn merge(&mut self, patch: RecordPatch) {
        apply_fields!(
            self,
            patch,
            [
                full_name,
                date_of_birth,
                age,
                gender,
                height,
                complexion,
                marital_status,
                religion,
                caste,
                mother_tongue,
                city,
                state,
                country,
                education,
                occupation,
                company_name,
                annual_income,
                father_name,
                father_occupation,
                mother_name,
                mother_occupation,
                siblings,
                family_type,
                family_status,
                about_me,
                hobbies,
                partner_preferences,
                contact_label,
                photo,
                instagram_url,
                facebook_url,
                linkedin_url,
            ]
        );
        self.normalize();
    }

    pub fn normalize(&mut self) {
        self.about_me = truncate_narrative(&self.about_me);
        self.partner_preferences = truncate_narrative(&self.partner_preferences);
    }

    /// City, state and country joined by ", ", skipping blank parts.
    pub fn location_line(&self) -> String {
        [&self.city, &self.state, &self.country]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            NAME_PLACEHOLDER
        } else {
            name
        }
    }

    pub fn contact_text(&self) -> &str {
        let label = self.contact_label.trim();
        if label.is_empty() {
            DEFAULT_CONTACT_LABEL
        } else {
            label
        }
    }

    pub fn export_file_name(&self) -> String {
        let name = self.full_name.trim();
        if name.is_empty() {
            return "biodata.pdf".to_string();
        }
        let safe: String = name
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '\0' => '_',
                other => other,
            })
            .collect();
        format!("{safe}_biodata.pdf")
    }
}

pub fn truncate_narrative(text: &str) -> String {
    match text.char_indices().nth(NARRATIVE_LIMIT) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Load a record from JSON, falling back to JSON5 for hand-written files.
pub fn parse_record(input: &str) -> Result<BiodataRecord> {
    let mut record = match serde_json::from_str::<BiodataRecord>(input) {
        Ok(record) => record,
        Err(json_err) => json5::from_str::<BiodataRecord>(input)
            .with_context(|| format!("invalid biodata record ({json_err})"))?,
    };
    record.normalize();
    Ok(record)
}
