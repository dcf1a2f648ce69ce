use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Marathi => "marathi",
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "marathi" | "mr" => Ok(Language::Marathi),
            other => Err(anyhow::anyhow!("unsupported language: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKey {
    Biodata,
    PersonalDetails,
    Name,
    DateOfBirth,
    Age,
    Gender,
    Height,
    Complexion,
    MaritalStatus,
    Religion,
    Caste,
    MotherTongue,
    Location,
    Education,
    HighestEducation,
    Occupation,
    Company,
    Income,
    Family,
    FatherName,
    FatherOccupation,
    MotherName,
    MotherOccupation,
    Siblings,
    FamilyType,
    FamilyStatus,
    AboutMe,
    Hobbies,
    Preferences,
    Contact,
}

#[derive(Debug, Clone)]
pub struct LabelTable {
    language: Language,
    entries: BTreeMap<LabelKey, &'static str>,
}

impl LabelTable {
    fn from_entries(language: Language, entries: &[(LabelKey, &'static str)]) -> Self {
        Self {
            language,
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn for_language(language: Language) -> &'static LabelTable {
        match language {
            Language::English => &ENGLISH,
            Language::Hindi => &HINDI,
            Language::Marathi => &MARATHI,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: LabelKey) -> &'static str {
        // Tables are checked for completeness in tests; English is the backstop.
        self.entries
            .get(&key)
            .or_else(|| ENGLISH.entries.get(&key))
            .copied()
            .unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = LabelKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use LabelKey::*;

static ENGLISH: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::from_entries(
        Language::English,
        &[
            (Biodata, "Biodata"),
            (PersonalDetails, "Personal Details"),
            (Name, "Name"),
            (DateOfBirth, "Date of Birth"),
            (Age, "Age"),
            (Gender, "Gender"),
            (Height, "Height"),
            (Complexion, "Complexion"),
            (MaritalStatus, "Marital Status"),
            (Religion, "Religion"),
            (Caste, "Caste"),
            (MotherTongue, "Mother Tongue"),
            (Location, "Location"),
            (Education, "Education & Career"),
            (HighestEducation, "Education"),
            (Occupation, "Occupation"),
            (Company, "Company"),
            (Income, "Annual Income"),
            (Family, "Family Details"),
            (FatherName, "Father's Name"),
            (FatherOccupation, "Father's Occupation"),
            (MotherName, "Mother's Name"),
            (MotherOccupation, "Mother's Occupation"),
            (Siblings, "Siblings"),
            (FamilyType, "Family Type"),
            (FamilyStatus, "Family Status"),
            (AboutMe, "About Me"),
            (Hobbies, "Hobbies"),
            (Preferences, "Partner Preferences"),
            (Contact, "Contact"),
        ],
    )
});

static HINDI: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::from_entries(
        Language::Hindi,
        &[
            (Biodata, "बायोडाटा"),
            (PersonalDetails, "व्यक्तिगत विवरण"),
            (Name, "नाम"),
            (DateOfBirth, "जन्म तिथि"),
            (Age, "आयु"),
            (Gender, "लिंग"),
            (Height, "ऊंचाई"),
            (Complexion, "रंग"),
            (MaritalStatus, "वैवाहिक स्थिति"),
            (Religion, "धर्म"),
            (Caste, "जाति"),
            (MotherTongue, "मातृभाषा"),
            (Location, "स्थान"),
            (Education, "शिक्षा और करियर"),
            (HighestEducation, "शिक्षा"),
            (Occupation, "व्यवसाय"),
            (Company, "कंपनी"),
            (Income, "वार्षिक आय"),
            (Family, "पारिवारिक विवरण"),
            (FatherName, "पिता का नाम"),
            (FatherOccupation, "पिता का व्यवसाय"),
            (MotherName, "माता का नाम"),
            (MotherOccupation, "माता का व्यवसाय"),
            (Siblings, "भाई-बहन"),
            (FamilyType, "परिवार का प्रकार"),
            (FamilyStatus, "पारिवारिक स्थिति"),
            (AboutMe, "मेरे बारे में"),
            (Hobbies, "शौक"),
            (Preferences, "जीवनसाथी की पसंद"),
            (Contact, "संपर्क"),
        ],
    )
});

static MARATHI: Lazy<LabelTable> = Lazy::new(|| {
    LabelTable::from_entries(
        Language::Marathi,
        &[
            (Biodata, "बायोडाटा"),
            (PersonalDetails, "वैयक्तिक माहिती"),
            (Name, "नाव"),
            (DateOfBirth, "जन्म तारीख"),
            (Age, "वय"),
            (Gender, "लिंग"),
            (Height, "उंची"),
            (Complexion, "रंग"),
            (MaritalStatus, "वैवाहिक स्थिती"),
            (Religion, "धर्म"),
            (Caste, "जात"),
            (MotherTongue, "मातृभाषा"),
            (Location, "स्थान"),
            (Education, "शिक्षण आणि करिअर"),
            (HighestEducation, "शिक्षण"),
            (Occupation, "व्यवसाय"),
            (Company, "कंपनी"),
            (Income, "वार्षिक उत्पन्न"),
            (Family, "कौटुंबिक माहिती"),
            (FatherName, "वडिलांचे नाव"),
            (FatherOccupation, "वडिलांचा व्यवसाय"),
            (MotherName, "आईचे नाव"),
            (MotherOccupation, "आईचा व्यवसाय"),
            (Siblings, "भाऊ-बहीण"),
            (FamilyType, "कुटुंबाचा प्रकार"),
            (FamilyStatus, "कौटुंबिक स्थिती"),
            (AboutMe, "माझ्याबद्दल"),
            (Hobbies, "छंद"),
            (Preferences, "जोडीदाराची पसंती"),
            (Contact, "संपर्क"),
        ],
    )
});
