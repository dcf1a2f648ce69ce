use crate::labels::{LabelKey, LabelTable};
use crate::record::BiodataRecord;

use super::SectionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Row(Row),
    Paragraph(String),
}

/// Content of one section, before any geometry is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.items.iter().filter_map(|item| match item {
            Item::Row(row) => Some(row),
            Item::Paragraph(_) => None,
        })
    }
}

fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn rows(labels: &LabelTable, fields: &[(LabelKey, &str)]) -> Vec<Item> {
    fields
        .iter()
        .filter_map(|(key, value)| {
            present(value).map(|value| {
                Item::Row(Row {
                    label: labels.get(*key).to_string(),
                    value,
                })
            })
        })
        .collect()
}

fn section(kind: SectionKind, heading: LabelKey, labels: &LabelTable, items: Vec<Item>) -> Option<Section> {
    (!items.is_empty()).then(|| Section {
        kind,
        heading: labels.get(heading).to_string(),
        items,
    })
}

/// Build the sections in page order, dropping empty rows and empty sections.
/// The contact section is always present.
pub fn build_sections(record: &BiodataRecord, labels: &LabelTable) -> Vec<Section> {
    let personal = rows(
        labels,
        &[
            (LabelKey::DateOfBirth, record.date_of_birth.as_str()),
            (LabelKey::Age, record.age.as_str()),
            (LabelKey::Gender, record.gender.as_str()),
            (LabelKey::Height, record.height.as_str()),
            (LabelKey::Complexion, record.complexion.as_str()),
            (LabelKey::MaritalStatus, record.marital_status.as_str()),
            (LabelKey::Religion, record.religion.as_str()),
            (LabelKey::Caste, record.caste.as_str()),
            (LabelKey::MotherTongue, record.mother_tongue.as_str()),
        ],
    );
    let career = rows(
        labels,
        &[
            (LabelKey::HighestEducation, record.education.as_str()),
            (LabelKey::Occupation, record.occupation.as_str()),
            (LabelKey::Company, record.company_name.as_str()),
            (LabelKey::Income, record.annual_income.as_str()),
        ],
    );
    let family = rows(
        labels,
        &[
            (LabelKey::FatherName, record.father_name.as_str()),
            (LabelKey::FatherOccupation, record.father_occupation.as_str()),
            (LabelKey::MotherName, record.mother_name.as_str()),
            (LabelKey::MotherOccupation, record.mother_occupation.as_str()),
            (LabelKey::Siblings, record.siblings.as_str()),
            (LabelKey::FamilyType, record.family_type.as_str()),
            (LabelKey::FamilyStatus, record.family_status.as_str()),
        ],
    );

    let mut about = Vec::new();
    if let Some(text) = present(&record.about_me) {
        about.push(Item::Paragraph(text));
    }
    about.extend(rows(labels, &[(LabelKey::Hobbies, record.hobbies.as_str())]));

    let preferences: Vec<Item> = present(&record.partner_preferences)
        .map(Item::Paragraph)
        .into_iter()
        .collect();

    let contact = Section {
        kind: SectionKind::Contact,
        heading: labels.get(LabelKey::Contact).to_string(),
        items: vec![Item::Paragraph(record.contact_text().to_string())],
    };

    [
        section(SectionKind::Personal, LabelKey::PersonalDetails, labels, personal),
        section(SectionKind::Career, LabelKey::Education, labels, career),
        section(SectionKind::Family, LabelKey::Family, labels, family),
        section(SectionKind::AboutMe, LabelKey::AboutMe, labels, about),
        section(SectionKind::Preferences, LabelKey::Preferences, labels, preferences),
        Some(contact),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Language;
    use crate::record::DEFAULT_CONTACT_LABEL;

    fn english() -> &'static LabelTable {
        LabelTable::for_language(Language::English)
    }

    fn kinds(sections: &[Section]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn empty_record_keeps_only_contact() {
        let sections = build_sections(&BiodataRecord::default(), english());
        assert_eq!(kinds(&sections), vec![SectionKind::Contact]);
        assert_eq!(
            sections[0].items,
            vec![Item::Paragraph(DEFAULT_CONTACT_LABEL.to_string())]
        );
    }

    #[test]
    fn blank_contact_label_uses_default_text() {
        let record = BiodataRecord {
            contact_label: "  ".to_string(),
            ..Default::default()
        };
        let sections = build_sections(&record, english());
        assert_eq!(
            sections[0].items,
            vec![Item::Paragraph(DEFAULT_CONTACT_LABEL.to_string())]
        );
    }

    #[test]
    fn empty_rows_are_dropped_but_siblings_stay() {
        let record = BiodataRecord {
            age: "28".to_string(),
            height: String::new(),
            religion: "Hindu".to_string(),
            ..Default::default()
        };
        let sections = build_sections(&record, english());
        let personal = &sections[0];
        assert_eq!(personal.kind, SectionKind::Personal);
        let labels: Vec<&str> = personal.rows().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Age", "Religion"]);
    }

    #[test]
    fn sections_follow_fixed_order() {
        let record = BiodataRecord {
            partner_preferences: "Kind".to_string(),
            father_name: "Ravi".to_string(),
            hobbies: "Music".to_string(),
            occupation: "Engineer".to_string(),
            age: "28".to_string(),
            ..Default::default()
        };
        let sections = build_sections(&record, english());
        assert_eq!(
            kinds(&sections),
            vec![
                SectionKind::Personal,
                SectionKind::Career,
                SectionKind::Family,
                SectionKind::AboutMe,
                SectionKind::Preferences,
                SectionKind::Contact,
            ]
        );
    }

    #[test]
    fn hobbies_alone_keep_about_section() {
        let record = BiodataRecord {
            hobbies: "Reading".to_string(),
            ..Default::default()
        };
        let sections = build_sections(&record, english());
        let about = sections
            .iter()
            .find(|s| s.kind == SectionKind::AboutMe)
            .expect("about section");
        assert_eq!(about.items.len(), 1);
        assert!(matches!(&about.items[0], Item::Row(row) if row.value == "Reading"));
    }

    #[test]
    fn headings_are_localized() {
        let record = BiodataRecord {
            age: "30".to_string(),
            ..Default::default()
        };
        let sections = build_sections(&record, LabelTable::for_language(Language::Hindi));
        assert_eq!(sections[0].heading, "व्यक्तिगत विवरण");
        assert_eq!(sections[0].rows().next().map(|r| r.label.as_str()), Some("आयु"));
    }
}
