//! Domain types for the course roster.

use serde::{Deserialize, Serialize};

/// User id in the collaboration platform (GitLab).
///
/// GitLab ids are integers, but the config document is shared with other
/// tools, so whatever scalar form a file already holds is written back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecondaryId {
    Number(i64),
    Text(String),
}

/// One student entry in the roster.
///
/// `secondary_id` is stored under the `id` key and omitted until enrichment
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub username: String,
    pub section: String,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub secondary_id: Option<SecondaryId>,
}

impl StudentRecord {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            section: section.into(),
            secondary_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secondary_id_omitted_when_unset() {
        let record = StudentRecord::new("Doe, Jane", "jdoe", "A");
        let yaml = serde_yaml::to_string(&record).expect("serialize");
        assert!(!yaml.contains("id:"), "got: {yaml}");
    }

    #[test]
    fn text_secondary_id_stays_text() {
        let yaml = "name: Doe, Jane\nusername: jdoe\nsection: A\nid: '42'\n";
        let record: StudentRecord = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(record.secondary_id, Some(SecondaryId::Text("42".into())));
        let out = serde_yaml::to_string(&record).expect("serialize");
        assert!(out.contains("id: '42'"), "got: {out}");
    }

    #[test]
    fn integer_secondary_id_stays_integer() {
        let yaml = "name: Doe, Jane\nusername: jdoe\nsection: A\nid: 1337\n";
        let record: StudentRecord = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(record.secondary_id, Some(SecondaryId::Number(1337)));
        let out = serde_yaml::to_string(&record).expect("serialize");
        assert!(out.contains("id: 1337"), "got: {out}");
    }
}
