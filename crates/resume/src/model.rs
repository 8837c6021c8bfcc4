//! Resume data types

use serde::{Deserialize, Serialize};

/// One row of the education table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRow {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub percentage: String,
}

impl EducationRow {
    /// Cells in table column order
    pub fn cells(&self) -> [&str; 4] {
        [
            &self.degree,
            &self.institution,
            &self.year,
            &self.percentage,
        ]
    }
}

/// A job with its bullet points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    #[serde(default)]
    pub points: Vec<String>,
}

/// Everything that goes on the page
///
/// Built once per submission and handed to the renderer as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub education: Vec<EducationRow>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
}

impl ResumeRecord {
    /// Parse a record from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_uses_defaults() {
        let record = ResumeRecord::from_json(
            r#"{
                "name": "Jane Doe",
                "experience": [
                    { "role": "Engineer", "company": "Acme", "duration": "2020-2022" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(record.name, "Jane Doe");
        assert!(record.email.is_empty());
        assert!(record.education.is_empty());
        assert!(record.experience[0].points.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            skills: vec!["Go".to_string(), "Rust".to_string()],
            education: vec![EducationRow {
                degree: "BS".to_string(),
                institution: "MIT".to_string(),
                year: "2020".to_string(),
                percentage: "3.9".to_string(),
            }],
            ..Default::default()
        };

        let json = record.to_json().unwrap();
        assert_eq!(ResumeRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ResumeRecord::from_json("{ not json").is_err());
    }

    #[test]
    fn test_education_cells_order() {
        let row = EducationRow {
            degree: "BS".to_string(),
            institution: "MIT".to_string(),
            year: "2020".to_string(),
            percentage: "3.9".to_string(),
        };
        assert_eq!(row.cells(), ["BS", "MIT", "2020", "3.9"]);
    }
}
