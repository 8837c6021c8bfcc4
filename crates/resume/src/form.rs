//! Form state and the two form actions
//!
//! [`FormCollector`] owns the values of every input field and the list of
//! education rows added so far. The UI writes field values into it and calls
//! [`FormCollector::add_education_row`] or [`FormCollector::submit`].

use crate::parse::{parse_experience, parse_skills, SkippedLine};
use crate::{EducationRow, ResumeRecord};
use std::fmt;
use thiserror::Error;

/// Input fields of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Summary,
    Degree,
    Institution,
    Year,
    Percentage,
    Experience,
    Skills,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Summary,
        FormField::Degree,
        FormField::Institution,
        FormField::Year,
        FormField::Percentage,
        FormField::Experience,
        FormField::Skills,
    ];

    /// The four fields that make up an education row
    pub const EDUCATION: [FormField; 4] = [
        FormField::Degree,
        FormField::Institution,
        FormField::Year,
        FormField::Percentage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Summary => "Summary",
            FormField::Degree => "Degree",
            FormField::Institution => "Institution",
            FormField::Year => "Passing Year",
            FormField::Percentage => "Percentage",
            FormField::Experience => "Experience",
            FormField::Skills => "Skills",
        }
    }

    /// Input hint shown next to the label
    pub fn hint(self) -> Option<&'static str> {
        match self {
            FormField::Experience => Some("Role,Company,Duration,Point1;Point2;..."),
            FormField::Skills => Some("comma separated"),
            _ => None,
        }
    }

    /// Whether Enter inserts a newline in this field
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            FormField::Summary | FormField::Experience | FormField::Skills
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from form actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Missing education field: {0}")]
    MissingEducationField(FormField),
}

/// Raw text of every input field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub percentage: String,
    pub experience: String,
    pub skills: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Summary => &self.summary,
            FormField::Degree => &self.degree,
            FormField::Institution => &self.institution,
            FormField::Year => &self.year,
            FormField::Percentage => &self.percentage,
            FormField::Experience => &self.experience,
            FormField::Skills => &self.skills,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Summary => &mut self.summary,
            FormField::Degree => &mut self.degree,
            FormField::Institution => &mut self.institution,
            FormField::Year => &mut self.year,
            FormField::Percentage => &mut self.percentage,
            FormField::Experience => &mut self.experience,
            FormField::Skills => &mut self.skills,
        }
    }
}

/// Result of [`FormCollector::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub record: ResumeRecord,
    /// Experience lines that were left out of the record
    pub skipped_lines: Vec<SkippedLine>,
}

/// Form state: field values and accumulated education rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCollector {
    pub fields: FormFields,
    education: Vec<EducationRow>,
}

impl FormCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    /// Education rows added so far
    pub fn education(&self) -> &[EducationRow] {
        &self.education
    }

    /// Append the education entry fields as a new row
    ///
    /// All four fields must be non-empty after trimming. On success the row
    /// is stored trimmed and the entry fields are cleared; on failure nothing
    /// changes and the first empty field is reported.
    pub fn add_education_row(&mut self) -> Result<EducationRow, FormError> {
        if let Some(field) = FormField::EDUCATION
            .into_iter()
            .find(|f| self.fields.get(*f).trim().is_empty())
        {
            return Err(FormError::MissingEducationField(field));
        }

        let row = EducationRow {
            degree: self.fields.degree.trim().to_string(),
            institution: self.fields.institution.trim().to_string(),
            year: self.fields.year.trim().to_string(),
            percentage: self.fields.percentage.trim().to_string(),
        };

        for field in FormField::EDUCATION {
            self.fields.get_mut(field).clear();
        }

        tracing::info!(
            degree = %row.degree,
            institution = %row.institution,
            rows = self.education.len() + 1,
            "added education row"
        );
        self.education.push(row.clone());
        Ok(row)
    }

    /// Remove every accumulated education row
    pub fn clear_education(&mut self) {
        tracing::debug!(rows = self.education.len(), "clearing education rows");
        self.education.clear();
    }

    /// Snapshot the form into a record
    ///
    /// Name, email and phone are taken verbatim; the summary is trimmed. No
    /// field is reset and the education list is kept.
    pub fn submit(&self) -> Submission {
        let experience = parse_experience(&self.fields.experience);

        let record = ResumeRecord {
            name: self.fields.name.clone(),
            email: self.fields.email.clone(),
            phone: self.fields.phone.clone(),
            summary: self.fields.summary.trim().to_string(),
            education: self.education.clone(),
            experience: experience.entries,
            skills: parse_skills(&self.fields.skills),
        };

        tracing::debug!(
            education = record.education.len(),
            experience = record.experience.len(),
            skills = record.skills.len(),
            skipped = experience.skipped.len(),
            "form submitted"
        );

        Submission {
            record,
            skipped_lines: experience.skipped,
        }
    }
}
