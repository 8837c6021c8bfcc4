//! Colours and type sizes of the resume layout

use crate::Result;
use pdf_core::Color;
use serde::{Deserialize, Serialize};

/// Visual settings, colours as `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeTheme {
    pub name_color: String,
    pub name_size: f32,
    pub contact_color: String,
    pub section_color: String,
    pub section_size: f32,
    pub body_color: String,
    pub body_size: f32,
    pub rule_color: String,
    pub table_header_background: String,
    pub table_header_text: String,
    pub grid_color: String,
    pub skills_color: String,
}

impl Default for ResumeTheme {
    fn default() -> Self {
        Self {
            name_color: "#2C3E50".to_string(),
            name_size: 20.0,
            contact_color: "#7F8C8D".to_string(),
            section_color: "#1A5276".to_string(),
            section_size: 12.0,
            body_color: "#000000".to_string(),
            body_size: 10.0,
            rule_color: "#808080".to_string(),
            table_header_background: "#2E86C1".to_string(),
            table_header_text: "#F5F5F5".to_string(),
            grid_color: "#808080".to_string(),
            skills_color: "#2C3E50".to_string(),
        }
    }
}

/// Theme colours parsed into PDF colours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub name: Color,
    pub contact: Color,
    pub section: Color,
    pub body: Color,
    pub rule: Color,
    pub table_header_background: Color,
    pub table_header_text: Color,
    pub grid: Color,
    pub skills: Color,
}

impl ResumeTheme {
    /// Parse a theme from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse every colour; fails on the first malformed one
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            name: Color::from_hex(&self.name_color)?,
            contact: Color::from_hex(&self.contact_color)?,
            section: Color::from_hex(&self.section_color)?,
            body: Color::from_hex(&self.body_color)?,
            rule: Color::from_hex(&self.rule_color)?,
            table_header_background: Color::from_hex(&self.table_header_background)?,
            table_header_text: Color::from_hex(&self.table_header_text)?,
            grid: Color::from_hex(&self.grid_color)?,
            skills: Color::from_hex(&self.skills_color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResumeError;

    #[test]
    fn test_default_palette() {
        let palette = ResumeTheme::default().palette().unwrap();
        assert_eq!(palette.table_header_background, Color::from_rgb(0x2E, 0x86, 0xC1));
        assert_eq!(palette.grid, Color::from_rgb(0x80, 0x80, 0x80));
        assert_eq!(palette.body, Color::black());
    }

    #[test]
    fn test_partial_theme_json() {
        let theme: ResumeTheme =
            serde_json::from_str(r##"{ "sectionColor": "#000000", "bodySize": 11 }"##).unwrap();
        assert_eq!(theme.section_color, "#000000");
        assert_eq!(theme.body_size, 11.0);
        assert_eq!(theme.name_color, "#2C3E50");
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let theme = ResumeTheme::from_json(r##"{ "nameSize": 24 }"##).unwrap();
        assert_eq!(theme.name_size, 24.0);

        let err = ResumeTheme::from_json(r##"{ "nameSize": "big" }"##).unwrap_err();
        assert!(matches!(err, ResumeError::Json(_)));
    }

    #[test]
    fn test_bad_colour_rejected() {
        let theme = ResumeTheme {
            grid_color: "grey".to_string(),
            ..Default::default()
        };
        assert!(matches!(theme.palette(), Err(ResumeError::Pdf(_))));
    }
}
