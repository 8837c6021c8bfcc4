//! Parsers for the free-text experience and skills boxes
//!
//! Experience is one job per line:
//!
//! ```text
//! Role,Company,Duration,Point1;Point2;...
//! ```
//!
//! Skills are a single comma-separated list.

use crate::ExperienceEntry;
use serde::Serialize;

/// A line of the experience box that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based, counted after trimming the whole block
    pub line_number: usize,
    pub text: String,
}

/// Parsed experience entries plus the lines that were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceParse {
    pub entries: Vec<ExperienceEntry>,
    pub skipped: Vec<SkippedLine>,
}

/// Parse the experience box
///
/// Blank lines are dropped silently; other lines with fewer than four
/// comma-separated parts are skipped and reported. Only the
/// fourth part holds bullet points; anything after a further comma is
/// ignored.
pub fn parse_experience(text: &str) -> ExperienceParse {
    let mut result = ExperienceParse::default();
    let block = text.trim();
    if block.is_empty() {
        return result;
    }

    for (index, line) in block.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 4 {
            tracing::warn!(line = index + 1, text = line, "skipping experience line");
            result.skipped.push(SkippedLine {
                line_number: index + 1,
                text: line.to_string(),
            });
            continue;
        }

        let points = parts[3]
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        result.entries.push(ExperienceEntry {
            role: parts[0].trim().to_string(),
            company: parts[1].trim().to_string(),
            duration: parts[2].trim().to_string(),
            points,
        });
    }

    result
}

/// Parse the skills box: trimmed, empties dropped, order kept, duplicates kept
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_entry() {
        let parsed = parse_experience("Engineer,Acme,2020-2022,Built X;Shipped Y");
        assert_eq!(
            parsed.entries,
            vec![ExperienceEntry {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020-2022".to_string(),
                points: vec!["Built X".to_string(), "Shipped Y".to_string()],
            }]
        );
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_short_line_dropped() {
        let parsed = parse_experience("Engineer,Acme");
        assert!(parsed.entries.is_empty());
        assert_eq!(
            parsed.skipped,
            vec![SkippedLine {
                line_number: 1,
                text: "Engineer,Acme".to_string(),
            }]
        );
    }

    #[test]
    fn test_mixed_lines_keep_order() {
        let text = "\n  Dev , Foo , 2019 , a ; ; b \nbroken line\nLead,Bar,2021,\n";
        let parsed = parse_experience(text);

        let roles: Vec<&str> = parsed.entries.iter().map(|e| e.role.as_str()).collect();
        assert_eq!(roles, vec!["Dev", "Lead"]);
        assert_eq!(parsed.entries[0].company, "Foo");
        assert_eq!(parsed.entries[0].points, vec!["a", "b"]);
        assert!(parsed.entries[1].points.is_empty());
        assert_eq!(parsed.skipped[0].line_number, 2);
    }

    #[test]
    fn test_blank_lines_between_entries_not_reported() {
        let parsed = parse_experience("Dev,Foo,2019,a\n\n   \nLead,Bar,2021,b\nnot a job");

        let roles: Vec<&str> = parsed.entries.iter().map(|e| e.role.as_str()).collect();
        assert_eq!(roles, vec!["Dev", "Lead"]);
        assert_eq!(
            parsed.skipped,
            vec![SkippedLine {
                line_number: 5,
                text: "not a job".to_string(),
            }]
        );
    }

    #[test]
    fn test_text_after_fifth_comma_ignored() {
        let parsed = parse_experience("Dev,Foo,2019,Built X,with extra");
        assert_eq!(parsed.entries[0].points, vec!["Built X"]);
    }

    #[test]
    fn test_empty_experience() {
        assert_eq!(parse_experience("   \n "), ExperienceParse::default());
    }

    #[test]
    fn test_parse_skills() {
        assert_eq!(parse_skills("Go, Python,  ,Rust"), vec!["Go", "Python", "Rust"]);
        assert_eq!(parse_skills("Go,Go"), vec!["Go", "Go"]);
        assert!(parse_skills("").is_empty());
        assert!(parse_skills(" , ,").is_empty());
    }

    #[test]
    fn test_skills_across_lines() {
        assert_eq!(parse_skills("Go,\nRust\n"), vec!["Go", "Rust"]);
    }
}
