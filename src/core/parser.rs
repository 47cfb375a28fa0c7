use tracing::debug;

use super::fields;
use super::models::{ExtractionReport, ParsedResume};
use super::sections;
use super::text;

/// Run the full pipeline over extracted text: one pass of section
/// extraction, then a per-section field parser. Sections that parse to
/// nothing are omitted, same as sections that never matched.
pub fn parse_resume(text: &str) -> (ParsedResume, ExtractionReport) {
    let section_map = sections::extract_sections(text);

    let mut resume = ParsedResume::default();

    if let Some(body) = section_map.get("contact_info") {
        let contact = fields::parse_contact_info(body);
        if !contact.is_empty() {
            resume.contact_info = Some(contact);
        }
    }
    if let Some(body) = section_map.get("education") {
        let entries = fields::parse_education(body);
        if !entries.is_empty() {
            resume.education = Some(entries);
        }
    }
    if let Some(body) = section_map.get("experience") {
        let entries = fields::parse_experience(body);
        if !entries.is_empty() {
            resume.experience = Some(entries);
        }
    }
    if let Some(body) = section_map.get("skills") {
        let skills = fields::parse_skills(body);
        if !skills.is_empty() {
            resume.skills = Some(skills);
        }
    }
    if let Some(body) = section_map.get("projects") {
        let entries = fields::parse_projects(body);
        if !entries.is_empty() {
            resume.projects = Some(entries);
        }
    }

    let mut sections_found = Vec::new();
    let mut sections_missing = Vec::new();
    for name in sections::SECTION_NAMES {
        let present = match name {
            "contact_info" => resume.contact_info.is_some(),
            "education" => resume.education.is_some(),
            "experience" => resume.experience.is_some(),
            "skills" => resume.skills.is_some(),
            "projects" => resume.projects.is_some(),
            _ => false,
        };
        if present {
            sections_found.push(name);
        } else {
            sections_missing.push(name);
        }
    }

    let report = ExtractionReport {
        sections_found,
        sections_missing,
        token_count: text::tokenize_and_filter(text).len(),
        phone_e164: resume
            .contact_info
            .as_ref()
            .and_then(|contact| fields::normalize_phone(&contact.phone)),
    };

    debug!(
        found = ?report.sections_found,
        missing = ?report.sections_missing,
        tokens = report.token_count,
        "extraction finished"
    );

    (resume, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::EducationEntry;

    #[test]
    fn end_to_end_education_and_skills() {
        let (resume, _) = parse_resume("Education\nMIT\nBSc\n2020\n\nSkills\nPython\nGo\n\n");

        assert_eq!(
            resume.education,
            Some(vec![EducationEntry {
                institution: "MIT".to_string(),
                degree: "BSc".to_string(),
                dates: "2020".to_string(),
            }])
        );
        assert_eq!(
            resume.skills,
            Some(vec!["Python".to_string(), "Go".to_string()])
        );
        assert!(resume.experience.is_none());
        assert!(resume.projects.is_none());
    }

    #[test]
    fn output_json_shape_matches_the_contract() {
        let (resume, _) = parse_resume("Education\nMIT\nBSc\n2020\n\nSkills\nPython\nGo\n\n");
        let value = serde_json::to_value(&resume).unwrap();

        assert_eq!(
            value["education"],
            serde_json::json!([{"institution": "MIT", "degree": "BSc", "dates": "2020"}])
        );
        assert_eq!(value["skills"], serde_json::json!(["Python", "Go"]));
        assert!(value.get("experience").is_none());
    }

    #[test]
    fn no_headings_means_no_heading_section_keys() {
        let (resume, report) = parse_resume("\nnothing that looks like a resume\n");
        assert!(resume.education.is_none());
        assert!(resume.experience.is_none());
        assert!(resume.skills.is_none());
        assert!(resume.projects.is_none());
        // Prose before the first blank line still reads as a contact block.
        assert_eq!(report.sections_found, vec!["contact_info"]);
        assert_eq!(report.sections_missing.len(), 4);
    }

    #[test]
    fn contact_block_survives_a_leading_blank_line() {
        let (resume, _) = parse_resume("\nJane Smith\njane@example.com\n\nSkills\nGo\n\n");

        let contact = resume.contact_info.unwrap();
        assert_eq!(contact.name, "Jane Smith");
        assert_eq!(contact.email, "jane@example.com");
        assert_eq!(resume.skills, Some(vec!["Go".to_string()]));
    }

    #[test]
    fn report_separates_found_and_missing() {
        let (_, report) = parse_resume("Skills\nRust\n\n");
        assert_eq!(report.sections_found, vec!["skills"]);
        assert_eq!(
            report.sections_missing,
            vec!["contact_info", "education", "experience", "projects"]
        );
        assert!(report.token_count > 0);
    }

    #[test]
    fn preamble_contact_block_feeds_the_report_phone() {
        let text = "Jane Smith\njane@example.com\n+1 202 555 0142\n\nSkills\nGo\n\n";
        let (resume, report) = parse_resume(text);

        let contact = resume.contact_info.unwrap();
        assert_eq!(contact.name, "Jane Smith");
        assert_eq!(contact.phone, "+1 202 555 0142");
        assert_eq!(report.phone_e164, Some("+12025550142".to_string()));
    }

    #[test]
    fn empty_section_body_is_omitted() {
        let (resume, _) = parse_resume("Projects\nSkills\nGo\n\n");
        assert!(resume.projects.is_none());
        assert_eq!(resume.skills, Some(vec!["Go".to_string()]));
    }

    #[test]
    fn multi_entry_experience_with_details() {
        let text = "Experience\nAcme\nEngineer\n2019-2022\nBuilt the widget\n\nGlobex\nManager\n2022-\n\n\n";
        let (resume, _) = parse_resume(text);

        let entries = resume.experience.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "Acme");
        assert_eq!(entries[0].details, vec!["Built the widget"]);
        assert_eq!(entries[1].company, "Globex");
        assert_eq!(entries[1].role, "Manager");
        assert!(entries[1].details.is_empty());
    }
}
