use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{ContactInfo, EducationEntry, ExperienceEntry, ProjectEntry};
use super::text;

static PHONE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d -]{8,12}\d").unwrap());
static PHONE_CLEAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-\(\)\.]").unwrap());
static DIGIT_SEQ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{7,15}").unwrap());
static STARTS_WITH_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d").unwrap());
static URL_LIKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://|www\.|linkedin\.com|github\.com").unwrap());

/// Contact fields are detected independently per line, not by position.
/// Field values are the matched lines, trimmed, verbatim; anything
/// undetected stays an empty string.
pub fn parse_contact_info(body: &str) -> ContactInfo {
    let lines = text::content_lines(body);

    let email = lines
        .iter()
        .find(|line| line.contains('@'))
        .copied()
        .unwrap_or("");
    let phone = pick_phone_line(&lines).unwrap_or("");
    let linkedin = lines
        .iter()
        .find(|line| line.to_lowercase().contains("linkedin"))
        .copied()
        .unwrap_or("");

    let name = lines
        .iter()
        .find(|line| looks_like_name(line))
        .or_else(|| lines.first())
        .copied()
        .unwrap_or("");

    ContactInfo {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        linkedin: linkedin.to_string(),
    }
}

fn looks_like_name(line: &str) -> bool {
    !line.contains('@')
        && !URL_LIKE_RE.is_match(line)
        && !STARTS_WITH_DIGITS_RE.is_match(line)
        && !PHONE_LINE_RE.is_match(line)
}

/// Among phone-looking lines, prefer one that parses as a real number;
/// fall back to the first pattern match.
fn pick_phone_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    let candidates: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| PHONE_LINE_RE.is_match(line))
        .collect();

    candidates
        .iter()
        .copied()
        .find(|line| normalize_phone(line).is_some())
        .or_else(|| candidates.first().copied())
}

/// E.164 form of the first valid phone number in `text`, if any.
pub fn normalize_phone(text: &str) -> Option<String> {
    if let Some(normalized) = format_if_valid_phone(text) {
        return Some(normalized);
    }

    let cleaned = PHONE_CLEAN_RE.replace_all(text, "");
    for m in DIGIT_SEQ_RE.find_iter(&cleaned) {
        let digits = m.as_str();
        let candidate = if digits.len() >= 10 {
            format!("+{digits}")
        } else {
            digits.to_string()
        };

        if let Some(normalized) = format_if_valid_phone(&candidate) {
            return Some(normalized);
        }
    }

    None
}

fn format_if_valid_phone(input: &str) -> Option<String> {
    let parsed = phonenumber::parse(None, input).ok()?;
    if !phonenumber::is_valid(&parsed) {
        return None;
    }

    Some(parsed.format().mode(phonenumber::Mode::E164).to_string())
}

pub fn parse_education(body: &str) -> Vec<EducationEntry> {
    text::split_entries(body)
        .into_iter()
        .map(|entry| {
            let lines = text::content_lines(entry);
            EducationEntry {
                institution: line_at(&lines, 0),
                degree: line_at(&lines, 1),
                dates: line_at(&lines, 2),
            }
        })
        .collect()
}

pub fn parse_experience(body: &str) -> Vec<ExperienceEntry> {
    text::split_entries(body)
        .into_iter()
        .map(|entry| {
            let lines = text::content_lines(entry);
            ExperienceEntry {
                company: line_at(&lines, 0),
                role: line_at(&lines, 1),
                dates: line_at(&lines, 2),
                details: lines.iter().skip(3).map(|line| line.to_string()).collect(),
            }
        })
        .collect()
}

pub fn parse_projects(body: &str) -> Vec<ProjectEntry> {
    text::split_entries(body)
        .into_iter()
        .map(|entry| {
            let lines = text::content_lines(entry);
            ProjectEntry {
                title: line_at(&lines, 0),
                description: lines[1.min(lines.len())..].join(" "),
            }
        })
        .collect()
}

pub fn parse_skills(body: &str) -> Vec<String> {
    text::content_lines(body)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn line_at(lines: &[&str], index: usize) -> String {
    lines.get(index).copied().unwrap_or("").to_string()
}
