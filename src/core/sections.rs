use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Closed vocabulary of section names, in the order they are reported.
pub const SECTION_NAMES: [&str; 5] = [
    "contact_info",
    "education",
    "experience",
    "skills",
    "projects",
];

/// One row of the extraction table: a section name and the pattern its
/// heading line must match. Rules are whole-line, case-insensitive, and
/// tolerate a trailing colon.
pub struct SectionRule {
    pub name: &'static str,
    pub heading: Regex,
}

impl SectionRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            heading: Regex::new(pattern).unwrap(),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        self.heading.is_match(line)
    }
}

static SECTION_RULES: Lazy<Vec<SectionRule>> = Lazy::new(|| {
    vec![
        SectionRule::new("education", r"(?i)^\s*education\s*:?\s*$"),
        SectionRule::new(
            "experience",
            r"(?i)^\s*(?:(?:work\s+)?experience|employment(?:\s+history)?)\s*:?\s*$",
        ),
        SectionRule::new("skills", r"(?i)^\s*(?:technical\s+)?skills\s*:?\s*$"),
        SectionRule::new("projects", r"(?i)^\s*(?:personal\s+)?projects\s*:?\s*$"),
    ]
});

pub fn rules() -> &'static [SectionRule] {
    &SECTION_RULES
}

fn match_heading(line: &str) -> Option<&'static str> {
    SECTION_RULES
        .iter()
        .find(|rule| rule.matches(line))
        .map(|rule| rule.name)
}

/// Carve the document into named section bodies.
///
/// A section starts at a heading line and runs until the next recognized
/// heading, two consecutive blank lines, or end of input. Single blank lines
/// stay in the body; the field parsers use them as entry separators. The
/// first occurrence of a heading wins.
///
/// `contact_info` has no heading: it is the preamble, the first run of
/// non-blank lines (leading blanks skipped) before a blank line or a
/// recognized heading.
pub fn extract_sections(text: &str) -> HashMap<&'static str, String> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let mut sections: HashMap<&'static str, String> = HashMap::new();

    let mut preamble: Vec<&str> = Vec::new();
    for &line in &lines {
        if match_heading(line).is_some() {
            break;
        }
        if line.trim().is_empty() {
            // Leading blanks (PDF extraction often produces them) are not
            // the end of the block; only a blank after content is.
            if preamble.is_empty() {
                continue;
            }
            break;
        }
        preamble.push(line);
    }
    if !preamble.is_empty() {
        sections.insert("contact_info", preamble.join("\n"));
    }

    let mut i = 0;
    while i < lines.len() {
        let Some(name) = match_heading(lines[i]) else {
            i += 1;
            continue;
        };

        let mut body: Vec<&str> = Vec::new();
        let mut run_of_blanks = 0;
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if match_heading(line).is_some() {
                break;
            }
            if line.trim().is_empty() {
                run_of_blanks += 1;
                if run_of_blanks >= 2 {
                    break;
                }
            } else {
                run_of_blanks = 0;
            }
            body.push(line);
            j += 1;
        }

        let body = body.join("\n").trim().to_string();
        if sections.contains_key(name) {
            debug!(section = name, "duplicate heading ignored");
        } else {
            sections.insert(name, body);
        }
        i = j;
    }

    for name in SECTION_NAMES {
        if !sections.contains_key(name) {
            debug!(section = name, "no match for section");
        }
    }

    sections
}
