//! Heuristic field extraction.
//!
//! These are pattern matches, not a resume parser. Each field is looked up
//! independently and falls back to [`NOT_FOUND`]. Known false negatives and
//! false positives:
//! - `name` only matches capitalised words at the very start of the text, so a
//!   leading blank line, an all-caps name or a hyphenated name is missed.
//! - `experience` only matches "N years experience". The grammatical form
//!   "N years of experience" is NOT recognised; the feedback rules flag the
//!   first form as an error.
//! - `position` takes the first short line without a section keyword, which
//!   is often the name line, an address, or even an empty line.
//! - `skills` is a case-sensitive presence check for "Skills".

use std::sync::LazyLock;

use regex::Regex;

use crate::models::analysis::{ExtractedFields, NOT_FOUND};

pub const SKILLS_SECTION_FOUND: &str = "Explicit Skills section found";
pub const SKILLS_SECTION_MISSING: &str =
    "No explicit skills section is present; consider adding one.";

/// Lines at or above this many characters are never taken as a position title.
const POSITION_MAX_CHARS: usize = 50;
const POSITION_EXCLUDED_KEYWORDS: &[&str] = &["experience", "education", "skills", "contact"];

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+(?: [A-Z][a-z]+)+").unwrap());
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").unwrap());
static EXPERIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+years?\s+experience").unwrap());

/// Extracts name, position, email, experience and skills from resume text.
/// Never fails; unmatched fields keep the [`NOT_FOUND`] sentinel.
pub fn analyze_fields(text: &str) -> ExtractedFields {
    ExtractedFields {
        name: find_name(text).unwrap_or_else(not_found),
        position: find_position(text).unwrap_or_else(not_found),
        email: find_email(text).unwrap_or_else(not_found),
        experience: find_experience(text).unwrap_or_else(not_found),
        skills: skills_verdict(text).to_string(),
    }
}

fn not_found() -> String {
    NOT_FOUND.to_string()
}

fn find_name(text: &str) -> Option<String> {
    NAME_RE.find(text).map(|m| m.as_str().to_string())
}

fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn find_experience(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    EXPERIENCE_RE
        .captures(&lowered)
        .and_then(|caps| caps.get(1))
        .map(|years| format!("{} years", years.as_str()))
}

fn find_position(text: &str) -> Option<String> {
    text.split('\n')
        .find(|line| {
            let lowered = line.to_lowercase();
            line.chars().count() < POSITION_MAX_CHARS
                && !POSITION_EXCLUDED_KEYWORDS
                    .iter()
                    .any(|kw| lowered.contains(kw))
        })
        .map(|line| line.trim().to_string())
}

fn skills_verdict(text: &str) -> &'static str {
    if text.contains("Skills") {
        SKILLS_SECTION_FOUND
    } else {
        SKILLS_SECTION_MISSING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "John Smith\njohn.smith@example.com\n5 years experience\nSkills: Python, SQL";

    #[test]
    fn test_sample_resume_fields() {
        let fields = analyze_fields(SAMPLE);
        assert_eq!(fields.name, "John Smith");
        assert_eq!(fields.email, "john.smith@example.com");
        assert_eq!(fields.experience, "5 years");
        assert_eq!(fields.skills, SKILLS_SECTION_FOUND);
    }

    #[test]
    fn test_position_picks_first_short_line_even_the_name() {
        let fields = analyze_fields(SAMPLE);
        assert_eq!(fields.position, "John Smith");
    }

    #[test]
    fn test_empty_text_keeps_every_sentinel_except_skills() {
        let fields = analyze_fields("");
        assert_eq!(fields.name, NOT_FOUND);
        assert_eq!(fields.email, NOT_FOUND);
        assert_eq!(fields.experience, NOT_FOUND);
        // The only line of "" is itself empty and short.
        assert_eq!(fields.position, "");
        assert_eq!(fields.skills, SKILLS_SECTION_MISSING);
    }

    #[test]
    fn test_no_email_yields_not_found() {
        let fields = analyze_fields("Jane Doe\nBackend Engineer\nno contact details here");
        assert_eq!(fields.email, NOT_FOUND);
        assert_eq!(fields.name, "Jane Doe");
    }

    #[test]
    fn test_name_must_be_at_start_of_text() {
        let fields = analyze_fields("resume of\nJohn Smith");
        assert_eq!(fields.name, NOT_FOUND);
    }

    #[test]
    fn test_single_capitalised_word_is_not_a_name() {
        assert_eq!(analyze_fields("Resume\n").name, NOT_FOUND);
    }

    #[test]
    fn test_name_takes_all_leading_capitalised_words() {
        let fields = analyze_fields("Mary Ann Lee, Nurse");
        assert_eq!(fields.name, "Mary Ann Lee");
    }

    #[test]
    fn test_first_email_wins() {
        let fields = analyze_fields("a.b@first.org and c-d@second.net");
        assert_eq!(fields.email, "a.b@first.org");
    }

    #[test]
    fn test_experience_is_case_insensitive() {
        assert_eq!(analyze_fields("Over 12 Years Experience").experience, "12 years");
        assert_eq!(analyze_fields("1 year experience").experience, "1 years");
    }

    #[test]
    fn test_years_of_experience_is_not_extracted() {
        // Preserved coupling with the grammar rule: the correct phrasing is not matched.
        let fields = analyze_fields("I have 5 years of experience");
        assert_eq!(fields.experience, NOT_FOUND);
    }

    #[test]
    fn test_position_skips_section_keywords_and_long_lines() {
        let text = "Contact: 555-0100\n\
                    A very long objective statement that certainly exceeds fifty characters\n\
                    Professional Experience\n\
                      Senior Data Analyst  \n\
                    Education";
        assert_eq!(analyze_fields(text).position, "Senior Data Analyst");
    }

    #[test]
    fn test_position_counts_characters_not_bytes() {
        // 30 two-byte characters: 60 bytes but under the 50-character limit.
        let line = "é".repeat(30);
        assert_eq!(analyze_fields(&line).position, line);
    }

    #[test]
    fn test_position_not_found_when_every_line_is_excluded() {
        let text = "Skills\nEducation\nWork Experience";
        assert_eq!(analyze_fields(text).position, NOT_FOUND);
    }

    #[test]
    fn test_skills_check_is_case_sensitive() {
        assert_eq!(analyze_fields("SKILLS: Rust").skills, SKILLS_SECTION_MISSING);
        assert_eq!(analyze_fields("Core Skills").skills, SKILLS_SECTION_FOUND);
    }

    #[test]
    fn test_fields_are_independent() {
        let fields = analyze_fields("contact me at someone@example.com");
        assert_eq!(fields.email, "someone@example.com");
        assert_eq!(fields.name, NOT_FOUND);
        assert_eq!(fields.experience, NOT_FOUND);
        assert_eq!(fields.position, NOT_FOUND);
    }
}
