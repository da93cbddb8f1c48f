//! Rule-based feedback on common resume mistakes.
//!
//! Each rule is a pure predicate over the resume text plus the finding it
//! contributes. Rules share nothing, so any subset runs in any order and
//! produces the same report.

use crate::models::analysis::{FeedbackCategory, FeedbackReport};

/// A single independent feedback check.
#[derive(Clone, Copy)]
pub struct FeedbackRule {
    pub name: &'static str,
    pub category: FeedbackCategory,
    pub finding: &'static str,
    check: fn(&RuleInput) -> bool,
}

impl std::fmt::Debug for FeedbackRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackRule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

impl FeedbackRule {
    pub fn fires(&self, input: &RuleInput) -> bool {
        (self.check)(input)
    }
}

/// Resume text with its lowercase form computed once for all rules.
pub struct RuleInput<'a> {
    pub text: &'a str,
    pub lowered: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lowered: text.to_lowercase(),
        }
    }
}

pub const RULES: &[FeedbackRule] = &[
    FeedbackRule {
        name: "years_experience_grammar",
        category: FeedbackCategory::GrammaticalErrors,
        finding: "The phrase 'years experience' should be 'years of experience' for correct grammar.",
        check: missing_of_in_years_experience,
    },
    FeedbackRule {
        name: "weak_work_placement_verb",
        category: FeedbackCategory::ProfessionalTone,
        finding: "The phrase 'Determined work placement' could be stronger as 'Determined and assigned work placements' using stronger action verbs.",
        check: weak_work_placement_verb,
    },
    FeedbackRule {
        name: "excessive_gpa_detail",
        category: FeedbackCategory::UnnecessaryInformation,
        finding: "The detailed GPA breakdown may be excessive unless applying for academic roles; consider summarizing.",
        check: excessive_gpa_detail,
    },
    FeedbackRule {
        name: "mixed_experience_focus",
        category: FeedbackCategory::ExperienceRelevance,
        finding: "The resume mixes different types of experience; consider tailoring or separating sections more clearly.",
        check: mixed_experience_focus,
    },
    FeedbackRule {
        name: "missing_skills_section",
        category: FeedbackCategory::SkillsRelevance,
        finding: "No explicit skills section is present; important skills should be clearly listed to improve ATS parsing.",
        check: missing_skills_section,
    },
];

/// Runs every built-in rule against the resume text. Never fails.
pub fn generate_feedback(text: &str) -> FeedbackReport {
    generate_feedback_with(text, RULES)
}

/// Runs an arbitrary rule set. The slice order has no effect on the report.
pub fn generate_feedback_with(text: &str, rules: &[FeedbackRule]) -> FeedbackReport {
    let input = RuleInput::new(text);
    let mut report = FeedbackReport::default();

    let mut fired: Vec<&FeedbackRule> = rules.iter().filter(|r| r.fires(&input)).collect();
    // Findings within a category are ordered by rule name, not slice position.
    fired.sort_by_key(|r| r.name);

    for rule in fired {
        report.push(rule.category, rule.finding);
    }

    report
}

fn missing_of_in_years_experience(input: &RuleInput) -> bool {
    input.lowered.contains("years experience") && !input.lowered.contains("years of experience")
}

// Case-sensitive on purpose: only the exact phrasing is flagged.
fn weak_work_placement_verb(input: &RuleInput) -> bool {
    input.text.contains("Determined work placement")
}

fn excessive_gpa_detail(input: &RuleInput) -> bool {
    input.lowered.matches("gpa").count() > 1
}

fn mixed_experience_focus(input: &RuleInput) -> bool {
    let has = |needle: &str| input.lowered.contains(needle);
    (has("childcare") && has("adult care")) || (has("teacher") && has("caregiver"))
}

fn missing_skills_section(input: &RuleInput) -> bool {
    !input.lowered.contains("skills")
}
