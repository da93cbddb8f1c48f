use serde::{Deserialize, Serialize};

/// Placeholder for a field the heuristics could not locate.
pub const NOT_FOUND: &str = "Not found";

/// Structured fields pulled out of resume text. Every field is independent
/// and defaults to [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: String,
    pub position: String,
    pub email: String,
    pub experience: String,
    pub skills: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            position: NOT_FOUND.to_string(),
            email: NOT_FOUND.to_string(),
            experience: NOT_FOUND.to_string(),
            skills: NOT_FOUND.to_string(),
        }
    }
}

impl ExtractedFields {
    /// (label, value) pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("Name", self.name.as_str()),
            ("Position", self.position.as_str()),
            ("Email", self.email.as_str()),
            ("Experience", self.experience.as_str()),
            ("Skills", self.skills.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    GrammaticalErrors,
    ProfessionalTone,
    UnnecessaryInformation,
    ExperienceRelevance,
    SkillsRelevance,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 5] = [
        FeedbackCategory::GrammaticalErrors,
        FeedbackCategory::ProfessionalTone,
        FeedbackCategory::UnnecessaryInformation,
        FeedbackCategory::ExperienceRelevance,
        FeedbackCategory::SkillsRelevance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FeedbackCategory::GrammaticalErrors => "Grammatical errors",
            FeedbackCategory::ProfessionalTone => "Professional tone",
            FeedbackCategory::UnnecessaryInformation => "Unnecessary information",
            FeedbackCategory::ExperienceRelevance => "Experience relevance",
            FeedbackCategory::SkillsRelevance => "Skills relevance",
        }
    }
}

/// Rule findings grouped by category. A category nothing fired for stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub grammatical_errors: Vec<String>,
    pub professional_tone: Vec<String>,
    pub unnecessary_information: Vec<String>,
    pub experience_relevance: Vec<String>,
    pub skills_relevance: Vec<String>,
}

impl FeedbackReport {
    pub fn findings(&self, category: FeedbackCategory) -> &[String] {
        match category {
            FeedbackCategory::GrammaticalErrors => &self.grammatical_errors,
            FeedbackCategory::ProfessionalTone => &self.professional_tone,
            FeedbackCategory::UnnecessaryInformation => &self.unnecessary_information,
            FeedbackCategory::ExperienceRelevance => &self.experience_relevance,
            FeedbackCategory::SkillsRelevance => &self.skills_relevance,
        }
    }

    pub fn push(&mut self, category: FeedbackCategory, finding: impl Into<String>) {
        let bucket = match category {
            FeedbackCategory::GrammaticalErrors => &mut self.grammatical_errors,
            FeedbackCategory::ProfessionalTone => &mut self.professional_tone,
            FeedbackCategory::UnnecessaryInformation => &mut self.unnecessary_information,
            FeedbackCategory::ExperienceRelevance => &mut self.experience_relevance,
            FeedbackCategory::SkillsRelevance => &mut self.skills_relevance,
        };
        bucket.push(finding.into());
    }

    pub fn is_empty(&self) -> bool {
        FeedbackCategory::ALL
            .iter()
            .all(|&c| self.findings(c).is_empty())
    }
}

/// Classifier confidence for one candidate label, 0.0 – 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Mean label confidence as a percentage, 0.0 – 100.0.
    pub score: f64,
    pub label_scores: Vec<LabelScore>,
}

impl ScoreResult {
    /// Integer part of the score, the way it is shown to applicants.
    pub fn display_score(&self) -> u32 {
        self.score.clamp(0.0, 100.0).trunc() as u32
    }
}
