//! Markdown rendering of an analysis report for clients that display it as-is.

use crate::analysis::AnalysisReport;
use crate::models::analysis::FeedbackCategory;

pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::from("## Result\n\n");
    out.push_str(&format!("**Score:** {}\n\n", report.score));

    out.push_str("## Extracted Data\n\n");
    for (label, value) in report.fields.entries() {
        out.push_str(&format!("- **{label}:** {value}\n"));
    }
    out.push_str(&format!("\n_Note: {}_\n\n", report.ats_note));

    out.push_str("## Detailed Feedback\n\n");
    for category in FeedbackCategory::ALL {
        let findings = report.feedback.findings(category);
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!("**{}**\n\n", category.title()));
        for finding in findings {
            out.push_str(&format!("- {finding}\n"));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ATS_NOTE;
    use crate::models::analysis::{ExtractedFields, FeedbackReport};
    use chrono::Utc;
    use uuid::Uuid;

    fn report(feedback: FeedbackReport) -> AnalysisReport {
        AnalysisReport {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            score: 71,
            score_exact: 71.6,
            label_scores: vec![],
            fields: ExtractedFields {
                name: "John Smith".to_string(),
                email: "john.smith@example.com".to_string(),
                ..ExtractedFields::default()
            },
            feedback,
            ats_note: ATS_NOTE.to_string(),
        }
    }

    #[test]
    fn test_renders_integer_score_and_fields() {
        let md = render_markdown(&report(FeedbackReport::default()));
        assert!(md.contains("**Score:** 71"));
        assert!(md.contains("- **Name:** John Smith"));
        assert!(md.contains("- **Email:** john.smith@example.com"));
        assert!(md.contains("- **Experience:** Not found"));
        assert!(md.contains(ATS_NOTE));
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let mut feedback = FeedbackReport::default();
        feedback.push(FeedbackCategory::UnnecessaryInformation, "Too much GPA detail.");
        let md = render_markdown(&report(feedback));

        assert!(md.contains("**Unnecessary information**"));
        assert!(md.contains("- Too much GPA detail."));
        assert!(!md.contains("Grammatical errors"));
        assert!(!md.contains("Skills relevance"));
    }

    #[test]
    fn test_exact_layout() {
        let mut feedback = FeedbackReport::default();
        feedback.push(FeedbackCategory::SkillsRelevance, "Add a skills section.");
        let md = render_markdown(&report(feedback));

        let expected_head = "## Result\n\n**Score:** 71\n\n## Extracted Data\n\n- **Name:** John Smith\n";
        assert!(md.starts_with(expected_head));
        assert!(md.ends_with(
            "## Detailed Feedback\n\n**Skills relevance**\n\n- Add a skills section.\n\n"
        ));
    }

    #[test]
    fn test_section_order() {
        let md = render_markdown(&report(FeedbackReport::default()));
        let result = md.find("## Result").unwrap();
        let data = md.find("## Extracted Data").unwrap();
        let feedback = md.find("## Detailed Feedback").unwrap();
        assert!(result < data && data < feedback);
    }
}
