/// Quality dimensions every resume is scored against, in report order.
pub const CANDIDATE_LABELS: [&str; 7] = [
    "Strong technical skills",
    "Experience with project management",
    "Clear and concise summary",
    "Measurable achievements included",
    "Well-structured and easy to read",
    "Relevant keywords for the job",
    "Excellent communication skills",
];

/// Character budgets applied before prompt assembly. The defaults keep the
/// prompt inside a 1024-token NLI window.
#[derive(Debug, Clone, Copy)]
pub struct PromptLimits {
    pub max_resume_chars: usize,
    pub max_job_description_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            max_resume_chars: 3000,
            max_job_description_chars: 1000,
        }
    }
}

pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    format!("Resume:\n{resume_text}\n\nJob Description:\n{job_description}")
}

/// Builds the prompt after truncating both sections to their budgets.
/// Returns the prompt and whether anything was cut.
pub fn build_bounded_prompt(
    resume_text: &str,
    job_description: &str,
    limits: PromptLimits,
) -> (String, bool) {
    let resume = truncate_chars(resume_text, limits.max_resume_chars);
    let job = truncate_chars(job_description, limits.max_job_description_chars);
    let truncated = resume.len() < resume_text.len() || job.len() < job_description.len();
    (build_prompt(resume, job), truncated)
}

/// Keeps at most `max_chars` characters, cutting on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
