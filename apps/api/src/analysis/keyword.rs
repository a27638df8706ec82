//! Keyword analysis backend: compares job-description vocabulary against the resume text.
//!
//! Algorithm:
//! 1. Tokenize both texts: lowercase, whitespace split, edge punctuation trimmed.
//! 2. JD keywords = JD tokens minus stop words, de-duplicated in first-appearance order.
//! 3. matching = JD keywords found in the resume; missing = the rest.
//! 4. overall_score = min(95, 60 + 5 × matching count)

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::info;

use crate::analysis::pdf::extract_resume_text;
use crate::analysis::{AnalysisRequest, AnalysisSource};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, CareerPath, FeedbackItem, KeywordReport, Score};

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "for", "with", "is", "of", "to", "and",
];

const MAX_MATCHING_SHOWN: usize = 10;
const MAX_MISSING_SHOWN: usize = 5;
const SCORE_CEILING: u32 = 95;
const POINTS_PER_MATCH: u32 = 5;

pub struct KeywordAnalysisSource;

#[async_trait]
impl AnalysisSource for KeywordAnalysisSource {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn fetch(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let upload = request
            .resume
            .as_ref()
            .ok_or_else(|| AppError::Validation("No resume file found".to_string()))?;

        let resume_text = extract_resume_text(upload).await?;
        let result = analyze_texts(&resume_text, &request.job_description);

        info!(
            "Keyword analysis of '{}': score {}, {} matching, {} missing",
            upload.file_name,
            result.overall_score,
            result.keywords.matching.len(),
            result.keywords.missing.len()
        );
        Ok(result)
    }
}

/// Scores `resume_text` against `job_description`. Pure and deterministic.
pub fn analyze_texts(resume_text: &str, job_description: &str) -> AnalysisResult {
    let resume_words: HashSet<String> = tokenize(resume_text).collect();

    let mut seen = HashSet::new();
    let jd_keywords: Vec<String> = tokenize(job_description)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .filter(|word| seen.insert(word.clone()))
        .collect();

    let (matching, missing): (Vec<String>, Vec<String>) = jd_keywords
        .into_iter()
        .partition(|kw| resume_words.contains(kw));

    let overall_score = score_for_matches(matching.len());

    AnalysisResult {
        overall_score,
        keywords: KeywordReport {
            matching: matching.into_iter().take(MAX_MATCHING_SHOWN).collect(),
            missing: missing.into_iter().take(MAX_MISSING_SHOWN).collect(),
        },
        feedback: vec![
            FeedbackItem {
                title: "Real-time Feedback".to_string(),
                content: "This feedback came directly from the analysis backend!".to_string(),
            },
            FeedbackItem {
                title: "File Content Length".to_string(),
                content: format!(
                    "The resume contains {} characters.",
                    resume_text.chars().count()
                ),
            },
        ],
        career_paths: default_career_paths(),
    }
}

fn score_for_matches(matches: usize) -> Score {
    let raw = (Score::MIN as u32)
        .saturating_add((matches as u32).saturating_mul(POINTS_PER_MATCH))
        .min(SCORE_CEILING);
    // raw is within [MIN, SCORE_CEILING], a subset of the valid range
    Score::new(raw).unwrap_or(Score::LOWEST)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
}

fn default_career_paths() -> Vec<CareerPath> {
    vec![
        CareerPath {
            title: "DevOps Engineer".to_string(),
            description: "Your skills in automation and cloud infrastructure make you a strong \
                          candidate for a DevOps role. Focus on learning CI/CD tools like \
                          Jenkins or GitLab."
                .to_string(),
        },
        CareerPath {
            title: "Data Scientist".to_string(),
            description: "With a background in Python and analytics, consider a career in Data \
                          Science. Enhancing your SQL and statistical modeling skills would be \
                          beneficial."
                .to_string(),
        },
    ]
}
