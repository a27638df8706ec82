//! Mock analysis backend: a fixed delay standing in for a real backend call,
//! then a randomly scored result built from fixed sample content.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::analysis::{AnalysisRequest, AnalysisSource};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, FeedbackItem, KeywordReport, Score};

const MATCHING_SAMPLE: &[&str] = &[
    "Project Management",
    "Agile",
    "Scrum",
    "Stakeholder Communication",
    "Budgeting",
];

const MISSING_SAMPLE: &[&str] = &["Risk Analysis", "JIRA", "CI/CD"];

const FEEDBACK_SAMPLE: &[(&str, &str)] = &[
    (
        "Impact & Action Verbs",
        "Your resume is strong but could be improved by replacing passive phrases like \
         'responsible for' with powerful action verbs such as 'Orchestrated', 'Engineered', \
         or 'Spearheaded' to better showcase your achievements.",
    ),
    (
        "Quantifiable Metrics",
        "Add more quantifiable results. For example, instead of 'Improved team efficiency', \
         write 'Increased team efficiency by 15% by implementing a new Agile workflow'.",
    ),
    (
        "Formatting & Readability",
        "The resume format is clean and ATS-friendly. The font size is appropriate and \
         section headers are clear. No immediate changes needed here.",
    ),
];

/// Builds a mock result with a score drawn uniformly from `[Score::MIN, Score::MAX]`.
pub fn generate_mock_result() -> AnalysisResult {
    generate_mock_result_with(&mut rand::thread_rng())
}

pub fn generate_mock_result_with<R: Rng + ?Sized>(rng: &mut R) -> AnalysisResult {
    let raw = rng.gen_range(Score::MIN..=Score::MAX) as u32;
    // gen_range is bounded by the same constants Score::new checks
    let overall_score = Score::new(raw).unwrap_or(Score::LOWEST);

    AnalysisResult {
        overall_score,
        keywords: KeywordReport {
            matching: MATCHING_SAMPLE.iter().map(|s| s.to_string()).collect(),
            missing: MISSING_SAMPLE.iter().map(|s| s.to_string()).collect(),
        },
        feedback: FEEDBACK_SAMPLE
            .iter()
            .map(|(title, content)| FeedbackItem {
                title: title.to_string(),
                content: content.to_string(),
            })
            .collect(),
        career_paths: vec![],
    }
}

pub struct MockAnalysisSource {
    delay: Duration,
}

impl MockAnalysisSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnalysisSource for MockAnalysisSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        debug!("Simulating analysis for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(generate_mock_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_score_always_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let score = generate_mock_result_with(&mut rng).overall_score.value();
            assert!((60..=100).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_score_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<u8> = (0..5_000)
            .map(|_| generate_mock_result_with(&mut rng).overall_score.value())
            .collect();
        assert!(seen.contains(&60));
        assert!(seen.contains(&100));
    }

    #[test]
    fn test_keyword_samples_are_nonempty_ordered_and_disjoint() {
        let result = generate_mock_result();
        assert!(!result.matching_keywords().is_empty());
        assert!(!result.missing_keywords().is_empty());
        assert_eq!(result.matching_keywords()[0], "Project Management");
        assert_eq!(result.missing_keywords()[2], "CI/CD");

        let matching: HashSet<&String> = result.matching_keywords().iter().collect();
        assert!(result
            .missing_keywords()
            .iter()
            .all(|kw| !matching.contains(kw)));
    }

    #[test]
    fn test_feedback_order_is_fixed() {
        let titles: Vec<String> = generate_mock_result()
            .feedback
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(
            titles,
            [
                "Impact & Action Verbs",
                "Quantifiable Metrics",
                "Formatting & Readability"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_configured_delay() {
        let source = MockAnalysisSource::new(Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        let result = source.fetch(&AnalysisRequest::default()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(result.overall_score >= Score::LOWEST);
    }
}
