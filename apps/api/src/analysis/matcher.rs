//! Keyword matching: résumé keyword set vs a job description's keywords.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{extract_keywords, KeywordSet};
use crate::errors::AppError;

/// Result of comparing a résumé keyword set against a job description.
/// Ephemeral: returned to the caller, never persisted.
///
/// `matches` and `missing` are lexicographically sorted so repeated runs
/// over the same input produce byte-identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<String>,
    pub missing: Vec<String>,
    /// `100 × |matches| / max(|job_keywords|, 1)`, in [0, 100].
    pub score: f64,
}

/// Compares résumé keywords against a job description.
///
/// The only failure is an empty/blank `job_text`. A job description that
/// is present but yields zero keywords is not an error: it scores 0 with
/// empty `matches` and `missing`.
///
/// Note the asymmetry: `missing` is always relative to the job
/// description, never the résumé.
pub fn compare(resume_keywords: &KeywordSet, job_text: &str) -> Result<MatchResult, AppError> {
    if job_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    let job_keywords = extract_keywords(job_text);

    // BTreeSet iteration is sorted, and partition preserves it.
    let (matches, missing): (Vec<String>, Vec<String>) = job_keywords
        .iter()
        .cloned()
        .partition(|k| resume_keywords.contains(k));

    let score = 100.0 * matches.len() as f64 / job_keywords.len().max(1) as f64;

    Ok(MatchResult {
        matches,
        missing,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword_set(tokens: &[&str]) -> KeywordSet {
        KeywordSet::from(tokens.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_example_job_comparison() {
        let resume = keyword_set(&["python", "docker", "flask"]);
        let result = compare(
            &resume,
            "Looking for a Python developer with Docker and Kubernetes experience",
        )
        .unwrap();

        assert_eq!(result.matches, vec!["docker", "python"]);
        assert_eq!(
            result.missing,
            vec!["developer", "experience", "kubernetes", "looking"]
        );
        // 2 of 6 job keywords matched.
        assert!((result.score - 100.0 * 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_job_text_is_invalid() {
        let resume = keyword_set(&["python"]);
        assert!(matches!(
            compare(&resume, ""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_job_text_is_invalid() {
        let resume = keyword_set(&["python"]);
        assert!(matches!(
            compare(&resume, "   \n  "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_job_text_with_no_keywords_scores_zero() {
        let resume = keyword_set(&["python"]);
        let result = compare(&resume, "the and for 123 !!").unwrap();
        assert!(result.matches.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_full_coverage_scores_one_hundred() {
        let resume = keyword_set(&["rust", "kafka", "postgres", "kubernetes"]);
        let result = compare(&resume, "Rust and Kafka with Postgres").unwrap();
        assert!(result.missing.is_empty());
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_empty_resume_set_matches_nothing() {
        let resume = KeywordSet::default();
        let result = compare(&resume, "Rust engineer with Kafka").unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.missing, vec!["engineer", "kafka", "rust"]);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_missing_is_relative_to_job_not_resume() {
        // Résumé-only keywords never appear in `missing`.
        let resume = keyword_set(&["python", "haskell", "erlang"]);
        let result = compare(&resume, "Python developer").unwrap();
        assert_eq!(result.matches, vec!["python"]);
        assert_eq!(result.missing, vec!["developer"]);
    }

    #[test]
    fn test_score_bounds() {
        let resume = keyword_set(&["python", "docker"]);
        for job in [
            "Python",
            "Python Docker",
            "Golang Elixir Haskell",
            "Python Python Python",
        ] {
            let result = compare(&resume, job).unwrap();
            assert!(result.score >= 0.0 && result.score <= 100.0, "job: {job}");
        }
    }

    #[test]
    fn test_outputs_are_sorted() {
        let resume = keyword_set(&["zookeeper", "ansible"]);
        let result = compare(&resume, "zookeeper terraform ansible bazel").unwrap();
        assert_eq!(result.matches, vec!["ansible", "zookeeper"]);
        assert_eq!(result.missing, vec!["bazel", "terraform"]);
    }
}
