//! Pass/fail classification of generated test cases.
//!
//! No step is ever executed. When heuristics are enabled, a case counts as
//! failed if its rendered narration mentions a failure keyword. This is a
//! text heuristic standing in for real result ingestion and its output must
//! stay stable for tooling that consumes the reports.

use crate::config::{
    ConversionConfig, FAILURE_KEYWORDS, SIMULATED_FAILURE_DETAIL, SIMULATED_FAILURE_MESSAGE,
};

/// Failure record attached to a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub detail: String,
}

impl Failure {
    /// The fixed failure produced by the heuristic classifier.
    #[must_use]
    pub fn simulated() -> Self {
        Self {
            message: SIMULATED_FAILURE_MESSAGE.to_string(),
            detail: SIMULATED_FAILURE_DETAIL.to_string(),
        }
    }
}

/// Classification of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(Failure),
}

impl Outcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure record, if any.
    #[must_use]
    pub fn into_failure(self) -> Option<Failure> {
        match self {
            Self::Passed => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// How cases are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// Every case passes.
    AllPassed,

    /// Cases whose narration contains a failure keyword fail.
    KeywordHeuristic,
}

impl From<&ConversionConfig> for ClassificationPolicy {
    fn from(config: &ConversionConfig) -> Self {
        if config.mark_all_passed {
            Self::AllPassed
        } else {
            Self::KeywordHeuristic
        }
    }
}

impl ClassificationPolicy {
    /// Classify a case from its fully rendered narration.
    ///
    /// # Examples
    /// ```
    /// use gherkin_junit::outcome::{ClassificationPolicy, Outcome};
    ///
    /// let output = "Then the login is INVALID......passed\n";
    /// assert_eq!(ClassificationPolicy::AllPassed.classify(output), Outcome::Passed);
    /// assert!(ClassificationPolicy::KeywordHeuristic.classify(output).is_failed());
    /// ```
    #[must_use]
    pub fn classify(self, rendered_output: &str) -> Outcome {
        match self {
            Self::AllPassed => Outcome::Passed,
            Self::KeywordHeuristic => {
                if contains_failure_keyword(rendered_output) {
                    Outcome::Failed(Failure::simulated())
                } else {
                    Outcome::Passed
                }
            }
        }
    }
}

/// Whether `text` contains a failure keyword, ignoring case.
#[must_use]
pub fn contains_failure_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    FAILURE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_config() {
        let config = ConversionConfig::default();
        assert_eq!(
            ClassificationPolicy::from(&config),
            ClassificationPolicy::AllPassed
        );

        let config = ConversionConfig {
            mark_all_passed: false,
            ..ConversionConfig::default()
        };
        assert_eq!(
            ClassificationPolicy::from(&config),
            ClassificationPolicy::KeywordHeuristic
        );
    }

    #[test]
    fn test_all_passed_ignores_keywords() {
        let outcome = ClassificationPolicy::AllPassed.classify("Then it should fail with invalid input");
        assert_eq!(outcome, Outcome::Passed);
    }

    #[test]
    fn test_heuristic_matches_case_insensitively() {
        for text in ["FAIL", "Failure expected", "an Invalid token", "failed", "INVALID"] {
            let outcome = ClassificationPolicy::KeywordHeuristic.classify(text);
            assert_eq!(outcome, Outcome::Failed(Failure::simulated()), "text: {text}");
        }
    }

    #[test]
    fn test_heuristic_passes_clean_text() {
        let outcome =
            ClassificationPolicy::KeywordHeuristic.classify("Given a user\nThen access is granted\n");
        assert_eq!(outcome, Outcome::Passed);
    }

    #[test]
    fn test_simulated_failure_message() {
        let failure = Failure::simulated();
        assert_eq!(failure.message, "Simulated failure");
        assert_eq!(failure.detail, SIMULATED_FAILURE_DETAIL);
    }

    #[test]
    fn test_into_failure() {
        assert!(Outcome::Passed.into_failure().is_none());
        assert!(Outcome::Failed(Failure::simulated()).into_failure().is_some());
    }
}
