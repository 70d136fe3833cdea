//! Error types for schedule generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for engine operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Fatal errors surfaced to the caller of a search.
///
/// Expected-but-empty outcomes (every combination conflicts, credit bounds
/// unsatisfiable) are not errors; they come back as an empty result with a
/// [`NoScheduleReason`]. Budget and timeout exhaustion are not errors
/// either; they only set the truncation flag on the result.
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    /// A required course has no usable catalog entry for the term.
    /// Raised both when the course is unknown and when it exists with zero
    /// offered sections; also used when the catalog itself fails for a
    /// required course, so transport-level errors never leak to callers.
    #[error("course {course} is unavailable for term {term}")]
    CourseUnavailable { course: String, term: String },
}

impl ScheduleError {
    pub fn course_unavailable(course: impl Into<String>, term: impl Into<String>) -> Self {
        ScheduleError::CourseUnavailable {
            course: course.into(),
            term: term.into(),
        }
    }
}

/// Machine-readable reason attached to an empty (but non-error) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoScheduleReason {
    /// The request named no courses at all.
    NoCoursesRequested,
    /// Every enumerated combination conflicted, violated the credit bounds,
    /// or was excluded by strict walking filtering.
    NoFeasibleCombination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_unavailable_display() {
        let err = ScheduleError::course_unavailable("CMSC131", "202508");
        assert_eq!(
            err.to_string(),
            "course CMSC131 is unavailable for term 202508"
        );
    }

    #[test]
    fn test_reason_serialization() {
        let json = serde_json::to_string(&NoScheduleReason::NoFeasibleCombination).unwrap();
        assert_eq!(json, r#""no_feasible_combination""#);
    }
}
