//! Collaborator interfaces for catalog, campus-map, and rating data.
//!
//! The engine never talks to the outside world directly: section data,
//! walking-time estimates, and instructor ratings all come through the
//! traits defined here, so storage/transport backends can be swapped and
//! the engine stays testable with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  engine::ScheduleGenerator                   │
//! └───────┬──────────────┬───────────────┬───────┘
//!         │              │               │
//!   SectionCatalog   CampusMap   InstructorRatings
//!         │              │               │
//!   (umd.io-style)  (coordinates +  (PlanetTerp-
//!    section feed    walking model)  style scores)
//! ```
//!
//! The `local` module provides the in-memory implementations used in tests
//! and local development.

pub mod local;

pub use local::{LocalCatalog, StaticCampusMap, StaticRatings};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Course, Section, Term};

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog lookups.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The course has no catalog entry for the requested term.
    #[error("course {course} not found for term {term}")]
    CourseNotFound { course: String, term: String },

    /// The upstream source could not be reached or answered abnormally.
    #[error("catalog transport error: {message}")]
    Transport { message: String },

    /// The upstream source answered with data that could not be interpreted.
    #[error("invalid catalog data: {message}")]
    InvalidData { message: String },
}

impl CatalogError {
    pub fn course_not_found(course: impl Into<String>, term: &Term) -> Self {
        CatalogError::CourseNotFound {
            course: course.into(),
            term: term.code().to_string(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        CatalogError::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        CatalogError::InvalidData {
            message: message.into(),
        }
    }
}

/// Read-only access to course and section data for a term.
///
/// A missing course is an error (`CourseNotFound`); a course that exists but
/// currently has no open sections returns an empty list.
#[async_trait]
pub trait SectionCatalog: Send + Sync {
    /// Course reference data (title, credit hours).
    async fn course(&self, code: &str, term: &Term) -> CatalogResult<Course>;

    /// All offered sections of a course for a term.
    async fn sections(&self, code: &str, term: &Term) -> CatalogResult<Vec<Section>>;
}

/// Walking-time estimates between campus buildings.
///
/// `None` means the pair could not be resolved; the engine treats that as
/// "no information", never as an error.
#[async_trait]
pub trait CampusMap: Send + Sync {
    async fn walking_minutes(&self, from_building: &str, to_building: &str) -> Option<f64>;
}

/// Instructor quality and grading-history lookups.
///
/// Both operations are best-effort: `None` simply excludes the instructor
/// from the relevant scoring signal.
#[async_trait]
pub trait InstructorRatings: Send + Sync {
    /// Aggregated instructor rating on the 0–5 review scale.
    async fn rating_for(&self, instructor: &str) -> Option<f64>;

    /// Historical mean GPA for the instructor's offerings of a course (0–4).
    async fn average_gpa(&self, course: &str, instructor: &str) -> Option<f64>;
}
