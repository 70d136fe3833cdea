//! # Mars Schedule Engine
//!
//! Course schedule generation and ranking for a university term.
//!
//! Given a list of course codes, a term, and a student preference profile,
//! the engine enumerates conflict-free combinations of course sections,
//! scores each combination against the preferences, annotates tight
//! between-class walks, and returns the top-K ranked schedules.
//!
//! ## Features
//!
//! - **Conflict pruning**: half-open meeting intervals, pruned during
//!   enumeration rather than post-hoc
//! - **Preference scoring**: weighted, configurable signals for time of
//!   day, instructor quality, grading history, day pattern, and gap shape
//! - **Walking feasibility**: haversine-based walking estimates between
//!   campus buildings, surfaced as advisory warnings
//! - **Bounded search**: leaf budget and optional deadline, with a
//!   truncation flag instead of an error when limits are hit
//!
//! ## Architecture
//!
//! - [`models`]: core domain types (times, courses, sections, candidates)
//! - [`catalog`]: collaborator traits plus in-memory implementations
//! - [`engine`]: the search/score/select pipeline
//! - [`api`]: serializable result types for calling layers
//! - [`config`]: TOML configuration for weights and search limits
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mars_rust::catalog::{LocalCatalog, StaticCampusMap, StaticRatings};
//! use mars_rust::engine::{ScheduleGenerator, SearchRequest};
//! use mars_rust::models::Term;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = ScheduleGenerator::new(
//!     Arc::new(LocalCatalog::new()),
//!     Arc::new(StaticCampusMap::new()),
//!     Arc::new(StaticRatings::new()),
//! );
//! let request = SearchRequest::new(
//!     Term::from_parts("Fall", 2025),
//!     vec!["CMSC131".into(), "MATH140".into()],
//! );
//! let result = generator.generate(&request).await?;
//! for option in &result.options {
//!     println!("score {:.1}: {} sections", option.score, option.sections.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod models;
