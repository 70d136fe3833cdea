//! Schedule generator CLI.
//!
//! Runs a schedule search over a JSON fixture file containing catalog data
//! and a search request, printing the ranked results as JSON. Intended for
//! local experimentation and for exercising the engine end to end without
//! a frontend.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin scheduler -- fixtures/fall_2025.json
//!
//! # With custom weights/limits
//! cp engine.toml.example engine.toml && cargo run --bin scheduler -- fixtures/fall_2025.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level filter (default: info)

use std::env;
use std::fs;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mars_rust::catalog::{LocalCatalog, StaticCampusMap, StaticRatings};
use mars_rust::config::{ConfigError, EngineConfig};
use mars_rust::engine::{ScheduleGenerator, SearchRequest};
use mars_rust::models::{Course, PreferenceProfile, Section, Term};

/// On-disk fixture: catalog contents plus the request to run against them.
#[derive(Debug, Deserialize)]
struct Fixture {
    term: String,
    courses: Vec<CourseEntry>,
    #[serde(default)]
    ratings: Vec<RatingEntry>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    optional: Vec<String>,
    #[serde(default)]
    preferences: PreferenceProfile,
    #[serde(default)]
    top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    course: Course,
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct RatingEntry {
    instructor: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    course: Option<String>,
    #[serde(default)]
    gpa: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = env::args()
        .nth(1)
        .context("usage: scheduler <fixture.json>")?;
    let content = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let fixture: Fixture =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?;

    let config = match EngineConfig::from_default_location() {
        Ok(config) => config,
        Err(ConfigError::NotFound) => EngineConfig::default(),
        Err(e) => return Err(e.into()),
    };

    let term = Term::new(fixture.term);
    let mut catalog = LocalCatalog::new();
    let course_count = fixture.courses.len();
    for entry in fixture.courses {
        catalog.insert(&term, entry.course, entry.sections);
    }
    info!("loaded {} courses for term {}", course_count, term);

    let mut ratings = StaticRatings::new();
    for entry in fixture.ratings {
        if let Some(rating) = entry.rating {
            ratings = ratings.with_rating(&entry.instructor, rating);
        }
        if let (Some(course), Some(gpa)) = (&entry.course, entry.gpa) {
            ratings = ratings.with_gpa(course, &entry.instructor, gpa);
        }
    }

    let generator = ScheduleGenerator::new(
        Arc::new(catalog),
        Arc::new(StaticCampusMap::new()),
        Arc::new(ratings),
    )
    .with_config(config);

    let mut request = SearchRequest::new(term, fixture.required)
        .with_optional(fixture.optional)
        .with_preferences(fixture.preferences);
    if let Some(top_k) = fixture.top_k {
        request = request.with_top_k(top_k);
    }

    let result = generator.generate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
