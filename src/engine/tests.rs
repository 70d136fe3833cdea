//! Engine-level tests exercising the full pipeline through
//! [`ScheduleGenerator`], complementing the per-module unit tests.

use std::sync::Arc;

use crate::catalog::{LocalCatalog, StaticCampusMap, StaticRatings};
use crate::config::EngineConfig;
use crate::engine::{NoScheduleReason, ScheduleGenerator, SearchRequest};
use crate::models::{
    Course, Credits, Location, MeetingTime, PreferenceProfile, Section, Term, TimeOfDay, Weekday,
};

fn term() -> Term {
    Term::new("202508")
}

fn mwf_section(code: &str, id: &str, hour: u16, building: &str) -> Section {
    Section::new(code, id).with_meeting(
        MeetingTime::new(
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
            TimeOfDay::from_hm(hour, 0),
            TimeOfDay::from_hm(hour, 50),
        )
        .with_location(Location::new(building, None)),
    )
}

fn generator_for(catalog: LocalCatalog, config: EngineConfig) -> ScheduleGenerator {
    ScheduleGenerator::new(
        Arc::new(catalog),
        Arc::new(StaticCampusMap::new()),
        Arc::new(StaticRatings::new()),
    )
    .with_config(config)
}

#[tokio::test]
async fn test_single_conflict_free_combination() {
    // Only the afternoon CMSC131 section avoids the MATH140 slot.
    let mut catalog = LocalCatalog::new();
    catalog.insert(
        &term(),
        Course::new("CMSC131", "Object-Oriented Programming I", Credits::Fixed(4)),
        vec![
            mwf_section("CMSC131", "0101", 10, "IRB"),
            mwf_section("CMSC131", "0102", 14, "IRB"),
        ],
    );
    catalog.insert(
        &term(),
        Course::new("MATH140", "Calculus I", Credits::Fixed(4)),
        vec![mwf_section("MATH140", "0201", 10, "MTH")],
    );

    let request = SearchRequest::new(term(), vec!["CMSC131".into(), "MATH140".into()]);
    let result = generator_for(catalog, EngineConfig::default())
        .generate(&request)
        .await
        .unwrap();

    assert_eq!(result.options.len(), 1);
    assert_eq!(result.options[0].sections[0].section_id, "0102");
}

#[tokio::test]
async fn test_immediate_deadline_truncates() {
    let mut catalog = LocalCatalog::new();
    catalog.insert(
        &term(),
        Course::new("CMSC131", "Object-Oriented Programming I", Credits::Fixed(4)),
        vec![mwf_section("CMSC131", "0101", 10, "IRB")],
    );

    let mut config = EngineConfig::default();
    config.search.timeout_ms = Some(0);
    let request = SearchRequest::new(term(), vec!["CMSC131".into()]);
    let result = generator_for(catalog, config)
        .generate(&request)
        .await
        .unwrap();

    assert!(result.truncated);
    assert!(result.is_empty());
    assert_eq!(result.reason, Some(NoScheduleReason::NoFeasibleCombination));
}

#[tokio::test]
async fn test_ranged_credit_course_passes_interval_check() {
    let mut catalog = LocalCatalog::new();
    catalog.insert(
        &term(),
        Course::new("CMSC131", "Object-Oriented Programming I", Credits::Fixed(4)),
        vec![mwf_section("CMSC131", "0101", 10, "IRB")],
    );
    catalog.insert(
        &term(),
        Course::new("CMSC499", "Independent Study", Credits::Range { min: 1, max: 3 }),
        vec![Section::new("CMSC499", "0101")],
    );

    // [5, 7] intersects [6, 20], so the pair is admissible at 6+ credits.
    let preferences = PreferenceProfile {
        min_credits: 6,
        ..Default::default()
    };
    let request = SearchRequest::new(term(), vec!["CMSC131".into(), "CMSC499".into()])
        .with_preferences(preferences);
    let result = generator_for(catalog, EngineConfig::default())
        .generate(&request)
        .await
        .unwrap();

    assert_eq!(result.options.len(), 1);
    assert_eq!(result.options[0].total_credits_min, 5);
    assert_eq!(result.options[0].total_credits_max, 7);
}

#[tokio::test]
async fn test_two_optional_courses_enumerate_all_subsets() {
    let mut catalog = LocalCatalog::new();
    catalog.insert(
        &term(),
        Course::new("HONR218", "Honors Seminar", Credits::Fixed(3)),
        vec![mwf_section("HONR218", "0101", 9, "SQH")],
    );
    catalog.insert(
        &term(),
        Course::new("MUSC129", "Ensemble", Credits::Fixed(1)),
        vec![mwf_section("MUSC129", "0101", 16, "CLA")],
    );

    let request = SearchRequest::new(term(), Vec::new())
        .with_optional(vec!["HONR218".into(), "MUSC129".into()]);
    let result = generator_for(catalog, EngineConfig::default())
        .generate(&request)
        .await
        .unwrap();

    // Both, either one alone; the all-skipped subset is not a schedule.
    assert_eq!(result.options.len(), 3);
}
