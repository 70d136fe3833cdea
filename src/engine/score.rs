//! Preference scoring.
//!
//! The score is an additive, weighted combination of independent signals.
//! Every signal is normalized to 0–1 before its weight is applied, so the
//! relative weights are the only tuning surface; the weights themselves are
//! configuration (see [`ScoringWeights`]), not constants.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{PreferenceProfile, ScheduleCandidate};

/// Preferred time-of-day windows, as minute-of-day ranges.
const MORNING: (u32, u32) = (8 * 60, 12 * 60);
const AFTERNOON: (u32, u32) = (12 * 60, 17 * 60);
const EVENING: (u32, u32) = (17 * 60, 21 * 60);

/// Adjacent same-day classes closer than this count as back-to-back.
const BACK_TO_BACK_MINUTES: i32 = 15;

/// A same-day gap in this range is considered ideal for breaks/study.
const IDEAL_GAP_MINUTES: (i32, i32) = (30, 90);

/// Same-day gaps longer than this are dead time.
const EXCESSIVE_GAP_MINUTES: i32 = 180;

fn default_time_of_day_weight() -> f64 {
    25.0
}

fn default_instructor_rating_weight() -> f64 {
    20.0
}

fn default_easy_grading_weight() -> f64 {
    15.0
}

fn default_preferred_days_weight() -> f64 {
    10.0
}

fn default_back_to_back_weight() -> f64 {
    10.0
}

fn default_gap_shape_weight() -> f64 {
    5.0
}

/// Relative weights of the scoring signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub time_of_day: f64,
    pub instructor_rating: f64,
    pub easy_grading: f64,
    pub preferred_days: f64,
    /// Penalty weight; subtracted, never added.
    pub back_to_back: f64,
    pub gap_shape: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            time_of_day: default_time_of_day_weight(),
            instructor_rating: default_instructor_rating_weight(),
            easy_grading: default_easy_grading_weight(),
            preferred_days: default_preferred_days_weight(),
            back_to_back: default_back_to_back_weight(),
            gap_shape: default_gap_shape_weight(),
        }
    }
}

/// Instructor ratings and grading history, prefetched once per search so the
/// scorer stays pure and synchronous.
#[derive(Debug, Clone, Default)]
pub struct RatingsIndex {
    ratings: HashMap<String, f64>,
    gpas: HashMap<(String, String), f64>,
}

impl RatingsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_rating(&mut self, instructor: impl Into<String>, rating: f64) {
        self.ratings.insert(instructor.into(), rating);
    }

    pub fn insert_gpa(&mut self, course: impl Into<String>, instructor: impl Into<String>, gpa: f64) {
        self.gpas.insert((course.into(), instructor.into()), gpa);
    }

    pub fn rating(&self, instructor: &str) -> Option<f64> {
        self.ratings.get(instructor).copied()
    }

    pub fn gpa(&self, course: &str, instructor: &str) -> Option<f64> {
        self.gpas
            .get(&(course.to_string(), instructor.to_string()))
            .copied()
    }
}

/// Score a complete candidate against a preference profile.
///
/// Deterministic and pure: identical inputs always produce identical scores.
pub fn score_candidate(
    candidate: &ScheduleCandidate,
    prefs: &PreferenceProfile,
    weights: &ScoringWeights,
    ratings: &RatingsIndex,
) -> f64 {
    let mut score = 0.0;

    score += weights.time_of_day * time_of_day_fit(candidate, prefs);
    score += weights.instructor_rating * instructor_quality(candidate, prefs, ratings);
    score += weights.easy_grading * grading_ease(candidate, prefs, ratings);
    score += weights.gap_shape * gap_shape(candidate);

    if let Some(preferred) = &prefs.preferred_days {
        let active = candidate.active_days();
        if active.iter().all(|d| preferred.contains(d)) {
            score += weights.preferred_days;
        }
    }

    if prefs.avoid_back_to_back {
        score -= weights.back_to_back * back_to_back_fraction(candidate);
    }

    score
}

/// Fraction of scheduled class-minutes falling inside the preferred
/// time-of-day window(s). 1.0 when no time preference is set, and neutral
/// for candidates with no scheduled minutes at all (fully online).
fn time_of_day_fit(candidate: &ScheduleCandidate, prefs: &PreferenceProfile) -> f64 {
    if !prefs.has_time_preference() {
        return 1.0;
    }

    let mut windows: Vec<(u32, u32)> = Vec::new();
    if prefs.prefer_morning {
        windows.push(MORNING);
    }
    if prefs.prefer_afternoon {
        windows.push(AFTERNOON);
    }
    if prefs.prefer_evening {
        windows.push(EVENING);
    }

    let mut total_minutes: u64 = 0;
    let mut in_window_minutes: u64 = 0;
    for section in candidate.sections() {
        for meeting in &section.meetings {
            let day_count = meeting.days.len() as u64;
            let start = meeting.start.minutes() as u32;
            let end = meeting.end.minutes() as u32;
            total_minutes += (end.saturating_sub(start) as u64) * day_count;
            for &(win_start, win_end) in &windows {
                let overlap = end.min(win_end).saturating_sub(start.max(win_start));
                in_window_minutes += overlap as u64 * day_count;
            }
        }
    }

    if total_minutes == 0 {
        1.0
    } else {
        in_window_minutes as f64 / total_minutes as f64
    }
}

/// Mean available instructor rating rescaled from the 0–5 review scale.
/// Sections with no instructor or no rating are excluded from the mean, not
/// counted as zero; 0.5 neutral when nothing is available or the preference
/// is off.
fn instructor_quality(
    candidate: &ScheduleCandidate,
    prefs: &PreferenceProfile,
    ratings: &RatingsIndex,
) -> f64 {
    if !prefs.prioritize_instructor_rating {
        return 0.5;
    }

    let available: Vec<f64> = candidate
        .sections()
        .filter_map(|s| s.instructor.as_deref())
        .filter_map(|name| ratings.rating(name))
        .collect();

    if available.is_empty() {
        0.5
    } else {
        let mean = available.iter().sum::<f64>() / available.len() as f64;
        (mean / 5.0).clamp(0.0, 1.0)
    }
}

/// Mean historical GPA rescaled from the 0–4 scale, when the student asked
/// for easier grading; 0.5 neutral otherwise.
fn grading_ease(
    candidate: &ScheduleCandidate,
    prefs: &PreferenceProfile,
    ratings: &RatingsIndex,
) -> f64 {
    if !prefs.prioritize_easy_grading {
        return 0.5;
    }

    let available: Vec<f64> = candidate
        .assignments
        .iter()
        .filter_map(|a| {
            let instructor = a.section.instructor.as_deref()?;
            ratings.gpa(&a.course.code, instructor)
        })
        .collect();

    if available.is_empty() {
        0.5
    } else {
        let mean = available.iter().sum::<f64>() / available.len() as f64;
        (mean / 4.0).clamp(0.0, 1.0)
    }
}

/// Fraction of same-day adjacent class pairs with little or no break.
fn back_to_back_fraction(candidate: &ScheduleCandidate) -> f64 {
    let mut pairs = 0u32;
    let mut tight = 0u32;
    for slots in candidate.day_slots().values() {
        for pair in slots.windows(2) {
            pairs += 1;
            let gap = pair[0].end.minutes_until(pair[1].start);
            if gap < BACK_TO_BACK_MINUTES {
                tight += 1;
            }
        }
    }
    if pairs == 0 {
        0.0
    } else {
        tight as f64 / pairs as f64
    }
}

/// Shape of the breaks between same-day classes: gaps of 30–90 minutes are
/// ideal, gaps above three hours are dead time, everything else is neutral.
fn gap_shape(candidate: &ScheduleCandidate) -> f64 {
    let mut pairs = 0u32;
    let mut total = 0.0;
    for slots in candidate.day_slots().values() {
        for pair in slots.windows(2) {
            pairs += 1;
            let gap = pair[0].end.minutes_until(pair[1].start);
            total += if (IDEAL_GAP_MINUTES.0..=IDEAL_GAP_MINUTES.1).contains(&gap) {
                1.0
            } else if gap > EXCESSIVE_GAP_MINUTES {
                0.0
            } else {
                0.5
            };
        }
    }
    if pairs == 0 {
        0.5
    } else {
        total / pairs as f64
    }
}
