use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::time::Weekday;

fn default_min_credits() -> u32 {
    1
}

fn default_max_credits() -> u32 {
    20
}

fn default_max_walking_minutes() -> u32 {
    10
}

/// A student's scheduling preference profile.
///
/// Every option except the credit bounds is optional; an absent option means
/// "no preference" and contributes nothing to scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceProfile {
    pub prefer_morning: bool,
    pub prefer_afternoon: bool,
    pub prefer_evening: bool,
    pub avoid_back_to_back: bool,
    pub prioritize_instructor_rating: bool,
    pub prioritize_easy_grading: bool,
    /// When set, candidates whose active days stay within this set get a bonus.
    pub preferred_days: Option<BTreeSet<Weekday>>,
    pub min_credits: u32,
    pub max_credits: u32,
    /// Threshold for long-walk feasibility warnings.
    pub max_walking_minutes: u32,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        PreferenceProfile {
            prefer_morning: false,
            prefer_afternoon: false,
            prefer_evening: false,
            avoid_back_to_back: false,
            prioritize_instructor_rating: false,
            prioritize_easy_grading: false,
            preferred_days: None,
            min_credits: default_min_credits(),
            max_credits: default_max_credits(),
            max_walking_minutes: default_max_walking_minutes(),
        }
    }
}

impl PreferenceProfile {
    /// True when any time-of-day window preference is set.
    pub fn has_time_preference(&self) -> bool {
        self.prefer_morning || self.prefer_afternoon || self.prefer_evening
    }
}
