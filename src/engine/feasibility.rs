//! Walking-time feasibility evaluation.
//!
//! Feasibility is advisory: a candidate with a tight transfer is still
//! returned, carrying warnings, unless strict filtering was requested.
//! Walking durations come from the campus-map collaborator and are
//! prefetched once per search into a [`WalkingIndex`], so evaluating an
//! individual candidate never suspends.

use log::debug;
use std::collections::{BTreeSet, HashMap};

use crate::catalog::CampusMap;
use crate::models::{ScheduleCandidate, WalkingWarning, WarningKind};

/// Per-request cache of walking durations keyed by unordered building pair.
///
/// `None` values record pairs the campus map could not resolve, so a
/// repeated miss is never re-fetched.
#[derive(Debug, Default)]
pub struct WalkingIndex {
    minutes: HashMap<(String, String), Option<f64>>,
}

impl WalkingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch walking durations for every unordered pair of the given
    /// buildings. One upstream call per pair, regardless of how many
    /// candidates the search later evaluates.
    pub async fn prefetch(buildings: &BTreeSet<String>, map: &dyn CampusMap) -> Self {
        let mut minutes = HashMap::new();
        let list: Vec<&String> = buildings.iter().collect();
        for (i, a) in list.iter().enumerate() {
            for b in list.iter().skip(i + 1) {
                let walk = map.walking_minutes(a, b).await;
                if walk.is_none() {
                    debug!("walking time unresolved for {} <-> {}", a, b);
                }
                minutes.insert(Self::key(a, b), walk);
            }
        }
        WalkingIndex { minutes }
    }

    /// Record a walking duration directly (used by tests).
    pub fn insert(&mut self, a: &str, b: &str, walk: Option<f64>) {
        self.minutes.insert(Self::key(a, b), walk);
    }

    /// Walking minutes between two buildings, if resolved.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(0.0);
        }
        self.minutes.get(&Self::key(a, b)).copied().flatten()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

/// Evaluate walking feasibility for a candidate.
///
/// For each day, consecutive classes in different, resolvable buildings are
/// checked: a gap shorter than the estimated walk produces an
/// [`WarningKind::InsufficientGap`] warning; a walk longer than
/// `max_walking_minutes` produces a [`WarningKind::LongWalk`] warning.
/// Unresolvable buildings are skipped silently.
pub fn evaluate_walking(
    candidate: &ScheduleCandidate,
    max_walking_minutes: u32,
    walking: &WalkingIndex,
) -> Vec<WalkingWarning> {
    let mut warnings = Vec::new();

    for (day, slots) in candidate.day_slots() {
        for pair in slots.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            let (from, to) = match (&first.building, &second.building) {
                (Some(from), Some(to)) if from != to => (from, to),
                _ => continue,
            };
            let Some(walk) = walking.get(from, to) else {
                continue;
            };

            let gap = first.end.minutes_until(second.start);
            let first_label = format!("{}:{}", first.course_code, first.section_id);
            let second_label = format!("{}:{}", second.course_code, second.section_id);

            if (gap as f64) < walk {
                warnings.push(WalkingWarning {
                    kind: WarningKind::InsufficientGap,
                    day,
                    first: first_label,
                    second: second_label,
                    from_building: from.clone(),
                    to_building: to.clone(),
                    gap_minutes: gap,
                    walking_minutes: walk,
                    message: format!(
                        "Only {} min between classes, but {} min walk",
                        gap, walk
                    ),
                });
            } else if walk > max_walking_minutes as f64 {
                warnings.push(WalkingWarning {
                    kind: WarningKind::LongWalk,
                    day,
                    first: first_label,
                    second: second_label,
                    from_building: from.clone(),
                    to_building: to.clone(),
                    gap_minutes: gap,
                    walking_minutes: walk,
                    message: format!("{} min walk between classes", walk),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCampusMap;
    use crate::models::{
        Assignment, Course, Credits, Location, MeetingTime, Section, TimeOfDay, Weekday,
    };

    fn located_section(
        course: &str,
        building: &str,
        start: (u16, u16),
        end: (u16, u16),
    ) -> Section {
        Section::new(course, "0101").with_meeting(
            MeetingTime::new(
                vec![Weekday::Monday],
                TimeOfDay::from_hm(start.0, start.1),
                TimeOfDay::from_hm(end.0, end.1),
            )
            .with_location(Location::new(building, None)),
        )
    }

    fn candidate_with(sections: Vec<Section>) -> ScheduleCandidate {
        ScheduleCandidate::new(
            sections
                .into_iter()
                .map(|section| Assignment {
                    course: Course::new(
                        section.course_code.clone(),
                        section.course_code.clone(),
                        Credits::Fixed(3),
                    ),
                    section,
                })
                .collect(),
        )
    }

    #[test]
    fn test_insufficient_gap_warning() {
        let candidate = candidate_with(vec![
            located_section("CMSC131", "IRB", (10, 0), (10, 50)),
            located_section("MATH140", "MTH", (10, 55), (11, 45)),
        ]);
        let mut walking = WalkingIndex::new();
        walking.insert("IRB", "MTH", Some(12.0));

        let warnings = evaluate_walking(&candidate, 10, &walking);
        assert_eq!(warnings.len(), 1);
        let w = &warnings[0];
        assert_eq!(w.kind, WarningKind::InsufficientGap);
        assert_eq!(w.first, "CMSC131:0101");
        assert_eq!(w.second, "MATH140:0101");
        assert_eq!(w.gap_minutes, 5);
        assert_eq!(w.walking_minutes, 12.0);
    }

    #[test]
    fn test_long_walk_warning() {
        let candidate = candidate_with(vec![
            located_section("CMSC131", "IRB", (10, 0), (10, 50)),
            located_section("MATH140", "MTH", (11, 30), (12, 20)),
        ]);
        let mut walking = WalkingIndex::new();
        walking.insert("IRB", "MTH", Some(15.0));

        let warnings = evaluate_walking(&candidate, 10, &walking);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::LongWalk);
    }

    #[test]
    fn test_comfortable_transfer_no_warning() {
        let candidate = candidate_with(vec![
            located_section("CMSC131", "IRB", (10, 0), (10, 50)),
            located_section("MATH140", "MTH", (11, 0), (11, 50)),
        ]);
        let mut walking = WalkingIndex::new();
        walking.insert("IRB", "MTH", Some(6.0));

        assert!(evaluate_walking(&candidate, 10, &walking).is_empty());
    }

    #[test]
    fn test_unresolved_building_skipped() {
        let candidate = candidate_with(vec![
            located_section("CMSC131", "IRB", (10, 0), (10, 50)),
            located_section("MATH140", "???", (10, 55), (11, 45)),
        ]);
        let walking = WalkingIndex::new();
        assert!(evaluate_walking(&candidate, 10, &walking).is_empty());
    }

    #[test]
    fn test_same_building_no_warning() {
        let candidate = candidate_with(vec![
            located_section("CMSC131", "IRB", (10, 0), (10, 50)),
            located_section("CMSC216", "IRB", (10, 50), (11, 40)),
        ]);
        let walking = WalkingIndex::new();
        assert!(evaluate_walking(&candidate, 10, &walking).is_empty());
    }

    #[tokio::test]
    async fn test_prefetch_covers_all_pairs() {
        let map = StaticCampusMap::new().with_pair("IRB", "MTH", 7.0);
        let buildings: BTreeSet<String> =
            ["IRB", "MTH", "???"].iter().map(|s| s.to_string()).collect();
        let index = WalkingIndex::prefetch(&buildings, &map).await;

        assert_eq!(index.get("IRB", "MTH"), Some(7.0));
        assert_eq!(index.get("MTH", "IRB"), Some(7.0));
        assert_eq!(index.get("IRB", "???"), None);
    }
}
