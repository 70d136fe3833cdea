use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::course::Course;
use super::section::Section;
use super::time::{TimeOfDay, Weekday};

/// One course→section assignment inside a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub course: Course,
    pub section: Section,
}

/// A single class occurrence on a specific day, flattened out of a
/// section's meeting times. Used for day-ordered checks (walking
/// feasibility, back-to-back detection, gap shape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySlot {
    pub course_code: String,
    pub section_id: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub building: Option<String>,
}

/// A complete, conflict-free assignment of one section per required course.
///
/// Candidates own no mutable state after construction; credit totals,
/// per-day orderings, and the assignment key are derived on demand so they
/// can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub assignments: Vec<Assignment>,
}

impl ScheduleCandidate {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        ScheduleCandidate { assignments }
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.assignments.iter().map(|a| &a.section)
    }

    /// Total credit hours as a `[min, max]` interval. The interval collapses
    /// to a point when no variable-credit course is present.
    pub fn credit_interval(&self) -> (u32, u32) {
        self.assignments.iter().fold((0, 0), |(lo, hi), a| {
            (lo + a.course.credits.min(), hi + a.course.credits.max())
        })
    }

    /// True when the candidate can satisfy `[min_credits, max_credits]`,
    /// i.e. the candidate's credit interval intersects the allowed window.
    pub fn satisfies_credit_bounds(&self, min_credits: u32, max_credits: u32) -> bool {
        let (lo, hi) = self.credit_interval();
        hi >= min_credits && lo <= max_credits
    }

    /// Total scheduled minutes per week across all sections.
    pub fn weekly_minutes(&self) -> u32 {
        self.sections().map(|s| s.weekly_minutes()).sum()
    }

    /// Days on which at least one class meets.
    pub fn active_days(&self) -> BTreeSet<Weekday> {
        self.sections()
            .flat_map(|s| s.meetings.iter())
            .flat_map(|m| m.days.iter().copied())
            .collect()
    }

    /// Per-day class occurrences, each day sorted by start time.
    pub fn day_slots(&self) -> BTreeMap<Weekday, Vec<DaySlot>> {
        let mut by_day: BTreeMap<Weekday, Vec<DaySlot>> = BTreeMap::new();
        for section in self.sections() {
            for meeting in &section.meetings {
                for day in &meeting.days {
                    by_day.entry(*day).or_default().push(DaySlot {
                        course_code: section.course_code.clone(),
                        section_id: section.section_id.clone(),
                        start: meeting.start,
                        end: meeting.end,
                        building: meeting.location.as_ref().map(|l| l.building.clone()),
                    });
                }
            }
        }
        for slots in by_day.values_mut() {
            slots.sort_by_key(|s| (s.start, s.end, s.course_code.clone()));
        }
        by_day
    }

    /// Canonical identity of the course→section mapping, independent of
    /// assignment order. Two candidates with the same key are the same
    /// schedule.
    pub fn assignment_key(&self) -> String {
        let mut pairs: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{}={}", a.course.code, a.section.section_id))
            .collect();
        pairs.sort();
        pairs.join("|")
    }
}

/// Why a walking warning was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The break between classes is shorter than the estimated walk.
    InsufficientGap,
    /// The walk itself exceeds the student's walking-minutes threshold.
    LongWalk,
}

/// Advisory warning that the break between two consecutive classes may be
/// too short to walk between their buildings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkingWarning {
    pub kind: WarningKind,
    pub day: Weekday,
    /// `course:section` label of the earlier class.
    pub first: String,
    /// `course:section` label of the later class.
    pub second: String,
    pub from_building: String,
    pub to_building: String,
    pub gap_minutes: i32,
    pub walking_minutes: f64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::Credits;
    use crate::models::section::MeetingTime;

    fn assignment(code: &str, credits: Credits, section: Section) -> Assignment {
        Assignment {
            course: Course::new(code, code, credits),
            section,
        }
    }

    fn mwf_section(code: &str, id: &str, start: (u16, u16), end: (u16, u16)) -> Section {
        Section::new(code, id).with_meeting(MeetingTime::new(
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
            TimeOfDay::from_hm(start.0, start.1),
            TimeOfDay::from_hm(end.0, end.1),
        ))
    }

    #[test]
    fn test_credit_interval_fixed() {
        let candidate = ScheduleCandidate::new(vec![
            assignment("CMSC131", Credits::Fixed(4), mwf_section("CMSC131", "0101", (10, 0), (10, 50))),
            assignment("MATH140", Credits::Fixed(4), mwf_section("MATH140", "0201", (11, 0), (11, 50))),
        ]);
        assert_eq!(candidate.credit_interval(), (8, 8));
        assert!(candidate.satisfies_credit_bounds(6, 12));
        assert!(!candidate.satisfies_credit_bounds(9, 12));
        assert!(!candidate.satisfies_credit_bounds(1, 7));
    }

    #[test]
    fn test_credit_interval_ranged() {
        let candidate = ScheduleCandidate::new(vec![
            assignment("CMSC131", Credits::Fixed(4), mwf_section("CMSC131", "0101", (10, 0), (10, 50))),
            assignment(
                "CMSC499",
                Credits::Range { min: 1, max: 3 },
                Section::new("CMSC499", "0101"),
            ),
        ]);
        assert_eq!(candidate.credit_interval(), (5, 7));
        // Interval [5, 7] intersects [6, 20].
        assert!(candidate.satisfies_credit_bounds(6, 20));
    }

    #[test]
    fn test_day_slots_sorted_by_start() {
        let candidate = ScheduleCandidate::new(vec![
            assignment("MATH140", Credits::Fixed(4), mwf_section("MATH140", "0201", (11, 0), (11, 50))),
            assignment("CMSC131", Credits::Fixed(4), mwf_section("CMSC131", "0101", (10, 0), (10, 50))),
        ]);
        let slots = candidate.day_slots();
        let monday = &slots[&Weekday::Monday];
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].course_code, "CMSC131");
        assert_eq!(monday[1].course_code, "MATH140");
    }

    #[test]
    fn test_assignment_key_is_order_independent() {
        let a = ScheduleCandidate::new(vec![
            assignment("CMSC131", Credits::Fixed(4), mwf_section("CMSC131", "0101", (10, 0), (10, 50))),
            assignment("MATH140", Credits::Fixed(4), mwf_section("MATH140", "0201", (11, 0), (11, 50))),
        ]);
        let b = ScheduleCandidate::new(vec![
            assignment("MATH140", Credits::Fixed(4), mwf_section("MATH140", "0201", (11, 0), (11, 50))),
            assignment("CMSC131", Credits::Fixed(4), mwf_section("CMSC131", "0101", (10, 0), (10, 50))),
        ]);
        assert_eq!(a.assignment_key(), b.assignment_key());
        assert_eq!(a.assignment_key(), "CMSC131=0101|MATH140=0201");
    }

    #[test]
    fn test_active_days() {
        let candidate = ScheduleCandidate::new(vec![assignment(
            "CMSC131",
            Credits::Fixed(4),
            mwf_section("CMSC131", "0101", (10, 0), (10, 50)),
        )]);
        let days = candidate.active_days();
        assert_eq!(days.len(), 3);
        assert!(days.contains(&Weekday::Wednesday));
    }
}
