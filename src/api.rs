//! Public API surface for the schedule engine.
//!
//! This file consolidates the DTO types handed back to calling layers
//! (HTTP handlers, chat frontends). All types derive Serialize/Deserialize
//! for JSON serialization; times are pre-formatted for display.

use serde::{Deserialize, Serialize};

use crate::engine::error::NoScheduleReason;
use crate::engine::select::RankedCandidate;
use crate::models::{MeetingTime, WalkingWarning, Weekday};

/// One weekly meeting block of a scheduled section, display-ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub days: Vec<Weekday>,
    /// 12-hour display time, e.g. `9:00 AM`.
    pub start_time: String,
    pub end_time: String,
    pub building: Option<String>,
    pub room: Option<String>,
}

impl From<&MeetingTime> for MeetingSummary {
    fn from(meeting: &MeetingTime) -> Self {
        MeetingSummary {
            days: meeting.days.clone(),
            start_time: meeting.start.to_string(),
            end_time: meeting.end.to_string(),
            building: meeting.location.as_ref().map(|l| l.building.clone()),
            room: meeting.location.as_ref().and_then(|l| l.room.clone()),
        }
    }
}

/// One section inside a ranked schedule option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSection {
    pub course_code: String,
    pub course_name: String,
    pub section_id: String,
    pub instructor: Option<String>,
    pub credits_min: u32,
    pub credits_max: u32,
    /// Empty for fully online sections.
    pub meetings: Vec<MeetingSummary>,
}

/// A complete, conflict-free schedule with its ranking score and any
/// walking-feasibility warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOption {
    pub sections: Vec<ScheduledSection>,
    pub total_credits_min: u32,
    pub total_credits_max: u32,
    pub score: f64,
    pub warnings: Vec<WalkingWarning>,
}

impl From<&RankedCandidate> for ScheduleOption {
    fn from(ranked: &RankedCandidate) -> Self {
        let sections = ranked
            .candidate
            .assignments
            .iter()
            .map(|a| ScheduledSection {
                course_code: a.course.code.clone(),
                course_name: a.course.name.clone(),
                section_id: a.section.section_id.clone(),
                instructor: a.section.instructor.clone(),
                credits_min: a.course.credits.min(),
                credits_max: a.course.credits.max(),
                meetings: a.section.meetings.iter().map(MeetingSummary::from).collect(),
            })
            .collect();
        let (total_credits_min, total_credits_max) = ranked.candidate.credit_interval();
        ScheduleOption {
            sections,
            total_credits_min,
            total_credits_max,
            score: ranked.score,
            warnings: ranked.warnings.clone(),
        }
    }
}

/// The full result of a schedule search.
///
/// An empty `options` list is a normal outcome and carries a machine-readable
/// `reason`; `truncated` marks results computed under an exhausted search
/// budget or deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSchedules {
    pub options: Vec<ScheduleOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NoScheduleReason>,
    #[serde(default)]
    pub truncated: bool,
}

impl GeneratedSchedules {
    pub fn empty(reason: NoScheduleReason) -> Self {
        GeneratedSchedules {
            options: Vec::new(),
            reason: Some(reason),
            truncated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
