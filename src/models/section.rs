use serde::{Deserialize, Serialize};

use super::time::{TimeOfDay, Weekday};

/// Classroom location: campus building code plus optional room number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Building code, e.g. `IRB`.
    pub building: String,
    #[serde(default)]
    pub room: Option<String>,
}

impl Location {
    pub fn new(building: impl Into<String>, room: Option<String>) -> Self {
        Location {
            building: building.into(),
            room,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.room {
            Some(room) => write!(f, "{} {}", self.building, room),
            None => write!(f, "{}", self.building),
        }
    }
}

/// A recurring weekly time block: a set of days, a half-open
/// `[start, end)` minute interval, and an optional location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub days: Vec<Weekday>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub location: Option<Location>,
}

impl MeetingTime {
    pub fn new(days: Vec<Weekday>, start: TimeOfDay, end: TimeOfDay) -> Self {
        MeetingTime {
            days,
            start,
            end,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Length of one meeting in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end).max(0) as u32
    }

    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// True if the two meetings occupy overlapping minutes on a shared day.
    /// Intervals are half-open, so a 10:50 end against an 11:00 start is fine.
    pub fn overlaps(&self, other: &MeetingTime) -> bool {
        let shares_day = self.days.iter().any(|d| other.days.contains(d));
        shares_day && self.start < other.end && other.start < self.end
    }
}

/// One offered instance of a course for a term. Immutable once fetched;
/// the engine never mutates section data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Course this section belongs to, e.g. `CMSC131`.
    pub course_code: String,
    /// Section identifier within the course, e.g. `0101`.
    pub section_id: String,
    /// Weekly meetings. Empty means fully online/asynchronous.
    #[serde(default)]
    pub meetings: Vec<MeetingTime>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub open_seats: Option<u32>,
    #[serde(default)]
    pub total_seats: Option<u32>,
}

impl Section {
    pub fn new(course_code: impl Into<String>, section_id: impl Into<String>) -> Self {
        Section {
            course_code: course_code.into(),
            section_id: section_id.into(),
            meetings: Vec::new(),
            instructor: None,
            open_seats: None,
            total_seats: None,
        }
    }

    pub fn with_meeting(mut self, meeting: MeetingTime) -> Self {
        self.meetings.push(meeting);
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn with_seats(mut self, open: u32, total: u32) -> Self {
        self.open_seats = Some(open);
        self.total_seats = Some(total);
        self
    }

    /// True when the section has no scheduled meetings.
    pub fn is_online(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Total scheduled minutes per week across all meetings and days.
    pub fn weekly_minutes(&self) -> u32 {
        self.meetings
            .iter()
            .map(|m| m.duration_minutes() * m.days.len() as u32)
            .sum()
    }

    /// Stable `course:section` label used in assignment keys and warnings.
    pub fn label(&self) -> String {
        format!("{}:{}", self.course_code, self.section_id)
    }
}
