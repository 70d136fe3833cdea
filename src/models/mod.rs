//! Domain model types for schedule generation.

pub mod candidate;
pub mod course;
pub mod preferences;
pub mod section;
pub mod time;

pub use candidate::{Assignment, DaySlot, ScheduleCandidate, WalkingWarning, WarningKind};
pub use course::{Course, Credits};
pub use preferences::PreferenceProfile;
pub use section::{Location, MeetingTime, Section};
pub use time::{Term, TimeOfDay, Weekday};
