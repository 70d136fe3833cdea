use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Day of the week, serialized with the day codes used by the
/// course catalog (`M`, `Tu`, `W`, `Th`, `F`, `Sa`, `Su`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "Tu")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "Th")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
    #[serde(rename = "Sa")]
    Saturday,
    #[serde(rename = "Su")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Catalog day code (e.g. `Tu`).
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "Th",
            Weekday::Friday => "F",
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Su",
        }
    }

    /// Full English day name.
    pub fn full_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Parse a catalog day code.
    pub fn from_code(code: &str) -> Option<Weekday> {
        match code {
            "M" => Some(Weekday::Monday),
            "Tu" => Some(Weekday::Tuesday),
            "W" => Some(Weekday::Wednesday),
            "Th" => Some(Weekday::Thursday),
            "F" => Some(Weekday::Friday),
            "Sa" => Some(Weekday::Saturday),
            "Su" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Parse a run of concatenated day codes (e.g. `"MWF"` or `"TuTh"`).
    pub fn parse_days(s: &str) -> Vec<Weekday> {
        let mut days = Vec::new();
        let mut rest = s.trim();
        while !rest.is_empty() {
            // Two-letter codes first so `Tu` is not read as `T` + `u`.
            let matched = ["Tu", "Th", "Sa", "Su", "M", "W", "F"]
                .iter()
                .find(|code| rest.starts_with(**code))
                .copied();
            match matched {
                Some(code) => {
                    if let Some(day) = Weekday::from_code(code) {
                        days.push(day);
                    }
                    rest = &rest[code.len()..];
                }
                None => break,
            }
        }
        days
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Time of day as minutes from midnight (0–1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 1440;

    /// Create from a raw minute-of-day value, clamped to a single day.
    pub fn new(minutes: u16) -> Self {
        TimeOfDay(minutes.min(Self::MINUTES_PER_DAY - 1))
    }

    /// Create from an hour/minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Self {
        Self::new(hour * 60 + minute)
    }

    /// Minutes from midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Signed gap in minutes from `self` to `other`.
    pub fn minutes_until(&self, other: TimeOfDay) -> i32 {
        other.0 as i32 - self.0 as i32
    }

    /// Parse a catalog time string.
    ///
    /// Accepts both the 12-hour form the section feed emits (`"10:00am"`,
    /// `"2:00 pm"`) and the 24-hour form (`"14:00"`).
    pub fn parse(s: &str) -> Option<TimeOfDay> {
        let cleaned: String = s.trim().replace(' ', "").to_uppercase();
        if cleaned.is_empty() {
            return None;
        }
        let parsed = if cleaned.ends_with("AM") || cleaned.ends_with("PM") {
            chrono::NaiveTime::parse_from_str(&cleaned, "%I:%M%p")
        } else {
            chrono::NaiveTime::parse_from_str(&cleaned, "%H:%M")
        };
        parsed
            .ok()
            .map(|t| Self::from_hm(t.hour() as u16, t.minute() as u16))
    }
}

impl std::fmt::Display for TimeOfDay {
    /// Render in the 12-hour form shown to students (e.g. `9:00 AM`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.hour();
        let period = if hours < 12 { "AM" } else { "PM" };
        let display_hours = match hours {
            0 => 12,
            1..=12 => hours,
            _ => hours - 12,
        };
        write!(f, "{}:{:02} {}", display_hours, self.minute(), period)
    }
}

/// Academic term identifier in the catalog's 6-digit form
/// (e.g. `202508` = Fall 2025).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    pub fn new(code: impl Into<String>) -> Self {
        Term(code.into())
    }

    /// Build a term code from a semester name and year.
    /// Unknown semester names fall back to Spring, matching the upstream API.
    pub fn from_parts(semester: &str, year: i32) -> Self {
        let code = match semester {
            "Spring" => "01",
            "Summer" => "05",
            "Fall" => "08",
            "Winter" => "12",
            _ => "01",
        };
        Term(format!("{}{}", year, code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Calendar year encoded in the term code.
    pub fn year(&self) -> Option<i32> {
        if self.0.len() >= 4 {
            self.0[..4].parse().ok()
        } else {
            None
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
