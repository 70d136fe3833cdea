use serde::{Deserialize, Serialize};

/// Credit hours carried by a course: either a fixed value or a
/// variable-credit range (e.g. independent study offered for 1–3 credits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credits {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

impl Credits {
    /// Smallest number of credits the course can be taken for.
    pub fn min(&self) -> u32 {
        match *self {
            Credits::Fixed(c) => c,
            Credits::Range { min, .. } => min,
        }
    }

    /// Largest number of credits the course can be taken for.
    pub fn max(&self) -> u32 {
        match *self {
            Credits::Fixed(c) => c,
            Credits::Range { max, .. } => max,
        }
    }
}

/// Immutable course reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Department + number, e.g. `CMSC131`.
    pub code: String,
    /// Human-readable title, e.g. `Object-Oriented Programming I`.
    pub name: String,
    pub credits: Credits,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: Credits) -> Self {
        Course {
            code: code.into(),
            name: name.into(),
            credits,
        }
    }

    /// Department prefix of the course code (leading alphabetic characters).
    pub fn department(&self) -> &str {
        let end = self
            .code
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.code.len());
        &self.code[..end]
    }
}
