//! Meeting-time conflict detection.

use crate::models::Section;

/// True when two sections have overlapping meeting minutes on a shared
/// weekday. Fully online sections (no meetings) never conflict.
///
/// Pure function over immutable section data; intervals are half-open, so
/// a class ending 10:50 does not conflict with one starting 10:50.
pub fn conflicts(a: &Section, b: &Section) -> bool {
    a.meetings
        .iter()
        .any(|ma| b.meetings.iter().any(|mb| ma.overlaps(mb)))
}

/// True when `section` conflicts with any already-chosen section.
pub fn conflicts_with_any<'a>(
    section: &Section,
    chosen: impl IntoIterator<Item = &'a Section>,
) -> bool {
    chosen.into_iter().any(|other| conflicts(section, other))
}
