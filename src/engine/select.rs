//! Result selection: bounded best-K retention, deterministic ranking,
//! and deduplication by course→section assignment.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::models::{ScheduleCandidate, WalkingWarning};

/// A scored candidate together with the derived values the ranking order
/// depends on, captured once so comparisons stay cheap.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: ScheduleCandidate,
    pub score: f64,
    pub warnings: Vec<WalkingWarning>,
    weekly_minutes: u32,
    key: String,
}

impl RankedCandidate {
    pub fn new(candidate: ScheduleCandidate, score: f64, warnings: Vec<WalkingWarning>) -> Self {
        let weekly_minutes = candidate.weekly_minutes();
        let key = candidate.assignment_key();
        RankedCandidate {
            candidate,
            score,
            warnings,
            weekly_minutes,
            key,
        }
    }

    /// Canonical course→section assignment identity.
    pub fn assignment_key(&self) -> &str {
        &self.key
    }
}

/// Ranking order, where greater means "ranks higher":
/// score descending, then fewer walking warnings, then fewer total weekly
/// scheduled minutes, then lexicographic assignment key. The final key
/// comparison makes the order total over distinct assignments, which is
/// what guarantees reproducible output for identical inputs.
impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.warnings.len().cmp(&self.warnings.len()))
            .then_with(|| other.weekly_minutes.cmp(&self.weekly_minutes))
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankedCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedCandidate {}

/// Bounded best-K structure: a min-heap of size `capacity` whose lowest
/// ranked entry is evicted when a better complete candidate arrives.
#[derive(Debug)]
pub struct BestK {
    heap: BinaryHeap<Reverse<RankedCandidate>>,
    capacity: usize,
}

impl BestK {
    pub fn new(capacity: usize) -> Self {
        BestK {
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer a candidate; it is kept only if the structure has room or the
    /// candidate outranks the current worst entry.
    pub fn offer(&mut self, candidate: RankedCandidate) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return;
        }
        if let Some(worst) = self.heap.peek() {
            if candidate > worst.0 {
                self.heap.pop();
                self.heap.push(Reverse(candidate));
            }
        }
    }

    /// Merge another best-K into this one (used when parallel search
    /// branches each kept their own).
    pub fn merge(&mut self, other: BestK) {
        for Reverse(candidate) in other.heap {
            self.offer(candidate);
        }
    }

    pub fn into_candidates(self) -> Vec<RankedCandidate> {
        self.heap.into_iter().map(|Reverse(c)| c).collect()
    }
}

/// Sort candidates into final ranked order, drop duplicate assignments,
/// and truncate to `top_k`.
pub fn select_top(mut candidates: Vec<RankedCandidate>, top_k: usize) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| b.cmp(a));
    let mut seen: HashSet<String> = HashSet::new();
    candidates.retain(|c| seen.insert(c.assignment_key().to_string()));
    candidates.truncate(top_k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Course, Credits, Section};

    fn ranked(course: &str, section: &str, score: f64) -> RankedCandidate {
        let candidate = ScheduleCandidate::new(vec![Assignment {
            course: Course::new(course, course, Credits::Fixed(3)),
            section: Section::new(course, section),
        }]);
        RankedCandidate::new(candidate, score, Vec::new())
    }

    #[test]
    fn test_best_k_keeps_highest_scores() {
        let mut best = BestK::new(2);
        best.offer(ranked("CMSC131", "0101", 10.0));
        best.offer(ranked("CMSC131", "0102", 30.0));
        best.offer(ranked("CMSC131", "0103", 20.0));

        let top = select_top(best.into_candidates(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].score, 30.0);
        assert_eq!(top[1].score, 20.0);
    }

    #[test]
    fn test_best_k_not_padded() {
        let mut best = BestK::new(5);
        best.offer(ranked("CMSC131", "0101", 10.0));
        best.offer(ranked("CMSC131", "0102", 20.0));

        assert_eq!(select_top(best.into_candidates(), 5).len(), 2);
    }

    #[test]
    fn test_tie_break_prefers_fewer_warnings() {
        let clean = ranked("CMSC131", "0101", 10.0);
        let mut warned = ranked("CMSC131", "0102", 10.0);
        warned.warnings.push(crate::models::WalkingWarning {
            kind: crate::models::WarningKind::LongWalk,
            day: crate::models::Weekday::Monday,
            first: "a".into(),
            second: "b".into(),
            from_building: "IRB".into(),
            to_building: "MTH".into(),
            gap_minutes: 20,
            walking_minutes: 12.0,
            message: String::new(),
        });
        assert!(clean > warned);
    }

    #[test]
    fn test_tie_break_lexicographic_key_is_total() {
        let a = ranked("CMSC131", "0101", 10.0);
        let b = ranked("CMSC131", "0102", 10.0);
        // Lower assignment key ranks higher.
        assert!(a > b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_select_top_dedupes_by_assignment() {
        let list = vec![
            ranked("CMSC131", "0101", 10.0),
            ranked("CMSC131", "0101", 10.0),
            ranked("CMSC131", "0102", 5.0),
        ];
        let top = select_top(list, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].assignment_key(), "CMSC131=0101");
    }

    #[test]
    fn test_merge_parallel_results() {
        let mut a = BestK::new(2);
        a.offer(ranked("CMSC131", "0101", 10.0));
        a.offer(ranked("CMSC131", "0102", 20.0));

        let mut b = BestK::new(2);
        b.offer(ranked("CMSC131", "0103", 30.0));

        a.merge(b);
        let top = select_top(a.into_candidates(), 2);
        assert_eq!(top[0].score, 30.0);
        assert_eq!(top[1].score, 20.0);
    }

    #[test]
    fn test_zero_capacity() {
        let mut best = BestK::new(0);
        best.offer(ranked("CMSC131", "0101", 10.0));
        assert!(best.is_empty());
    }
}
