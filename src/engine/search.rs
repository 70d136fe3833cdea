//! Combination search over course sections.
//!
//! [`ScheduleGenerator`] drives the whole pipeline: it pulls sections once
//! per course from the catalog, prefetches instructor ratings and walking
//! times so the hot loop never suspends, then runs a depth-first
//! backtracking search over the section cross-product, pruning conflicting
//! partial assignments and feeding complete candidates through the
//! preference scorer into a bounded best-K structure.
//!
//! The cross-product space grows exponentially with sections per course, so
//! the search carries a hard leaf budget and an optional wall-clock
//! deadline. Hitting either limit terminates early and returns the best-K
//! found so far with the truncation flag set; it is never an error.

use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{GeneratedSchedules, ScheduleOption};
use crate::catalog::{CampusMap, CatalogError, InstructorRatings, SectionCatalog};
use crate::config::EngineConfig;
use crate::engine::conflict;
use crate::engine::error::{NoScheduleReason, ScheduleError, ScheduleResult};
use crate::engine::feasibility::{self, WalkingIndex};
use crate::engine::score::{self, RatingsIndex};
use crate::engine::select::{select_top, BestK, RankedCandidate};
use crate::models::{Assignment, Course, PreferenceProfile, ScheduleCandidate, Section, Term};

/// A schedule-generation request.
///
/// Required courses must all be placed; optional courses may be included or
/// omitted per candidate. Course order is preserved throughout the search —
/// callers wanting faster pruning should list courses with fewer sections
/// first.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub term: Term,
    pub required_courses: Vec<String>,
    pub optional_courses: Vec<String>,
    pub preferences: PreferenceProfile,
    /// Overrides the configured top-K when set.
    pub top_k: Option<usize>,
}

impl SearchRequest {
    pub fn new(term: Term, required_courses: Vec<String>) -> Self {
        SearchRequest {
            term,
            required_courses,
            optional_courses: Vec::new(),
            preferences: PreferenceProfile::default(),
            top_k: None,
        }
    }

    pub fn with_optional(mut self, optional_courses: Vec<String>) -> Self {
        self.optional_courses = optional_courses;
        self
    }

    pub fn with_preferences(mut self, preferences: PreferenceProfile) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// One course's slice of the search space.
#[derive(Debug, Clone)]
struct CoursePlan {
    course: Course,
    sections: Vec<Section>,
    optional: bool,
}

/// Immutable per-search context shared by all branches.
struct SearchContext {
    preferences: PreferenceProfile,
    weights: score::ScoringWeights,
    ratings: RatingsIndex,
    walking: WalkingIndex,
    strict_walking: bool,
}

/// Per-branch exploration limits. Each parallel branch owns its own slice
/// of the leaf budget, which keeps truncated results deterministic.
struct BranchBudget {
    remaining: usize,
    deadline: Option<Instant>,
    truncated: bool,
}

impl BranchBudget {
    fn expired(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.truncated = true;
                return true;
            }
        }
        false
    }

    /// Consume one leaf attempt; false once the budget is exhausted.
    fn take_leaf(&mut self) -> bool {
        if self.remaining == 0 {
            self.truncated = true;
            false
        } else {
            self.remaining -= 1;
            true
        }
    }
}

/// Schedule generation service over injected collaborators.
pub struct ScheduleGenerator {
    catalog: Arc<dyn SectionCatalog>,
    campus_map: Arc<dyn CampusMap>,
    ratings: Arc<dyn InstructorRatings>,
    config: EngineConfig,
}

impl ScheduleGenerator {
    pub fn new(
        catalog: Arc<dyn SectionCatalog>,
        campus_map: Arc<dyn CampusMap>,
        ratings: Arc<dyn InstructorRatings>,
    ) -> Self {
        ScheduleGenerator {
            catalog,
            campus_map,
            ratings,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run a full search and return the ranked result set.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::CourseUnavailable`] when a required course has no
    /// usable catalog entry for the term. All other outcomes, including an
    /// exhausted search budget or an empty feasible set, are expressed on
    /// the returned [`GeneratedSchedules`].
    pub async fn generate(&self, request: &SearchRequest) -> ScheduleResult<GeneratedSchedules> {
        let top_k = request.top_k.unwrap_or(self.config.search.top_k);

        if request.required_courses.is_empty() && request.optional_courses.is_empty() {
            return Ok(GeneratedSchedules::empty(NoScheduleReason::NoCoursesRequested));
        }

        let plans = self.load_plans(request).await?;
        if plans.is_empty() {
            // Every requested course was optional and none was usable.
            return Ok(GeneratedSchedules::empty(NoScheduleReason::NoCoursesRequested));
        }

        let space: usize = plans
            .iter()
            .map(|p| p.sections.len().max(1) + usize::from(p.optional))
            .product();
        debug!(
            "searching {} courses, cross-product space {} (cap {})",
            plans.len(),
            space,
            self.config.search.max_leaf_visits
        );

        let context = Arc::new(SearchContext {
            preferences: request.preferences.clone(),
            weights: self.config.weights.clone(),
            ratings: self.prefetch_ratings(&plans, &request.preferences).await,
            walking: self.prefetch_walking(&plans).await,
            strict_walking: self.config.search.strict_walking,
        });

        let deadline = self
            .config
            .search
            .timeout_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let best = Arc::new(Mutex::new(BestK::new(top_k)));
        let truncated = self
            .explore(Arc::new(plans), context, Arc::clone(&best), deadline)
            .await;

        // All branch tasks are joined by now, so the lock is uncontended.
        let collected = std::mem::replace(&mut *best.lock(), BestK::new(0));
        let ranked = select_top(collected.into_candidates(), top_k);

        if ranked.is_empty() {
            let mut result = GeneratedSchedules::empty(NoScheduleReason::NoFeasibleCombination);
            result.truncated = truncated;
            return Ok(result);
        }

        Ok(GeneratedSchedules {
            options: ranked.iter().map(ScheduleOption::from).collect(),
            reason: None,
            truncated,
        })
    }

    /// Fetch course data and sections for every requested course.
    ///
    /// Required courses are fatal when missing, empty, or unreachable;
    /// optional courses degrade to a logged skip.
    async fn load_plans(&self, request: &SearchRequest) -> ScheduleResult<Vec<CoursePlan>> {
        let term = &request.term;
        let mut plans = Vec::new();

        for code in &request.required_courses {
            let course = self
                .catalog
                .course(code, term)
                .await
                .map_err(|e| translate_required(e, code, term))?;
            let sections = self
                .catalog
                .sections(code, term)
                .await
                .map_err(|e| translate_required(e, code, term))?;
            if sections.is_empty() {
                return Err(ScheduleError::course_unavailable(code, term.code()));
            }
            plans.push(CoursePlan {
                course,
                sections,
                optional: false,
            });
        }

        for code in &request.optional_courses {
            let fetched = match self.catalog.course(code, term).await {
                Ok(course) => match self.catalog.sections(code, term).await {
                    Ok(sections) if !sections.is_empty() => Some((course, sections)),
                    Ok(_) => None,
                    Err(e) => {
                        warn!("skipping optional course {}: {}", code, e);
                        None
                    }
                },
                Err(e) => {
                    warn!("skipping optional course {}: {}", code, e);
                    None
                }
            };
            if let Some((course, sections)) = fetched {
                plans.push(CoursePlan {
                    course,
                    sections,
                    optional: true,
                });
            }
        }

        Ok(plans)
    }

    /// Prefetch rating and grading data for every instructor appearing in
    /// the fetched sections, gated on the preferences that use them.
    async fn prefetch_ratings(
        &self,
        plans: &[CoursePlan],
        preferences: &PreferenceProfile,
    ) -> RatingsIndex {
        let mut index = RatingsIndex::new();
        if !preferences.prioritize_instructor_rating && !preferences.prioritize_easy_grading {
            return index;
        }

        if preferences.prioritize_instructor_rating {
            let mut seen: HashSet<&str> = HashSet::new();
            for plan in plans {
                for section in &plan.sections {
                    if let Some(name) = section.instructor.as_deref() {
                        if seen.insert(name) {
                            if let Some(rating) = self.ratings.rating_for(name).await {
                                index.insert_rating(name, rating);
                            }
                        }
                    }
                }
            }
        }

        if preferences.prioritize_easy_grading {
            let mut seen: HashSet<(String, String)> = HashSet::new();
            for plan in plans {
                for section in &plan.sections {
                    if let Some(name) = section.instructor.as_deref() {
                        let key = (plan.course.code.clone(), name.to_string());
                        if seen.insert(key) {
                            if let Some(gpa) =
                                self.ratings.average_gpa(&plan.course.code, name).await
                            {
                                index.insert_gpa(&plan.course.code, name, gpa);
                            }
                        }
                    }
                }
            }
        }

        index
    }

    /// Prefetch walking durations for every building pair that can occur.
    async fn prefetch_walking(&self, plans: &[CoursePlan]) -> WalkingIndex {
        let buildings: BTreeSet<String> = plans
            .iter()
            .flat_map(|p| p.sections.iter())
            .flat_map(|s| s.meetings.iter())
            .filter_map(|m| m.location.as_ref().map(|l| l.building.clone()))
            .collect();
        WalkingIndex::prefetch(&buildings, &*self.campus_map).await
    }

    /// Explore the search space, fanning the first-level branches out over
    /// blocking worker tasks when there is more than one. Returns whether
    /// any branch hit its budget or the deadline.
    async fn explore(
        &self,
        plans: Arc<Vec<CoursePlan>>,
        context: Arc<SearchContext>,
        best: Arc<Mutex<BestK>>,
        deadline: Option<Instant>,
    ) -> bool {
        let branches = first_level_branches(&plans[0]);
        let budget = self.config.search.max_leaf_visits;

        if branches.len() <= 1 || !self.config.search.parallel_branches {
            let mut branch_budget = BranchBudget {
                remaining: budget,
                deadline,
                truncated: false,
            };
            let mut chosen = Vec::with_capacity(plans.len());
            dfs(&plans, 0, &mut chosen, &context, &best, &mut branch_budget);
            return branch_budget.truncated;
        }

        // Independent first-level branches are embarrassingly parallel: each
        // worker gets a restricted copy of the plan list and an even slice
        // of the leaf budget, and merges into the shared best-K.
        let per_branch = (budget / branches.len()).max(1);
        let mut handles = Vec::with_capacity(branches.len());
        for branch in branches {
            let branch_plans = restrict_first_level(&plans, branch);
            let context = Arc::clone(&context);
            let best = Arc::clone(&best);
            let handle = tokio::task::spawn_blocking(move || {
                let mut branch_budget = BranchBudget {
                    remaining: per_branch,
                    deadline,
                    truncated: false,
                };
                let mut chosen = Vec::with_capacity(branch_plans.len());
                dfs(
                    &branch_plans,
                    0,
                    &mut chosen,
                    &context,
                    &best,
                    &mut branch_budget,
                );
                branch_budget.truncated
            });
            handles.push(handle);
        }

        let mut truncated = false;
        for handle in handles {
            match handle.await {
                Ok(branch_truncated) => truncated |= branch_truncated,
                Err(e) => {
                    warn!("search branch failed: {}", e);
                    truncated = true;
                }
            }
        }
        truncated
    }
}

/// A first-level choice: a section index of the first course, or `None`
/// for the skip branch of an optional first course.
fn first_level_branches(plan: &CoursePlan) -> Vec<Option<usize>> {
    let mut branches: Vec<Option<usize>> = (0..plan.sections.len()).map(Some).collect();
    if plan.optional {
        branches.push(None);
    }
    branches
}

/// Restrict the first course to a single branch so the generic DFS can run
/// unchanged inside a worker task.
fn restrict_first_level(plans: &[CoursePlan], branch: Option<usize>) -> Vec<CoursePlan> {
    let mut restricted = plans.to_vec();
    match branch {
        Some(index) => {
            let section = restricted[0].sections[index].clone();
            restricted[0].sections = vec![section];
            restricted[0].optional = false;
        }
        None => {
            restricted[0].sections = Vec::new();
            // optional stays true: the only path left is the skip branch.
        }
    }
    restricted
}

/// Depth-first backtracking over the remaining courses.
///
/// Returns false when the branch should stop (budget or deadline hit).
fn dfs(
    plans: &[CoursePlan],
    depth: usize,
    chosen: &mut Vec<Assignment>,
    context: &SearchContext,
    best: &Mutex<BestK>,
    budget: &mut BranchBudget,
) -> bool {
    if budget.expired() {
        return false;
    }
    if depth == plans.len() {
        complete(chosen, context, best);
        return true;
    }

    let plan = &plans[depth];
    let last = depth + 1 == plans.len();

    for section in &plan.sections {
        if last && !budget.take_leaf() {
            return false;
        }
        if conflict::conflicts_with_any(section, chosen.iter().map(|a| &a.section)) {
            continue;
        }
        chosen.push(Assignment {
            course: plan.course.clone(),
            section: section.clone(),
        });
        let keep_going = dfs(plans, depth + 1, chosen, context, best, budget);
        chosen.pop();
        if !keep_going {
            return false;
        }
    }

    if plan.optional {
        if last && !budget.take_leaf() {
            return false;
        }
        if !dfs(plans, depth + 1, chosen, context, best, budget) {
            return false;
        }
    }

    true
}

/// Validate, score, and offer a complete assignment.
fn complete(chosen: &[Assignment], context: &SearchContext, best: &Mutex<BestK>) {
    if chosen.is_empty() {
        // Every optional course was skipped; not a schedule.
        return;
    }
    let candidate = ScheduleCandidate::new(chosen.to_vec());
    if !candidate.satisfies_credit_bounds(
        context.preferences.min_credits,
        context.preferences.max_credits,
    ) {
        return;
    }

    let warnings = feasibility::evaluate_walking(
        &candidate,
        context.preferences.max_walking_minutes,
        &context.walking,
    );
    if context.strict_walking && !warnings.is_empty() {
        return;
    }

    let score = score::score_candidate(
        &candidate,
        &context.preferences,
        &context.weights,
        &context.ratings,
    );
    best.lock().offer(RankedCandidate::new(candidate, score, warnings));
}

/// Translate a catalog failure on a required course. Transport-level errors
/// deliberately do not leak past the search boundary.
fn translate_required(err: CatalogError, course: &str, term: &Term) -> ScheduleError {
    if !matches!(err, CatalogError::CourseNotFound { .. }) {
        warn!("catalog failure for required course {}: {}", course, err);
    }
    ScheduleError::course_unavailable(course, term.code())
}
