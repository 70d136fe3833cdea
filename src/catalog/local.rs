//! In-memory collaborator implementations for unit testing and local
//! development, mirroring the pre-cached campus data the production
//! services keep to avoid redundant external calls.

use async_trait::async_trait;
use std::collections::HashMap;

use super::{CampusMap, CatalogError, CatalogResult, InstructorRatings, SectionCatalog};
use crate::models::{Course, Section, Term};

/// Average walking speed in meters per minute (~3 mph).
const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

/// In-memory section catalog keyed by course code and term.
#[derive(Debug, Default)]
pub struct LocalCatalog {
    entries: HashMap<(String, String), (Course, Vec<Section>)>,
}

impl LocalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a course and its sections for a term. Replaces any
    /// previously registered entry for the same course/term pair.
    pub fn insert(&mut self, term: &Term, course: Course, sections: Vec<Section>) {
        self.entries
            .insert((course.code.clone(), term.code().to_string()), (course, sections));
    }

    fn lookup(&self, code: &str, term: &Term) -> CatalogResult<&(Course, Vec<Section>)> {
        self.entries
            .get(&(code.to_string(), term.code().to_string()))
            .ok_or_else(|| CatalogError::course_not_found(code, term))
    }
}

#[async_trait]
impl SectionCatalog for LocalCatalog {
    async fn course(&self, code: &str, term: &Term) -> CatalogResult<Course> {
        self.lookup(code, term).map(|(course, _)| course.clone())
    }

    async fn sections(&self, code: &str, term: &Term) -> CatalogResult<Vec<Section>> {
        self.lookup(code, term).map(|(_, sections)| sections.clone())
    }
}

/// A campus building with pre-cached coordinates.
#[derive(Debug, Clone)]
pub struct Building {
    pub code: &'static str,
    pub full_name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Common campus buildings, pre-cached to avoid geocoding calls.
const CAMPUS_BUILDINGS: &[Building] = &[
    Building { code: "AVW", full_name: "A.V. Williams Building", latitude: 38.9887, longitude: -76.9364 },
    Building { code: "IRB", full_name: "Iribe Center", latitude: 38.9890, longitude: -76.9368 },
    Building { code: "CSI", full_name: "Computer Science Instructional Center", latitude: 38.9889, longitude: -76.9372 },
    Building { code: "JMP", full_name: "Jeong H. Kim Engineering Building", latitude: 38.9883, longitude: -76.9368 },
    Building { code: "EGR", full_name: "Engineering Classroom Building", latitude: 38.9892, longitude: -76.9394 },
    Building { code: "CHE", full_name: "Chemical Engineering Building", latitude: 38.9902, longitude: -76.9385 },
    Building { code: "MTH", full_name: "Mathematics Building (Kirwin Hall)", latitude: 38.988329, longitude: -76.939208 },
    Building { code: "PHY", full_name: "Physics Building", latitude: 38.9889, longitude: -76.9428 },
    Building { code: "PSC", full_name: "Physical Sciences Complex", latitude: 38.9893, longitude: -76.9419 },
    Building { code: "CHM", full_name: "Chemistry Building", latitude: 38.9872, longitude: -76.9430 },
    Building { code: "BIO", full_name: "Biology-Psychology Building", latitude: 38.9864, longitude: -76.9458 },
    Building { code: "MMH", full_name: "Marie Mount Hall", latitude: 38.9907, longitude: -76.9458 },
    Building { code: "TYD", full_name: "Tydings Hall", latitude: 38.9876, longitude: -76.9448 },
    Building { code: "SKN", full_name: "Skinner Building", latitude: 38.9858, longitude: -76.9447 },
    Building { code: "JMZ", full_name: "Jimenez Hall", latitude: 38.9871, longitude: -76.9434 },
    Building { code: "VMH", full_name: "Van Munching Hall", latitude: 38.9852, longitude: -76.9461 },
    Building { code: "LFR", full_name: "Le Frak Hall", latitude: 38.9853, longitude: -76.9436 },
    Building { code: "MCK", full_name: "McKeldin Library", latitude: 38.9859, longitude: -76.9452 },
    Building { code: "SQH", full_name: "Susquehanna Hall", latitude: 38.9878, longitude: -76.9413 },
    Building { code: "STM", full_name: "Stamp Student Union", latitude: 38.9881, longitude: -76.9445 },
    Building { code: "CLA", full_name: "Clarice Smith Performing Arts Center", latitude: 38.9880, longitude: -76.9390 },
    Building { code: "HJP", full_name: "Hornbake Library South Wing", latitude: 38.9869, longitude: -76.9464 },
];

/// Campus map backed by the pre-cached building table.
///
/// Walking estimates use great-circle distance at a fixed walking speed,
/// rounded up to whole minutes. Extra buildings (or overrides for specific
/// pairs, e.g. from a routing service) can be layered on top.
#[derive(Debug, Default)]
pub struct StaticCampusMap {
    extra_buildings: HashMap<String, (f64, f64)>,
    pair_overrides: HashMap<(String, String), f64>,
}

impl StaticCampusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a building with explicit coordinates.
    pub fn with_building(mut self, code: impl Into<String>, lat: f64, lon: f64) -> Self {
        self.extra_buildings.insert(code.into(), (lat, lon));
        self
    }

    /// Pin a walking duration for a specific (unordered) building pair.
    pub fn with_pair(mut self, a: impl Into<String>, b: impl Into<String>, minutes: f64) -> Self {
        let key = Self::pair_key(&a.into(), &b.into());
        self.pair_overrides.insert(key, minutes);
        self
    }

    fn pair_key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    fn coordinates(&self, code: &str) -> Option<(f64, f64)> {
        if let Some(&coords) = self.extra_buildings.get(code) {
            return Some(coords);
        }
        CAMPUS_BUILDINGS
            .iter()
            .find(|b| b.code == code)
            .map(|b| (b.latitude, b.longitude))
    }
}

#[async_trait]
impl CampusMap for StaticCampusMap {
    async fn walking_minutes(&self, from_building: &str, to_building: &str) -> Option<f64> {
        if from_building == to_building {
            return Some(0.0);
        }
        if let Some(&minutes) = self
            .pair_overrides
            .get(&Self::pair_key(from_building, to_building))
        {
            return Some(minutes);
        }
        let (lat1, lon1) = self.coordinates(from_building)?;
        let (lat2, lon2) = self.coordinates(to_building)?;
        let distance = haversine_meters(lat1, lon1, lat2, lon2);
        // Round up: a partial minute of walking still costs a whole minute.
        Some((distance / WALKING_SPEED_M_PER_MIN).floor() + 1.0)
    }
}

/// Great-circle distance between two coordinates, in meters.
fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * a.sqrt().asin()
}

/// Fixed instructor rating and grading-history tables.
#[derive(Debug, Default)]
pub struct StaticRatings {
    ratings: HashMap<String, f64>,
    gpas: HashMap<(String, String), f64>,
}

impl StaticRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rating(mut self, instructor: impl Into<String>, rating: f64) -> Self {
        self.ratings.insert(instructor.into(), rating);
        self
    }

    pub fn with_gpa(
        mut self,
        course: impl Into<String>,
        instructor: impl Into<String>,
        gpa: f64,
    ) -> Self {
        self.gpas.insert((course.into(), instructor.into()), gpa);
        self
    }
}

#[async_trait]
impl InstructorRatings for StaticRatings {
    async fn rating_for(&self, instructor: &str) -> Option<f64> {
        self.ratings.get(instructor).copied()
    }

    async fn average_gpa(&self, course: &str, instructor: &str) -> Option<f64> {
        self.gpas
            .get(&(course.to_string(), instructor.to_string()))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credits;

    #[tokio::test]
    async fn test_local_catalog_round_trip() {
        let term = Term::new("202508");
        let mut catalog = LocalCatalog::new();
        catalog.insert(
            &term,
            Course::new("CMSC131", "Object-Oriented Programming I", Credits::Fixed(4)),
            vec![Section::new("CMSC131", "0101")],
        );

        let course = catalog.course("CMSC131", &term).await.unwrap();
        assert_eq!(course.code, "CMSC131");

        let sections = catalog.sections("CMSC131", &term).await.unwrap();
        assert_eq!(sections.len(), 1);
    }

    #[tokio::test]
    async fn test_local_catalog_unknown_course() {
        let catalog = LocalCatalog::new();
        let err = catalog
            .course("CMSC999", &Term::new("202508"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CourseNotFound { .. }));
    }

    #[tokio::test]
    async fn test_campus_map_same_building_is_free() {
        let map = StaticCampusMap::new();
        assert_eq!(map.walking_minutes("IRB", "IRB").await, Some(0.0));
    }

    #[tokio::test]
    async fn test_campus_map_known_pair() {
        let map = StaticCampusMap::new();
        // IRB ↔ PHY is roughly half a kilometer across campus.
        let minutes = map.walking_minutes("IRB", "PHY").await.unwrap();
        assert!(minutes >= 1.0 && minutes < 20.0, "got {} minutes", minutes);
        // Symmetric.
        assert_eq!(map.walking_minutes("PHY", "IRB").await, Some(minutes));
    }

    #[tokio::test]
    async fn test_campus_map_unknown_building() {
        let map = StaticCampusMap::new();
        assert_eq!(map.walking_minutes("IRB", "NOPE").await, None);
    }

    #[tokio::test]
    async fn test_campus_map_pair_override() {
        let map = StaticCampusMap::new().with_pair("IRB", "PHY", 12.0);
        assert_eq!(map.walking_minutes("PHY", "IRB").await, Some(12.0));
    }

    #[tokio::test]
    async fn test_static_ratings() {
        let ratings = StaticRatings::new()
            .with_rating("Fawzi Emad", 4.5)
            .with_gpa("CMSC131", "Fawzi Emad", 3.2);
        assert_eq!(ratings.rating_for("Fawzi Emad").await, Some(4.5));
        assert_eq!(ratings.rating_for("Unknown").await, None);
        assert_eq!(ratings.average_gpa("CMSC131", "Fawzi Emad").await, Some(3.2));
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_meters(38.9890, -76.9368, 38.9890, -76.9368) < 1e-6);
    }
}
