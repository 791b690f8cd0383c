//! Course definition model
//!
//! Courses are authored as one YAML file per course. These types are the
//! deserialized form; they carry no per-viewer state (see `view` for that).

use chrono::NaiveDate;
use serde::Deserialize;

/// Who may see a course through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Visible to everyone, including anonymous viewers
    Public,
    /// Visible to any authenticated viewer
    #[default]
    Registered,
    /// Visible only to viewers listed in the course staff
    Private,
}

/// Optional course category shown in the course explorer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Per-course settings block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseSettings {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A single course as authored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDefinition {
    /// URL-safe identifier, unique across the site
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub category: Option<CategoryDef>,
    #[serde(default)]
    pub settings: CourseSettings,
    /// Emails allowed to see the course when availability is `private`
    #[serde(default)]
    pub staff: Vec<String>,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

/// A unit within a course
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDef {
    /// Unique within the course
    pub unit_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonDef>,
}

/// A lesson within a unit
#[derive(Debug, Clone, Deserialize)]
pub struct LessonDef {
    /// Unique within the unit
    pub lesson_id: String,
    pub title: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Lesson markup; may contain embedded content tags
    #[serde(default)]
    pub body: Option<String>,
}

impl CourseDefinition {
    pub fn unit(&self, unit_id: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.unit_id == unit_id)
    }

    /// Total authored duration across all lessons, in minutes
    pub fn total_duration_minutes(&self) -> u32 {
        self.units
            .iter()
            .flat_map(|u| &u.lessons)
            .filter_map(|l| l.duration_minutes)
            .sum()
    }
}

impl UnitDef {
    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonDef> {
        self.lessons.iter().find(|l| l.lesson_id == lesson_id)
    }
}
