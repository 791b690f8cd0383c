//! Course date fields
//!
//! Contributes `startDate` and `endDate` to `Course`, read from the
//! per-course settings block.

use std::sync::Arc;

use crate::content::model::CourseDefinition;
use crate::graphql::registry::{CourseDatesResolver, ExtensionRegistry, RegistryError};

struct CourseDates;

impl CourseDatesResolver for CourseDates {
    fn start_date(&self, course: &CourseDefinition) -> Option<String> {
        course.settings.start_date.map(|d| d.to_string())
    }

    fn end_date(&self, course: &CourseDefinition) -> Option<String> {
        course.settings.end_date.map(|d| d.to_string())
    }
}

pub fn register(registry: &mut ExtensionRegistry) -> Result<(), RegistryError> {
    registry.set_course_dates(Arc::new(CourseDates))
}
