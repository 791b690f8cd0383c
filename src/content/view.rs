//! Per-viewer course projection
//!
//! A `CourseView` snapshots one course for one request: the authored content
//! tree plus the viewer's progress and navigation links. Everything here is
//! built fresh per resolver call and discarded with the response.

use std::collections::HashMap;

use url::Url;

use crate::db::{ProgressRecord, ProgressState};

use super::model::{CourseDefinition, LessonDef, UnitDef};

/// A lesson expanded through the viewer's course view
#[derive(Debug, Clone)]
pub struct ExpandedLesson {
    pub lesson: LessonDef,
    /// Absent for anonymous viewers; authenticated viewers always get a
    /// state, defaulting to not-started
    pub progress: Option<ProgressState>,
    pub link: String,
}

pub struct CourseView {
    course: CourseDefinition,
    progress: HashMap<(String, String), ProgressState>,
    base_url: Url,
    authenticated: bool,
}

impl CourseView {
    pub fn new(
        course: CourseDefinition,
        progress_records: Vec<ProgressRecord>,
        base_url: Url,
        authenticated: bool,
    ) -> Self {
        let progress = progress_records
            .into_iter()
            .map(|r| ((r.unit_id.clone(), r.lesson_id.clone()), r.progress_state()))
            .collect();
        Self {
            course,
            progress,
            base_url,
            authenticated,
        }
    }

    /// A view with no viewer attached: no progress, links only
    pub fn anonymous(course: CourseDefinition, base_url: Url) -> Self {
        Self::new(course, Vec::new(), base_url, false)
    }

    pub fn course(&self) -> &CourseDefinition {
        &self.course
    }

    pub fn get_units(&self) -> &[UnitDef] {
        &self.course.units
    }

    pub fn get_lessons(&self, unit_id: &str) -> &[LessonDef] {
        self.course
            .unit(unit_id)
            .map(|u| u.lessons.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a `[unit_id, lesson_id]` path within this course.
    ///
    /// Returns nothing when the path does not exist here, which is also what
    /// rejects ids forged against a different course.
    pub fn find_element(&self, unit_id: &str, lesson_id: &str) -> Option<ExpandedLesson> {
        let unit = self.course.unit(unit_id)?;
        let lesson = unit.lesson(lesson_id)?;
        Some(self.expand(unit_id, lesson))
    }

    /// Expand every lesson of one unit
    pub fn expand_lessons(&self, unit_id: &str) -> Vec<ExpandedLesson> {
        self.get_lessons(unit_id)
            .iter()
            .map(|lesson| self.expand(unit_id, lesson))
            .collect::<Vec<_>>()
    }

    fn expand(&self, unit_id: &str, lesson: &LessonDef) -> ExpandedLesson {
        let progress = if self.authenticated {
            Some(
                self.progress
                    .get(&(unit_id.to_string(), lesson.lesson_id.clone()))
                    .copied()
                    .unwrap_or_default(),
            )
        } else {
            None
        };
        ExpandedLesson {
            lesson: lesson.clone(),
            progress,
            link: self.lesson_link(unit_id, &lesson.lesson_id),
        }
    }

    /// Navigation link for one lesson: `{base}/{slug}/unit?unit=..&lesson=..`
    pub fn lesson_link(&self, unit_id: &str, lesson_id: &str) -> String {
        let mut url = self
            .base_url
            .join(&format!("{}/unit", self.course.slug))
            .unwrap_or_else(|_| self.base_url.clone());
        url.query_pairs_mut()
            .append_pair("unit", unit_id)
            .append_pair("lesson", lesson_id);
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_course() -> CourseDefinition {
        serde_yaml::from_str(
            r#"
slug: intro
title: Intro
units:
  - unit_id: u1
    title: Unit One
    lessons:
      - lesson_id: l1
        title: First
      - lesson_id: l2
        title: Second
  - unit_id: u2
    title: Unit Two
    lessons:
      - lesson_id: l1
        title: Other first
"#,
        )
        .unwrap()
    }

    fn base() -> Url {
        Url::parse("https://learn.example.com/").unwrap()
    }

    fn record(unit_id: &str, lesson_id: &str, state: &str) -> ProgressRecord {
        ProgressRecord {
            user_id: "u-1".into(),
            course_slug: "intro".into(),
            unit_id: unit_id.into(),
            lesson_id: lesson_id.into(),
            state: state.into(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn find_element_resolves_and_links() {
        let view = CourseView::new(
            sample_course(),
            vec![record("u1", "l2", "completed")],
            base(),
            true,
        );

        let found = view.find_element("u1", "l2").unwrap();
        assert_eq!(found.progress, Some(ProgressState::Completed));
        assert_eq!(
            found.link,
            "https://learn.example.com/intro/unit?unit=u1&lesson=l2"
        );

        // Recorded progress is keyed by unit too: u2/l1 has none
        let other = view.find_element("u2", "l1").unwrap();
        assert_eq!(other.progress, Some(ProgressState::NotStarted));
    }

    #[test]
    fn find_element_rejects_paths_outside_the_course() {
        let view = CourseView::anonymous(sample_course(), base());
        assert!(view.find_element("u1", "l99").is_none());
        assert!(view.find_element("u99", "l1").is_none());
    }

    #[test]
    fn anonymous_views_carry_no_progress() {
        let view = CourseView::anonymous(sample_course(), base());
        let found = view.find_element("u1", "l1").unwrap();
        assert_eq!(found.progress, None);
        assert!(!found.link.is_empty());
    }

    #[test]
    fn expand_lessons_covers_the_unit() {
        let view = CourseView::anonymous(sample_course(), base());
        assert_eq!(view.get_units().len(), 2);
        assert_eq!(view.expand_lessons("u1").len(), 2);
        assert!(view.expand_lessons("missing").is_empty());
    }
}
