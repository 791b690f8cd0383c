//! GraphQL type definitions
//!
//! These types are per-request snapshots of the content tree, decorated with
//! async-graphql attributes. Viewer-private data (`progress`, `link`) is only
//! populated when a lesson is resolved through the viewer's course view; the
//! plain enumeration paths leave it null.

use async_graphql::{Context, ID, Interface, Object, Result, SimpleObject};

use crate::content::model::{CategoryDef, CourseDefinition, LessonDef, UnitDef};
use crate::content::view::ExpandedLesson;
use crate::db::ProgressState;
use crate::define_connection;

use super::helpers::{course_view, get_visible_course};
use super::lookup::{LookupError, absorb};
use super::node_id::{
    decode_lesson_id, decode_unit_id, encode_course_id, encode_lesson_id, encode_unit_id,
};
use super::pagination::Connection;
use super::registry::SiteInfo;
use super::schema::QueryFlags;

define_connection!(CourseConnection, CourseEdge, Course);
define_connection!(UnitConnection, UnitEdge, Unit);
define_connection!(LessonConnection, LessonEdge, Lesson);

/// Anything refetchable from a global id
#[derive(Interface, Clone)]
#[graphql(field(name = "id", ty = "ID"))]
pub enum Node {
    Course(Course),
    Unit(Unit),
    Lesson(Lesson),
}

/// A course visible to the current viewer
#[derive(Debug, Clone)]
pub struct Course {
    def: CourseDefinition,
}

impl Course {
    pub fn new(def: CourseDefinition) -> Self {
        Self { def }
    }
}

#[Object]
impl Course {
    async fn id(&self) -> ID {
        encode_course_id(&self.def.slug).into()
    }

    async fn slug(&self) -> &str {
        &self.def.slug
    }

    async fn title(&self) -> &str {
        &self.def.title
    }

    #[graphql(name = "abstract")]
    async fn abstract_text(&self) -> Option<&str> {
        self.def.abstract_text.as_deref()
    }

    /// All units of this course
    async fn all_units(
        &self,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<UnitConnection> {
        let units: Vec<Unit> = self
            .def
            .units
            .iter()
            .map(|u| Unit::new(self.def.clone(), u.clone()))
            .collect();
        let conn = Connection::paginate(units, first, after)?;
        Ok(UnitConnection::from_connection(conn))
    }

    /// A single unit by its global id
    async fn unit(&self, ctx: &Context<'_>, id: String) -> Option<Unit> {
        absorb(self.resolve_unit(ctx, &id), "unit")
    }

    /// Course start date, contributed by the course-dates extension
    async fn start_date(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.extension_registry()
            .course_dates()
            .and_then(|ext| ext.start_date(&self.def))
    }

    /// Course end date, contributed by the course-dates extension
    async fn end_date(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.extension_registry()
            .course_dates()
            .and_then(|ext| ext.end_date(&self.def))
    }

    /// Estimated total workload, contributed by the explorer extension
    async fn estimated_workload(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.extension_registry()
            .explorer()
            .and_then(|ext| ext.estimated_workload(&self.def))
    }

    /// Course category, contributed by the explorer extension
    async fn category(&self, ctx: &Context<'_>) -> Option<CourseCategory> {
        ctx.extension_registry()
            .explorer()
            .and_then(|ext| ext.category(&self.def))
            .map(CourseCategory::from)
    }
}

impl Course {
    fn resolve_unit(&self, ctx: &Context<'_>, id: &str) -> Result<Unit, LookupError> {
        let (slug, unit_id) = decode_unit_id(id)?;
        // An id forged against a different course never resolves through
        // this course
        if slug != self.def.slug {
            return Err(LookupError::NotFound);
        }
        let course = get_visible_course(ctx, &slug)?;
        let unit = course.unit(&unit_id).cloned().ok_or(LookupError::NotFound)?;
        Ok(Unit::new(course, unit))
    }
}

/// A unit within a visible course
#[derive(Debug, Clone)]
pub struct Unit {
    course: CourseDefinition,
    def: UnitDef,
}

impl Unit {
    pub fn new(course: CourseDefinition, def: UnitDef) -> Self {
        Self { course, def }
    }
}

#[Object]
impl Unit {
    async fn id(&self) -> ID {
        encode_unit_id(&self.course.slug, &self.def.unit_id).into()
    }

    async fn unit_id(&self) -> &str {
        &self.def.unit_id
    }

    async fn title(&self) -> &str {
        &self.def.title
    }

    async fn description(&self) -> Option<&str> {
        self.def.description.as_deref()
    }

    /// All lessons of this unit, without viewer augmentation
    async fn all_lessons(
        &self,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<LessonConnection> {
        let lessons: Vec<Lesson> = self
            .def
            .lessons
            .iter()
            .map(|l| Lesson::plain(&self.course.slug, &self.def.unit_id, l.clone()))
            .collect();
        let conn = Connection::paginate(lessons, first, after)?;
        Ok(LessonConnection::from_connection(conn))
    }

    /// A single lesson by its global id, expanded through the viewer's
    /// course view
    async fn lesson(&self, ctx: &Context<'_>, id: String) -> Option<Lesson> {
        absorb(self.resolve_lesson(ctx, &id).await, "lesson")
    }

    /// All lessons of this unit with per-viewer progress and links
    async fn detailed_lessons(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<LessonConnection> {
        let view = course_view(ctx, &self.course).await.map_err(|err| {
            tracing::error!(slug = %self.course.slug, error = %err, "Error resolving detailedLessons");
            async_graphql::Error::new(err.to_string())
        })?;
        let lessons: Vec<Lesson> = view
            .expand_lessons(&self.def.unit_id)
            .into_iter()
            .map(|expanded| Lesson::detailed(&self.course.slug, &self.def.unit_id, expanded))
            .collect();
        let conn = Connection::paginate(lessons, first, after)?;
        Ok(LessonConnection::from_connection(conn))
    }
}

impl Unit {
    async fn resolve_lesson(&self, ctx: &Context<'_>, id: &str) -> Result<Lesson, LookupError> {
        let (slug, unit_id, lesson_id) = decode_lesson_id(id)?;
        // Cross-course and cross-unit forgeries are rejected before any
        // lookup happens
        if slug != self.course.slug || unit_id != self.def.unit_id {
            return Err(LookupError::NotFound);
        }
        let course = get_visible_course(ctx, &slug)?;
        let view = course_view(ctx, &course).await?;
        let expanded = view
            .find_element(&unit_id, &lesson_id)
            .ok_or(LookupError::NotFound)?;
        Ok(Lesson::detailed(&slug, &unit_id, expanded))
    }
}

/// A lesson, optionally expanded with viewer-private progress and link
#[derive(Debug, Clone)]
pub struct Lesson {
    course_slug: String,
    unit_id: String,
    def: LessonDef,
    progress: Option<ProgressState>,
    link: Option<String>,
}

impl Lesson {
    /// A lesson from plain enumeration: no viewer augmentation
    pub fn plain(course_slug: &str, unit_id: &str, def: LessonDef) -> Self {
        Self {
            course_slug: course_slug.to_string(),
            unit_id: unit_id.to_string(),
            def,
            progress: None,
            link: None,
        }
    }

    /// A lesson resolved through the viewer's course view
    pub fn detailed(course_slug: &str, unit_id: &str, expanded: ExpandedLesson) -> Self {
        Self {
            course_slug: course_slug.to_string(),
            unit_id: unit_id.to_string(),
            def: expanded.lesson,
            progress: expanded.progress,
            link: Some(expanded.link),
        }
    }
}

#[Object]
impl Lesson {
    async fn id(&self) -> ID {
        encode_lesson_id(&self.course_slug, &self.unit_id, &self.def.lesson_id).into()
    }

    async fn lesson_id(&self) -> &str {
        &self.def.lesson_id
    }

    async fn title(&self) -> &str {
        &self.def.title
    }

    async fn duration_minutes(&self) -> Option<u32> {
        self.def.duration_minutes
    }

    /// Lesson markup. Embedded content tags are expanded when the request
    /// set the expand flag.
    async fn body(&self, ctx: &Context<'_>) -> Option<String> {
        let flags = ctx.data_opt::<QueryFlags>().copied().unwrap_or_default();
        self.def.body.as_ref().map(|body| {
            if flags.expand_tags {
                crate::content::tags::expand_tags(body)
            } else {
                body.clone()
            }
        })
    }

    /// Viewer progress; null outside the detailed path or for anonymous
    /// viewers
    async fn progress(&self) -> Option<&'static str> {
        self.progress.map(|p| p.as_str())
    }

    /// Navigation link; null outside the detailed path
    async fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// Site information exposed through the explorer extension
#[derive(Debug, Clone, SimpleObject)]
pub struct Site {
    pub title: String,
    pub logo_url: Option<String>,
    /// Number of courses visible to the current viewer
    pub course_count: i32,
}

impl Site {
    pub fn from_info(info: SiteInfo, course_count: usize) -> Self {
        Self {
            title: info.title,
            logo_url: info.logo_url,
            course_count: course_count as i32,
        }
    }
}

/// Course category exposed through the explorer extension
#[derive(Debug, Clone, SimpleObject)]
pub struct CourseCategory {
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryDef> for CourseCategory {
    fn from(def: CategoryDef) -> Self {
        Self {
            name: def.name,
            description: def.description,
        }
    }
}

/// Sugar for reaching the extension registry from a resolver context
trait ExtensionsExt {
    fn extension_registry(&self) -> &super::registry::ExtensionRegistry;
}

impl ExtensionsExt for Context<'_> {
    fn extension_registry(&self) -> &super::registry::ExtensionRegistry {
        self.data_unchecked::<std::sync::Arc<super::registry::ExtensionRegistry>>()
    }
}
