use super::prelude::*;
use crate::graphql::node_id::decode_course_id;

#[derive(Default)]
pub struct CourseQueries;

#[Object]
impl CourseQueries {
    /// A single course by its global id
    async fn course(&self, ctx: &Context<'_>, id: String) -> Option<Course> {
        absorb(resolve_course(ctx, &id), "course")
    }

    /// Every course visible to the current viewer.
    ///
    /// Unlike the single-item lookups, failures here are surfaced to the
    /// client as request-level errors after logging.
    async fn all_courses(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
    ) -> Result<CourseConnection> {
        let registry = ctx.data_unchecked::<Arc<SiteRegistry>>();
        let courses: Vec<Course> = registry
            .visible_courses(ctx.audience())
            .into_iter()
            .map(|def| Course::new(def.clone()))
            .collect();

        let conn = Connection::paginate(courses, first, after).map_err(|err| {
            tracing::error!(error = %err, "Error resolving allCourses");
            async_graphql::Error::new(err)
        })?;
        Ok(CourseConnection::from_connection(conn))
    }
}

fn resolve_course(ctx: &Context<'_>, id: &str) -> Result<Course, LookupError> {
    let slug = decode_course_id(id)?;
    let course = get_visible_course(ctx, &slug)?;
    Ok(Course::new(course))
}
