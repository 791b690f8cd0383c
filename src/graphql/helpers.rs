// Helper functions shared across GraphQL query modules.

use std::sync::Arc;

use async_graphql::Context;

use crate::config::Config;
use crate::content::{CourseDefinition, CourseView, SiteRegistry};
use crate::db::Database;

use super::lookup::LookupError;
use super::viewer::ViewerExt;

/// Fetch a course by slug with the visibility policy applied.
///
/// Every resolver that can yield a course goes through here; there is no
/// other path from a slug to a `CourseDefinition`.
pub(crate) fn get_visible_course(
    ctx: &Context<'_>,
    slug: &str,
) -> Result<CourseDefinition, LookupError> {
    let registry = ctx.data_unchecked::<Arc<SiteRegistry>>();
    let course = registry.get(slug).ok_or(LookupError::NotFound)?;
    if !SiteRegistry::is_visible(course, ctx.audience()) {
        return Err(LookupError::NotVisible);
    }
    Ok(course.clone())
}

/// Build the viewer's course view: content tree plus progress and links.
pub(crate) async fn course_view(
    ctx: &Context<'_>,
    course: &CourseDefinition,
) -> Result<CourseView, LookupError> {
    let config = ctx.data_unchecked::<Arc<Config>>();
    match ctx.viewer() {
        Some(viewer) => {
            let records = ctx
                .data_unchecked::<Database>()
                .progress()
                .for_course(&viewer.user_id, &course.slug)
                .await
                .map_err(LookupError::Internal)?;
            Ok(CourseView::new(
                course.clone(),
                records,
                config.base_url.clone(),
                true,
            ))
        }
        None => Ok(CourseView::anonymous(
            course.clone(),
            config.base_url.clone(),
        )),
    }
}
