use super::prelude::*;
use crate::graphql::node_id::{NodeRef, decode_node};

#[derive(Default)]
pub struct NodeQueries;

#[Object]
impl NodeQueries {
    /// Refetch any entity from its global id
    async fn node(&self, ctx: &Context<'_>, id: String) -> Option<Node> {
        absorb(resolve_node(ctx, &id).await, "node")
    }
}

async fn resolve_node(ctx: &Context<'_>, id: &str) -> Result<Node, LookupError> {
    match decode_node(id)? {
        NodeRef::Course { slug } => {
            let course = get_visible_course(ctx, &slug)?;
            Ok(Node::Course(Course::new(course)))
        }
        NodeRef::Unit { slug, unit_id } => {
            let course = get_visible_course(ctx, &slug)?;
            let unit = course.unit(&unit_id).cloned().ok_or(LookupError::NotFound)?;
            Ok(Node::Unit(Unit::new(course, unit)))
        }
        NodeRef::Lesson {
            slug,
            unit_id,
            lesson_id,
        } => {
            let course = get_visible_course(ctx, &slug)?;
            let view = course_view(ctx, &course).await?;
            let expanded = view
                .find_element(&unit_id, &lesson_id)
                .ok_or(LookupError::NotFound)?;
            Ok(Node::Lesson(Lesson::detailed(&slug, &unit_id, expanded)))
        }
    }
}
