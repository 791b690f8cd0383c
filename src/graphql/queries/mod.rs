pub mod courses;
pub mod node;
pub mod site;

pub use courses::CourseQueries;
pub use node::NodeQueries;
pub use site::SiteQueries;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::content::SiteRegistry;
    pub(crate) use crate::graphql::helpers::{course_view, get_visible_course};
    pub(crate) use crate::graphql::lookup::{LookupError, absorb};
    pub(crate) use crate::graphql::pagination::Connection;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::graphql::viewer::ViewerExt;
}
