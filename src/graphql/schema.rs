//! GraphQL schema definition
//!
//! The dashboard API is read-only: a query root composed from the query
//! modules, no mutations, no subscriptions.

use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::config::Config;
use crate::content::SiteRegistry;
use crate::db::Database;

use super::queries::{CourseQueries, NodeQueries, SiteQueries};
use super::registry::ExtensionRegistry;

/// The GraphQL schema type
pub type DashboardSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Per-request execution flags, injected by the HTTP layer
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFlags {
    /// Expand embedded content tags in lesson bodies
    pub expand_tags: bool,
}

#[derive(MergedObject, Default)]
pub struct QueryRoot(CourseQueries, NodeQueries, SiteQueries);

/// Build the GraphQL schema with all resolvers.
///
/// `extensions` must already be finalized; registration happens strictly
/// before the schema exists.
pub fn build_schema(
    registry: Arc<SiteRegistry>,
    db: Database,
    extensions: Arc<ExtensionRegistry>,
    config: Arc<Config>,
) -> DashboardSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(registry)
        .data(db)
        .data(extensions)
        .data(config)
        .finish()
}
