//! GraphQL read API over the course content model
//!
//! The schema mirrors the content hierarchy (query root -> course -> unit ->
//! lesson) with relay-style connections and global ids. Query modules are
//! combined into the root with `MergedObject`; plug-in field extensions are
//! contributed through the `registry` before the schema is finalized.

pub mod helpers;
pub mod lookup;
pub mod node_id;
pub mod pagination;
pub mod queries;
pub mod registry;
mod schema;
pub mod types;
pub mod viewer;

pub use registry::ExtensionRegistry;
pub use schema::{DashboardSchema, QueryFlags, build_schema};
pub use viewer::{Viewer, verify_token};
