//! Course content model
//!
//! The authored content tree (courses, units, lessons), the site registry
//! with its visibility policy, and the per-viewer course view.

pub mod model;
pub mod sites;
pub mod tags;
pub mod view;

pub use model::{Availability, CategoryDef, CourseDefinition, LessonDef, UnitDef};
pub use sites::{Audience, SiteRegistry};
pub use view::{CourseView, ExpandedLesson};
