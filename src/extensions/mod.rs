//! Plug-in schema extensions
//!
//! Each module here contributes fields to the base types through the
//! extension registry. Registration runs once at startup, after all modules
//! are constructed and before the schema is built; there is no runtime
//! re-registration.

pub mod course_dates;
pub mod explorer;
