//! Extension registry
//!
//! Plug-in modules contribute typed field resolvers here at startup, before
//! the schema is built. `finalize` consumes the mutable registry, so late
//! registration is unrepresentable; registering the same slot twice is a
//! startup bug and fails fast.

use std::sync::Arc;

use thiserror::Error;

use crate::content::model::{CategoryDef, CourseDefinition};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("extension slot '{0}' already registered")]
    AlreadyRegistered(&'static str),
}

/// Site-level information contributed by the explorer extension
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub title: String,
    pub logo_url: Option<String>,
}

/// Course date fields contributed by the course-dates extension
pub trait CourseDatesResolver: Send + Sync {
    fn start_date(&self, course: &CourseDefinition) -> Option<String>;
    fn end_date(&self, course: &CourseDefinition) -> Option<String>;
}

/// Explorer fields contributed by the explorer extension
pub trait ExplorerResolver: Send + Sync {
    fn site(&self) -> SiteInfo;
    fn estimated_workload(&self, course: &CourseDefinition) -> Option<String>;
    fn category(&self, course: &CourseDefinition) -> Option<CategoryDef>;
}

/// Capability slots filled during registration. Fields backed by a slot that
/// was never filled resolve to null.
#[derive(Default)]
pub struct ExtensionRegistry {
    course_dates: Option<Arc<dyn CourseDatesResolver>>,
    explorer: Option<Arc<dyn ExplorerResolver>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_course_dates(
        &mut self,
        resolver: Arc<dyn CourseDatesResolver>,
    ) -> Result<(), RegistryError> {
        if self.course_dates.is_some() {
            return Err(RegistryError::AlreadyRegistered("course_dates"));
        }
        self.course_dates = Some(resolver);
        Ok(())
    }

    pub fn set_explorer(&mut self, resolver: Arc<dyn ExplorerResolver>) -> Result<(), RegistryError> {
        if self.explorer.is_some() {
            return Err(RegistryError::AlreadyRegistered("explorer"));
        }
        self.explorer = Some(resolver);
        Ok(())
    }

    /// Freeze the registry. The returned value is shared schema data and can
    /// never be mutated again.
    pub fn finalize(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn course_dates(&self) -> Option<&dyn CourseDatesResolver> {
        self.course_dates.as_deref()
    }

    pub fn explorer(&self) -> Option<&dyn ExplorerResolver> {
        self.explorer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct NoDates;
    impl CourseDatesResolver for NoDates {
        fn start_date(&self, _course: &CourseDefinition) -> Option<String> {
            None
        }
        fn end_date(&self, _course: &CourseDefinition) -> Option<String> {
            None
        }
    }

    #[test]
    fn double_registration_fails() {
        let mut registry = ExtensionRegistry::new();
        registry.set_course_dates(Arc::new(NoDates)).unwrap();
        assert_matches!(
            registry.set_course_dates(Arc::new(NoDates)),
            Err(RegistryError::AlreadyRegistered("course_dates"))
        );
    }

    #[test]
    fn empty_slots_resolve_to_none() {
        let registry = ExtensionRegistry::new().finalize();
        assert!(registry.course_dates().is_none());
        assert!(registry.explorer().is_none());
    }
}
