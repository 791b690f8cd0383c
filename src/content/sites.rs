//! Course registry and visibility policy
//!
//! The registry is loaded once at startup from the content directory and is
//! immutable afterwards. Visibility is the sole authorization check in the
//! API: it must be applied at every entry point that can yield a course.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::model::{Availability, CourseDefinition};

/// Who is asking. Derived from the request's viewer context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience<'a> {
    Anonymous,
    /// An authenticated viewer, identified by email when the token carried one
    Registered { email: Option<&'a str> },
}

/// All courses configured on this site, keyed by slug
#[derive(Debug, Default)]
pub struct SiteRegistry {
    courses: BTreeMap<String, CourseDefinition>,
}

impl SiteRegistry {
    /// Load every course definition file under `dir`.
    ///
    /// A file that fails to parse or a duplicate slug aborts startup; serving
    /// a partially loaded catalog would silently hide courses.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut courses = BTreeMap::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_yaml = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            );
            if !is_yaml {
                continue;
            }

            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let course: CourseDefinition = serde_yaml::from_str(&raw)
                .with_context(|| format!("Invalid course definition in {}", path.display()))?;

            tracing::debug!(slug = %course.slug, path = %path.display(), "Loaded course definition");
            if let Some(previous) = courses.insert(course.slug.clone(), course) {
                bail!(
                    "Duplicate course slug '{}' (second definition in {})",
                    previous.slug,
                    path.display()
                );
            }
        }

        Ok(Self { courses })
    }

    /// Build a registry from already-parsed definitions (tests, seeding)
    pub fn from_courses(defs: impl IntoIterator<Item = CourseDefinition>) -> Result<Self> {
        let mut courses = BTreeMap::new();
        for course in defs {
            if let Some(previous) = courses.insert(course.slug.clone(), course) {
                bail!("Duplicate course slug '{}'", previous.slug);
            }
        }
        Ok(Self { courses })
    }

    pub fn get(&self, slug: &str) -> Option<&CourseDefinition> {
        self.courses.get(slug)
    }

    /// All courses in deterministic (slug) order
    pub fn all(&self) -> impl Iterator<Item = &CourseDefinition> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The visibility predicate. Lookup helpers never bypass this.
    pub fn is_visible(course: &CourseDefinition, audience: Audience<'_>) -> bool {
        match course.availability {
            Availability::Public => true,
            Availability::Registered => matches!(audience, Audience::Registered { .. }),
            Availability::Private => match audience {
                Audience::Registered { email: Some(email) } => {
                    course.staff.iter().any(|s| s.eq_ignore_ascii_case(email))
                }
                _ => false,
            },
        }
    }

    /// All courses the audience may see, in slug order
    pub fn visible_courses(&self, audience: Audience<'_>) -> Vec<&CourseDefinition> {
        self.all()
            .filter(|c| Self::is_visible(c, audience))
            .collect()
    }
}
