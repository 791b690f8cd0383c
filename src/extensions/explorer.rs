//! Course explorer fields
//!
//! Contributes the `site` query field plus `estimatedWorkload` and
//! `category` on `Course`.

use std::sync::Arc;

use crate::content::model::{CategoryDef, CourseDefinition};
use crate::graphql::registry::{ExplorerResolver, ExtensionRegistry, RegistryError, SiteInfo};

struct Explorer {
    site: SiteInfo,
}

impl ExplorerResolver for Explorer {
    fn site(&self) -> SiteInfo {
        self.site.clone()
    }

    fn estimated_workload(&self, course: &CourseDefinition) -> Option<String> {
        let minutes = course.total_duration_minutes();
        if minutes == 0 {
            return None;
        }
        Some(format_workload(minutes))
    }

    fn category(&self, course: &CourseDefinition) -> Option<CategoryDef> {
        course.category.clone()
    }
}

fn format_workload(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn register(registry: &mut ExtensionRegistry, site: SiteInfo) -> Result<(), RegistryError> {
    registry.set_explorer(Arc::new(Explorer { site }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(yaml: &str) -> CourseDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn workload_formats() {
        assert_eq!(format_workload(45), "45m");
        assert_eq!(format_workload(120), "2h");
        assert_eq!(format_workload(95), "1h 35m");
    }

    #[test]
    fn workload_is_absent_without_durations() {
        let ext = Explorer {
            site: SiteInfo {
                title: "T".into(),
                logo_url: None,
            },
        };
        let bare = course("slug: c\ntitle: C\n");
        assert_eq!(ext.estimated_workload(&bare), None);

        let timed = course(
            "slug: c\ntitle: C\nunits:\n  - unit_id: u\n    title: U\n    lessons:\n      - lesson_id: l\n        title: L\n        duration_minutes: 30\n",
        );
        assert_eq!(ext.estimated_workload(&timed), Some("30m".to_string()));
    }
}
