use super::prelude::*;
use crate::graphql::registry::ExtensionRegistry;

#[derive(Default)]
pub struct SiteQueries;

#[Object]
impl SiteQueries {
    /// Site information, contributed by the explorer extension.
    /// Null when the extension was not registered at startup.
    async fn site(&self, ctx: &Context<'_>) -> Option<Site> {
        let extensions = ctx.data_unchecked::<Arc<ExtensionRegistry>>();
        let explorer = extensions.explorer()?;
        let registry = ctx.data_unchecked::<Arc<SiteRegistry>>();
        let visible = registry.visible_courses(ctx.audience()).len();
        Some(Site::from_info(explorer.site(), visible))
    }
}
