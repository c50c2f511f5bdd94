//! Dashboard workflows: the single writer of the sidebar counts.

use std::collections::BTreeMap;

use crate::context::{SidebarCounts, SidebarCountsWriter};
use crate::domain::resource::ResourceKind;
use crate::repository::DashboardReader;
use crate::services::ServiceResult;

/// Fetches record counts and publishes them to every sidebar reader.
pub async fn refresh_sidebar_counts<R>(
    repo: &R,
    endpoint: &str,
    writer: &SidebarCountsWriter,
) -> ServiceResult<SidebarCounts>
where
    R: DashboardReader + ?Sized,
{
    let raw = repo.resource_counts(endpoint).await.map_err(|err| {
        log::error!("Failed to load dashboard counts: {err}");
        err
    })?;

    let mut counts = BTreeMap::new();
    for (slug, count) in raw {
        match slug.parse::<ResourceKind>() {
            Ok(kind) => {
                counts.insert(kind, count);
            }
            Err(_) => log::debug!("Skipping dashboard count for unknown resource '{slug}'"),
        }
    }

    let counts = SidebarCounts::new(counts);
    writer.publish(counts.clone());
    Ok(counts)
}
