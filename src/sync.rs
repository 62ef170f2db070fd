//! Denormalization re-sync
//!
//! AccountSkill records carry a copy of their catalog entry's display name and
//! category. `update_catalog_skill` never rewrites those copies, so after a
//! catalog edit the copies stay stale until [`resync_denormalized`] runs.
//!
//! The walk is not transactional as a whole: each stale record is refreshed
//! with its own conditional write that re-copies only the catalog fields, so
//! endorsements and edits landing mid-walk are kept. A record deleted mid-walk
//! is counted as skipped. Queries against the category index may see a mix of
//! old and new categories until the walk ends.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::models::CatalogSkill;
use crate::repository::AccountSkillRepository;

/// Outcome of one re-sync walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub skill_id: String,
    /// Records referencing the skill
    pub examined: usize,
    /// Records rewritten
    pub updated: usize,
    /// Records deleted or already refreshed between lookup and rewrite
    pub skipped: usize,
    /// Primary keys whose rewrite failed, with the error message
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rewrite every stale AccountSkill copy of `catalog`
pub async fn resync_denormalized<S>(store: &S, catalog: &CatalogSkill) -> Result<SyncReport, StorageError>
where
    S: AccountSkillRepository + ?Sized,
{
    let records = store.list_by_skill_id(&catalog.skill_id).await?;
    let mut report = SyncReport {
        skill_id: catalog.skill_id.clone(),
        examined: records.len(),
        ..Default::default()
    };

    for record in records {
        if !record.is_stale(catalog) {
            continue;
        }

        let key = record.key();
        match store
            .refresh_denormalized(&record.handle, &record.skill_id, catalog)
            .await
        {
            Ok(Some(_)) => {
                debug!(key = %key, "Denormalized copy refreshed");
                report.updated += 1;
            }
            Ok(None) => {
                debug!(key = %key, "Copy already current");
                report.skipped += 1;
            }
            Err(e) if e.is_not_found() => {
                debug!(key = %key, "Record vanished during resync");
                report.skipped += 1;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to refresh denormalized copy");
                report.failed.push((key, e.to_string()));
            }
        }
    }

    info!(
        skill_id = %report.skill_id,
        examined = report.examined,
        updated = report.updated,
        skipped = report.skipped,
        failed = report.failed.len(),
        "Denormalization resync finished"
    );
    Ok(report)
}
