//! Store-driven bulk retention passes.
//!
//! These are the bodies of the round's internal tasks: the mark pass
//! (recompute-all at round start), the unmark pass (postpone whatever
//! survived cleaning), and the scan-result application.

use chrono::NaiveDate;
use tracing::info;

use simsweep_core::errors::SweepResult;
use simsweep_core::models::{Folder, RetentionDecision, RootFolderId, ScanResult};
use simsweep_core::traits::ICleanupStore;

use crate::calculator::{CurrentRetention, RetentionCalculator};
use crate::catalog::RetentionCatalog;
use crate::protection::PathProtectionIndex;

fn load_snapshot(
    store: &dyn ICleanupStore,
    rootfolder_id: RootFolderId,
) -> SweepResult<(RetentionCatalog, PathProtectionIndex)> {
    let catalog = RetentionCatalog::new(store.retention_catalog(rootfolder_id)?)?;
    let index = PathProtectionIndex::new(store.path_protections(rootfolder_id)?);
    Ok((catalog, index))
}

/// Recompute the retention of every folder in the rootfolder.
///
/// Runs in the recompute-all phase right after a round starts; this is
/// also what marks folders for cleanup when they are due.
pub fn run_mark_pass(
    store: &dyn ICleanupStore,
    rootfolder_id: RootFolderId,
    round_start_date: NaiveDate,
    cycle_time: i64,
) -> SweepResult<usize> {
    let (catalog, index) = load_snapshot(store, rootfolder_id)?;
    let calculator = RetentionCalculator::new(&catalog, &index, round_start_date, cycle_time, true);

    let folders = store.folders(rootfolder_id)?;
    for folder in &folders {
        let decision = calculator.adjust_from_scan(
            &folder.path,
            CurrentRetention::from(folder),
            folder.modified_date,
            None,
        )?;
        store.apply_decision(folder.id, decision, folder.modified_date)?;
    }
    info!(
        rootfolder_id,
        updated = folders.len(),
        "mark pass recomputed retentions"
    );
    Ok(folders.len())
}

/// Postpone every folder still marked after review and cleaning to the
/// first non-marked numeric bucket, so uncleaned work rolls into the
/// next round instead of staying due forever.
pub fn run_unmark_pass(
    store: &dyn ICleanupStore,
    rootfolder_id: RootFolderId,
) -> SweepResult<usize> {
    let catalog = RetentionCatalog::new(store.retention_catalog(rootfolder_id)?)?;
    let marked = store.marked_folders(rootfolder_id, catalog.marked_id())?;
    let after_marked = catalog.retention_id_after_marked();

    for folder in &marked {
        let decision = RetentionDecision {
            retention_id: after_marked,
            path_protection_id: folder.path_protection_id,
            expiration_date: folder.expiration_date,
        };
        store.apply_decision(folder.id, decision, folder.modified_date)?;
    }
    info!(
        rootfolder_id,
        postponed = marked.len(),
        "unmark pass postponed surviving marked folders"
    );
    Ok(marked.len())
}

/// Merge a batch of scanner output into the folder records, creating
/// records for folders not seen before. Returns the number of folders
/// updated; entries not detected as simulations are skipped.
pub fn apply_scan_results(
    store: &dyn ICleanupStore,
    rootfolder_id: RootFolderId,
    results: &[ScanResult],
    round_start_date: NaiveDate,
    cycle_time: i64,
    recompute_all: bool,
) -> SweepResult<usize> {
    let (catalog, index) = load_snapshot(store, rootfolder_id)?;
    let calculator = RetentionCalculator::new(
        &catalog,
        &index,
        round_start_date,
        cycle_time,
        recompute_all,
    );

    let mut applied = 0;
    for scan in results {
        if !scan.detected_as_simulation {
            continue;
        }
        let folder = match store.get_folder_by_path(rootfolder_id, &scan.folder_path)? {
            Some(folder) => folder,
            None => store.upsert_folder(Folder {
                id: 0,
                rootfolder_id,
                path: scan.folder_path.clone(),
                retention_id: None,
                expiration_date: None,
                modified_date: None,
                path_protection_id: None,
            })?,
        };
        let (decision, modified_date) = calculator.calculate_from_scan_result(
            CurrentRetention::from(&folder),
            folder.modified_date,
            scan,
        )?;
        store.apply_decision(folder.id, decision, modified_date)?;
        applied += 1;
    }
    info!(rootfolder_id, applied, "scan results applied");
    Ok(applied)
}
