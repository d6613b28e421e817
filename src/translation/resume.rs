/*!
 * Resume point resolution from previously written artifacts.
 *
 * Artifacts are assumed to be append-ordered by ascending `qa_id`, which is
 * what the pipeline itself produces. The last row of each artifact is taken
 * as its progress marker; out-of-order ids are reported but not corrected.
 */

use log::{debug, info, warn};
use std::path::Path;

use crate::dataset::{QA_ID_COLUMN, RawTable, parse_qa_id};
use crate::file_utils::FileManager;

/// Last processed `qa_id` of one artifact
///
/// Returns `None` when the file is missing, empty, unreadable, lacks a
/// `qa_id` column or holds no row with a parseable id.
pub fn last_qa_id<P: AsRef<Path>>(path: P) -> Option<i64> {
    let path = path.as_ref();
    if !FileManager::is_non_empty_file(path) {
        debug!("No resume data in {:?}", path);
        return None;
    }

    let table = match RawTable::read(path) {
        Ok(table) => table,
        Err(e) => {
            warn!("Ignoring unreadable artifact {:?}: {}", path, e);
            return None;
        }
    };

    let column = table.column(QA_ID_COLUMN)?;
    let ids: Vec<i64> = table
        .rows
        .iter()
        .filter_map(|row| parse_qa_id(&row[column]))
        .collect();

    if ids.windows(2).any(|pair| pair[1] < pair[0]) {
        warn!(
            "Artifact {:?} is not ordered by {}; resuming from its last row anyway",
            path, QA_ID_COLUMN
        );
    }

    ids.last().copied()
}

/// Combine the progress of the two language artifacts
///
/// The larger id wins so the language that got further is never repeated.
pub fn combine_resume_points(primary: Option<i64>, secondary: Option<i64>) -> Option<i64> {
    match (primary, secondary) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Resolve the resume point from both success artifacts
pub fn resolve_resume_point<P1: AsRef<Path>, P2: AsRef<Path>>(
    primary_output: P1,
    secondary_output: P2,
) -> Option<i64> {
    let primary = last_qa_id(primary_output);
    let secondary = last_qa_id(secondary_output);
    let resume = combine_resume_points(primary, secondary);

    match resume {
        Some(id) => info!(
            "Resuming after {} {} (primary: {:?}, secondary: {:?})",
            QA_ID_COLUMN, id, primary, secondary
        ),
        None => info!("Starting fresh translation"),
    }

    resume
}
