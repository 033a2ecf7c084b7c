//! Read a log into usable records, counting what had to be skipped

use crate::core::LoadResult;
use crate::error::AppError;
use crate::store::LogStore;
use crate::store::codec::{is_header, parse_record};

/// Parse every line of the log.
///
/// Header and blank lines are ignored. Any other line that does not parse is
/// dropped and counted in `skipped`; it never fails the load.
pub(crate) fn load_log(store: &dyn LogStore) -> Result<LoadResult, AppError> {
    let lines = store.read_lines()?;
    let mut result = LoadResult::default();

    for (line_no, line) in lines.iter().enumerate() {
        if line.trim().is_empty() || is_header(line) {
            continue;
        }
        match parse_record(line) {
            Ok(record) => {
                result.records.push(record);
                result.valid += 1;
            }
            Err(reason) => {
                log::debug!(
                    "Skipping line {} in {}: {}",
                    line_no + 1,
                    store.location(),
                    reason
                );
                result.skipped += 1;
            }
        }
    }

    if result.skipped > 0 {
        log::info!(
            "Skipped {} malformed row(s) in {}",
            result.skipped,
            store.location()
        );
    }
    Ok(result)
}
