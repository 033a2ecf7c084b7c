//! Log storage abstraction
//!
//! The recorder appends through `LogStore` and the aggregator reads through
//! it, so both can be pointed at a real file or an in-memory log.

pub(crate) mod codec;
pub(crate) mod file;
pub(crate) mod loader;
#[cfg(test)]
pub(crate) mod memory;

use crate::core::SessionRecord;
use crate::error::AppError;

pub(crate) use codec::{flatten_description, sanitize_tag};
pub(crate) use file::FileLog;
pub(crate) use loader::load_log;
#[cfg(test)]
pub(crate) use memory::MemoryLog;

/// Append-only session log
pub(crate) trait LogStore {
    /// Human-readable location for messages
    fn location(&self) -> String;

    /// Append one record as a single line, writing the header first if the
    /// log is empty
    fn append(&self, record: &SessionRecord) -> Result<(), AppError>;

    /// All raw lines, header included. A log that does not exist yet reads
    /// as empty.
    fn read_lines(&self) -> Result<Vec<String>, AppError>;
}
