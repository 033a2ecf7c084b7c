//! In-memory session log for tests

use std::cell::RefCell;

use crate::consts::LOG_HEADER;
use crate::core::SessionRecord;
use crate::error::AppError;
use crate::store::LogStore;
use crate::store::codec::encode_record;

#[derive(Debug, Default)]
pub(crate) struct MemoryLog {
    lines: RefCell<Vec<String>>,
}

impl MemoryLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed the log with raw lines (header not added)
    pub(crate) fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: RefCell::new(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    /// Number of data lines (header excluded)
    pub(crate) fn record_lines(&self) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|l| l.as_str() != LOG_HEADER)
            .count()
    }
}

impl LogStore for MemoryLog {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn append(&self, record: &SessionRecord) -> Result<(), AppError> {
        let mut lines = self.lines.borrow_mut();
        if lines.is_empty() {
            lines.push(LOG_HEADER.to_string());
        }
        lines.push(encode_record(record));
        Ok(())
    }

    fn read_lines(&self) -> Result<Vec<String>, AppError> {
        Ok(self.lines.borrow().clone())
    }
}
