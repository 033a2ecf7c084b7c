//! File-backed session log

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::consts::LOG_HEADER;
use crate::core::SessionRecord;
use crate::error::AppError;
use crate::store::LogStore;
use crate::store::codec::encode_record;

/// CSV log stored in a single file
#[derive(Debug, Clone)]
pub(crate) struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for FileLog {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn append(&self, record: &SessionRecord) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AppError::log_unavailable(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::log_unavailable(&self.path, e))?;

        let len = file
            .metadata()
            .map_err(|e| AppError::log_unavailable(&self.path, e))?
            .len();

        let mut buf = String::new();
        if len == 0 {
            buf.push_str(LOG_HEADER);
            buf.push('\n');
        } else if !ends_with_newline(&mut file).map_err(|e| AppError::log_unavailable(&self.path, e))? {
            // Manually edited file without a trailing newline
            buf.push('\n');
        }
        buf.push_str(&encode_record(record));
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .map_err(|e| AppError::log_unavailable(&self.path, e))?;
        log::debug!("Appended session to {}", self.path.display());
        Ok(())
    }

    fn read_lines(&self) -> Result<Vec<String>, AppError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Log {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::log_unavailable(&self.path, e)),
        };
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
