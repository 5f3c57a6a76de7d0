//! Registry file on the local filesystem

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ads_registry_core::{CoreError, CoreResult, LineStore};
use tempfile::NamedTempFile;

/// File-backed [`LineStore`].
///
/// Writes go to a temporary file next to the target which is then renamed
/// over it, so readers never observe a half-written registry.
pub struct FileLineStore {
    path: PathBuf,
}

impl FileLineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> CoreError {
        CoreError::StorageError(format!(
            "failed to {action} {}: {e}",
            self.path.display()
        ))
    }
}

impl LineStore for FileLineStore {
    fn read_lines(&self) -> CoreResult<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error("read", e))?;
        Ok(content.lines().map(ToString::to_string).collect())
    }

    fn write_lines(&self, lines: &[String]) -> CoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.storage_error("write", e))?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            for line in lines {
                writeln!(writer, "{line}").map_err(|e| self.storage_error("write", e))?;
            }
            writer.flush().map_err(|e| self.storage_error("write", e))?;
        }

        // Keep the mode of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| self.storage_error("write", e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| self.storage_error("replace", e.error))?;
        Ok(())
    }
}
