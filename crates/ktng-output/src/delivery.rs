//! Saving the encoded export to disk.

use crate::error::{OutputError, Result};
use ktng_data::{ExportRequest, StatementKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// File name for an export: `ktng_financials_CFS_CIS_{start}_{end}.csv`.
pub fn export_filename(request: &ExportRequest) -> String {
    let codes: Vec<_> = StatementKind::all().iter().map(StatementKind::code).collect();
    format!(
        "ktng_financials_{}_{}_{}.csv",
        codes.join("_"),
        request.start,
        request.end
    )
}

/// Saves exports into a directory.
///
/// The text is staged in a temporary file next to the destination and then
/// renamed over it. The staging handle is dropped before [`deliver`] returns,
/// and an unpersisted staging file is removed with it.
///
/// [`deliver`]: FileDelivery::deliver
#[derive(Debug, Clone)]
pub struct FileDelivery {
    output_dir: PathBuf,
}

impl FileDelivery {
    /// Create a delivery target for `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory exports are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save `contents` under the export name for `request`.
    ///
    /// An existing file with the same name is replaced. Returns the path of the
    /// saved file.
    pub fn deliver(&self, contents: &str, request: &ExportRequest) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let target = self.output_dir.join(export_filename(request));

        let mut staged = NamedTempFile::new_in(&self.output_dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.flush()?;
        staged
            .persist(&target)
            .map_err(|e| OutputError::Io(e.error))?;

        info!(path = %target.display(), bytes = contents.len(), "export saved");
        Ok(target)
    }
}
