use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::{ItemsError, Result};
use crate::notice::Notice;
use crate::table::{ColumnLabels, ItemTable};

/// Replace the file at `path` with the CSV rendering of `table`.
///
/// The rows go to a temporary file next to the target which is then renamed over
/// it, so the old contents stay intact if anything fails before the rename.
pub fn write_items(table: &ItemTable, path: impl AsRef<Path>, labels: &ColumnLabels) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(|e| ItemsError::write(path, e))?;
    let mut writer = BufWriter::new(temp);
    table
        .write_csv(labels, &mut writer)
        .map_err(|e| ItemsError::write(path, io::Error::from(e)))?;
    writer.flush().map_err(|e| ItemsError::write(path, e))?;

    let temp = writer
        .into_inner()
        .map_err(|e| ItemsError::write(path, e.into_error()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ItemsError::write(path, e))?;
    temp.persist(path)
        .map_err(|e| ItemsError::write(path, e.error))?;

    log::debug!("saved {} items to {}", table.len(), path.display());
    Ok(())
}

/// Save the table and report the outcome to the user.
pub fn save_items(table: &ItemTable, path: impl AsRef<Path>, labels: &ColumnLabels) -> Notice {
    match write_items(table, path, labels) {
        Ok(()) => Notice::success("Data saved successfully!"),
        Err(e) => Notice::from(e),
    }
}
