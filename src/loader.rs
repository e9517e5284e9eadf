use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use crate::errors::{ItemsError, Result};
use crate::notice::Notice;
use crate::table::{ColumnLabels, ItemTable};

/// Result of loading the item table for display
///
/// `notice` is set when the file existed but could not be used; the table is then
/// empty.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: ItemTable,
    pub notice: Option<Notice>,
}

/// Read the item table from a CSV file
///
/// A missing file is not an error: it yields an empty table, the same as a freshly
/// created data file would. The header row is checked for width only; when its labels
/// differ from `labels` a warning is logged and the rows are still read by position.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `labels` - Header labels the file is expected to carry
///
/// # Returns
/// * `Result<ItemTable>` - The rows in file order, or why they could not be read
///
/// # Examples
/// ```no_run
/// use itemsheet::loader::read_items;
/// use itemsheet::table::ColumnLabels;
///
/// match read_items("items.csv", &ColumnLabels::english()) {
///     Ok(table) => println!("Loaded {} items", table.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn read_items(path: impl AsRef<Path>, labels: &ColumnLabels) -> Result<ItemTable> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} does not exist yet, starting empty", path.display());
            return Ok(ItemTable::new());
        }
        Err(e) => return Err(ItemsError::read(path, e)),
    };

    let (header, table) =
        ItemTable::read_csv(BufReader::new(file)).map_err(|reason| ItemsError::parse(path, reason))?;

    if header.as_slice() != labels.as_slice() {
        log::warn!(
            "{} has header {:?}, expected {:?}; reading columns by position",
            path.display(),
            header,
            labels.as_slice()
        );
    }
    log::debug!("loaded {} items from {}", table.len(), path.display());

    Ok(table)
}

/// Load the item table, degrading to an empty table on failure
///
/// This never fails: read and parse errors are turned into an error notice for the
/// user and an empty table is returned in their place.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `labels` - Header labels the file is expected to carry
///
/// # Returns
/// * `LoadOutcome` - The table plus an optional notice describing a failure
pub fn load_items(path: impl AsRef<Path>, labels: &ColumnLabels) -> LoadOutcome {
    match read_items(path, labels) {
        Ok(table) => LoadOutcome {
            table,
            notice: None,
        },
        Err(e) => LoadOutcome {
            table: ItemTable::new(),
            notice: Some(Notice::from(e)),
        },
    }
}
