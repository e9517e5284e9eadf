use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::item::{GridRow, NewItem};
use crate::loader::{LoadOutcome, load_items};
use crate::notice::{Level, Notice};
use crate::saving::save_items;
use crate::table::{ColumnLabels, ItemTable};

/// The edit and add flows over one data file
///
/// Holds only where the data lives. Every operation re-reads the file from disk, so
/// no rows are kept between requests.
#[derive(Clone, Debug)]
pub struct Session {
    path: PathBuf,
    labels: ColumnLabels,
}

impl Session {
    pub fn new(path: impl Into<PathBuf>, labels: ColumnLabels) -> Self {
        Session {
            path: path.into(),
            labels,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn labels(&self) -> &ColumnLabels {
        &self.labels
    }

    /// Fresh table for the editable grid.
    pub fn view(&self) -> LoadOutcome {
        load_items(&self.path, &self.labels)
    }

    /// Persist the grid's rows if they differ from what is on disk
    ///
    /// The comparison is against a fresh load and covers every field of every row
    /// in order. An identical table is not written at all.
    pub fn save_edits(&self, edited: ItemTable) -> Notice {
        if self.view().table == edited {
            return Notice::warning("No changes detected, nothing to save.");
        }
        save_items(&edited, &self.path, &self.labels)
    }

    /// Same as [`Session::save_edits`] for rows posted as text from the grid.
    pub fn save_grid(&self, rows: Vec<GridRow>) -> Notice {
        match grid_to_table(rows) {
            Ok(table) => self.save_edits(table),
            Err(e) => Notice::from(e),
        }
    }

    /// Validate the form and append it to the latest on-disk table
    ///
    /// The table is reloaded here rather than taken from the grid so that rows saved
    /// since the page was rendered are kept. If the file exists but cannot be read,
    /// nothing is written: appending to the empty stand-in would drop its rows.
    pub fn add_item(&self, form: NewItem) -> Vec<Notice> {
        let record = match form.validate() {
            Ok(record) => record,
            Err(e) => return vec![Notice::from(e)],
        };

        let LoadOutcome { mut table, notice } = self.view();
        if let Some(notice) = notice {
            return vec![
                notice,
                Notice::warning(format!(
                    "Item '{}' was not added: the data file could not be read.",
                    record.item
                )),
            ];
        }

        let mut notices = Vec::new();
        let name = record.item.clone();
        table.push(record);
        let saved = save_items(&table, &self.path, &self.labels);
        let ok = saved.level == Level::Success;
        notices.push(saved);
        if ok {
            log::info!("added item '{}' to {}", name, self.path.display());
            notices.push(Notice::success(format!(
                "Item '{}' added! Refresh the page to see it.",
                name
            )));
        }
        notices
    }
}

fn grid_to_table(rows: Vec<GridRow>) -> Result<ItemTable> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index))
        .collect::<Result<Vec<_>>>()
        .map(ItemTable::from_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemRecord, Price};
    use crate::loader::read_items;
    use crate::saving::write_items;
    use std::fs;

    fn session_in(dir: &tempfile::TempDir) -> Session {
        Session::new(dir.path().join("items.csv"), ColumnLabels::english())
    }

    fn apple() -> NewItem {
        NewItem {
            category: "Produce".into(),
            item: "Apple".into(),
            unit: "kg".into(),
            price: "3.50".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn add_to_missing_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        assert!(session.view().table.is_empty());

        let notices = session.add_item(apple());
        assert!(notices.iter().all(|n| n.level == Level::Success));
        assert_eq!(notices.last().unwrap().message, "Item 'Apple' added! Refresh the page to see it.");

        assert_eq!(
            fs::read_to_string(session.path()).unwrap(),
            "category,item,unit,price,notes\nProduce,Apple,kg,3.50,\n"
        );
        let table = session.view().table;
        assert_eq!(
            table.rows(),
            &[ItemRecord::new("Produce", "Apple", "kg", Price::from_cents(350), "")]
        );
    }

    #[test]
    fn add_without_required_fields_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);

        for form in [
            NewItem { category: String::new(), ..apple() },
            NewItem { item: String::new(), ..apple() },
        ] {
            let notices = session.add_item(form);
            assert_eq!(notices, vec![Notice::warning("Item and category are required.")]);
        }
        assert!(!session.path().exists());
    }

    #[test]
    fn add_appends_to_latest_disk_state() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let a = ItemTable::from_rows(vec![ItemRecord::new("A", "a", "", Price::ZERO, "")]);
        write_items(&a, session.path(), session.labels()).unwrap();

        let _grid = session.view().table;
        let b = ItemTable::from_rows(vec![ItemRecord::new("B", "b", "", Price::ZERO, "")]);
        write_items(&b, session.path(), session.labels()).unwrap();

        session.add_item(apple());
        let rows = session.view().table.into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "B");
        assert_eq!(rows[1].item, "Apple");
    }

    #[test]
    fn add_never_overwrites_an_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let original = "category,item,unit,price,notes\nProduce,Apple,kg,3.50,\nRefund,Coupon,,-1.00,\n";
        fs::write(session.path(), original).unwrap();

        let notices = session.add_item(NewItem { item: "Pear".into(), ..apple() });
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, Level::Error);
        assert!(notices[0].message.contains("line 3"));
        assert_eq!(
            notices[1],
            Notice::warning("Item 'Pear' was not added: the data file could not be read.")
        );
        assert_eq!(fs::read_to_string(session.path()).unwrap(), original);
    }

    #[test]
    fn whitespace_counts_as_a_value_on_add() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);

        let notices = session.add_item(NewItem { category: " ".into(), item: "Pear".into(), ..apple() });
        assert_eq!(notices.last().unwrap().level, Level::Success);
        assert_eq!(session.view().table.rows()[0].category, " ");
    }

    #[test]
    fn unchanged_grid_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        session.add_item(apple());
        // Non-canonical but equal content must survive byte for byte
        fs::write(session.path(), "category,item,unit,price,notes\nProduce,Apple,kg,3.5,\n").unwrap();
        let before = fs::read(session.path()).unwrap();

        let loaded = session.view().table;
        let notice = session.save_edits(loaded);
        assert_eq!(notice.level, Level::Warning);
        assert_eq!(fs::read(session.path()).unwrap(), before);
    }

    #[test]
    fn edit_and_delete_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        session.add_item(apple());
        session.add_item(NewItem { item: "Pear".into(), ..apple() });
        assert_eq!(session.view().table.len(), 2);

        let mut rows = session.view().table.into_rows();
        rows[0].price = Price::from_cents(400);
        rows.truncate(1);
        let notice = session.save_edits(ItemTable::from_rows(rows));
        assert_eq!(notice, Notice::success("Data saved successfully!"));

        let table = read_items(session.path(), session.labels()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].price.to_string(), "4.00");
    }

    #[test]
    fn grid_with_bad_price_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let rows = vec![GridRow {
            category: "X".into(),
            price: "-2".into(),
            ..Default::default()
        }];

        let notice = session.save_grid(rows);
        assert_eq!(notice.level, Level::Warning);
        assert!(notice.message.starts_with("Row 1:"));
        assert!(!session.path().exists());
    }

    #[test]
    fn grid_rows_may_leave_fields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let notice = session.save_grid(vec![GridRow::default()]);
        assert_eq!(notice.level, Level::Success);
        assert_eq!(session.view().table.rows(), &[ItemRecord::default()]);
    }
}
