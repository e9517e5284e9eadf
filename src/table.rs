use serde::Serialize;
use std::io::{Read, Write};

use crate::item::{ItemRecord, Price};

/// Number of columns in the fixed item schema
pub const COLUMN_COUNT: usize = 5;

/// Header labels written to and expected from the CSV file
///
/// Columns are always in the order category, item, unit, price, notes; only the
/// labels differ between deployments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnLabels(pub [String; COLUMN_COUNT]);

impl ColumnLabels {
    pub fn english() -> Self {
        Self::from_strs(["category", "item", "unit", "price", "notes"])
    }

    pub fn chinese() -> Self {
        Self::from_strs(["类别", "物品", "单位", "价格（元）", "备注"])
    }

    fn from_strs(labels: [&str; COLUMN_COUNT]) -> Self {
        ColumnLabels(labels.map(str::to_string))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self::english()
    }
}

/// Ordered collection of item records, equivalent to the full file contents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ItemTable {
    rows: Vec<ItemRecord>,
}

impl ItemTable {
    pub fn new() -> Self {
        ItemTable { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<ItemRecord>) -> Self {
        ItemTable { rows }
    }

    pub fn rows(&self) -> &[ItemRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ItemRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, record: ItemRecord) {
        self.rows.push(record);
    }

    /// Write the header and every row as CSV.
    pub fn write_csv<W: Write>(&self, labels: &ColumnLabels, out: W) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
        writer.write_record(labels.as_slice())?;
        for record in &self.rows {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Parse CSV text with a header row followed by five-field rows
    ///
    /// Fields are read by position. The header is only checked for its width; the
    /// returned labels are what the file actually carries so callers can compare
    /// them with the configured ones.
    pub fn read_csv<R: Read>(input: R) -> Result<(Vec<String>, ItemTable), String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let header = reader.headers().map_err(|e| e.to_string())?.clone();
        if header.is_empty() {
            return Err("no columns to parse from file".to_string());
        }
        if header.len() != COLUMN_COUNT {
            return Err(format!(
                "expected {} columns in header, found {}",
                COLUMN_COUNT,
                header.len()
            ));
        }

        let mut table = ItemTable::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| e.to_string())?;
            // Line 1 is the header.
            let line = index + 2;
            if record.len() != COLUMN_COUNT {
                return Err(format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    COLUMN_COUNT,
                    record.len()
                ));
            }
            let price = record[3]
                .parse::<Price>()
                .map_err(|reason| format!("line {}: {}", line, reason))?;
            table.push(ItemRecord {
                category: record[0].to_string(),
                item: record[1].to_string(),
                unit: record[2].to_string(),
                price,
                notes: record[4].to_string(),
            });
        }

        Ok((header.iter().map(str::to_string).collect(), table))
    }
}
