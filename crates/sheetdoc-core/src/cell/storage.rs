//! Sparse cell grid

use std::collections::BTreeMap;

use super::CellValue;

/// Populated cells of one sheet, keyed row first.
///
/// Blank cells are never stored. Both levels are ordered, so a row walks
/// left to right and the grid walks top to bottom.
#[derive(Debug, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row)?.get(&col)
    }

    /// Store a value; [`CellValue::Empty`] clears the position instead
    pub fn set(&mut self, row: u32, col: u16, value: CellValue) {
        if !value.is_empty() {
            self.rows.entry(row).or_default().insert(col, value);
            return;
        }
        if let Some(cols) = self.rows.get_mut(&row) {
            cols.remove(&col);
            if cols.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last populated row and the rightmost populated column of any row
    pub fn extent(&self) -> Option<(u32, u16)> {
        let (&last_row, _) = self.rows.last_key_value()?;
        let last_col = self
            .rows
            .values()
            .filter_map(|cols| cols.last_key_value().map(|(&col, _)| col))
            .max()?;
        Some((last_row, last_col))
    }

    /// Populated cells of `row`, left to right
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.rows
            .get(&row)
            .into_iter()
            .flatten()
            .map(|(&col, value)| (col, value))
    }
}
