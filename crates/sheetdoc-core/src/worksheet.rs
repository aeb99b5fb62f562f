//! Worksheet type

use crate::cell::{CellAddress, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// One named sheet: a sparse grid of cell values
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value at a zero-based position, `None` when blank
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(row, col)
    }

    /// The value at an `A1`-style address, [`CellValue::Empty`] when blank
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col).cloned().unwrap_or_default())
    }

    /// Populated cells of a row, left to right
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter_row(row)
    }

    pub fn cells(&self) -> &CellStorage {
        &self.cells
    }

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Store a value at a zero-based position inside the sheet limits
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        self.cells.set(row, col, value.into());
        Ok(())
    }

    /// Fill a row from column A onwards.
    ///
    /// ```
    /// use sheetdoc_core::Worksheet;
    ///
    /// let mut sheet = Worksheet::new("user0");
    /// sheet.set_row_values(1, ["id,int64", "name,string"]).unwrap();
    /// assert_eq!(sheet.get_value("B2").unwrap().as_string(), Some("name,string"));
    /// ```
    pub fn set_row_values<I, V>(&mut self, row: u32, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        for (col, value) in values.into_iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| Error::ColumnOutOfBounds(u16::MAX, MAX_COLS - 1))?;
            self.set_cell_value_at(row, col, value)?;
        }
        Ok(())
    }

    /// Last populated row and column, `None` for an empty sheet
    pub fn dimensions(&self) -> Option<(u32, u16)> {
        self.cells.extent()
    }
}
