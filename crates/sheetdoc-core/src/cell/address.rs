//! Cell address type

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A zero-based cell position, written `A1`-style in files.
///
/// `$` markers are accepted while parsing and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an `A1`-style reference
    ///
    /// ```
    /// use sheetdoc_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("$B$2").unwrap(), CellAddress::new(1, 1));
    /// assert!(CellAddress::parse("B0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = |why: &str| Error::InvalidAddress(format!("{why} in '{text}'"));

        let rest = text.strip_prefix('$').unwrap_or(text);
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (letters, digits) = rest.split_at(split);
        let digits = digits.strip_prefix('$').unwrap_or(digits);

        if letters.is_empty() {
            return Err(invalid("no column letters"));
        }
        let col = letters.bytes().try_fold(0u32, |acc, b| {
            let acc = acc * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
            (acc <= u32::from(MAX_COLS)).then_some(acc)
        });
        let col = col.ok_or_else(|| invalid("column out of range"))?;

        let row: u32 = digits.parse().map_err(|_| invalid("no row number"))?;
        if row == 0 {
            return Err(invalid("row 0"));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row - 1, MAX_ROWS - 1));
        }

        Ok(Self::new(row - 1, (col - 1) as u16))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = u32::from(self.col) + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        let letters = String::from_utf8_lossy(&letters);
        write!(f, "{}{}", letters, self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
