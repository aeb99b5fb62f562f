//! Workbook type

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

const FORBIDDEN_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// An ordered set of uniquely named worksheets and the settings needed to
/// interpret their cells
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create a workbook holding one empty sheet, "Sheet1"
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            settings: WorkbookSettings::default(),
        }
    }

    /// Create a workbook with no sheets
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by position
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by position for editing
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Look a worksheet up by its exact name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets().map(Worksheet::name).collect()
    }

    /// Append a worksheet, returning its position.
    ///
    /// Names must be 1 to 31 characters, free of `: \ / ? * [ ]`, and unique
    /// ignoring case.
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        let name = worksheet.name();
        let problem = if name.is_empty() {
            Some("name is empty".to_string())
        } else if name.chars().count() > MAX_SHEET_NAME_LEN {
            Some(format!("'{name}' is longer than {MAX_SHEET_NAME_LEN} characters"))
        } else {
            name.chars()
                .find(|c| FORBIDDEN_NAME_CHARS.contains(c))
                .map(|c| format!("'{name}' contains '{c}'"))
        };
        if let Some(problem) = problem {
            return Err(Error::InvalidSheetName(problem));
        }
        let folded = name.to_lowercase();
        if self.worksheets.iter().any(|ws| ws.name().to_lowercase() == folded) {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }

        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, Default)]
pub struct WorkbookSettings {
    /// Serial dates count from 1904-01-01 instead of 1899-12-31
    pub date_1904: bool,
}
