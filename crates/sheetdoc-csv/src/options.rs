//! CSV options

/// How CSV text is split and typed
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Byte separating fields (`,`)
    pub delimiter: u8,
    /// Byte enclosing quoted fields (`"`)
    pub quote: u8,
    /// Store numeric-looking fields as numbers; otherwise every field is text
    pub auto_detect_types: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            auto_detect_types: true,
        }
    }
}
