//! Cell value types

use std::fmt;
use std::sync::Arc;

static EMPTY: CellValue = CellValue::Empty;

/// The content of one cell as decoded from a file
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No content
    #[default]
    Empty,
    /// TRUE / FALSE
    Boolean(bool),
    /// Any number; dates are serial numbers
    Number(f64),
    /// Text
    String(SharedString),
    /// An error literal such as `#N/A`
    Error(CellError),
    /// A formula and the result its application last saved.
    /// Formulas are never evaluated here.
    Formula {
        text: String,
        cached_value: Option<Box<CellValue>>,
    },
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(SharedString::new(s.into()))
    }

    /// Create a formula value with an optional cached result
    pub fn formula<S: Into<String>>(text: S, cached_value: Option<CellValue>) -> Self {
        CellValue::Formula {
            text: text.into(),
            cached_value: cached_value.map(Box::new),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula { .. })
    }

    /// The number shown by the cell, if it shows one
    pub fn as_number(&self) -> Option<f64> {
        match self.effective_value() {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text shown by the cell, if it holds text
    pub fn as_string(&self) -> Option<&str> {
        match self.effective_value() {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The value the cell shows: a formula's cached result (empty when the
    /// file stored none), or the value itself.
    pub fn effective_value(&self) -> &CellValue {
        match self {
            CellValue::Formula {
                cached_value: Some(v),
                ..
            } => v.effective_value(),
            CellValue::Formula { .. } => &EMPTY,
            _ => self,
        }
    }
}

/// Writes the shown value: numbers in shortest form (`3`, `2.5`), booleans
/// as `TRUE`/`FALSE`, nothing for empty cells.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.effective_value() {
            CellValue::Empty | CellValue::Formula { .. } => Ok(()),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::String(s) => f.write_str(s.as_str()),
            CellValue::Error(e) => f.write_str(e.as_str()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::string(s)
    }
}

/// Error literals a cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
    GettingData,
    Spill,
    Calc,
}

const ERROR_LITERALS: [(CellError, &str); 10] = [
    (CellError::Null, "#NULL!"),
    (CellError::Div0, "#DIV/0!"),
    (CellError::Value, "#VALUE!"),
    (CellError::Ref, "#REF!"),
    (CellError::Name, "#NAME?"),
    (CellError::Num, "#NUM!"),
    (CellError::Na, "#N/A"),
    (CellError::GettingData, "#GETTING_DATA"),
    (CellError::Spill, "#SPILL!"),
    (CellError::Calc, "#CALC!"),
];

impl CellError {
    /// The literal as written in a cell
    pub fn as_str(&self) -> &'static str {
        ERROR_LITERALS
            .iter()
            .find(|(e, _)| e == self)
            .map_or("#VALUE!", |(_, literal)| literal)
    }

    /// Parse a literal, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        ERROR_LITERALS
            .iter()
            .find(|(_, literal)| literal.eq_ignore_ascii_case(s.trim()))
            .map(|(e, _)| *e)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text shared between cells; shared-string tables repeat the same text
/// across many cells and cloning only bumps a count.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
