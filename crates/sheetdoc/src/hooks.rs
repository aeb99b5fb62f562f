//! Caller-supplied conversions for `time` and `file` fields

use std::fmt;

use crate::cell::Cell;
use crate::document::Value;
use crate::field::FieldDescriptor;

/// Error returned by a [`CellHook`]
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Converts a cell into a value in place of the built-in conversion.
///
/// Implemented for closures:
///
/// ```
/// use sheetdoc::{Cell, FieldDescriptor, HookError, SheetReader, Value};
/// use sheetdoc::Workbook;
///
/// let workbook = Workbook::new();
/// let reader = SheetReader::new(&workbook).with_file_hook(
///     |_: &FieldDescriptor, cell: &Cell<'_>| -> Result<Value, HookError> {
///         Ok(Value::String(format!("assets/{}", cell.text())))
///     },
/// );
/// # let _ = reader;
/// ```
pub trait CellHook: Send + Sync {
    /// Convert one non-blank cell of `field`
    fn convert(&self, field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value, HookError>;
}

impl<F> CellHook for F
where
    F: Fn(&FieldDescriptor, &Cell<'_>) -> Result<Value, HookError> + Send + Sync,
{
    fn convert(&self, field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value, HookError> {
        self(field, cell)
    }
}

/// The hooks installed on a reader
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) time: Option<Box<dyn CellHook>>,
    pub(crate) file: Option<Box<dyn CellHook>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("time", &self.time.is_some())
            .field("file", &self.file.is_some())
            .finish()
    }
}
