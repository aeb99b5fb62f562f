//! Cell to value conversion for the scalar field types

use chrono::{DateTime, FixedOffset, Local, TimeZone};

use crate::cell::Cell;
use crate::document::Value;
use crate::error::{Error, Result};
use crate::field::FieldDescriptor;
use crate::hooks::{CellHook, Hooks};

fn invalid(field: &FieldDescriptor, cell: &Cell<'_>, expected: &'static str) -> Error {
    Error::InvalidValue {
        sheet: cell.sheet().to_string(),
        key: field.key.clone(),
        row: cell.row(),
        col: cell.col(),
        expected,
        text: cell.text(),
    }
}

fn run_hook(hook: &dyn CellHook, field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value> {
    hook.convert(field, cell).map_err(|source| Error::Hook {
        sheet: cell.sheet().to_string(),
        key: field.key.clone(),
        row: cell.row(),
        col: cell.col(),
        source,
    })
}

pub(crate) fn integer(field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value> {
    cell.as_i64()
        .map(Value::Integer)
        .ok_or_else(|| invalid(field, cell, "an int64"))
}

pub(crate) fn float(field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value> {
    cell.as_f64()
        .map(Value::Float)
        .ok_or_else(|| invalid(field, cell, "a float64"))
}

pub(crate) fn string(cell: &Cell<'_>) -> Value {
    Value::String(cell.text())
}

pub(crate) fn file(field: &FieldDescriptor, cell: &Cell<'_>, hooks: &Hooks) -> Result<Value> {
    match &hooks.file {
        Some(hook) => run_hook(hook.as_ref(), field, cell),
        None => Ok(string(cell)),
    }
}

pub(crate) fn time(field: &FieldDescriptor, cell: &Cell<'_>, hooks: &Hooks) -> Result<Value> {
    if let Some(hook) = &hooks.time {
        return run_hook(hook.as_ref(), field, cell);
    }
    local_timestamp(cell)
        .map(Value::Timestamp)
        .ok_or_else(|| invalid(field, cell, "a date-time"))
}

/// Decode the cell's wall-clock date-time and pin it to the host time zone.
///
/// Wall-clock times skipped by a daylight-saving jump do not decode.
pub fn local_timestamp(cell: &Cell<'_>) -> Option<DateTime<FixedOffset>> {
    let naive = cell.as_datetime()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(DateTime::<FixedOffset>::from)
}
