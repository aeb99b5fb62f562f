//! XLSX reader

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use sheetdoc_core::{CellAddress, CellError, CellValue, SharedString, Workbook, Worksheet};

const CONTENT_TYPES: &str = "[Content_Types].xml";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";

/// Undo the `_xHHHH_` escapes Excel writes for control characters
/// (`_x000d_` is CR, `_x005f_` a literal underscore). Malformed sequences are
/// kept as written.
fn decode_excel_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 2..];
        let decoded = tail
            .get(..5)
            .filter(|t| t.ends_with('_') && t[..4].bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|t| u32::from_str_radix(&t[..4], 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &tail[5..];
            }
            None => {
                out.push_str("_x");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn attr_string(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(Cow::into_owned))
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Open an XML part of the package, `None` when the archive lacks it
fn open_part<'a, R: Read + Seek>(
    archive: &'a mut ZipArchive<R>,
    name: &str,
) -> Option<Reader<BufReader<impl Read + 'a>>> {
    let entry = archive.by_name(name).ok()?;
    let mut xml = Reader::from_reader(BufReader::new(entry));
    xml.trim_text(true);
    Some(xml)
}

fn require_part<'a, R: Read + Seek>(
    archive: &'a mut ZipArchive<R>,
    name: &str,
) -> XlsxResult<Reader<BufReader<impl Read + 'a>>> {
    open_part(archive, name).ok_or_else(|| XlsxError::MissingPart(name.to_string()))
}

/// `<sheet>` entry of `xl/workbook.xml`
struct SheetEntry {
    name: String,
    r_id: String,
}

/// What `xl/workbook.xml` says about the workbook
struct WorkbookPart {
    sheets: Vec<SheetEntry>,
    date_1904: bool,
}

/// Cell being assembled while its element is open
#[derive(Default)]
struct PendingCell {
    address: Option<CellAddress>,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
}

/// Where the next `<c>` lands when it carries no `r` attribute
#[derive(Default)]
struct Position {
    row: u32,
    next_col: u16,
    seen_row: bool,
}

impl Position {
    fn enter_row(&mut self, e: &BytesStart) {
        let explicit = attr_string(e, b"r")
            .and_then(|s| s.parse::<u32>().ok())
            .map(|r| r.saturating_sub(1));

        self.row = match explicit {
            Some(r) => r,
            None if self.seen_row => self.row.saturating_add(1),
            None => 0,
        };
        self.seen_row = true;
        self.next_col = 0;
    }

    fn start_cell(&mut self, e: &BytesStart) -> XlsxResult<PendingCell> {
        let address = match attr_string(e, b"r") {
            Some(text) => CellAddress::parse(&text).map_err(|err| {
                XlsxError::Parse(format!("bad cell reference '{}': {}", text, err))
            })?,
            None => CellAddress::new(self.row, self.next_col),
        };
        self.next_col = address.col.saturating_add(1);

        Ok(PendingCell {
            address: Some(address),
            cell_type: attr_string(e, b"t"),
            ..PendingCell::default()
        })
    }
}

/// Which text-bearing element of a `<c>` is open
#[derive(Clone, Copy, PartialEq, Eq)]
enum CellText {
    None,
    Value,
    Formula,
    Inline,
}

/// Reads `.xlsx` and `.xlsm` packages into a [`Workbook`]
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from disk
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        log::debug!("opening xlsx workbook {}", path.display());
        Self::read(File::open(path)?)
    }

    /// Read a workbook from any seekable byte source
    pub fn read<R: Read + Seek>(source: R) -> XlsxResult<Workbook> {
        let mut archive = ZipArchive::new(source)?;
        if archive.by_name(CONTENT_TYPES).is_err() {
            return Err(XlsxError::InvalidFormat(format!("no {} part", CONTENT_TYPES)));
        }

        let shared_strings = Self::shared_strings(&mut archive)?;
        let part = Self::workbook_part(&mut archive)?;
        let targets = Self::worksheet_targets(&mut archive)?;

        let mut workbook = Workbook::empty();
        workbook.settings_mut().date_1904 = part.date_1904;

        for entry in part.sheets {
            let Some(path) = targets.get(&entry.r_id) else {
                log::warn!(
                    "sheet '{}' has no worksheet relationship ({}), skipping",
                    entry.name,
                    entry.r_id
                );
                continue;
            };

            let mut worksheet = Worksheet::new(entry.name.as_str());
            Self::fill_worksheet(&mut archive, path, &mut worksheet, &shared_strings)?;
            log::debug!(
                "read sheet '{}' from {} ({} cells)",
                entry.name,
                path,
                worksheet.cells().cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        Ok(workbook)
    }

    /// The shared-string table; a package without one is valid
    fn shared_strings<R: Read + Seek>(archive: &mut ZipArchive<R>) -> XlsxResult<Vec<SharedString>> {
        let mut table = Vec::new();
        let Some(mut xml) = open_part(archive, SHARED_STRINGS) else {
            return Ok(table);
        };

        let mut buf = Vec::new();
        let mut text = String::new();
        let mut in_item = false;
        let mut in_text = false;
        // Phonetic runs repeat the reading of the text; they are not content
        let mut in_phonetic = false;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => {
                        in_item = true;
                        text.clear();
                    }
                    b"rPh" if in_item => in_phonetic = true,
                    b"t" if in_item && !in_phonetic => in_text = true,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"si" => {
                    table.push(SharedString::new(""));
                }
                Event::End(e) => match e.name().as_ref() {
                    b"si" => {
                        table.push(SharedString::new(decode_excel_escapes(&text)));
                        in_item = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_text = false,
                    _ => {}
                },
                Event::Text(e) if in_text => text.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        log::trace!("{} shared strings", table.len());
        Ok(table)
    }

    /// Sheet names with their relationship ids, and the date system
    fn workbook_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> XlsxResult<WorkbookPart> {
        let mut xml = require_part(archive, WORKBOOK)?;
        let mut buf = Vec::new();
        let mut part = WorkbookPart {
            sheets: Vec::new(),
            date_1904: false,
        };

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => match e.name().as_ref() {
                    b"sheet" => {
                        if let (Some(name), Some(r_id)) =
                            (attr_string(&e, b"name"), attr_string(&e, b"id"))
                        {
                            part.sheets.push(SheetEntry { name, r_id });
                        }
                    }
                    b"workbookPr" => {
                        part.date_1904 = attr_string(&e, b"date1904").is_some_and(|v| is_truthy(&v));
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(part)
    }

    /// Map worksheet relationship ids to their part paths
    fn worksheet_targets<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let mut xml = require_part(archive, WORKBOOK_RELS)?;
        let mut buf = Vec::new();
        let mut targets = HashMap::new();

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                    let is_worksheet = attr_string(&e, b"Type")
                        .is_some_and(|kind| kind.ends_with("/worksheet"));
                    if let (true, Some(id), Some(target)) =
                        (is_worksheet, attr_string(&e, b"Id"), attr_string(&e, b"Target"))
                    {
                        // Relative targets hang off xl/
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("xl/{}", target),
                        };
                        targets.insert(id, path);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(targets)
    }

    fn fill_worksheet<R: Read + Seek>(
        archive: &mut ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[SharedString],
    ) -> XlsxResult<()> {
        let mut xml = require_part(archive, path)?;
        let mut buf = Vec::new();
        let mut cursor = Position::default();
        let mut cell = PendingCell::default();
        let mut in_cell = false;
        let mut in_inline = false;
        let mut open = CellText::None;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"row" => cursor.enter_row(&e),
                    b"c" => {
                        in_cell = true;
                        cell = cursor.start_cell(&e)?;
                    }
                    b"v" if in_cell => open = CellText::Value,
                    b"f" if in_cell => {
                        open = CellText::Formula;
                        cell.formula.get_or_insert_with(String::new);
                    }
                    b"is" if in_cell => in_inline = true,
                    b"t" if in_inline => open = CellText::Inline,
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"row" => cursor.enter_row(&e),
                    // A value-less cell only moves the cursor
                    b"c" => {
                        cursor.start_cell(&e)?;
                    }
                    // Shared formula reference: the cached <v> still carries the value
                    b"f" if in_cell => {
                        cell.formula.get_or_insert_with(String::new);
                    }
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"c" => {
                        let finished = std::mem::take(&mut cell);
                        if let Some(addr) = finished.address {
                            let value = Self::cell_value(finished, shared_strings)?;
                            worksheet.set_cell_value_at(addr.row, addr.col, value)?;
                        }
                        in_cell = false;
                    }
                    b"is" => in_inline = false,
                    b"v" | b"f" | b"t" => open = CellText::None,
                    _ => {}
                },
                Event::Text(e) if open != CellText::None => {
                    let text = e.unescape()?;
                    match open {
                        CellText::Value => cell.value = Some(text.into_owned()),
                        CellText::Formula => cell.formula = Some(text.into_owned()),
                        CellText::Inline => {
                            cell.value.get_or_insert_with(String::new).push_str(&text);
                            cell.cell_type = Some("inlineStr".to_string());
                        }
                        CellText::None => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Turn the raw parts of a `<c>` element into a cell value
    fn cell_value(cell: PendingCell, shared_strings: &[SharedString]) -> XlsxResult<CellValue> {
        let plain = match cell.value.as_deref() {
            Some(raw) => Self::decode_value(cell.cell_type.as_deref(), raw, shared_strings)?,
            None => CellValue::Empty,
        };

        Ok(match cell.formula {
            Some(f) => {
                let text = if f.starts_with('=') { f } else { format!("={}", f) };
                let cached = (!plain.is_empty()).then_some(plain);
                CellValue::formula(text, cached)
            }
            None => plain,
        })
    }

    fn decode_value(
        cell_type: Option<&str>,
        raw: &str,
        shared_strings: &[SharedString],
    ) -> XlsxResult<CellValue> {
        Ok(match cell_type {
            Some("s") => {
                let index: usize = raw
                    .trim()
                    .parse()
                    .map_err(|_| XlsxError::Parse(format!("shared string index '{}'", raw)))?;
                let text = shared_strings.get(index).ok_or_else(|| {
                    XlsxError::Parse(format!(
                        "shared string {} of {} does not exist",
                        index,
                        shared_strings.len()
                    ))
                })?;
                CellValue::String(text.clone())
            }
            Some("b") => CellValue::Boolean(is_truthy(raw)),
            Some("e") => CellError::parse(raw)
                .map_or_else(|| CellValue::string(raw), CellValue::Error),
            Some("inlineStr") | Some("str") => CellValue::string(decode_excel_escapes(raw)),
            None | Some("n") => raw
                .parse::<f64>()
                .map_or_else(|_| CellValue::string(raw), CellValue::Number),
            // ISO 8601 date cells ("d") and unknown types keep their text
            Some(_) => CellValue::string(raw),
        })
    }
}
