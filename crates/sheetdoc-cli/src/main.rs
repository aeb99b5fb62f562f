//! sheetdoc CLI - turn spreadsheet sheets into JSON documents

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetdoc::{
    local_timestamp, open_workbook, Cell, CellHook, FieldDescriptor, HookError, ReadOptions,
    SheetReader, Value, Workbook,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetdoc")]
#[command(
    author,
    version,
    about = "Read spreadsheet sheets with a typed header row into JSON documents"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a sheet and print its documents as a JSON array
    Read {
        /// Input workbook (xlsx, xlsm, csv, or a directory of csv files)
        input: PathBuf,

        /// Sheet name
        #[arg(short, long)]
        sheet: String,

        /// Header row (0-based)
        #[arg(long, default_value_t = 1)]
        header_row: u32,

        /// Rows to skip between the header and the data
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Resolve `file` fields against this directory
        #[arg(long)]
        file_base: Option<PathBuf>,

        /// How `time` fields are written
        #[arg(long, value_enum, default_value_t = TimeFormat::Rfc3339)]
        time_format: TimeFormat,
    },

    /// Print the fields declared by a sheet's header row as JSON
    Fields {
        /// Input workbook
        input: PathBuf,

        /// Sheet name
        #[arg(short, long)]
        sheet: String,

        /// Header row (0-based)
        #[arg(long, default_value_t = 1)]
        header_row: u32,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TimeFormat {
    /// RFC 3339 with the local offset
    Rfc3339,
    /// Seconds since the Unix epoch
    Unix,
    /// Local wall-clock time, `YYYY-mm-dd HH:MM:SS`
    Naive,
}

/// Writes `time` cells as Unix seconds or naive local strings
struct TimeHook(TimeFormat);

impl CellHook for TimeHook {
    fn convert(&self, _field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value, HookError> {
        let stamp = local_timestamp(cell)
            .ok_or_else(|| format!("'{}' is not a date-time", cell.text()))?;
        Ok(match self.0 {
            TimeFormat::Rfc3339 => Value::Timestamp(stamp),
            TimeFormat::Unix => Value::Integer(stamp.timestamp()),
            TimeFormat::Naive => {
                Value::String(stamp.naive_local().format("%Y-%m-%d %H:%M:%S").to_string())
            }
        })
    }
}

/// Joins `file` cells onto a base directory
struct FileHook(PathBuf);

impl CellHook for FileHook {
    fn convert(&self, _field: &FieldDescriptor, cell: &Cell<'_>) -> Result<Value, HookError> {
        Ok(Value::String(self.0.join(cell.text()).display().to_string()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Read {
            input,
            sheet,
            header_row,
            skip,
            pretty,
            output,
            file_base,
            time_format,
        } => {
            let options = ReadOptions { header_row, skip };
            read_sheet(
                &input,
                &sheet,
                &options,
                pretty,
                output.as_deref(),
                file_base,
                time_format,
            )
        }
        Commands::Fields {
            input,
            sheet,
            header_row,
        } => show_fields(&input, &sheet, header_row),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open(input: &Path) -> Result<Workbook> {
    open_workbook(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn reader(
    workbook: &Workbook,
    file_base: Option<PathBuf>,
    time_format: TimeFormat,
) -> SheetReader<'_> {
    let mut reader = SheetReader::new(workbook);
    if let Some(base) = file_base {
        reader = reader.with_file_hook(FileHook(base));
    }
    if time_format != TimeFormat::Rfc3339 {
        reader = reader.with_time_hook(TimeHook(time_format));
    }
    reader
}

fn read_sheet(
    input: &Path,
    sheet: &str,
    options: &ReadOptions,
    pretty: bool,
    output: Option<&Path>,
    file_base: Option<PathBuf>,
    time_format: TimeFormat,
) -> Result<()> {
    let workbook = open(input)?;
    let documents = reader(&workbook, file_base, time_format)
        .read(sheet, options)
        .with_context(|| format!("Failed to read sheet '{}'", sheet))?;

    tracing::info!(sheet, documents = documents.len(), "sheet read");
    write_json(&documents, pretty, output)
}

fn show_fields(input: &Path, sheet: &str, header_row: u32) -> Result<()> {
    let workbook = open(input)?;
    let schema = SheetReader::new(&workbook)
        .parse_header(sheet, header_row)
        .with_context(|| format!("Failed to parse the header of '{}'", sheet))?;

    write_json(&schema, true, None)
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!("{}\t{}", i, sheet.name());
    }

    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(
    value: &T,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    json.push(b'\n');

    if let Some(output_path) = output {
        std::fs::write(output_path, &json)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        io::stdout()
            .write_all(&json)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
