use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Sheet name used for single-sheet reports.
pub const DEFAULT_SHEET: &str = "Sheet1";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Spreadsheet date/time serial, written back with a date format
    Date(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Text form of a value cell, `None` when the cell is empty
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) | Cell::Date(f) => Some(f.to_string()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Empty)
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => Cell::Float(dt.as_f64()),
            Data::DateTime(dt) => Cell::Date(dt.as_f64()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

/// One named sheet: a list of rows, the first usually being the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Header row followed by one row per record
    pub fn from_rows<R: ReportRow>(name: &str, records: &[R]) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(R::HEADERS.iter().map(|h| Cell::from(*h)).collect());
        rows.extend(records.iter().map(ReportRow::cells));
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

/// A fixed-shape report record with its column titles.
pub trait ReportRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// Write sheets to an xlsx file, first row of each sheet in bold.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    let date_time = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("Invalid sheet name: {}", sheet.name))?;

        for (r, row) in sheet.rows.iter().enumerate() {
            let r = u32::try_from(r).context("Too many rows for one sheet")?;
            for (c, cell) in row.iter().enumerate() {
                let c = u16::try_from(c).context("Too many columns for one sheet")?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) if r == 0 => {
                        worksheet.write_string_with_format(r, c, s, &bold)?;
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, s)?;
                    }
                    Cell::Int(i) => {
                        worksheet.write_number(r, c, *i as f64)?;
                    }
                    Cell::Float(f) => {
                        worksheet.write_number(r, c, *f)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    Cell::Date(serial) => {
                        let format = if serial.fract() == 0.0 { &date } else { &date_time };
                        worksheet.write_number_with_format(r, c, *serial, format)?;
                    }
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write spreadsheet: {}", path.display()))?;
    Ok(())
}

/// Write records as a single-sheet report.
pub fn write_rows<R: ReportRow>(path: &Path, records: &[R]) -> anyhow::Result<()> {
    write_workbook(path, &[Sheet::from_rows(DEFAULT_SHEET, records)])
}

/// Read every sheet of a spreadsheet, in workbook order.
///
/// Rows are anchored at column A: leading empty columns are kept as
/// `Cell::Empty` so positions match what a user sees.
pub fn read_workbook(path: &Path) -> anyhow::Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Failed to read sheet '{}' in {}", name, path.display()))?;

        let offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);
        let rows = range
            .rows()
            .map(|row| {
                std::iter::repeat(Cell::Empty)
                    .take(offset)
                    .chain(row.iter().map(Cell::from))
                    .collect()
            })
            .collect();

        sheets.push(Sheet { name, rows });
    }
    Ok(sheets)
}
