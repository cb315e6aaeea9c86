use crate::{
    logger::Logger,
    natural_sort::sort_natural,
    sheet::{self, Cell, Sheet},
};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub const MERGED_REPORT_FILE: &str = "final_vp_report.xlsx";

#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub path: PathBuf,
    pub merged_files: usize,
    pub skipped_files: Vec<String>,
    pub sheets: Vec<Sheet>,
}

/// Rows accumulated for one sheet name: a header plus data rows.
#[derive(Debug, Default)]
struct SheetAccumulator {
    name: String,
    header: Vec<Cell>,
    data: Vec<Vec<Cell>>,
}

impl SheetAccumulator {
    fn append(&mut self, sheet: Sheet) {
        let mut rows = sheet.rows.into_iter();
        if let Some(header) = rows.next() {
            // Positional union: a later, wider header fills in new columns only
            for (i, cell) in header.into_iter().enumerate() {
                match self.header.get_mut(i) {
                    Some(existing) if existing.is_empty() => *existing = cell,
                    Some(_) => {}
                    None => self.header.push(cell),
                }
            }
        }
        self.data.extend(rows);
    }

    fn into_sheet(self) -> Sheet {
        let mut rows = Vec::with_capacity(self.data.len() + 1);
        if !self.header.is_empty() {
            rows.push(self.header);
        }
        rows.extend(self.data);

        let mut sheet = Sheet::new(&self.name);
        sheet.rows = rows;
        sheet
    }
}

/// `.xlsx` files directly in `folder`, in natural order, minus `exclude`
fn spreadsheet_files(folder: &Path, exclude: &str) -> anyhow::Result<Vec<String>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to list directory: {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in: {}", folder.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".xlsx") && name != exclude && entry.path().is_file() {
            files.push(name);
        }
    }
    sort_natural(&mut files);
    Ok(files)
}

/// Combine same-named sheets of every spreadsheet in `folder` into
/// `folder/output_file_name`.
///
/// Each sheet's first row is its header; data rows are appended in file
/// order. A file that cannot be read is reported and skipped. Fails when no
/// spreadsheet could be read at all.
pub fn merge_reports(folder: &Path, output_file_name: &str, logger: &Logger) -> anyhow::Result<MergeReport> {
    let files = spreadsheet_files(folder, output_file_name)?;
    logger.debug(&format!("{} spreadsheets found in {}", files.len(), folder.display()));

    let mut accumulators: Vec<SheetAccumulator> = Vec::new();
    let mut merged_files = 0;
    let mut skipped_files = Vec::new();

    for file in files {
        let sheets = match sheet::read_workbook(&folder.join(&file)) {
            Ok(sheets) => sheets,
            Err(e) => {
                logger.merge_skipped(&file, &e);
                skipped_files.push(file);
                continue;
            }
        };

        for sheet in sheets {
            // Sheet names are case-insensitive in a workbook; the first spelling wins
            let key = sheet.name.to_lowercase();
            let index = match accumulators.iter().position(|acc| acc.name.to_lowercase() == key) {
                Some(index) => index,
                None => {
                    accumulators.push(SheetAccumulator {
                        name: sheet.name.clone(),
                        ..SheetAccumulator::default()
                    });
                    accumulators.len() - 1
                }
            };
            accumulators[index].append(sheet);
        }
        merged_files += 1;
    }

    if accumulators.is_empty() {
        anyhow::bail!("No readable spreadsheets in {}", folder.display());
    }

    let sheets: Vec<Sheet> = accumulators.into_iter().map(SheetAccumulator::into_sheet).collect();
    let path = folder.join(output_file_name);
    sheet::write_workbook(&path, &sheets)?;
    logger.merge_finished(&path, sheets.len());

    Ok(MergeReport {
        path,
        merged_files,
        skipped_files,
        sheets,
    })
}
