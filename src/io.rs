#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsStr, path::Path};

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

use crate::{accumulate::ProgressRecord, constants::PROGRESS_HEADERS, table::Table, util::sanitize};

/// Loads a "Detailed Progress" export. Physics Classroom serves it as an
/// excel workbook; a `.csv` rendition of the same sheet is accepted too.
pub fn load_progress(path: &Path) -> Result<Vec<ProgressRecord>> {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => progress_from_csv(path),
        _ => progress_from_workbook(path),
    }
}

/// Reads progress rows from the first sheet of an excel workbook.
fn progress_from_workbook(path: &Path) -> Result<Vec<ProgressRecord>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Could not open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("{} has no sheets", path.display()))?
        .with_context(|| format!("Could not read the first sheet of {}", path.display()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .with_context(|| format!("The first sheet of {} is empty", path.display()))?;
    let headers: Vec<String> = header_row.iter().map(|cell| sanitize(&cell.to_string())).collect();

    let [task_col, student_col, section_col, completed_col] = PROGRESS_HEADERS.map(|name| {
        headers
            .iter()
            .position(|header| header == name)
            .with_context(|| format!("Progress export is missing a '{name}' column"))
    });
    let (task_col, student_col, section_col, completed_col) =
        (task_col?, student_col?, section_col?, completed_col?);

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        // +2: 1-based numbering plus the header row.
        let row_number = i + 2;
        records.push(ProgressRecord {
            task:      cell_text(row, task_col),
            student:   cell_text(row, student_col),
            section:   cell_text(row, section_col),
            completed: cell_bool(row, completed_col, row_number)?,
        });
    }

    Ok(records)
}

/// Reads progress rows from a csv rendition of the export.
fn progress_from_csv(path: &Path) -> Result<Vec<ProgressRecord>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Could not read {}", path.display()))?;

    reader
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            record.with_context(|| format!("While parsing row {} of {}", i + 2, path.display()))
        })
        .collect()
}

/// A cell as text; empty cells become the empty string.
fn cell_text(row: &[Data], col: usize) -> String {
    match row.get(col) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// A cell as a boolean. The export stores native booleans but some tools
/// rewrite them as "True"/"False" text on the way through.
fn cell_bool(row: &[Data], col: usize, row_number: usize) -> Result<bool> {
    match row.get(col) {
        Some(Data::Bool(b)) => Ok(*b),
        Some(Data::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => bail!("Row {row_number} has a non-boolean Completed value: '{other}'"),
        },
        other => bail!("Row {row_number} has a non-boolean Completed value: {other:?}"),
    }
}

/// Loads an exported Canvas gradebook. Every cell is kept as verbatim text;
/// the Points Possible sentinel is only recognizable with its leading spaces
/// intact.
pub fn load_gradebook(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let mut records = reader.records();
    let headers: Vec<String> = records
        .next()
        .with_context(|| format!("{} is empty", path.display()))?
        .with_context(|| format!("While reading the header row of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in records.enumerate() {
        let record =
            record.with_context(|| format!("While reading row {} of {}", i + 2, path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Table::new(headers, rows).with_context(|| format!("While loading {}", path.display()))
}

/// Writes a gradebook table back out as csv, in the same row/column shape it
/// was loaded in.
pub fn write_gradebook(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Could not create {}", path.display()))?;

    writer
        .write_record(table.headers())
        .context("While writing the header row")?;
    for row in table.rows() {
        writer.write_record(row).context("While writing a gradebook row")?;
    }

    writer
        .flush()
        .with_context(|| format!("While flushing {}", path.display()))
}
