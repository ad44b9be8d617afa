//! CSV loader for evaluating many bills at once.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter.
//! Header names are case-sensitive.
//!
//! | Column      | Required | Notes                                            |
//! |-------------|----------|--------------------------------------------------|
//! | `bill`      | yes      | Amount billed, e.g. `1,200.00`                   |
//! | `received`  | yes      | Amount received                                  |
//! | `freight`   | no       | Leave cell empty (or omit the column) for zero   |
//! | `bill_date` | no       | `YYYY-MM-DD` or ISO date-time                    |
//!
//! Cells are kept as text and validated per row, so one bad row is reported
//! in the output rather than aborting the batch.
//!
//! ### Example
//!
//! ```csv
//! bill,freight,received,bill_date
//! 100,,80,2025-06-05
//! 1500,120,1620,
//! ```

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use cut_core::{CutCalculator, CutError, CutInput, CutResult};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::utils::{ParseDateError, parse_optional_bill_date};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

/// One bill as read from the CSV, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BillRow {
    pub bill: String,
    #[serde(default)]
    pub freight: String,
    pub received: String,
    #[serde(default)]
    pub bill_date: String,
}

// ---------------------------------------------------------------------------
// Public error types
// ---------------------------------------------------------------------------

/// Errors that abort loading the whole file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid (missing required column, ragged
    /// rows, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// Why a single row could not be evaluated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RowError {
    #[error(transparent)]
    Date(#[from] ParseDateError),

    #[error(transparent)]
    Cut(#[from] CutError),
}

/// The evaluation of one CSV row.
#[derive(Debug)]
pub struct BatchEntry {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub outcome: Result<CutResult, RowError>,
}

impl fmt::Display for BatchEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Row {}:", self.row)?;
        match &self.outcome {
            Ok(result) => write!(f, "{result}"),
            Err(error) => write!(f, "{error}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text and return its rows in file order.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the CSV is structurally invalid or a required
/// column is missing.
pub fn load_from_str(input: &str) -> Result<Vec<BillRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let rows = reader
        .deserialize::<BillRow>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), "parsed bill rows");
    Ok(rows)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<BillRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

/// Validate and evaluate one row.
///
/// Amount text is checked before the date, so a row missing an amount
/// reports that first.
fn evaluate_row(
    row: &BillRow,
    calculator: &CutCalculator,
) -> Result<CutResult, RowError> {
    let mut input = CutInput::parse(&row.bill, &row.freight, &row.received, None)?;
    input.bill_date = parse_optional_bill_date(&row.bill_date)?;
    Ok(calculator.calculate(&input)?)
}

/// Evaluate every row as of `today`, keeping per-row failures.
pub fn evaluate(
    rows: &[BillRow],
    today: NaiveDate,
) -> Vec<BatchEntry> {
    let calculator = CutCalculator::new(today);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_number = idx + 1; // 1-based for user-facing messages
            let outcome = evaluate_row(row, &calculator);
            if let Err(error) = &outcome {
                warn!(row = row_number, %error, "bill row rejected");
            }
            BatchEntry {
                row: row_number,
                outcome,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
