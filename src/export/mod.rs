//! CSV month report: one row per posting, date and description repeated for
//! every posting belonging to the same entry.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::errors::LedgerError;
use crate::ledger::period::MonthView;
use crate::storage::StorageError;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ReportRow<'a> {
    date: String,
    description: &'a str,
    account: &'a str,
    debit: String,
    credit: String,
}

/// Writes the month's postings as CSV. An empty month is reported as an
/// error and produces no rows.
pub fn write_month_csv<W: Write>(writer: W, view: &MonthView<'_>) -> Result<(), LedgerError> {
    if view.is_empty() {
        return Err(LedgerError::EmptyPeriod {
            year: view.year,
            month: view.month,
        });
    }
    let mut out = csv::WriterBuilder::new().from_writer(writer);
    for entry in &view.entries {
        let date = entry.date.to_rfc3339();
        let description = entry.description.as_deref().unwrap_or("");
        for posting in &entry.postings {
            out.serialize(ReportRow {
                date: date.clone(),
                description,
                account: posting.account.as_str(),
                debit: format!("{:.2}", posting.debit),
                credit: format!("{:.2}", posting.credit),
            })?;
        }
    }
    out.flush().map_err(StorageError::from)?;
    Ok(())
}

/// Writes the month report to `path`. The empty check runs before the file
/// is created so no empty report is left on disk.
pub fn export_month_to_path(path: &Path, view: &MonthView<'_>) -> Result<(), LedgerError> {
    if view.is_empty() {
        return Err(LedgerError::EmptyPeriod {
            year: view.year,
            month: view.month,
        });
    }
    let file = File::create(path).map_err(StorageError::from)?;
    write_month_csv(file, view)
}

/// Conventional file name for a month's report.
pub fn month_file_name(year: i32, month: u32) -> String {
    format!("book_{:02}_{}.csv", month, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(month_file_name(2026, 3), "book_03_2026.csv");
        assert_eq!(month_file_name(2025, 12), "book_12_2025.csv");
    }
}
