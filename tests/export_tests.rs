use cashbook_core::domain::{Category, Direction, EntryId, LedgerEntry};
use cashbook_core::errors::LedgerError;
use cashbook_core::export::{export_month_to_path, write_month_csv};
use cashbook_core::ledger::{build_entry, month_view, EntryIdentity, EntryRequest, LoanTerms};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn entry_on(
    id: i64,
    day: u32,
    direction: Direction,
    category: Category,
    amount: f64,
    description: Option<&str>,
) -> LedgerEntry {
    let request = EntryRequest {
        direction,
        category,
        amount,
        description: description.map(str::to_string),
        loan_terms: match (category, direction) {
            (Category::Loan, Direction::Income) => Some(LoanTerms {
                total_to_pay: amount * 1.2,
                installments: 6,
            }),
            _ => None,
        },
    };
    build_entry(
        &[],
        &request,
        EntryIdentity {
            id: EntryId(id),
            date: Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap(),
        },
    )
    .expect("build entry")
}

#[test]
fn csv_emits_one_row_per_posting_with_repeated_entry_fields() {
    let entries = vec![
        entry_on(1, 5, Direction::Income, Category::Normal, 1000.0, Some("Salary")),
        entry_on(2, 9, Direction::Income, Category::Debt, 500.0, None),
    ];
    let view = month_view(&entries, 2026, 3);

    let mut buffer = Vec::new();
    write_month_csv(&mut buffer, &view).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Date,Description,Account,Debit,Credit");
    // Two postings for the salary entry, one for the debt entry.
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("Salary"));
    assert!(lines[1].contains("Caja"));
    assert!(lines[1].contains("1000.00"));
    assert!(lines[2].contains("Salary"));
    assert!(lines[2].contains("Ingresos"));
    assert!(lines[3].contains("Deudas"));
    assert!(lines[3].contains("500.00"));

    // Date repeats on every row of the same entry.
    let salary_date = lines[1].split(',').next().expect("date column");
    assert!(lines[2].starts_with(salary_date));
}

#[test]
fn empty_month_is_a_distinct_error_and_produces_no_file() {
    let entries = vec![entry_on(1, 5, Direction::Income, Category::Normal, 100.0, None)];
    let view = month_view(&entries, 2026, 7);

    let mut buffer = Vec::new();
    let err = write_month_csv(&mut buffer, &view).expect_err("empty month must fail");
    assert!(matches!(
        err,
        LedgerError::EmptyPeriod {
            year: 2026,
            month: 7
        }
    ));
    assert!(buffer.is_empty());

    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("report.csv");
    let err = export_month_to_path(&path, &view).expect_err("empty month must fail");
    assert!(matches!(err, LedgerError::EmptyPeriod { .. }));
    assert!(!path.exists(), "no file should be produced for an empty month");
}

#[test]
fn loan_income_rows_carry_the_repayment_total() {
    let entries = vec![entry_on(1, 12, Direction::Income, Category::Loan, 1000.0, Some("Loan"))];
    let view = month_view(&entries, 2026, 3);

    let mut buffer = Vec::new();
    write_month_csv(&mut buffer, &view).expect("write csv");
    let text = String::from_utf8(buffer).expect("utf-8 csv");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Caja"));
    assert!(lines[1].contains("1000.00"));
    assert!(lines[2].contains("Prestamos"));
    assert!(lines[2].contains("1200.00"));
}
