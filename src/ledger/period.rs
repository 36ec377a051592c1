use chrono::{Datelike, Utc};

use crate::domain::entry::LedgerEntry;

/// One calendar month of the ledger, in store order (newest first).
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<&'a LedgerEntry>,
}

impl MonthView<'_> {
    /// Distinct empty signal so callers can short-circuit rendering and
    /// export.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Filters entries to the UTC calendar month, preserving their order.
pub fn month_view(entries: &[LedgerEntry], year: i32, month: u32) -> MonthView<'_> {
    let selected = entries
        .iter()
        .filter(|entry| entry.date.year() == year && entry.date.month() == month)
        .collect();
    MonthView {
        year,
        month,
        entries: selected,
    }
}

/// The month the display is focused on, with previous/next navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}
