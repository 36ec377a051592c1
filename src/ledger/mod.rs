pub mod book;
pub mod builder;
pub mod period;
pub mod totals;

pub use book::{Book, LEDGER_KEY};
pub use builder::{
    build_entry, quote_loan, EntryIdentity, EntryRequest, LoanTerms, MAX_AMOUNT,
};
pub use period::{month_view, MonthCursor, MonthView};
pub use totals::{account_total, BalanceReport};
