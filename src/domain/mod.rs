pub mod account;
pub mod entry;

pub use account::Account;
pub use entry::{Category, Direction, EntryId, LedgerEntry, LoanDetails, Posting};
