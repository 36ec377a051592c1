use thiserror::Error;

use crate::domain::entry::EntryId;
use crate::storage::StorageError;

/// Domain guard failures, all detected before any state mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("amount {amount} is above the {max} limit")]
    AmountTooLarge { amount: f64, max: f64 },
    #[error("insufficient cash: {requested:.2} requested, {available:.2} available")]
    InsufficientCash { requested: f64, available: f64 },
    #[error("cannot pay {requested:.2} of debt when only {outstanding:.2} is owed")]
    DebtOverpayment { requested: f64, outstanding: f64 },
    #[error("cannot repay {requested:.2} of loan when only {outstanding:.2} is owed")]
    LoanOverpayment { requested: f64, outstanding: f64 },
    #[error("loan income requires repayment terms")]
    MissingLoanTerms,
    #[error("repayment total {total_to_pay:.2} must exceed the principal {principal:.2}")]
    RepaymentBelowPrincipal { principal: f64, total_to_pay: f64 },
    #[error("installment count must be at least 1")]
    InvalidInstallments,
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("movement {0} not found")]
    NotFound(EntryId),
    #[error("movement {0} already exists")]
    DuplicateId(EntryId),
    #[error("no movements recorded for {month:02}/{year}")]
    EmptyPeriod { year: i32, month: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("export error: {0}")]
    Export(#[from] csv::Error),
}
