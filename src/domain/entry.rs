use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;

/// Unique movement identity, stable across edits. Allocated from the creation
/// timestamp in milliseconds and bumped past the current maximum on collision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Normal,
    Loan,
    Debt,
}

/// Repayment terms attached to loan income, computed at quote time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanDetails {
    pub total_to_pay: f64,
    pub interest_percent: f64,
    pub installments: u32,
}

impl LoanDetails {
    /// Interest rate as displayed, with two decimals.
    pub fn interest_display(&self) -> String {
        format!("{:.2}", self.interest_percent)
    }
}

/// One debit-or-credit line against a single account. Every posting this
/// crate produces has exactly one non-zero side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Posting {
    pub account: Account,
    pub debit: f64,
    pub credit: f64,
}

impl Posting {
    pub fn debit(account: Account, amount: f64) -> Self {
        Self {
            account,
            debit: amount,
            credit: 0.0,
        }
    }

    pub fn credit(account: Account, amount: f64) -> Self {
        Self {
            account,
            debit: 0.0,
            credit: amount,
        }
    }

    /// Net effect on the account: debits count positive, credits negative.
    pub fn signed(&self) -> f64 {
        self.debit - self.credit
    }
}

/// The unit of user action and storage. Mutated only by full replacement
/// keyed on `id`; `date` is the creation timestamp and survives edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub direction: Direction,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_details: Option<LoanDetails>,
    #[serde(default)]
    pub postings: Vec<Posting>,
}
