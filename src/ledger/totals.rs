use crate::domain::account::Account;
use crate::domain::entry::LedgerEntry;

/// Net movement of one account over the full history: debits minus credits.
/// Pure; an empty collection or posting-less entries contribute zero.
pub fn account_total(entries: &[LedgerEntry], account: Account) -> f64 {
    entries
        .iter()
        .flat_map(|entry| entry.postings.iter())
        .filter(|posting| posting.account == account)
        .map(|posting| posting.signed())
        .sum()
}

/// Derived balances, recomputed in full from the entry history on every
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub cash: f64,
    pub loan_outstanding: f64,
    pub debt_outstanding: f64,
    pub net_worth: f64,
}

impl BalanceReport {
    pub fn compute(entries: &[LedgerEntry]) -> Self {
        let cash = account_total(entries, Account::Caja);
        let loan_outstanding = account_total(entries, Account::Prestamos).abs();
        let debt_outstanding = account_total(entries, Account::Deudas).abs();
        Self {
            cash,
            loan_outstanding,
            debt_outstanding,
            net_worth: cash - loan_outstanding - debt_outstanding,
        }
    }

    /// Display-only status flag for the cash figure.
    pub fn cash_is_positive(&self) -> bool {
        self.cash >= 0.0
    }
}
