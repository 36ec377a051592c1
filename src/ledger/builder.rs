//! Validation and posting expansion for new or edited movements.

use chrono::{DateTime, Utc};

use crate::domain::account::Account;
use crate::domain::entry::{
    Category, Direction, EntryId, LedgerEntry, LoanDetails, Posting,
};
use crate::errors::ValidationError;

use super::totals::account_total;

/// Upper bound on a single movement's magnitude.
pub const MAX_AMOUNT: f64 = 10_000_000.0;

/// A user action waiting to be validated and expanded into postings.
#[derive(Debug, Clone)]
pub struct EntryRequest {
    pub direction: Direction,
    pub category: Category,
    pub amount: f64,
    pub description: Option<String>,
    /// Required when `category` is loan and `direction` is income.
    pub loan_terms: Option<LoanTerms>,
}

/// Caller-supplied repayment terms for loan income.
#[derive(Debug, Clone, Copy)]
pub struct LoanTerms {
    pub total_to_pay: f64,
    pub installments: u32,
}

/// Identity carried by the built entry: fresh for new movements, preserved
/// from the stored entry on edits.
#[derive(Debug, Clone, Copy)]
pub struct EntryIdentity {
    pub id: EntryId,
    pub date: DateTime<Utc>,
}

pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Quote phase for loan income: turns the principal plus repayment terms into
/// loan details. The confirm phase is [`build_entry`].
pub fn quote_loan(principal: f64, terms: LoanTerms) -> Result<LoanDetails, ValidationError> {
    if !terms.total_to_pay.is_finite() || terms.total_to_pay <= principal {
        return Err(ValidationError::RepaymentBelowPrincipal {
            principal,
            total_to_pay: terms.total_to_pay,
        });
    }
    if terms.installments == 0 {
        return Err(ValidationError::InvalidInstallments);
    }
    let interest_amount = terms.total_to_pay - principal;
    let interest_percent = round2(interest_amount / principal * 100.0);
    Ok(LoanDetails {
        total_to_pay: terms.total_to_pay,
        interest_percent,
        installments: terms.installments,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Expands a movement into its posting set. `loan` only participates in the
/// loan-income row, where the loans account is credited the repayment total.
pub fn expand_postings(
    direction: Direction,
    category: Category,
    amount: f64,
    loan: Option<&LoanDetails>,
) -> Vec<Posting> {
    match (category, direction) {
        (Category::Normal, Direction::Income) => vec![
            Posting::debit(Account::Caja, amount),
            Posting::credit(Account::Ingresos, amount),
        ],
        (Category::Normal, Direction::Expense) => vec![
            Posting::debit(Account::Gastos, amount),
            Posting::credit(Account::Caja, amount),
        ],
        (Category::Loan, Direction::Income) => {
            let total = loan.map_or(amount, |details| details.total_to_pay);
            vec![
                Posting::debit(Account::Caja, amount),
                Posting::credit(Account::Prestamos, total),
            ]
        }
        (Category::Loan, Direction::Expense) => vec![
            Posting::debit(Account::Prestamos, amount),
            Posting::credit(Account::Caja, amount),
        ],
        // Deliberate single-posting entry: debt income credits Deudas only.
        (Category::Debt, Direction::Income) => {
            vec![Posting::credit(Account::Deudas, amount)]
        }
        (Category::Debt, Direction::Expense) => vec![
            Posting::debit(Account::Deudas, amount),
            Posting::credit(Account::Caja, amount),
        ],
    }
}

/// Validates a request against the current history and expands it into a
/// complete entry. All guards run before anything is constructed; a failure
/// leaves no partial state behind.
pub fn build_entry(
    entries: &[LedgerEntry],
    request: &EntryRequest,
    identity: EntryIdentity,
) -> Result<LedgerEntry, ValidationError> {
    let amount = request.amount;
    validate_amount(amount)?;

    if request.direction == Direction::Expense {
        let available = account_total(entries, Account::Caja);
        if amount > available {
            return Err(ValidationError::InsufficientCash {
                requested: amount,
                available,
            });
        }
    }
    if request.category == Category::Debt && request.direction == Direction::Expense {
        let outstanding = account_total(entries, Account::Deudas).abs();
        if amount > outstanding {
            return Err(ValidationError::DebtOverpayment {
                requested: amount,
                outstanding,
            });
        }
    }
    if request.category == Category::Loan && request.direction == Direction::Expense {
        let outstanding = account_total(entries, Account::Prestamos).abs();
        if amount > outstanding {
            return Err(ValidationError::LoanOverpayment {
                requested: amount,
                outstanding,
            });
        }
    }

    let loan_details = match (request.category, request.direction) {
        (Category::Loan, Direction::Income) => {
            let terms = request.loan_terms.ok_or(ValidationError::MissingLoanTerms)?;
            Some(quote_loan(amount, terms)?)
        }
        _ => None,
    };

    let postings = expand_postings(
        request.direction,
        request.category,
        amount,
        loan_details.as_ref(),
    );

    Ok(LedgerEntry {
        id: identity.id,
        date: identity.date,
        description: request.description.clone(),
        amount,
        direction: request.direction,
        category: request.category,
        loan_details,
        postings,
    })
}
