//! Cashbook Core is a small double-entry personal ledger: income and expense
//! movements are expanded into balanced postings against a fixed set of
//! accounts, and cash, loan, and debt balances are derived from the full
//! posting history.

pub mod cli;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashbook Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
