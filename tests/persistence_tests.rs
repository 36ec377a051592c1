use std::io;

use cashbook_core::domain::{Category, Direction};
use cashbook_core::errors::LedgerError;
use cashbook_core::ledger::{Book, EntryRequest};
use cashbook_core::storage::{JsonFileStore, KeyValueStore, StorageError};
use tempfile::TempDir;

fn income(amount: f64) -> EntryRequest {
    EntryRequest {
        direction: Direction::Income,
        category: Category::Normal,
        amount,
        description: Some("salary".into()),
        loan_terms: None,
    }
}

#[test]
fn reopening_restores_entries_and_balances() {
    let temp = TempDir::new().expect("temp dir");

    let id = {
        let storage = JsonFileStore::new(temp.path()).expect("storage");
        let mut book = Book::open(Box::new(storage)).expect("open book");
        book.record(income(1000.0)).expect("record income")
    };

    let storage = JsonFileStore::new(temp.path()).expect("storage");
    let book = Book::open(Box::new(storage)).expect("reopen book");
    let entry = book.find(id).expect("entry survived restart");
    assert_eq!(entry.description.as_deref(), Some("salary"));
    assert_eq!(book.balances().cash, 1000.0);
}

#[test]
fn missing_ledger_key_opens_an_empty_book() {
    let temp = TempDir::new().expect("temp dir");
    let storage = JsonFileStore::new(temp.path()).expect("storage");
    let book = Book::open(Box::new(storage)).expect("open book");
    assert!(book.entries().is_empty());
    assert_eq!(book.balances().cash, 0.0);
}

/// Accepts reads, fails every write.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            "disk full",
        )))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[test]
fn write_failure_is_surfaced_but_memory_stays_authoritative() {
    let mut book = Book::open(Box::new(FailingStore)).expect("open book");

    let err = book.record(income(1000.0)).expect_err("write must fail");
    assert!(matches!(err, LedgerError::Storage(_)));

    // The mutation is kept in memory despite the failed write.
    assert_eq!(book.entries().len(), 1);
    assert_eq!(book.balances().cash, 1000.0);
}
