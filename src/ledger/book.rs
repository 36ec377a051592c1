use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entry::{EntryId, LedgerEntry};
use crate::errors::LedgerError;
use crate::storage::{KeyValueStore, StorageError};

use super::builder::{build_entry, EntryIdentity, EntryRequest};
use super::totals::BalanceReport;

/// Logical key the serialized entry collection lives under.
pub const LEDGER_KEY: &str = "ledger";

/// The full movement history, ordered newest first, together with its
/// persistence collaborator. Owns every entry exclusively.
pub struct Book {
    entries: Vec<LedgerEntry>,
    storage: Box<dyn KeyValueStore>,
}

impl Book {
    /// Reads the ledger key once; a missing key starts an empty book.
    pub fn open(storage: Box<dyn KeyValueStore>) -> Result<Self, LedgerError> {
        let entries: Vec<LedgerEntry> = match storage.get(LEDGER_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(StorageError::from)?,
            None => Vec::new(),
        };
        let mut book = Self { entries, storage };
        book.sort_entries();
        debug!(count = book.entries.len(), "ledger loaded");
        Ok(book)
    }

    /// Entries in date-descending order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn find(&self, id: EntryId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Next unique id: creation time in milliseconds, bumped past any
    /// existing id so the sequence stays monotonic.
    pub fn next_id(&self) -> EntryId {
        let now = Utc::now().timestamp_millis();
        let max = self.entries.iter().map(|entry| entry.id.0).max().unwrap_or(0);
        EntryId(now.max(max + 1))
    }

    pub fn insert(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        if self.find(entry.id).is_some() {
            return Err(LedgerError::DuplicateId(entry.id));
        }
        self.entries.push(entry);
        self.commit()
    }

    /// Replaces the entry with a matching id, or appends when none exists.
    pub fn upsert(&mut self, entry: LedgerEntry) -> Result<(), LedgerError> {
        match self.entries.iter_mut().find(|slot| slot.id == entry.id) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
        self.commit()
    }

    pub fn delete_by_id(&mut self, id: EntryId) -> Result<LedgerEntry, LedgerError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.entries.remove(index);
        self.commit()?;
        debug!(%id, "movement deleted");
        Ok(removed)
    }

    /// Validates and records a new movement, returning its id.
    pub fn record(&mut self, request: EntryRequest) -> Result<EntryId, LedgerError> {
        let identity = EntryIdentity {
            id: self.next_id(),
            date: Utc::now(),
        };
        let entry = build_entry(&self.entries, &request, identity)?;
        let id = entry.id;
        self.insert(entry)?;
        debug!(%id, "movement recorded");
        Ok(id)
    }

    /// Rebuilds an existing movement in place, keeping its id and creation
    /// date. Guards run against the current history, the edited entry
    /// included.
    pub fn amend(&mut self, id: EntryId, request: EntryRequest) -> Result<(), LedgerError> {
        let existing = self.find(id).ok_or(LedgerError::NotFound(id))?;
        let identity = EntryIdentity {
            id,
            date: existing.date,
        };
        let entry = build_entry(&self.entries, &request, identity)?;
        self.upsert(entry)?;
        debug!(%id, "movement amended");
        Ok(())
    }

    pub fn balances(&self) -> BalanceReport {
        BalanceReport::compute(&self.entries)
    }

    fn sort_entries(&mut self) {
        // Stable sort: same-date entries keep their insertion order.
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Re-establishes ordering and writes the full collection to storage.
    /// A failed write is surfaced while the in-memory state stays
    /// authoritative.
    fn commit(&mut self) -> Result<(), LedgerError> {
        self.sort_entries();
        let json = serde_json::to_string(&self.entries).map_err(StorageError::from)?;
        if let Err(err) = self.storage.put(LEDGER_KEY, &json) {
            warn!(%err, "ledger write failed, in-memory state kept");
            return Err(err.into());
        }
        Ok(())
    }
}
