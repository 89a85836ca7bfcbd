use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::api::BudgetApi;
use crate::error::ApiError;
use crate::models::{BudgetEntry, EntryKey};

/// Outcome of writing an edited cell to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Persisted,
    LocalOnly,
}

/// Budget entries for a single year, plus which cells the server has not
/// confirmed yet.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetStore {
    year: i32,
    entries: Vec<BudgetEntry>,
    in_flight: HashMap<EntryKey, u32>,
    failed: HashSet<EntryKey>,
}

impl BudgetStore {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            entries: Vec::new(),
            in_flight: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }

    pub fn amount(&self, key: &EntryKey) -> Option<Decimal> {
        self.entries.iter().find(|e| key.matches(e)).map(|e| e.amount)
    }

    /// Swaps in a whole year. Entries belonging to other years are dropped and
    /// all sync marks are cleared.
    pub fn replace(&mut self, year: i32, entries: Vec<BudgetEntry>) {
        self.year = year;
        self.entries = entries.into_iter().filter(|e| e.year == year).collect();
        self.in_flight.clear();
        self.failed.clear();
    }

    /// Last write wins: an existing entry for `key` has its amount replaced,
    /// otherwise a new entry is appended. The cell stays unsynced until
    /// [`BudgetStore::record_sync`] is called for it.
    pub fn upsert(&mut self, key: &EntryKey, amount: Decimal) {
        match self.entries.iter_mut().find(|e| key.matches(e)) {
            Some(existing) => existing.amount = amount,
            None => self.entries.push(BudgetEntry {
                category: key.category.clone(),
                subcategory: key.subcategory.clone(),
                month: key.month,
                year: self.year,
                amount,
            }),
        }
        *self.in_flight.entry(key.clone()).or_insert(0) += 1;
    }

    pub fn record_sync(&mut self, key: &EntryKey, status: SyncStatus) {
        if let Some(count) = self.in_flight.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(key);
            }
        }
        match status {
            SyncStatus::Persisted => {
                self.failed.remove(key);
            }
            SyncStatus::LocalOnly => {
                self.failed.insert(key.clone());
            }
        }
    }

    pub fn is_unsynced(&self, key: &EntryKey) -> bool {
        self.in_flight.contains_key(key) || self.failed.contains(key)
    }

    pub fn clear(&mut self) {
        let year = self.year;
        self.replace(year, Vec::new());
    }
}

/// Blank or unparsable input counts as zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

pub async fn fetch_year<A: BudgetApi + ?Sized>(
    api: &A,
    year: i32,
) -> Result<Vec<BudgetEntry>, ApiError> {
    let entries = api.budget_entries(year).await?;
    log::info!("loaded {} budget entries for {}", entries.len(), year);
    Ok(entries)
}

pub async fn persist_entry<A: BudgetApi + ?Sized>(api: &A, entry: &BudgetEntry) -> SyncStatus {
    match api.save_entry(entry).await {
        Ok(()) => SyncStatus::Persisted,
        Err(e) => {
            log::error!(
                "Failed to save budget entry {}/{} month {} of {}: {}",
                entry.category,
                entry.subcategory,
                entry.month,
                entry.year,
                e
            );
            SyncStatus::LocalOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(category: &str, subcategory: &str, month: u32, year: i32, amount: Decimal) -> BudgetEntry {
        BudgetEntry {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            month,
            year,
            amount,
        }
    }

    #[test]
    fn parse_amount_degrades_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12.5.3"), Decimal::ZERO);
        assert_eq!(parse_amount(" 1500.25 "), dec!(1500.25));
        assert_eq!(parse_amount("-40"), dec!(-40));
        assert_eq!(parse_amount("1e3"), dec!(1000));
    }

    #[test]
    fn upsert_replaces_existing_key() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("HOME", "Mortgage", 1);
        store.upsert(&key, dec!(100));
        store.upsert(&key, dec!(250));
        store.upsert(&EntryKey::new("HOME", "Mortgage", 2), dec!(10));

        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.amount(&key), Some(dec!(250)));
        assert!(store.entries().iter().all(|e| e.year == 2024));
    }

    #[test]
    fn zero_is_stored_not_removed() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("HOME", "Repairs", 6);
        store.upsert(&key, dec!(75));
        store.upsert(&key, parse_amount(""));
        assert_eq!(store.amount(&key), Some(Decimal::ZERO));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn replace_keeps_only_requested_year() {
        let mut store = BudgetStore::new(2024);
        store.upsert(&EntryKey::new("HOME", "Mortgage", 1), dec!(100));
        store.replace(
            2025,
            vec![
                entry("HOME", "Mortgage", 1, 2025, dec!(900)),
                entry("HOME", "Mortgage", 2, 2024, dec!(5)),
            ],
        );

        assert_eq!(store.year(), 2025);
        assert_eq!(store.entries().len(), 1);
        assert!(store.entries().iter().all(|e| e.year == 2025));
        assert!(!store.is_unsynced(&EntryKey::new("HOME", "Mortgage", 1)));
    }

    #[test]
    fn sync_marks_follow_outcomes() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("HOME", "Insurance", 4);

        store.upsert(&key, dec!(30));
        assert!(store.is_unsynced(&key));
        store.record_sync(&key, SyncStatus::LocalOnly);
        assert!(store.is_unsynced(&key));

        store.upsert(&key, dec!(35));
        store.record_sync(&key, SyncStatus::Persisted);
        assert!(!store.is_unsynced(&key));
    }

    #[test]
    fn cell_stays_unsynced_while_a_later_write_is_pending() {
        let mut store = BudgetStore::new(2024);
        let key = EntryKey::new("HOME", "Services", 9);

        store.upsert(&key, dec!(1));
        store.upsert(&key, dec!(2));
        store.record_sync(&key, SyncStatus::Persisted);
        assert!(store.is_unsynced(&key));
        store.record_sync(&key, SyncStatus::Persisted);
        assert!(!store.is_unsynced(&key));
    }

    #[tokio::test]
    async fn persist_entry_reports_local_only_on_failure() {
        let api = crate::api::tests::MockApi::default();
        let e = entry("HOME", "Mortgage", 1, 2024, dec!(10));

        assert_eq!(persist_entry(&api, &e).await, SyncStatus::Persisted);
        api.fail_saves.set(true);
        assert_eq!(persist_entry(&api, &e).await, SyncStatus::LocalOnly);
        assert_eq!(api.saved.borrow().len(), 1);
    }
}
