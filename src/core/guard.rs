use crate::core::{ReservationSlotKey, ReservationStore, Storage};
use crate::utils::error::{ReservationError, Result};

/// Rejects slots already booked from this client and records new ones.
///
/// The store is read once in [`SlotGuard::load`] and then only written. Another
/// guard loaded from the same storage does not see these writes, so two guards
/// can both accept the same slot.
pub struct SlotGuard<S: Storage> {
    storage: S,
    entry: String,
    store: ReservationStore,
}

impl<S: Storage> SlotGuard<S> {
    pub async fn load(storage: S, entry: impl Into<String>) -> Result<Self> {
        let entry = entry.into();

        let store = match storage.get_item(&entry).await? {
            Some(raw) => ReservationStore::from_json(&raw).map_err(|source| {
                ReservationError::StoreCorrupted {
                    entry: entry.clone(),
                    source,
                }
            })?,
            None => {
                tracing::debug!("No stored reservations under '{}', starting empty", entry);
                ReservationStore::new()
            }
        };

        tracing::debug!("Loaded {} reservation(s) from '{}'", store.len(), entry);

        Ok(Self {
            storage,
            entry,
            store,
        })
    }

    /// Books `date`/`time`, writing the whole store back once on success.
    /// Nothing is written when the slot is taken.
    pub async fn try_reserve(&mut self, date: &str, time: &str) -> Result<ReservationSlotKey> {
        let key = ReservationSlotKey::new(date, time);

        if !self.store.try_reserve(&key) {
            tracing::info!("⛔ Slot already reserved: {}", key);
            return Err(ReservationError::SlotTaken {
                key: key.to_string(),
            });
        }

        if let Err(e) = self.persist().await {
            // 寫入失敗時回復記憶體，保持與儲存一致
            self.store.release(&key);
            return Err(e);
        }

        tracing::info!("📌 Reserved slot {}", key);
        Ok(key)
    }

    pub fn is_reserved(&self, date: &str, time: &str) -> bool {
        self.store.contains(&ReservationSlotKey::new(date, time))
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    async fn persist(&self) -> Result<()> {
        let raw = self.store.to_json()?;
        self.storage.set_item(&self.entry, &raw).await
    }
}
