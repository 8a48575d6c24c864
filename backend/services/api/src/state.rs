use std::sync::Arc;

use tokio::sync::OnceCell;
use wellbeing_common::error::{WellbeingError, WellbeingResult};
use wellbeing_db::Store;

/// Holds the store handle once the background connection succeeds.
///
/// Clones share the same cell, so publishing from the connect task is seen by
/// every handler. Until then `get` fails with the store-not-ready error.
#[derive(Clone, Default)]
pub struct StoreSlot {
    cell: Arc<OnceCell<Store>>,
}

impl StoreSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ready(store: Store) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(store))),
        }
    }

    /// Returns `false` if a store was already published.
    pub fn publish(&self, store: Store) -> bool {
        self.cell.set(store).is_ok()
    }

    pub fn get(&self) -> WellbeingResult<Store> {
        self.cell
            .get()
            .cloned()
            .ok_or_else(WellbeingError::store_not_ready)
    }

    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }
}
