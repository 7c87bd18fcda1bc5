//! # Reservation Store
//!
//! Finite inventory with a one-way `Available → Reserved` transition.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Unit Lifecycle                            │
//! │                                                                         │
//! │               reserve(id)                                               │
//! │  ┌───────────┐  ──────────►  ┌───────────┐                              │
//! │  │ Available │               │ Reserved  │ ◄── reserve(id) → Conflict   │
//! │  └───────────┘               └───────────┘     (no state change)        │
//! │                                                                         │
//! │  Reserved is terminal: there is no release path.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The unit list is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every request runs on its own task, possibly on another thread
//! 2. "Is it available?" and "mark it reserved" must be one step
//! 3. Two callers that both observe `Available` must never both win
//!
//! The lock is held only for the check-and-flip (never across an `.await`),
//! and readers get cloned snapshots, never the collection itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Inventory Unit
// =============================================================================

/// Availability of an inventory unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReservationState {
    Available,
    Reserved,
}

/// A reservable inventory unit (one shoe model in the demo seed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryUnit {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: Money,
    /// Units on hand. Informational: reserving does not decrement it.
    pub stock: u32,
    pub reserved: bool,
}

impl InventoryUnit {
    /// Creates an available unit.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: Money,
        stock: u32,
    ) -> Self {
        InventoryUnit {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            price,
            stock,
            reserved: false,
        }
    }

    /// Current state derived from the `reserved` flag.
    #[inline]
    pub fn state(&self) -> ReservationState {
        if self.reserved {
            ReservationState::Reserved
        } else {
            ReservationState::Available
        }
    }
}

/// The three demo shoes the service starts with.
pub fn demo_inventory() -> Vec<InventoryUnit> {
    vec![
        InventoryUnit::new("1", "Air Force 1", "Nike", Money::from_major_minor(3500, 0), 10),
        InventoryUnit::new("2", "Ultraboost 22", "Adidas", Money::from_major_minor(4200, 0), 5),
        InventoryUnit::new("3", "574 Classic", "New Balance", Money::from_major_minor(2800, 0), 8),
    ]
}

// =============================================================================
// Reservation Store
// =============================================================================

/// Shared, mutex-guarded inventory.
///
/// Cloning the store clones the handle; all clones see the same units.
#[derive(Debug, Clone, Default)]
pub struct ReservationStore {
    units: Arc<Mutex<Vec<InventoryUnit>>>,
}

impl ReservationStore {
    /// Creates a store seeded with `units`, kept in the given order.
    pub fn new(units: Vec<InventoryUnit>) -> Self {
        ReservationStore {
            units: Arc::new(Mutex::new(units)),
        }
    }

    /// Creates a store holding the demo inventory.
    pub fn with_demo_inventory() -> Self {
        Self::new(demo_inventory())
    }

    /// The units are plain flags and strings; a panic elsewhere while holding
    /// the lock cannot leave one half-updated, so a poisoned lock is reused.
    fn lock(&self) -> MutexGuard<'_, Vec<InventoryUnit>> {
        self.units.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically reserves the unit with `id`.
    ///
    /// ## Returns
    /// * `Ok(InventoryUnit)` - the unit, now reserved
    /// * `Err(CoreError::Validation)` - `id` is empty
    /// * `Err(CoreError::UnitNotFound)` - no unit has that id
    /// * `Err(CoreError::AlreadyReserved)` - an earlier call won; nothing changed
    pub fn reserve(&self, id: &str) -> CoreResult<InventoryUnit> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::required("id").into());
        }

        debug!(id = %id, "Reserving inventory unit");

        let mut units = self.lock();
        let unit = units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| CoreError::UnitNotFound(id.to_string()))?;

        if unit.reserved {
            warn!(id = %id, "Inventory unit already reserved");
            return Err(CoreError::AlreadyReserved(id.to_string()));
        }

        unit.reserved = true;
        info!(id = %id, name = %unit.name, "Inventory unit reserved");
        Ok(unit.clone())
    }

    /// Returns a snapshot of one unit.
    pub fn get(&self, id: &str) -> Option<InventoryUnit> {
        self.lock().iter().find(|u| u.id == id).cloned()
    }

    /// Returns a snapshot of all units in seed order.
    pub fn snapshot(&self) -> Vec<InventoryUnit> {
        self.lock().clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_twice_conflicts() {
        let store = ReservationStore::with_demo_inventory();

        let unit = store.reserve("1").unwrap();
        assert!(unit.reserved);
        assert_eq!(unit.state(), ReservationState::Reserved);

        let err = store.reserve("1").unwrap_err();
        assert!(matches!(err, CoreError::AlreadyReserved(id) if id == "1"));

        // Still reserved, and the others untouched
        assert!(store.get("1").unwrap().reserved);
        assert!(!store.get("2").unwrap().reserved);
    }

    #[test]
    fn test_unknown_and_empty_ids() {
        let store = ReservationStore::with_demo_inventory();

        assert!(matches!(
            store.reserve("42"),
            Err(CoreError::UnitNotFound(_))
        ));
        assert!(matches!(store.reserve(""), Err(CoreError::Validation(_))));
        assert!(store.snapshot().iter().all(|u| !u.reserved));
    }

    #[test]
    fn test_stock_is_not_decremented() {
        let store = ReservationStore::with_demo_inventory();
        let unit = store.reserve("2").unwrap();
        assert_eq!(unit.stock, 5);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ReservationStore::with_demo_inventory();
        let other = store.clone();
        store.reserve("3").unwrap();
        assert!(other.get("3").unwrap().reserved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_reserve_has_single_winner() {
        let store = ReservationStore::with_demo_inventory();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.reserve("1") })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(CoreError::AlreadyReserved(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 63);
        assert!(store.get("1").unwrap().reserved);
    }
}
