//! Recycling of mock instance state across builds.
//!
//! Each mocked type gets a fixed array of slots. A slot is either empty or
//! holds one idle [`InstanceState`]. Slots are claimed with `try_lock`: a
//! slot some other thread is touching is skipped, never waited on. The pool
//! is best effort: a full pool drops returned instances and an empty pool
//! constructs new ones.

use crate::config::Config;
use crate::instance::{InstanceState, SharedInstance};
use crate::logging;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, TryLockError};

type Slot = Mutex<Option<SharedInstance>>;

pub struct InstancePool {
    slots: Box<[Slot]>,
}

impl InstancePool {
    pub fn new(size: usize) -> Self {
        let slots = (0..size).map(|_| Mutex::new(None)).collect();
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of idle instances currently held.
    pub fn idle(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    /// Claim an idle instance, or construct a fresh one.
    ///
    /// The instance is not reset; callers initialize it before use.
    pub fn rent(&self) -> SharedInstance {
        self.try_claim()
            .unwrap_or_else(|| Arc::new(Mutex::new(InstanceState::default())))
    }

    /// Claim an idle instance if any uncontended slot holds one.
    pub fn try_claim(&self) -> Option<SharedInstance> {
        self.slots
            .iter()
            .find_map(|slot| try_slot(slot).and_then(|mut held| held.take()))
    }

    /// Offer an instance back. Returns `false` when it was dropped instead,
    /// either because something else still references it or because no
    /// empty slot was free.
    pub fn give_back(&self, mut instance: SharedInstance) -> bool {
        if Arc::get_mut(&mut instance).is_none() {
            return false;
        }

        for slot in self.slots.iter() {
            if let Some(mut held) = try_slot(slot) {
                if held.is_none() {
                    *held = Some(instance);
                    return true;
                }
            }
        }
        false
    }
}

/// Lock a slot without blocking. A poisoned slot still holds a valid
/// `Option`.
fn try_slot(slot: &Slot) -> Option<MutexGuard<'_, Option<SharedInstance>>> {
    match slot.try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => None,
    }
}

type PoolMap = HashMap<TypeId, Arc<InstancePool>>;

fn pools() -> &'static RwLock<PoolMap> {
    static POOLS: OnceLock<RwLock<PoolMap>> = OnceLock::new();
    POOLS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The pool for one mocked type, created on first use.
pub fn pool_for(type_id: TypeId) -> Arc<InstancePool> {
    if let Some(pool) = pools()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
    {
        return Arc::clone(pool);
    }

    let slots = Config::global().pool.slots;
    let mut map = pools().write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(
        map.entry(type_id)
            .or_insert_with(|| Arc::new(InstancePool::new(slots))),
    )
}

/// Rent instance state for a mock of `type_name`.
pub fn rent(type_id: TypeId, type_name: &str) -> SharedInstance {
    if !Config::global().pool.enabled {
        return Arc::new(Mutex::new(InstanceState::default()));
    }
    match pool_for(type_id).try_claim() {
        Some(instance) => {
            logging::log_pool_rent(type_name, true);
            instance
        }
        None => {
            logging::log_pool_rent(type_name, false);
            Arc::new(Mutex::new(InstanceState::default()))
        }
    }
}

/// Return instance state once its mock is disposed.
pub fn give_back(type_id: TypeId, type_name: &str, instance: SharedInstance) -> bool {
    if !Config::global().pool.enabled {
        return false;
    }
    let returned = pool_for(type_id).give_back(instance);
    logging::log_pool_return(type_name, returned);
    returned
}
