use crate::ledger::Ledger;
use crate::setup::{SetupRecord, SetupTable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Runtime state behind one built mock.
#[derive(Debug, Default)]
pub struct InstanceState {
    setups: SetupTable,
    ledger: Ledger,
    partial: bool,
}

/// Handle shared by a [`crate::VerifiableMock`] and the substitute object
/// it hands out. The substitute never outlives the state it points to.
pub type SharedInstance = Arc<Mutex<InstanceState>>;

impl InstanceState {
    /// Replace the setups wholesale and clear the ledger.
    pub fn initialize(&mut self, setups: Vec<SetupRecord>, partial: bool) {
        self.setups.replace(setups);
        self.partial = partial;
        self.ledger.clear();
    }

    pub fn setups(&self) -> &SetupTable {
        &self.setups
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }
}

/// Lock the state. A poisoned lock only means a user predicate panicked
/// mid-verification; the state itself is still consistent.
pub fn lock(instance: &Mutex<InstanceState>) -> MutexGuard<'_, InstanceState> {
    instance.lock().unwrap_or_else(PoisonError::into_inner)
}
