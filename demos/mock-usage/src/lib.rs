//! A small service with collaborators behind traits, tested with litmock.

use futures_util::future::BoxFuture;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub active: bool,
}

pub trait AccountStore: Send + Sync {
    fn find(&self, id: u64) -> Option<Account>;
    fn deactivate(&self, id: u64) -> bool;
}

pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str) -> BoxFuture<'static, bool>;
}

/// Closes accounts and tells their owners.
pub struct Offboarding {
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn Mailer>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum OffboardError {
    UnknownAccount(u64),
    AlreadyInactive(u64),
    StoreRejected(u64),
}

impl Offboarding {
    pub fn new(store: Arc<dyn AccountStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Deactivate `id` and mail the owner. Returns whether the mail went out.
    pub async fn close(&self, id: u64) -> Result<bool, OffboardError> {
        let account = self
            .store
            .find(id)
            .ok_or(OffboardError::UnknownAccount(id))?;
        if !account.active {
            return Err(OffboardError::AlreadyInactive(id));
        }
        if !self.store.deactivate(id) {
            return Err(OffboardError::StoreRejected(id));
        }
        Ok(self.mailer.send(&account.email, "Your account was closed").await)
    }
}
