//! Entry points for building mocks, and the handle a test keeps to drive
//! and verify one.

use crate::builder::{FullBuilder, PartialBuilder};
use crate::dispatch::{self, Dispatcher, Mockable};
use crate::instance::{lock, SharedInstance};
use crate::logging;
use crate::member::{self, Member, MemberId};
use crate::pool;
use crate::setup::SetupRecord;
use crate::statics::{StaticBuilder, StaticSurface};
use crate::values::Arguments;
use crate::verify::{self, VerifyHandle};
use crate::Result;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Namespace for the three builder flavors.
pub struct Mock;

impl Mock {
    /// Full mock of `T`: unmatched members return zero values.
    pub fn of<T: ?Sized + Mockable>() -> FullBuilder<T> {
        FullBuilder::new()
    }

    /// Partial mock of `T`: unmatched members panic with `NotImplemented`.
    pub fn partial<T: ?Sized + Mockable>() -> PartialBuilder<T> {
        PartialBuilder::new()
    }

    /// Mock of the static members of `S`: unmatched members run the real
    /// implementation.
    pub fn static_of<S: StaticSurface>() -> StaticBuilder<S> {
        StaticBuilder::new()
    }
}

/// A built mock: the substitute object plus the state behind it.
pub struct VerifiableMock<T: ?Sized + Mockable> {
    instance: SharedInstance,
    object: Arc<T>,
}

impl<T: ?Sized + Mockable> VerifiableMock<T> {
    pub(crate) fn assemble(setups: Vec<SetupRecord>, partial: bool) -> Result<Self> {
        let factory = dispatch::proxy_factory::<T>()?;
        let instance = pool::rent(TypeId::of::<T>(), T::TYPE_NAME);
        let setup_count = setups.len();
        lock(&instance).initialize(setups, partial);

        let object = factory(Dispatcher::new(Arc::clone(&instance)));
        logging::log_mock_built(T::TYPE_NAME, setup_count, partial);
        Ok(Self { instance, object })
    }

    /// The substitute implementing `T`.
    pub fn object(&self) -> &T {
        &self.object
    }

    /// Owned handle to the substitute, for code that stores its collaborators.
    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.object)
    }

    pub fn verify<R>(&self, member: Member<T, R>) -> VerifyHandle<'_> {
        VerifyHandle::new(&self.instance, self.resolve(member.id()))
    }

    pub fn verify_no_other_calls(&self) -> Result<()> {
        verify::no_other_calls(&self.instance)
    }

    pub fn call_count<R>(&self, member: Member<T, R>) -> Result<usize> {
        let id = self.resolve(member.id())?;
        Ok(lock(&self.instance).ledger().call_count(id))
    }

    /// Snapshot of the argument tuples recorded for `member`, oldest first.
    pub fn calls<R>(&self, member: Member<T, R>) -> Result<Vec<Arguments>> {
        let id = self.resolve(member.id())?;
        Ok(lock(&self.instance).ledger().calls(id).to_vec())
    }

    /// Release the mock. Its state goes back to the pool when no clone of
    /// the substitute is still alive; returns whether that happened.
    pub fn dispose(self) -> bool {
        let Self { instance, object } = self;
        drop(object);
        pool::give_back(TypeId::of::<T>(), T::TYPE_NAME, instance)
    }

    fn resolve(&self, id: MemberId) -> Result<MemberId> {
        member::resolve(T::TYPE_NAME, T::members(), id)
    }
}

impl<T: ?Sized + Mockable> fmt::Debug for VerifiableMock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.instance);
        f.debug_struct("VerifiableMock")
            .field("type", &T::TYPE_NAME)
            .field("setups", &state.setups().len())
            .field("calls", &state.ledger().total_calls())
            .field("partial", &state.is_partial())
            .finish()
    }
}
