//! The contract between a substitute object and its mock instance.
//!
//! A substitute (usually generated by [`crate::mock_interface!`]) holds a
//! [`Dispatcher`] and forwards every trait method to [`Dispatcher::invoke`].
//! The dispatcher records the call, then returns the configured value,
//! raises the configured payload, or applies the fallback policy of the
//! mock: a zero value for full mocks, a `NotImplemented` panic for partial
//! mocks.

use crate::instance::{lock, SharedInstance};
use crate::logging;
use crate::member::{Member, MemberDescriptor, MemberId};
use crate::setup::{Outcome, SetupRecord};
use crate::values::{Arguments, ZeroValue};
use crate::{MockError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::panic;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Builds the substitute object for `T` around a dispatcher.
pub type ProxyFactory<T> = fn(Dispatcher<T>) -> Arc<T>;

/// Description of a mockable interface.
///
/// Implemented for `dyn Trait` by [`crate::mock_interface!`]. A manual
/// implementation without a proxy factory must register one with
/// [`register_proxy`] before building mocks.
pub trait Mockable: 'static {
    const TYPE_NAME: &'static str;

    fn members() -> &'static [MemberDescriptor];

    fn proxy_factory() -> Option<ProxyFactory<Self>> {
        None
    }
}

type ProxyMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

fn proxies() -> &'static RwLock<ProxyMap> {
    static PROXIES: OnceLock<RwLock<ProxyMap>> = OnceLock::new();
    PROXIES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register the substitute factory for `T`, replacing the generated one.
pub fn register_proxy<T: ?Sized + Mockable>(factory: ProxyFactory<T>) {
    proxies()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(TypeId::of::<T>(), Box::new(factory));
    logging::log_proxy_registered(T::TYPE_NAME);
}

/// Find the substitute factory for `T`.
pub fn proxy_factory<T: ?Sized + Mockable>() -> Result<ProxyFactory<T>> {
    let registered = proxies()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<T>())
        .and_then(|factory| factory.downcast_ref::<ProxyFactory<T>>())
        .copied();

    registered
        .or_else(T::proxy_factory)
        .ok_or_else(|| MockError::ProxyUnavailable {
            type_name: T::TYPE_NAME.to_string(),
        })
}

/// Engine errors raised inside a substitute are panics carrying a
/// [`MockError`]. Recover it from a caught panic payload.
pub fn caught_error(payload: &(dyn Any + Send)) -> Option<&MockError> {
    payload.downcast_ref::<MockError>()
}

/// Raise an engine error from inside a substitute.
pub(crate) fn raise(error: MockError) -> ! {
    panic::panic_any(error)
}

/// Turn a setup outcome into the member's result. Configured payloads are
/// re-raised untouched.
pub(crate) fn resolve_outcome<R: 'static>(member: MemberId, outcome: &Outcome) -> R {
    let produced = outcome.produce();
    if outcome.is_exception() {
        logging::log_configured_raise(member.name());
        panic::resume_unwind(produced);
    }
    match produced.downcast::<R>() {
        Ok(value) => *value,
        Err(_) => raise(MockError::ResultTypeMismatch {
            member: member.name().to_string(),
            expected: std::any::type_name::<R>().to_string(),
        }),
    }
}

/// Dispatch handle held by a substitute object.
pub struct Dispatcher<T: ?Sized> {
    instance: SharedInstance,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<T: ?Sized + Mockable> Dispatcher<T> {
    pub(crate) fn new(instance: SharedInstance) -> Self {
        Self {
            instance,
            _marker: PhantomData,
        }
    }

    /// Append the call to the ledger. Must run before the setup lookup.
    pub fn record_call(&self, member: MemberId, args: Arguments) {
        lock(&self.instance).ledger_mut().record(member, args);
        logging::log_call_recorded(T::TYPE_NAME, member.name());
    }

    pub fn try_get_setup(&self, member: MemberId) -> Option<SetupRecord> {
        lock(&self.instance).setups().find(member).cloned()
    }

    pub fn is_partial_mode(&self) -> bool {
        lock(&self.instance).is_partial()
    }

    /// Full dispatch of one intercepted call.
    ///
    /// # Panics
    ///
    /// Raises the configured payload of a `throws` setup, or a [`MockError`]
    /// for unmatched partial-mock calls and full-mock calls whose result
    /// type has no zero value.
    pub fn invoke<R>(&self, member: Member<T, R>, args: Arguments) -> R
    where
        R: ZeroValue + 'static,
    {
        let id = member.id();
        let (setup, partial) = {
            let mut state = lock(&self.instance);
            state.ledger_mut().record(id, args);
            (state.setups().find(id).cloned(), state.is_partial())
        };
        logging::log_call_recorded(T::TYPE_NAME, id.name());

        if let Some(record) = setup {
            return resolve_outcome(id, record.outcome());
        }

        logging::log_unmatched_call(T::TYPE_NAME, id.name(), partial);
        if partial {
            raise(MockError::NotImplemented {
                owner: T::TYPE_NAME.to_string(),
                member: id.name().to_string(),
            });
        }
        R::zero_value().unwrap_or_else(|| {
            raise(MockError::NoZeroValue {
                member: id.name().to_string(),
                result_type: std::any::type_name::<R>().to_string(),
            })
        })
    }
}
