use crate::config::Config;
use crate::dispatch::Mockable;
use crate::logging;
use crate::member::{self, Member, MemberId};
use crate::mock::VerifiableMock;
use crate::setup::{Outcome, SetupRecord};
use crate::values::AsyncShape;
use crate::{MockError, Result};
use std::marker::PhantomData;

/// Append-only setup buffer shared by every builder flavor.
///
/// Starts at a fixed capacity and grows past it. The first unresolvable
/// member reference is kept and reported by `build`.
#[derive(Debug)]
pub(crate) struct SetupBuffer {
    owner: &'static str,
    records: Vec<SetupRecord>,
    error: Option<MockError>,
}

impl SetupBuffer {
    pub(crate) fn new(owner: &'static str, capacity: usize) -> Self {
        Self {
            owner,
            records: Vec::with_capacity(capacity),
            error: None,
        }
    }

    pub(crate) fn push(&mut self, resolved: Result<MemberId>, outcome: Outcome, partial_only: bool) {
        match resolved {
            Ok(member) => {
                logging::log_setup_registered(self.owner, member.name(), outcome.is_exception());
                self.records
                    .push(SetupRecord::new(member, outcome, partial_only));
            }
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn finish(self) -> Result<Vec<SetupRecord>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

fn resolve<T: ?Sized + Mockable>(member: MemberId) -> Result<MemberId> {
    member::resolve(T::TYPE_NAME, T::members(), member)
}

/// Builder for a full mock: members without a setup return zero values.
#[must_use]
pub struct FullBuilder<T: ?Sized + Mockable> {
    buffer: SetupBuffer,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + Mockable> FullBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            buffer: SetupBuffer::new(T::TYPE_NAME, Config::global().builder.setup_capacity),
            _marker: PhantomData,
        }
    }

    /// Return `value` whenever `member` is called.
    ///
    /// Fallible members are set up with their `Result`, e.g. `Err(e)`.
    pub fn setup<R>(mut self, member: Member<T, R>, value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        self.buffer
            .push(resolve::<T>(member.id()), Outcome::value(value), false);
        self
    }

    /// Complete an async member immediately with `value`, wrapped in the
    /// member's future type.
    pub fn setup_async<F>(mut self, member: Member<T, F>, value: F::Output) -> Self
    where
        F: AsyncShape,
        F::Output: Clone + Sync,
    {
        self.buffer
            .push(resolve::<T>(member.id()), Outcome::completed::<F>(value), false);
        self
    }

    /// Raise `payload` as a panic whenever `member` is called. The payload
    /// reaches the caller untouched.
    pub fn throws<R, E>(mut self, member: Member<T, R>, payload: E) -> Self
    where
        E: Clone + Send + Sync + 'static,
    {
        self.buffer
            .push(resolve::<T>(member.id()), Outcome::raise(payload), false);
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn build(self) -> Result<VerifiableMock<T>> {
        VerifiableMock::assemble(self.buffer.finish()?, false)
    }
}

/// Builder for a partial mock: only members passed to [`PartialBuilder::only`]
/// are implemented, everything else panics with `NotImplemented`.
#[must_use]
pub struct PartialBuilder<T: ?Sized + Mockable> {
    buffer: SetupBuffer,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized + Mockable> PartialBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            buffer: SetupBuffer::new(T::TYPE_NAME, Config::global().builder.partial_capacity),
            _marker: PhantomData,
        }
    }

    pub fn only<R>(mut self, member: Member<T, R>, value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        self.buffer
            .push(resolve::<T>(member.id()), Outcome::value(value), true);
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn build(self) -> Result<VerifiableMock<T>> {
        VerifiableMock::assemble(self.buffer.finish()?, true)
    }
}
