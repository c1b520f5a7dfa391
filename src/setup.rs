use crate::member::MemberId;
use crate::values::{AsyncKind, AsyncShape};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Produces a fresh boxed value each time a setup is hit.
pub(crate) type Producer = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

/// The configured result of a setup: a value, a pre-completed future, or a
/// payload to raise.
#[derive(Clone)]
pub enum Outcome {
    Return(Producer),
    Completed { kind: AsyncKind, producer: Producer },
    Raise(Producer),
}

impl Outcome {
    pub fn value<R>(value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        Outcome::Return(Arc::new(move || -> Box<dyn Any + Send> { Box::new(value.clone()) }))
    }

    pub fn completed<F>(value: F::Output) -> Self
    where
        F: AsyncShape,
        F::Output: Clone + Sync,
    {
        Outcome::Completed {
            kind: F::KIND,
            producer: Arc::new(move || -> Box<dyn Any + Send> {
                Box::new(F::completed(value.clone()))
            }),
        }
    }

    pub fn raise<E>(payload: E) -> Self
    where
        E: Clone + Send + Sync + 'static,
    {
        Outcome::Raise(Arc::new(move || -> Box<dyn Any + Send> { Box::new(payload.clone()) }))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, Outcome::Raise(_))
    }

    pub(crate) fn produce(&self) -> Box<dyn Any + Send> {
        match self {
            Outcome::Return(producer)
            | Outcome::Completed { producer, .. }
            | Outcome::Raise(producer) => producer(),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Return(_) => f.write_str("Return"),
            Outcome::Completed { kind, .. } => write!(f, "Completed({:?})", kind),
            Outcome::Raise(_) => f.write_str("Raise"),
        }
    }
}

/// One configured member outcome. Immutable once created.
#[derive(Clone, Debug)]
pub struct SetupRecord {
    member: MemberId,
    outcome: Outcome,
    partial_only: bool,
}

impl SetupRecord {
    pub fn new(member: MemberId, outcome: Outcome, partial_only: bool) -> Self {
        Self {
            member,
            outcome,
            partial_only,
        }
    }

    pub fn member(&self) -> MemberId {
        self.member
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_partial_only(&self) -> bool {
        self.partial_only
    }

    pub fn is_exception(&self) -> bool {
        self.outcome.is_exception()
    }
}

/// Setups of one built mock. Replaced wholesale on every build.
#[derive(Debug, Default)]
pub struct SetupTable {
    records: Vec<SetupRecord>,
}

impl SetupTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Drop the current setups and take `records` in their place.
    pub fn replace(&mut self, records: Vec<SetupRecord>) {
        self.records.clear();
        self.records.extend(records);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// First setup registered for `member`.
    pub fn find(&self, member: MemberId) -> Option<&SetupRecord> {
        self.records.iter().find(|record| record.member == member)
    }

    pub fn contains(&self, member: MemberId) -> bool {
        self.find(member).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetupRecord> {
        self.records.iter()
    }
}
