//! Mocking of free functions and associated constants.
//!
//! A static surface is a marker type that lists its members once through
//! [`StaticSurface::describe`], pairing each [`Member`] token with the real
//! implementation. The resulting [`StaticTable`] is cached for the life of
//! the process. A [`StaticMock`] intercepts calls by member token: a setup
//! wins, otherwise the real implementation runs. There is no partial mode.

use crate::builder::SetupBuffer;
use crate::config::Config;
use crate::dispatch;
use crate::instance::{lock, SharedInstance};
use crate::logging;
use crate::member::{self, Member, MemberDescriptor, MemberId, MemberKind};
use crate::pool;
use crate::setup::Outcome;
use crate::values::Arguments;
use crate::verify::{self, VerifyHandle};
use crate::{MockError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

type RealFn = Arc<dyn Fn(&Arguments) -> Box<dyn Any + Send> + Send + Sync>;

/// A type whose static members can be mocked.
///
/// ```ignore
/// struct Clock;
///
/// impl StaticSurface for Clock {
///     const TYPE_NAME: &'static str = "Clock";
///
///     fn describe(table: &mut StaticTableBuilder<Self>) {
///         table.method(clock::NOW, |_| clock::now());
///         table.property(clock::ZONE, || clock::ZONE_NAME.to_string());
///     }
/// }
/// ```
pub trait StaticSurface: Sized + 'static {
    const TYPE_NAME: &'static str;

    fn describe(table: &mut StaticTableBuilder<Self>);
}

/// Collects the real implementations of a static surface.
pub struct StaticTableBuilder<S> {
    methods: HashMap<MemberId, RealFn>,
    properties: HashMap<MemberId, RealFn>,
    descriptors: Vec<MemberDescriptor>,
    _marker: PhantomData<fn() -> S>,
}

impl<S: StaticSurface> StaticTableBuilder<S> {
    fn new() -> Self {
        Self {
            methods: HashMap::new(),
            properties: HashMap::new(),
            descriptors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Register a static method. The closure receives the recorded
    /// arguments of the intercepted call.
    pub fn method<R, F>(&mut self, member: Member<S, R>, real: F) -> &mut Self
    where
        R: Send + 'static,
        F: Fn(&Arguments) -> R + Send + Sync + 'static,
    {
        self.descriptors.push(descriptor::<S, R>(member, MemberKind::Method));
        self.methods.insert(
            member.id(),
            Arc::new(move |args: &Arguments| -> Box<dyn Any + Send> { Box::new(real(args)) }),
        );
        self
    }

    /// Register a static property getter.
    pub fn property<R, F>(&mut self, member: Member<S, R>, real: F) -> &mut Self
    where
        R: Send + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.descriptors
            .push(descriptor::<S, R>(member, MemberKind::Property));
        self.properties.insert(
            member.id(),
            Arc::new(move |_: &Arguments| -> Box<dyn Any + Send> { Box::new(real()) }),
        );
        self
    }

    fn finish(self) -> StaticTable {
        StaticTable {
            type_name: S::TYPE_NAME,
            methods: self.methods,
            properties: self.properties,
            descriptors: self.descriptors,
        }
    }
}

fn descriptor<S, R>(member: Member<S, R>, kind: MemberKind) -> MemberDescriptor {
    MemberDescriptor {
        id: member.id(),
        kind,
        name: member.name(),
        signature: member.signature(),
        params: &[],
        returns: std::any::type_name::<R>(),
    }
}

/// Real implementations of one static surface, split by member kind.
pub struct StaticTable {
    type_name: &'static str,
    methods: HashMap<MemberId, RealFn>,
    properties: HashMap<MemberId, RealFn>,
    descriptors: Vec<MemberDescriptor>,
}

impl StaticTable {
    /// The cached table of `S`, described on first use.
    pub fn of<S: StaticSurface>() -> Arc<StaticTable> {
        if let Some(table) = tables()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<S>())
        {
            return Arc::clone(table);
        }

        let mut builder = StaticTableBuilder::<S>::new();
        S::describe(&mut builder);
        let table = builder.finish();
        logging::log_static_table_cached(S::TYPE_NAME, table.methods.len(), table.properties.len());

        let mut map = tables().write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(TypeId::of::<S>()).or_insert_with(|| Arc::new(table)))
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn methods(&self) -> usize {
        self.methods.len()
    }

    pub fn properties(&self) -> usize {
        self.properties.len()
    }

    pub fn descriptors(&self) -> &[MemberDescriptor] {
        &self.descriptors
    }

    fn resolve(&self, id: MemberId) -> Result<MemberId> {
        member::resolve(self.type_name, &self.descriptors, id)
    }

    fn method(&self, id: MemberId) -> Option<&RealFn> {
        self.methods.get(&id)
    }

    fn property(&self, id: MemberId) -> Option<&RealFn> {
        self.properties.get(&id)
    }
}

impl fmt::Debug for StaticTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTable")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.len())
            .field("properties", &self.properties.len())
            .finish()
    }
}

type TableMap = HashMap<TypeId, Arc<StaticTable>>;

fn tables() -> &'static RwLock<TableMap> {
    static TABLES: OnceLock<RwLock<TableMap>> = OnceLock::new();
    TABLES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Builder for a static mock.
#[must_use]
pub struct StaticBuilder<S: StaticSurface> {
    table: Arc<StaticTable>,
    buffer: SetupBuffer,
    _marker: PhantomData<fn() -> S>,
}

impl<S: StaticSurface> StaticBuilder<S> {
    pub(crate) fn new() -> Self {
        Self {
            table: StaticTable::of::<S>(),
            buffer: SetupBuffer::new(S::TYPE_NAME, Config::global().builder.setup_capacity),
            _marker: PhantomData,
        }
    }

    /// Return `value` instead of running the real member.
    pub fn returns<R>(mut self, member: Member<S, R>, value: R) -> Self
    where
        R: Clone + Send + Sync + 'static,
    {
        let resolved = self.table.resolve(member.id());
        self.buffer.push(resolved, Outcome::value(value), false);
        self
    }

    pub fn build(self) -> Result<StaticMock<S>> {
        let setups = self.buffer.finish()?;
        let instance = pool::rent(TypeId::of::<S>(), S::TYPE_NAME);
        let setup_count = setups.len();
        lock(&instance).initialize(setups, false);
        logging::log_mock_built(S::TYPE_NAME, setup_count, false);
        Ok(StaticMock {
            instance,
            table: self.table,
            _marker: PhantomData,
        })
    }
}

/// A built static mock.
pub struct StaticMock<S: StaticSurface> {
    instance: SharedInstance,
    table: Arc<StaticTable>,
    _marker: PhantomData<fn() -> S>,
}

impl<S: StaticSurface> StaticMock<S> {
    /// Intercept a call to a static method.
    ///
    /// The call is recorded before anything else happens. A setup returns
    /// its value; otherwise the real implementation runs with `args`.
    pub fn invoke<R: 'static>(&self, member: Member<S, R>, args: Arguments) -> Result<R> {
        let id = self.table.resolve(member.id())?;
        let real = self
            .table
            .method(id)
            .ok_or_else(|| wrong_kind::<S>(id, "member is not a method"))?;
        self.intercept(id, args, real)
    }

    /// Read a static property. Methods are rejected before anything is
    /// recorded.
    pub fn get<R: 'static>(&self, member: Member<S, R>) -> Result<R> {
        let id = self.table.resolve(member.id())?;
        let real = self
            .table
            .property(id)
            .ok_or_else(|| wrong_kind::<S>(id, "member is not a property"))?;
        self.intercept(id, Arguments::new(), real)
    }

    fn intercept<R: 'static>(&self, id: MemberId, args: Arguments, real: &RealFn) -> Result<R> {
        let setup = {
            let mut state = lock(&self.instance);
            state.ledger_mut().record(id, args.clone());
            state.setups().find(id).cloned()
        };
        logging::log_call_recorded(S::TYPE_NAME, id.name());

        if let Some(record) = setup {
            return Ok(dispatch::resolve_outcome(id, record.outcome()));
        }

        real(&args)
            .downcast::<R>()
            .map(|value| *value)
            .map_err(|_| MockError::ResultTypeMismatch {
                member: id.name().to_string(),
                expected: std::any::type_name::<R>().to_string(),
            })
    }

    pub fn verify<R>(&self, member: Member<S, R>) -> VerifyHandle<'_> {
        VerifyHandle::new(&self.instance, self.table.resolve(member.id()))
    }

    pub fn verify_no_other_calls(&self) -> Result<()> {
        verify::no_other_calls(&self.instance)
    }

    pub fn call_count<R>(&self, member: Member<S, R>) -> Result<usize> {
        let id = self.table.resolve(member.id())?;
        Ok(lock(&self.instance).ledger().call_count(id))
    }

    pub fn dispose(self) -> bool {
        pool::give_back(TypeId::of::<S>(), S::TYPE_NAME, self.instance)
    }
}

fn wrong_kind<S: StaticSurface>(id: MemberId, reason: &str) -> MockError {
    MockError::InvalidReference {
        owner: S::TYPE_NAME.to_string(),
        member: id.name().to_string(),
        reason: reason.to_string(),
    }
}

impl<S: StaticSurface> fmt::Debug for StaticMock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMock")
            .field("type", &S::TYPE_NAME)
            .field("table", &self.table)
            .finish()
    }
}
