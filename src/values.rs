//! Values flowing through a mock: recorded arguments, zero values used by
//! the full-mock fallback, and the two pre-completed async result shapes.

use futures_util::future::{self, BoxFuture, Ready};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

/// Conversion of a call argument into the owned value kept in the ledger.
///
/// Borrowed parameters are recorded as their owned form, so a `&str`
/// argument is recorded as a `String` and `&User` as `User`.
pub trait ArgValue {
    type Owned: Any + Send + Clone;

    fn to_arg(&self) -> Self::Owned;
}

macro_rules! copy_arg_values {
    ($($ty:ty),* $(,)?) => {$(
        impl ArgValue for $ty {
            type Owned = $ty;

            fn to_arg(&self) -> $ty {
                *self
            }
        }
    )*};
}

copy_arg_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    Duration,
);

impl ArgValue for String {
    type Owned = String;

    fn to_arg(&self) -> String {
        self.clone()
    }
}

impl ArgValue for str {
    type Owned = String;

    fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl<T: ArgValue + ?Sized> ArgValue for &T {
    type Owned = T::Owned;

    fn to_arg(&self) -> T::Owned {
        (**self).to_arg()
    }
}

impl<T: ArgValue> ArgValue for [T] {
    type Owned = Vec<T::Owned>;

    fn to_arg(&self) -> Self::Owned {
        self.iter().map(ArgValue::to_arg).collect()
    }
}

impl<T: ArgValue> ArgValue for Vec<T> {
    type Owned = Vec<T::Owned>;

    fn to_arg(&self) -> Self::Owned {
        self.iter().map(ArgValue::to_arg).collect()
    }
}

impl<T: ArgValue> ArgValue for Option<T> {
    type Owned = Option<T::Owned>;

    fn to_arg(&self) -> Self::Owned {
        self.as_ref().map(ArgValue::to_arg)
    }
}

impl<A: ArgValue, B: ArgValue> ArgValue for (A, B) {
    type Owned = (A::Owned, B::Owned);

    fn to_arg(&self) -> Self::Owned {
        (self.0.to_arg(), self.1.to_arg())
    }
}

trait ArgSlot: Any + Send {
    fn clone_slot(&self) -> Box<dyn ArgSlot>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Clone> ArgSlot for T {
    fn clone_slot(&self) -> Box<dyn ArgSlot> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The argument tuple of one intercepted call.
#[derive(Default)]
pub struct Arguments {
    values: Vec<Box<dyn ArgSlot>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append an already owned value.
    pub fn push<A: Any + Send + Clone>(mut self, value: A) -> Self {
        self.values.push(Box::new(value));
        self
    }

    /// Append a call argument, converting it to its recorded form.
    pub fn with_arg<P: ArgValue + ?Sized>(self, arg: &P) -> Self {
        self.push(arg.to_arg())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The argument at `position` if it is present and of type `A`.
    pub fn get<A: Any>(&self, position: usize) -> Option<&A> {
        self.values
            .get(position)
            .and_then(|value| (**value).as_any().downcast_ref::<A>())
    }
}

impl Clone for Arguments {
    fn clone(&self) -> Self {
        Self {
            values: self.values.iter().map(|value| (**value).clone_slot()).collect(),
        }
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}

/// Build an [`Arguments`] tuple from call arguments.
///
/// ```
/// let args = litmock::args![7, "seven"];
/// assert_eq!(args.get::<i32>(0), Some(&7));
/// assert_eq!(args.get::<String>(1).map(String::as_str), Some("seven"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::Arguments::new()$(.with_arg(&$arg))+
    };
}

/// The value a full mock returns for a member with no setup.
///
/// `None` means the type has no natural zero; an unmatched full-mock call
/// on such a member fails with [`crate::MockError::NoZeroValue`].
pub trait ZeroValue: Sized {
    fn zero_value() -> Option<Self>;
}

macro_rules! default_zero_values {
    ($($ty:ty),* $(,)?) => {$(
        impl ZeroValue for $ty {
            fn zero_value() -> Option<Self> {
                Some(<$ty>::default())
            }
        }
    )*};
}

default_zero_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    String, Duration,
);

impl<T> ZeroValue for Vec<T> {
    fn zero_value() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T> ZeroValue for VecDeque<T> {
    fn zero_value() -> Option<Self> {
        Some(VecDeque::new())
    }
}

impl<T> ZeroValue for Option<T> {
    fn zero_value() -> Option<Self> {
        Some(None)
    }
}

impl<K: Eq + Hash, V> ZeroValue for HashMap<K, V> {
    fn zero_value() -> Option<Self> {
        Some(HashMap::new())
    }
}

impl<T: Eq + Hash> ZeroValue for HashSet<T> {
    fn zero_value() -> Option<Self> {
        Some(HashSet::new())
    }
}

impl<K: Ord, V> ZeroValue for BTreeMap<K, V> {
    fn zero_value() -> Option<Self> {
        Some(BTreeMap::new())
    }
}

impl<T: Ord> ZeroValue for BTreeSet<T> {
    fn zero_value() -> Option<Self> {
        Some(BTreeSet::new())
    }
}

impl<T: ZeroValue, E> ZeroValue for Result<T, E> {
    fn zero_value() -> Option<Self> {
        T::zero_value().map(Ok)
    }
}

impl<A: ZeroValue, B: ZeroValue> ZeroValue for (A, B) {
    fn zero_value() -> Option<Self> {
        Some((A::zero_value()?, B::zero_value()?))
    }
}

impl<R: ZeroValue> ZeroValue for Ready<R> {
    fn zero_value() -> Option<Self> {
        R::zero_value().map(future::ready)
    }
}

impl<R: ZeroValue + Send + 'static> ZeroValue for BoxFuture<'static, R> {
    fn zero_value() -> Option<Self> {
        R::zero_value().map(<Self as AsyncShape>::completed)
    }
}

/// Which pre-completed future a member returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncKind {
    /// `futures_util::future::Ready<R>`
    Ready,
    /// `BoxFuture<'static, R>`
    Boxed,
}

/// An async result type the engine can hand back already completed.
pub trait AsyncShape: Sized + Send + 'static {
    type Output: Send + 'static;

    const KIND: AsyncKind;

    fn completed(value: Self::Output) -> Self;
}

impl<R: Send + 'static> AsyncShape for Ready<R> {
    type Output = R;

    const KIND: AsyncKind = AsyncKind::Ready;

    fn completed(value: R) -> Self {
        future::ready(value)
    }
}

impl<R: Send + 'static> AsyncShape for BoxFuture<'static, R> {
    type Output = R;

    const KIND: AsyncKind = AsyncKind::Boxed;

    fn completed(value: R) -> Self {
        Box::pin(future::ready(value))
    }
}

/// Opt a domain type into argument recording and the full-mock fallback.
///
/// The type must be `Clone + Default + Send + 'static`. Use the `no_zero:`
/// form for types without a sensible default; unmatched full-mock calls
/// returning them fail instead of inventing a value.
#[macro_export]
macro_rules! mock_value {
    (no_zero: $($ty:ty),+ $(,)?) => {$(
        impl $crate::ArgValue for $ty {
            type Owned = $ty;

            fn to_arg(&self) -> $ty {
                ::std::clone::Clone::clone(self)
            }
        }

        impl $crate::ZeroValue for $ty {
            fn zero_value() -> ::std::option::Option<Self> {
                ::std::option::Option::None
            }
        }
    )+};
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::ArgValue for $ty {
            type Owned = $ty;

            fn to_arg(&self) -> $ty {
                ::std::clone::Clone::clone(self)
            }
        }

        impl $crate::ZeroValue for $ty {
            fn zero_value() -> ::std::option::Option<Self> {
                ::std::option::Option::Some(<$ty as ::std::default::Default>::default())
            }
        }
    )+};
}
