//! Call-count and argument assertions against a mock's ledger.
//!
//! Verification only reads counts and argument history. The one thing it
//! writes is the verified set, which [`no_other_calls`] consults; only the
//! count assertions add to it.

use crate::instance::{lock, InstanceState};
use crate::logging;
use crate::member::MemberId;
use crate::{MockError, Result};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Mutex;

/// Expected call count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Exactly(usize),
    AtLeast(usize),
}

impl Expectation {
    pub fn is_satisfied_by(self, actual: usize) -> bool {
        match self {
            Expectation::Exactly(expected) => actual == expected,
            Expectation::AtLeast(minimum) => actual >= minimum,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, count) = match self {
            Expectation::Exactly(count) => ("", *count),
            Expectation::AtLeast(count) => ("at least ", *count),
        };
        let noun = if count == 1 { "call" } else { "calls" };
        write!(f, "{}{} {}", prefix, count, noun)
    }
}

/// Verification bound to one member of one mock.
pub struct VerifyHandle<'a> {
    instance: &'a Mutex<InstanceState>,
    member: Result<MemberId>,
}

impl<'a> VerifyHandle<'a> {
    pub(crate) fn new(instance: &'a Mutex<InstanceState>, member: Result<MemberId>) -> Self {
        Self { instance, member }
    }

    pub fn once(&self) -> Result<()> {
        self.expect(Expectation::Exactly(1))
    }

    pub fn times(&self, expected: usize) -> Result<()> {
        self.expect(Expectation::Exactly(expected))
    }

    pub fn never(&self) -> Result<()> {
        self.expect(Expectation::Exactly(0))
    }

    pub fn at_least(&self, minimum: usize) -> Result<()> {
        self.expect(Expectation::AtLeast(minimum))
    }

    /// Narrow verification to the argument at `position`, read as `A`.
    ///
    /// Borrowed parameters are recorded owned: use `String` for `&str`.
    pub fn with_argument<A: Any>(&self, position: usize) -> ArgHandle<'a, A> {
        ArgHandle {
            instance: self.instance,
            member: self.member.clone(),
            position,
            _marker: PhantomData,
        }
    }

    fn expect(&self, expectation: Expectation) -> Result<()> {
        let member = self.member.clone()?;
        let mut state = lock(self.instance);
        let actual = state.ledger().call_count(member);
        if !expectation.is_satisfied_by(actual) {
            logging::log_verification_failed(member.name(), &expectation.to_string(), actual);
            return Err(MockError::VerificationFailed {
                member: member.name().to_string(),
                expected: expectation,
                actual,
            });
        }
        state.ledger_mut().mark_verified(member);
        logging::log_verification_passed(member.name(), actual);
        Ok(())
    }
}

/// Argument predicate check for one member and position.
pub struct ArgHandle<'a, A> {
    instance: &'a Mutex<InstanceState>,
    member: Result<MemberId>,
    position: usize,
    _marker: PhantomData<fn() -> A>,
}

impl<A: Any> ArgHandle<'_, A> {
    /// Succeeds if any recorded call has a matching argument at the position.
    ///
    /// Only count assertions mark a member verified; a match alone does not
    /// satisfy `verify_no_other_calls`. The predicate runs unlocked and may
    /// read the mock.
    pub fn matching<P>(&self, predicate: P) -> Result<()>
    where
        P: Fn(&A) -> bool,
    {
        let member = self.member.clone()?;
        let calls = lock(self.instance).ledger().calls(member).to_vec();
        let matched = calls
            .iter()
            .filter_map(|args| args.get::<A>(self.position))
            .any(|arg| predicate(arg));

        if !matched {
            return Err(MockError::NoMatchingCall {
                member: member.name().to_string(),
                position: self.position,
                arg_type: std::any::type_name::<A>().to_string(),
            });
        }
        logging::log_argument_matched(member.name(), self.position);
        Ok(())
    }
}

/// Fail if any called member was never verified.
pub fn no_other_calls(instance: &Mutex<InstanceState>) -> Result<()> {
    let unverified = lock(instance).ledger().unverified();
    if unverified.is_empty() {
        return Ok(());
    }
    let members: Vec<String> = unverified.iter().map(|m| m.name().to_string()).collect();
    logging::log_unverified_calls(&members);
    Err(MockError::UnverifiedCalls { members })
}
