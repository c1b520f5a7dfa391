pub mod builder;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod instance;
pub mod ledger;
pub mod logging;
pub mod member;
pub mod mock;
pub mod pool;
pub mod proxy;
pub mod setup;
pub mod shape;
pub mod statics;
pub mod ui;
pub mod values;
pub mod verify;
use miette::Diagnostic;

pub use builder::{FullBuilder, PartialBuilder};
pub use dispatch::{caught_error, register_proxy, Dispatcher, Mockable, ProxyFactory};
pub use futures_util::future::{BoxFuture, Ready};
pub use member::{Member, MemberDescriptor, MemberId, MemberKind};
pub use mock::{Mock, VerifiableMock};
pub use setup::{Outcome, SetupRecord};
pub use shape::{ApiShape, MockShape, ValidationResult};
pub use statics::{StaticBuilder, StaticMock, StaticSurface, StaticTable, StaticTableBuilder};
pub use values::{ArgValue, Arguments, AsyncKind, AsyncShape, ZeroValue};
pub use verify::{ArgHandle, Expectation, VerifyHandle};

/// Result type alias for the mock engine
pub type Result<T> = std::result::Result<T, MockError>;

/// Error types for the mock engine
#[derive(Debug, Clone, thiserror::Error, Diagnostic)]
pub enum MockError {
    #[error("Invalid member reference {owner}::{member}: {reason}")]
    #[diagnostic(
        code(litmock::invalid_reference),
        help("Pass a member token generated for this type, e.g. `user_repository::get_by_id`. Tokens of other interfaces are rejected.")
    )]
    InvalidReference {
        owner: String,
        member: String,
        reason: String,
    },

    #[error("Expected {expected} to {member}, but received {actual}")]
    #[diagnostic(
        code(litmock::verification_failed),
        help("Check that the code under test calls the member the expected number of times.")
    )]
    VerificationFailed {
        member: String,
        expected: Expectation,
        actual: usize,
    },

    #[error("No call to {member} had an argument of type {arg_type} at position {position} matching the predicate")]
    #[diagnostic(
        code(litmock::no_matching_call),
        help("Borrowed parameters are recorded owned: verify `&str` arguments as `String` and `&T` as `T`.")
    )]
    NoMatchingCall {
        member: String,
        position: usize,
        arg_type: String,
    },

    #[error("{owner}::{member} is not implemented by this partial mock")]
    #[diagnostic(
        code(litmock::not_implemented),
        help("Add the member with `.only(...)` or use `Mock::of` for a full mock.")
    )]
    NotImplemented { owner: String, member: String },

    #[error("No substitute is available for {type_name}")]
    #[diagnostic(
        code(litmock::proxy_unavailable),
        help("Declare the interface with `mock_interface!` or register a factory with `register_proxy`.")
    )]
    ProxyUnavailable { type_name: String },

    #[error("Unverified calls to: {}", members.join(", "))]
    #[diagnostic(
        code(litmock::unverified_calls),
        help("Verify each listed member, or drop the `verify_no_other_calls` assertion.")
    )]
    UnverifiedCalls { members: Vec<String> },

    #[error("{member} returns {result_type}, which has no zero value")]
    #[diagnostic(
        code(litmock::no_zero_value),
        help("Set the member up explicitly, or declare the type with `mock_value!` if it implements Default.")
    )]
    NoZeroValue { member: String, result_type: String },

    #[error("Configured result of {member} is not a {expected}")]
    #[diagnostic(code(litmock::result_type_mismatch))]
    ResultTypeMismatch { member: String, expected: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(litmock::config_error),
        help("Check `.litmock.toml` or the file named by LITMOCK_CONFIG.")
    )]
    Config(String),

    #[error("Shape error: {0}")]
    #[diagnostic(
        code(litmock::shape_error),
        help("Shape files are JSON documents with `methods` and `properties` arrays.")
    )]
    Shape(String),
}
