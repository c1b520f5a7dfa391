//! Interfaces and value types shared by the integration tests.
#![allow(dead_code)]

use litmock::{
    mock_interface, mock_value, Arguments, BoxFuture, Member, Ready, StaticSurface,
    StaticTableBuilder,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl User {
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResponse {
    pub data: String,
    pub status_code: u16,
}

/// Connection failure raised by `ExternalApi` setups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRefused(pub String);

/// A value with no sensible default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

mock_value!(User, ApiResponse);
mock_value!(no_zero: SessionToken);

pub trait UserRepository: Send + Sync {
    fn get_by_id(&self, id: i32) -> User;
    fn save_async(&self, user: &User) -> BoxFuture<'static, bool>;
    fn get_all_async(&self) -> BoxFuture<'static, Vec<User>>;
    fn delete(&self, id: i32);
    fn count(&self) -> usize;
}

mock_interface! {
    pub UserRepository => UserRepositoryProxy, members user_repository {
        method get_by_id(&self, id: i32) -> User;
        method save_async(&self, user: &User) -> BoxFuture<'static, bool>;
        method get_all_async(&self) -> BoxFuture<'static, Vec<User>>;
        method delete(&self, id: i32);
        property count(&self) -> usize;
    }
}

pub trait EmailService: Send + Sync {
    fn send_async(&self, to: &str, subject: &str, body: &str) -> BoxFuture<'static, bool>;
    fn send_bulk_async(&self, recipients: Vec<String>, subject: &str) -> BoxFuture<'static, bool>;
}

mock_interface! {
    pub EmailService => EmailServiceProxy, members email_service {
        method send_async(&self, to: &str, subject: &str, body: &str) -> BoxFuture<'static, bool>;
        method send_bulk_async(&self, recipients: Vec<String>, subject: &str) -> BoxFuture<'static, bool>;
    }
}

pub trait ExternalApi: Send + Sync {
    fn fetch_data(&self, endpoint: &str) -> Result<ApiResponse, ConnectionRefused>;
    fn health_check(&self);
    fn open_session(&self) -> SessionToken;
}

mock_interface! {
    pub ExternalApi => ExternalApiProxy, members external_api {
        method fetch_data(&self, endpoint: &str) -> Result<ApiResponse, ConnectionRefused>;
        method health_check(&self);
        method open_session(&self) -> SessionToken;
    }
}

pub trait AsyncRepository: Send + Sync {
    fn get_async(&self, id: i32) -> Ready<User>;
}

mock_interface! {
    pub AsyncRepository => AsyncRepositoryProxy, members async_repository {
        method get_async(&self, id: i32) -> Ready<User>;
    }
}

/// Static surface over a wall clock.
pub struct Clock;

pub mod clock {
    use super::Clock;
    use litmock::Member;

    pub const NOW_MILLIS: Member<Clock, u64> = Member::method("Clock", "now_millis", "fn now_millis() -> u64");
    pub const OFFSET: Member<Clock, i64> =
        Member::method("Clock", "offset", "fn offset(from: u64, to: u64) -> i64");
    pub const ZONE: Member<Clock, String> = Member::property("Clock", "zone", "const ZONE: &str");

    pub fn now_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn offset(from: u64, to: u64) -> i64 {
        to as i64 - from as i64
    }

    pub const ZONE_NAME: &str = "UTC";
}

impl StaticSurface for Clock {
    const TYPE_NAME: &'static str = "Clock";

    fn describe(table: &mut StaticTableBuilder<Self>) {
        table
            .method(clock::NOW_MILLIS, |_| clock::now_millis())
            .method(clock::OFFSET, |args: &Arguments| {
                let from = args.get::<u64>(0).copied().unwrap_or(0);
                let to = args.get::<u64>(1).copied().unwrap_or(0);
                clock::offset(from, to)
            })
            .property(clock::ZONE, || clock::ZONE_NAME.to_string());
    }
}

/// Member of `Clock` that `describe` never lists.
pub const CLOCK_SLEEP: Member<Clock, ()> = Member::method("Clock", "sleep", "fn sleep(ms: u64)");
