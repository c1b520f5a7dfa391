//! Structured logging utilities for the mock engine.
//!
//! This module provides helper functions for consistent, structured logging
//! across the library using the `tracing` crate. The library never installs
//! a subscriber; the `litmock` binary and test harnesses do.

/// Log a setup appended to a builder.
pub fn log_setup_registered(owner: &str, member: &str, raises: bool) {
    tracing::trace!(owner, member, raises, "Setup registered");
}

/// Log a finished build.
pub fn log_mock_built(owner: &str, setups: usize, partial: bool) {
    tracing::debug!(owner, setups, partial, "Mock built");
}

pub fn log_proxy_registered(owner: &str) {
    tracing::debug!(owner, "Proxy factory registered");
}

/// Log an intercepted call.
pub fn log_call_recorded(owner: &str, member: &str) {
    tracing::trace!(owner, member, "Call recorded");
}

/// Log a call that found no setup.
pub fn log_unmatched_call(owner: &str, member: &str, partial: bool) {
    if partial {
        tracing::debug!(owner, member, "Call to member missing from partial mock");
    } else {
        tracing::trace!(owner, member, "Call fell back to zero value");
    }
}

/// Log a configured payload about to be raised.
pub fn log_configured_raise(member: &str) {
    tracing::debug!(member, "Raising configured payload");
}

pub fn log_verification_passed(member: &str, calls: usize) {
    tracing::trace!(member, calls, "Verification passed");
}

/// Log a failed call-count assertion.
pub fn log_verification_failed(member: &str, expected: &str, actual: usize) {
    tracing::debug!(member, expected, actual, "Verification failed");
}

/// Log an argument predicate that found a matching call.
pub fn log_argument_matched(member: &str, position: usize) {
    tracing::trace!(member, position, "Argument matched");
}

pub fn log_unverified_calls(members: &[String]) {
    tracing::debug!(count = members.len(), members = %members.join(", "), "Unverified calls");
}

/// Log a rent from the instance pool.
pub fn log_pool_rent(owner: &str, reused: bool) {
    tracing::trace!(owner, reused, "Instance rented");
}

/// Log a returned instance, or one dropped because the pool was full or
/// the instance was still shared.
pub fn log_pool_return(owner: &str, returned: bool) {
    if returned {
        tracing::trace!(owner, "Instance returned to pool");
    } else {
        tracing::debug!(owner, "Instance discarded");
    }
}

/// Log the first description of a static surface.
pub fn log_static_table_cached(owner: &str, methods: usize, properties: usize) {
    tracing::debug!(owner, methods, properties, "Static member table cached");
}

/// Log shape validation start.
pub fn log_shape_validation(mock: &str, api: &str) {
    tracing::info!(mock, api, "Validating mock shape");
}

/// Log shape validation result.
pub fn log_shape_mismatches(count: usize) {
    if count == 0 {
        tracing::info!("Mock shape matches API");
    } else {
        tracing::warn!(mismatches = count, "Mock shape drifted from API");
    }
}
