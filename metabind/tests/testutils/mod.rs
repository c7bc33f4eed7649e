//! Test utilities for metabind integration tests
//!
//! Fixture sources are [`InMemoryProvider`](metabind::InMemoryProvider)
//! instances with rows that carry every label their entity binds, so a
//! clean extraction produces no diagnostics.

#![allow(dead_code)]

pub mod fixture;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
