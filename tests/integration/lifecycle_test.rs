//! Asset lifecycle integration tests
//!
//! Coordinated deletion and background distribution uploads, wired with real
//! HTTP clients against wiremock servers and with the Postgres stores.

#![allow(dead_code)]

mod common;
mod deletion;
mod distribution;
mod postgres;
