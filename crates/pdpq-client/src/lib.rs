//! pdpq client library entry.
//!
//! Wires the expiring store, descriptor cache, codecs, HTTP adapters, and the
//! decision resolver into one client stack. Consumed by the binary
//! (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod app_state;
pub mod cache;
pub mod codec;
pub mod config;
pub mod net;
pub mod obs;
pub mod resolve;
pub mod store;
