//! pdpq core: protocol value types, status interpretation, and the error surface.
//!
//! This crate holds the shapes exchanged with a policy decision authority
//! (decision queries, decoded responses, party descriptors) and the pure status
//! interpreter. It carries no transport or runtime dependencies so the same
//! types can back the HTTP client, tests, and alternative wire bindings.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `PdpqError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, PdpqError, Result};
