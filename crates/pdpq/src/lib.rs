//! Top-level facade crate for pdpq.
//!
//! Re-exports core types and the client library so users can depend on a single crate.

pub mod core {
    pub use pdpq_core::*;
}

pub mod client {
    pub use pdpq_client::*;
}
