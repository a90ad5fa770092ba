//! Time-bounded key/value storage.
//!
//! `ExpiringStore` timestamps entries on insert using an injected `Clock` and
//! treats entries older than the TTL as absent. Expiry is lazy; call
//! `purge_expired` to reclaim memory held by entries nobody reads anymore.

mod clock;
mod expiring;

pub use clock::{Clock, ManualClock, SystemClock};
pub use expiring::ExpiringStore;
