//! Descriptor caching.
//!
//! `DescriptorCache` fronts a `NetworkFetcher` with an `ExpiringStore`;
//! `AuthorityResolver` turns cached metadata documents into descriptors.

mod authority;
mod descriptor;

pub use authority::AuthorityResolver;
pub use descriptor::DescriptorCache;
