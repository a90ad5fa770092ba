use std::sync::Arc;

use pdpq_core::protocol::AuthorityDescriptor;
use pdpq_core::Result;

use super::DescriptorCache;
use crate::codec::MetadataDecoder;

/// Resolves authority descriptors from metadata documents held in the cache.
pub struct AuthorityResolver {
    cache: Arc<DescriptorCache>,
    decoder: Arc<dyn MetadataDecoder>,
    skip_tls_validation: bool,
}

impl AuthorityResolver {
    pub fn new(
        cache: Arc<DescriptorCache>,
        decoder: Arc<dyn MetadataDecoder>,
        skip_tls_validation: bool,
    ) -> Self {
        Self {
            cache,
            decoder,
            skip_tls_validation,
        }
    }

    pub async fn resolve(&self, metadata_url: &str) -> Result<AuthorityDescriptor> {
        let doc = self.cache.fetch(metadata_url, self.skip_tls_validation).await?;
        self.decoder.decode_authority(&doc)
    }
}
