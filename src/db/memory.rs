use async_trait::async_trait;
use dashmap::DashMap;

use super::{MappingStore, StoreResult, UrlMapping};

/// Process-local store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mappings: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn put(&self, mapping: &UrlMapping) -> StoreResult<()> {
        self.mappings
            .insert(mapping.short_code.clone(), mapping.long_url.clone());
        Ok(())
    }

    async fn get(&self, short_code: &str) -> StoreResult<Option<UrlMapping>> {
        Ok(self.mappings.get(short_code).map(|entry| UrlMapping {
            short_code: short_code.to_string(),
            long_url: entry.value().clone(),
        }))
    }
}
