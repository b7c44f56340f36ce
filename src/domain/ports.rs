use crate::domain::entry::{EntryCollection, EntryQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to a content store's entries.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get_entries(&self, query: &EntryQuery) -> Result<EntryCollection>;
}
