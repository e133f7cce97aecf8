use crate::errors::StoreResult;
use crate::models::{ContactRequest, Property};
use crate::store::types::{OrderSpec, PropertyQuery};
use async_trait::async_trait;

/// Narrow view of the backend that owns listings and contact requests.
/// Pages take it as an injected collaborator so the core can run against
/// the in-memory store in tests.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch up to `limit` properties in the given order
    async fn list(&self, order: &OrderSpec, limit: usize) -> StoreResult<Vec<Property>>;

    /// Fetch properties whose fields equal every entry of the query
    async fn filter(&self, query: &PropertyQuery) -> StoreResult<Vec<Property>>;

    /// Persist one contact submission
    async fn create(&self, request: &ContactRequest) -> StoreResult<()>;

    /// Name of the backend, for logs
    fn store_name(&self) -> &'static str;
}
