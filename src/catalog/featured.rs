use crate::errors::StoreResult;
use crate::models::Property;
use crate::store::{limits, ListingStore, OrderSpec};

/// Home page shows at most this many featured listings
pub const FEATURED_LIMIT: usize = 6;

/// First featured listings in store order
pub fn featured_properties(properties: &[Property]) -> Vec<&Property> {
    properties
        .iter()
        .filter(|p| p.featured)
        .take(FEATURED_LIMIT)
        .collect()
}

/// Fetch the home page listing set and pick its featured entries
pub async fn load_featured(store: &dyn ListingStore) -> StoreResult<Vec<Property>> {
    let listings = store.list(&OrderSpec::newest_first(), limits::HOME).await?;
    Ok(featured_properties(&listings).into_iter().cloned().collect())
}
