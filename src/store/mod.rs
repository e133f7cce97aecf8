pub mod http;
pub mod memory;
pub mod traits;
pub mod types;

pub use http::HttpListingStore;
pub use memory::MemoryListingStore;
pub use traits::ListingStore;
pub use types::{limits, OrderSpec, PropertyQuery};
