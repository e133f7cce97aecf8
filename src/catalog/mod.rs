pub mod controller;
pub mod featured;
pub mod filter;

pub use controller::{CatalogController, CatalogState, ViewMode};
pub use featured::{featured_properties, load_featured, FEATURED_LIMIT};
pub use filter::{filter_properties, matches, BedroomFilter, FilterCriteria};
