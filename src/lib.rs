pub mod catalog;
pub mod config;
pub mod contact;
pub mod detail;
pub mod errors;
pub mod format;
pub mod map;
pub mod models;
pub mod store;

pub use catalog::{BedroomFilter, CatalogController, CatalogState, FilterCriteria, ViewMode};
pub use config::Config;
pub use contact::{ContactError, ContactField, ContactForm, ContactPage, SubmissionState};
pub use detail::{DetailState, Gallery, PropertyDetail};
pub use errors::{StoreError, StoreResult};
pub use map::{MapView, Marker};
pub use models::{
    ContactRequest, Coordinates, Property, PropertyInterest, PropertyStatus, PropertyStyle,
};
pub use store::{HttpListingStore, ListingStore, MemoryListingStore, OrderSpec, PropertyQuery};
