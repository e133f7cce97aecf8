use crate::errors::StoreResult;
use crate::format::compact_price;
use crate::models::{Coordinates, Property};
use crate::store::{ListingStore, OrderSpec};
use tracing::debug;

/// Map opens over Milan
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 45.4642,
    lng: 9.19,
};
pub const DEFAULT_ZOOM: u8 = 4;
pub const TILE_URL_TEMPLATE: &str =
    "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub property_id: String,
    pub position: Coordinates,
    pub title: String,
    /// Popup price line, empty when the listing has no price
    pub price_label: String,
}

impl Marker {
    /// Marker for a property, or `None` when it cannot be placed.
    ///
    /// Only missing or non-finite coordinates are left off. A latitude or
    /// longitude of exactly 0.0 is a real position (Gulf of Guinea, the
    /// meridian) and gets a marker.
    pub fn for_property(property: &Property) -> Option<Self> {
        let position = property.coordinates.filter(Coordinates::is_finite)?;
        Some(Self {
            property_id: property.id.clone(),
            position,
            title: property.display_title().to_string(),
            price_label: property.price.map(compact_price).unwrap_or_default(),
        })
    }
}

/// Markers for every placeable property, in listing order
pub fn markers(properties: &[Property]) -> Vec<Marker> {
    properties.iter().filter_map(Marker::for_property).collect()
}

/// Map page state: the placed properties and the one whose card is open
#[derive(Debug, Clone)]
pub struct MapView {
    properties: Vec<Property>,
    markers: Vec<Marker>,
    selected: Option<usize>,
}

impl MapView {
    pub fn new(properties: Vec<Property>) -> Self {
        let properties: Vec<Property> = properties
            .into_iter()
            .filter(|p| p.coordinates.map_or(false, |c| c.is_finite()))
            .collect();
        let markers = markers(&properties);
        Self {
            properties,
            markers,
            selected: None,
        }
    }

    /// Fetch up to `limit` newest listings and place them
    pub async fn load(store: &dyn ListingStore, limit: usize) -> StoreResult<Self> {
        let listings = store.list(&OrderSpec::newest_first(), limit).await?;
        debug!("Map fetched {} listings", listings.len());
        Ok(Self::new(listings))
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn center(&self) -> Coordinates {
        DEFAULT_CENTER
    }

    pub fn zoom(&self) -> u8 {
        DEFAULT_ZOOM
    }

    /// Open the card for a marker; unknown ids leave the selection unchanged
    pub fn select(&mut self, property_id: &str) -> bool {
        match self.properties.iter().position(|p| p.id == property_id) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Property> {
        self.selected.map(|index| &self.properties[index])
    }
}
