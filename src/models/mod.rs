mod lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name a known enumeration value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

/// Architectural style of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStyle {
    Villa,
    Penthouse,
    Castello,
    Tenuta,
    Appartamento,
    Yacht,
}

impl PropertyStyle {
    pub const ALL: [PropertyStyle; 6] = [
        PropertyStyle::Villa,
        PropertyStyle::Penthouse,
        PropertyStyle::Castello,
        PropertyStyle::Tenuta,
        PropertyStyle::Appartamento,
        PropertyStyle::Yacht,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStyle::Villa => "villa",
            PropertyStyle::Penthouse => "penthouse",
            PropertyStyle::Castello => "castello",
            PropertyStyle::Tenuta => "tenuta",
            PropertyStyle::Appartamento => "appartamento",
            PropertyStyle::Yacht => "yacht",
        }
    }
}

impl fmt::Display for PropertyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStyle {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| ParseVariantError {
                kind: "style",
                value: s.to_string(),
            })
    }
}

/// Sales status of a listing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Disponibile,
    Riservato,
    Venduto,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 3] = [
        PropertyStatus::Disponibile,
        PropertyStatus::Riservato,
        PropertyStatus::Venduto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Disponibile => "disponibile",
            PropertyStatus::Riservato => "riservato",
            PropertyStatus::Venduto => "venduto",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseVariantError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Geographic position of a property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Listing record as returned by the store.
///
/// Decoding never fails on a malformed field: numbers that are not numbers,
/// unknown styles and broken coordinates all decode as absent so that one bad
/// record cannot take the catalog down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::uint")]
    pub price: Option<u64>,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub style: Option<PropertyStyle>,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: PropertyStatus,
    #[serde(default, deserialize_with = "lenient::small_uint")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::small_uint")]
    pub bathrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::small_uint")]
    pub sqm: Option<u32>,
    #[serde(default, deserialize_with = "lenient::coordinates")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_date: Option<DateTime<Utc>>,
}

impl Property {
    /// Bare record with only an identifier; every other field absent
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            location: None,
            country: None,
            price: None,
            style: None,
            status: PropertyStatus::default(),
            bedrooms: None,
            bathrooms: None,
            sqm: None,
            coordinates: None,
            images: Vec::new(),
            features: Vec::new(),
            featured: false,
            description: None,
            created_date: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }

    pub fn display_country(&self) -> &str {
        self.country.as_deref().unwrap_or_default()
    }
}

/// What a contact request is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyInterest {
    General,
    Property(String),
}

impl PropertyInterest {
    pub const GENERAL: &'static str = "general";
}

impl From<String> for PropertyInterest {
    fn from(value: String) -> Self {
        if value == Self::GENERAL {
            PropertyInterest::General
        } else {
            PropertyInterest::Property(value)
        }
    }
}

impl From<PropertyInterest> for String {
    fn from(value: PropertyInterest) -> Self {
        match value {
            PropertyInterest::General => PropertyInterest::GENERAL.to_string(),
            PropertyInterest::Property(id) => id,
        }
    }
}

/// Contact submission sent once to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_interest: Option<PropertyInterest>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_complete_record() {
        let property: Property = serde_json::from_value(json!({
            "id": "abc123",
            "title": "Villa Aurora",
            "location": "Portofino",
            "country": "Italia",
            "price": 12500000,
            "style": "villa",
            "status": "riservato",
            "bedrooms": 7,
            "bathrooms": 6,
            "sqm": 850,
            "coordinates": { "lat": 44.3036, "lng": 9.2097 },
            "images": ["https://img.example/1.jpg"],
            "features": ["Piscina", "Vista mare"],
            "featured": true,
            "created_date": "2024-03-01T10:15:00.000000"
        }))
        .unwrap();

        assert_eq!(property.price, Some(12_500_000));
        assert_eq!(property.style, Some(PropertyStyle::Villa));
        assert_eq!(property.status, PropertyStatus::Riservato);
        assert_eq!(property.bedrooms, Some(7));
        assert!(property.featured);
        assert!(property.created_date.is_some());
        assert_eq!(
            property.coordinates,
            Some(Coordinates { lat: 44.3036, lng: 9.2097 })
        );
    }

    #[test]
    fn malformed_fields_decode_as_absent() {
        let property: Property = serde_json::from_value(json!({
            "id": "x",
            "title": null,
            "price": "su richiesta",
            "style": "bungalow",
            "status": "archiviato",
            "bedrooms": -2,
            "coordinates": { "lat": "north" },
            "images": null,
            "features": ["Piscina", 4],
            "featured": "yes"
        }))
        .unwrap();

        assert_eq!(property.title, None);
        assert_eq!(property.price, None);
        assert_eq!(property.style, None);
        assert_eq!(property.status, PropertyStatus::Disponibile);
        assert_eq!(property.bedrooms, None);
        assert_eq!(property.coordinates, None);
        assert!(property.images.is_empty());
        assert_eq!(property.features, vec!["Piscina".to_string()]);
        assert!(!property.featured);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let property: Property = serde_json::from_value(json!({
            "id": "x",
            "price": "1500000",
            "bedrooms": "4",
            "coordinates": { "lat": "43.7", "lng": 7.42 }
        }))
        .unwrap();

        assert_eq!(property.price, Some(1_500_000));
        assert_eq!(property.bedrooms, Some(4));
        assert_eq!(property.coordinates, Some(Coordinates { lat: 43.7, lng: 7.42 }));
    }

    #[test]
    fn property_interest_serializes_as_plain_string() {
        let request = ContactRequest {
            name: "Mario Rossi".to_string(),
            email: "mario@example.com".to_string(),
            phone: None,
            property_interest: Some(PropertyInterest::General),
            message: "Interessato".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["property_interest"], "general");
        assert!(value.get("phone").is_none());

        let back: ContactRequest = serde_json::from_value(json!({
            "name": "A", "email": "a@b.it", "message": "m",
            "property_interest": "abc123"
        }))
        .unwrap();
        assert_eq!(
            back.property_interest,
            Some(PropertyInterest::Property("abc123".to_string()))
        );
    }

    #[test]
    fn style_parses_from_its_wire_name() {
        assert_eq!("yacht".parse::<PropertyStyle>(), Ok(PropertyStyle::Yacht));
        assert!("Yacht".parse::<PropertyStyle>().is_err());
    }
}
