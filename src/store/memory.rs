use crate::errors::{StoreError, StoreResult};
use crate::models::{ContactRequest, Coordinates, Property, PropertyStatus, PropertyStyle};
use crate::store::traits::ListingStore;
use crate::store::types::{OrderSpec, PropertyQuery};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// In-process listing store. Serves a fixed snapshot of listings, records
/// contact requests, and can be told to fail reads or writes.
#[derive(Default)]
pub struct MemoryListingStore {
    properties: Vec<Property>,
    contacts: Mutex<Vec<ContactRequest>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MemoryListingStore {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Store preloaded with a small showcase portfolio
    pub fn with_sample_listings() -> Self {
        Self::new(sample_listings())
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, AtomicOrdering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, AtomicOrdering::SeqCst);
    }

    /// Number of `list`/`filter` calls received, failed ones included
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of `create` calls received, failed ones included
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(AtomicOrdering::SeqCst)
    }

    /// Contact requests stored so far. A poisoned log still reports what
    /// it holds.
    pub fn contacts(&self) -> Vec<ContactRequest> {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn begin_read(&self) -> StoreResult<()> {
        self.read_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_reads.load(AtomicOrdering::SeqCst) {
            warn!("Memory store read failure injected");
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }

    fn records(&self) -> StoreResult<Vec<(Value, &Property)>> {
        self.properties
            .iter()
            .map(|property| {
                serde_json::to_value(property)
                    .map(|record| (record, property))
                    .map_err(StoreError::from)
            })
            .collect()
    }
}

/// Orders two serialized field values; absent values sort first
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn list(&self, order: &OrderSpec, limit: usize) -> StoreResult<Vec<Property>> {
        self.begin_read()?;

        let mut records = self.records()?;
        records.sort_by(|(a, _), (b, _)| {
            let ordering = compare_values(a.get(&order.field), b.get(&order.field));
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let properties: Vec<Property> = records
            .into_iter()
            .take(limit)
            .map(|(_, property)| property.clone())
            .collect();
        debug!("Memory store listed {} properties ({})", properties.len(), order);
        Ok(properties)
    }

    async fn filter(&self, query: &PropertyQuery) -> StoreResult<Vec<Property>> {
        self.begin_read()?;

        Ok(self
            .records()?
            .into_iter()
            .filter(|(record, _)| query.matches(record))
            .map(|(_, property)| property.clone())
            .collect())
    }

    async fn create(&self, request: &ContactRequest) -> StoreResult<()> {
        self.create_calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail_writes.load(AtomicOrdering::SeqCst) {
            warn!("Memory store write failure injected");
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }

        let mut contacts = self
            .contacts
            .lock()
            .map_err(|_| StoreError::Unavailable("contact log poisoned".to_string()))?;
        contacts.push(request.clone());
        info!("Stored contact request from {}", request.email);
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

struct Sample {
    id: &'static str,
    title: &'static str,
    location: &'static str,
    country: &'static str,
    price: u64,
    style: PropertyStyle,
    status: PropertyStatus,
    rooms: (u32, u32, u32),
    coordinates: Option<(f64, f64)>,
    features: &'static [&'static str],
    featured: bool,
    created: (i32, u32, u32),
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "villa-aurora",
        title: "Villa Aurora",
        location: "Portofino",
        country: "Italia",
        price: 18_500_000,
        style: PropertyStyle::Villa,
        status: PropertyStatus::Disponibile,
        rooms: (7, 6, 850),
        coordinates: Some((44.3036, 9.2097)),
        features: &["Piscina", "Vista mare", "Darsena privata"],
        featured: true,
        created: (2024, 5, 2),
    },
    Sample {
        id: "attico-brera",
        title: "Attico Brera",
        location: "Milano",
        country: "Italia",
        price: 4_200_000,
        style: PropertyStyle::Penthouse,
        status: PropertyStatus::Riservato,
        rooms: (3, 3, 240),
        coordinates: Some((45.4719, 9.1881)),
        features: &["Terrazza", "Domotica"],
        featured: true,
        created: (2024, 4, 18),
    },
    Sample {
        id: "castello-chianti",
        title: "Castello del Chianti",
        location: "Gaiole in Chianti",
        country: "Italia",
        price: 32_000_000,
        style: PropertyStyle::Castello,
        status: PropertyStatus::Disponibile,
        rooms: (14, 12, 3200),
        coordinates: Some((43.4667, 11.4333)),
        features: &["Vigneto", "Cantina storica", "Cappella"],
        featured: true,
        created: (2024, 3, 9),
    },
    Sample {
        id: "tenuta-val-dorcia",
        title: "Tenuta Val d'Orcia",
        location: "Pienza",
        country: "Italia",
        price: 9_800_000,
        style: PropertyStyle::Tenuta,
        status: PropertyStatus::Disponibile,
        rooms: (9, 8, 1400),
        coordinates: None,
        features: &["Uliveto", "Piscina a sfioro"],
        featured: false,
        created: (2024, 2, 27),
    },
    Sample {
        id: "penthouse-monte-carlo",
        title: "Penthouse Monte-Carlo",
        location: "Monte-Carlo",
        country: "Monaco",
        price: 46_000_000,
        style: PropertyStyle::Penthouse,
        status: PropertyStatus::Disponibile,
        rooms: (5, 6, 620),
        coordinates: Some((43.7396, 7.4276)),
        features: &["Vista porto", "Spa privata"],
        featured: true,
        created: (2024, 1, 15),
    },
    Sample {
        id: "appartamento-saint-germain",
        title: "Appartamento Saint-Germain",
        location: "Parigi",
        country: "Francia",
        price: 3_150_000,
        style: PropertyStyle::Appartamento,
        status: PropertyStatus::Venduto,
        rooms: (2, 2, 145),
        coordinates: Some((48.8539, 2.3336)),
        features: &["Soffitti alti", "Parquet d'epoca"],
        featured: false,
        created: (2023, 12, 1),
    },
    Sample {
        id: "yacht-riviera",
        title: "Yacht Riviera 48",
        location: "Marbella",
        country: "Spagna",
        price: 12_400_000,
        style: PropertyStyle::Yacht,
        status: PropertyStatus::Disponibile,
        rooms: (4, 4, 160),
        coordinates: Some((36.4841, -4.9526)),
        features: &["Equipaggio", "Jacuzzi"],
        featured: false,
        created: (2023, 11, 20),
    },
];

fn sample_listings() -> Vec<Property> {
    SAMPLES
        .iter()
        .map(|sample| {
            let (bedrooms, bathrooms, sqm) = sample.rooms;
            let (year, month, day) = sample.created;
            Property {
                title: Some(sample.title.to_string()),
                location: Some(sample.location.to_string()),
                country: Some(sample.country.to_string()),
                price: Some(sample.price),
                style: Some(sample.style),
                status: sample.status,
                bedrooms: Some(bedrooms),
                bathrooms: Some(bathrooms),
                sqm: Some(sqm),
                coordinates: sample.coordinates.map(|(lat, lng)| Coordinates { lat, lng }),
                features: sample.features.iter().map(|f| f.to_string()).collect(),
                featured: sample.featured,
                description: Some(format!("{} a {}.", sample.title, sample.location)),
                created_date: Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single(),
                ..Property::new(sample.id)
            }
        })
        .collect()
}
