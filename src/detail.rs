use crate::contact::{interest_options, ContactForm, InterestOption};
use crate::errors::StoreResult;
use crate::models::Property;
use crate::store::{limits, ListingStore, OrderSpec, PropertyQuery};
use tracing::{debug, info, warn};

/// Shown when a listing has no photos of its own
pub const DEFAULT_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?w=1200&q=80",
    "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?w=1200&q=80",
    "https://images.unsplash.com/photo-1600607687920-4e2a09cf159d?w=1200&q=80",
];

/// Number of thumbnails in the hero strip
pub const THUMBNAILS: usize = 3;

/// Fetch one property by identifier. An unknown id is `Ok(None)`.
pub async fn lookup_property(store: &dyn ListingStore, id: &str) -> StoreResult<Option<Property>> {
    let mut found = store.filter(&PropertyQuery::by_id(id)).await?;
    if found.len() > 1 {
        warn!("{} records share id {}; using the first", found.len(), id);
    }
    Ok(if found.is_empty() {
        None
    } else {
        Some(found.swap_remove(0))
    })
}

/// Image carousel with a wrap-around cursor. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
}

impl Gallery {
    pub fn for_property(property: &Property) -> Self {
        let images = if property.images.is_empty() {
            DEFAULT_IMAGES.iter().map(|url| url.to_string()).collect()
        } else {
            property.images.clone()
        };
        Self { images, current: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.current]
    }

    pub fn thumbnails(&self) -> &[String] {
        &self.images[..self.images.len().min(THUMBNAILS)]
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        self.current = (self.current + self.images.len() - 1) % self.images.len();
    }

    /// Jump to an image; out-of-range indexes land on the last one
    pub fn select(&mut self, index: usize) {
        self.current = index.min(self.images.len() - 1);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(Box<Property>),
    /// No record for the requested id; the page offers a way back to the
    /// catalog
    NotFound,
    Error(String),
}

/// Detail page: one property, its gallery, and the listing set the embedded
/// contact form offers as interests
pub struct PropertyDetail {
    state: DetailState,
    gallery: Option<Gallery>,
    related: Vec<Property>,
}

impl Default for PropertyDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyDetail {
    pub fn new() -> Self {
        Self {
            state: DetailState::Loading,
            gallery: None,
            related: Vec::new(),
        }
    }

    /// Resolve the page for an optional `id` parameter
    pub async fn load(&mut self, store: &dyn ListingStore, id: Option<&str>) {
        self.state = DetailState::Loading;
        self.gallery = None;

        self.related = match store.list(&OrderSpec::newest_first(), limits::DETAIL_RELATED).await {
            Ok(listings) => listings,
            Err(err) => {
                warn!("Related listings unavailable: {}", err);
                Vec::new()
            }
        };

        let Some(id) = id.filter(|id| !id.is_empty()) else {
            debug!("Detail page opened without an id");
            self.state = DetailState::NotFound;
            return;
        };

        self.state = match lookup_property(store, id).await {
            Ok(Some(property)) => {
                info!("Loaded property {}", property.id);
                self.gallery = Some(Gallery::for_property(&property));
                DetailState::Found(Box::new(property))
            }
            Ok(None) => {
                info!("Property {} not found", id);
                DetailState::NotFound
            }
            Err(err) => {
                warn!("Property lookup failed: {}", err);
                DetailState::Error(err.to_string())
            }
        };
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn property(&self) -> Option<&Property> {
        match &self.state {
            DetailState::Found(property) => Some(property.as_ref()),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        self.gallery.as_mut()
    }

    pub fn related(&self) -> &[Property] {
        &self.related
    }

    pub fn interest_options(&self) -> Vec<InterestOption> {
        interest_options(&self.related)
    }

    /// Contact form for this page, interest preset to the shown property
    pub fn contact_form(&self) -> ContactForm {
        match self.property() {
            Some(property) => ContactForm::with_preselected(property.id.clone()),
            None => ContactForm::new(),
        }
    }
}
