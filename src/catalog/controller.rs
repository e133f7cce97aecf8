use crate::catalog::filter::FilterCriteria;
use crate::models::Property;
use crate::store::{limits, ListingStore, OrderSpec};
use tracing::{debug, info, warn};

/// Arrangement of result cards; never changes the result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Observable state of the catalog page
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    /// Listing set is being fetched
    Loading,
    /// At least one property passes the criteria
    Populated(Vec<Property>),
    /// Nothing passes the criteria that produced this state
    Empty(FilterCriteria),
    /// The listing fetch failed; `load` again to retry
    Error(String),
}

/// Owns the catalog's criteria and view mode and derives the visible
/// results from a listing set fetched once per load.
pub struct CatalogController {
    listings: Vec<Property>,
    criteria: FilterCriteria,
    view_mode: ViewMode,
    state: CatalogState,
    limit: usize,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogController {
    pub fn new() -> Self {
        Self::with_limit(limits::CATALOG)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            listings: Vec::new(),
            criteria: FilterCriteria::default(),
            view_mode: ViewMode::default(),
            state: CatalogState::Loading,
            limit,
        }
    }

    /// Fetch the full listing set and derive the first result set.
    /// Also serves as the retry action after an error.
    pub async fn load(&mut self, store: &dyn ListingStore) {
        self.state = CatalogState::Loading;
        debug!("Loading catalog from {} store", store.store_name());

        match store.list(&OrderSpec::newest_first(), self.limit).await {
            Ok(listings) => {
                info!("Catalog loaded {} listings", listings.len());
                self.listings = listings;
                self.evaluate();
            }
            Err(err) => {
                warn!("Catalog fetch failed: {}", err);
                self.state = CatalogState::Error(err.to_string());
            }
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Full fetched set, before filtering
    pub fn listings(&self) -> &[Property] {
        &self.listings
    }

    /// Visible results; empty unless populated
    pub fn results(&self) -> &[Property] {
        match &self.state {
            CatalogState::Populated(results) => results,
            _ => &[],
        }
    }

    pub fn result_count(&self) -> usize {
        self.results().len()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.reevaluate();
    }

    /// Mutate the criteria in place, then re-filter
    pub fn update_criteria(&mut self, change: impl FnOnce(&mut FilterCriteria)) {
        change(&mut self.criteria);
        self.reevaluate();
    }

    /// Restore default criteria and re-filter
    pub fn reset(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Re-filter only once data is in; while loading or failed the new
    /// criteria just wait for the next successful load
    fn reevaluate(&mut self) {
        if matches!(
            self.state,
            CatalogState::Populated(_) | CatalogState::Empty(_)
        ) {
            self.evaluate();
        }
    }

    fn evaluate(&mut self) {
        let results: Vec<Property> = self
            .criteria
            .apply(&self.listings)
            .into_iter()
            .cloned()
            .collect();

        debug!("{} of {} listings match", results.len(), self.listings.len());
        self.state = if results.is_empty() {
            CatalogState::Empty(self.criteria.clone())
        } else {
            CatalogState::Populated(results)
        };
    }
}
