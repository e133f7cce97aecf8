//! Catalog page behavior against the in-memory store.

use line_property::catalog::{
    load_featured, BedroomFilter, CatalogController, CatalogState, FilterCriteria, ViewMode,
};
use line_property::store::MemoryListingStore;
use line_property::{Property, PropertyStatus, PropertyStyle};

fn listing(id: &str, price: u64) -> Property {
    Property {
        title: Some(format!("Residenza {}", id)),
        location: Some("Lago di Como".to_string()),
        country: Some("Italia".to_string()),
        price: Some(price),
        style: Some(PropertyStyle::Villa),
        bedrooms: Some(5),
        ..Property::new(id)
    }
}

#[tokio::test]
async fn starts_loading_then_populates() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    assert!(catalog.is_loading());

    catalog.load(&store).await;

    assert!(matches!(catalog.state(), CatalogState::Populated(_)));
    assert_eq!(catalog.result_count(), catalog.listings().len());
    assert_eq!(store.read_calls(), 1);
}

#[tokio::test]
async fn empty_store_loads_straight_into_empty() {
    let store = MemoryListingStore::new(Vec::new());
    let mut catalog = CatalogController::new();

    catalog.load(&store).await;

    assert_eq!(catalog.state(), &CatalogState::Empty(FilterCriteria::default()));
    assert_eq!(catalog.result_count(), 0);
}

#[tokio::test]
async fn listings_outside_default_bounds_load_into_empty() {
    let store = MemoryListingStore::new(vec![listing("bargain", 100)]);
    let mut catalog = CatalogController::new();

    catalog.load(&store).await;

    assert_eq!(catalog.state(), &CatalogState::Empty(FilterCriteria::default()));
    assert_eq!(catalog.listings().len(), 1);
}

#[tokio::test]
async fn criteria_set_while_loading_apply_on_first_load() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();

    catalog.set_criteria(FilterCriteria::default().with_style(PropertyStyle::Castello));
    assert!(catalog.is_loading());
    assert_eq!(store.read_calls(), 0);

    catalog.load(&store).await;

    let ids: Vec<_> = catalog.results().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["castello-chianti"]);
    assert_eq!(store.read_calls(), 1);
}

#[tokio::test]
async fn price_window_keeps_only_the_middle_listing() {
    let store = MemoryListingStore::new(vec![
        listing("cheap", 400_000),
        listing("middle", 1_000_000),
        listing("dear", 2_000_000),
    ]);
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;

    catalog.update_criteria(|c| {
        c.min_price = 500_000;
        c.max_price = 1_500_000;
    });

    let ids: Vec<_> = catalog.results().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["middle"]);
}

#[tokio::test]
async fn criteria_changes_do_not_refetch() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;

    catalog.set_criteria(FilterCriteria::default().with_country("Monaco"));
    catalog.set_criteria(FilterCriteria::default().with_style(PropertyStyle::Yacht));
    catalog.reset();

    assert_eq!(store.read_calls(), 1);
}

#[tokio::test]
async fn no_match_is_empty_with_the_criteria() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;

    let criteria = FilterCriteria::default().with_search("reykjavik");
    catalog.set_criteria(criteria.clone());

    assert_eq!(catalog.state(), &CatalogState::Empty(criteria));
    assert!(catalog.results().is_empty());
}

#[tokio::test]
async fn reset_restores_defaults_and_results() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;
    let everything = catalog.result_count();

    catalog.update_criteria(|c| {
        c.search = "villa".to_string();
        c.country = "Italia".to_string();
        c.toggle_bedrooms(BedroomFilter::SixOrMore);
        c.toggle_status(PropertyStatus::Riservato);
        c.set_price_range(2_000_000, 3_000_000);
    });
    assert!(catalog.criteria().has_active_filters());

    catalog.reset();

    assert_eq!(
        catalog.criteria(),
        &FilterCriteria {
            search: String::new(),
            country: String::new(),
            style: None,
            min_price: 500_000,
            max_price: 50_000_000,
            bedrooms: BedroomFilter::Any,
            status: None,
        }
    );
    assert_eq!(catalog.result_count(), everything);
}

#[tokio::test]
async fn results_keep_store_order() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;

    catalog.set_criteria(FilterCriteria::default().with_country("Italia"));

    let ids: Vec<_> = catalog.results().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["villa-aurora", "attico-brera", "castello-chianti", "tenuta-val-dorcia"]
    );
}

#[tokio::test]
async fn view_mode_does_not_change_results() {
    let store = MemoryListingStore::with_sample_listings();
    let mut catalog = CatalogController::new();
    catalog.load(&store).await;
    let before = catalog.results().to_vec();

    catalog.set_view_mode(ViewMode::List);

    assert_eq!(catalog.view_mode(), ViewMode::List);
    assert_eq!(catalog.results(), before.as_slice());
}

#[tokio::test]
async fn fetch_failure_is_an_error_state_and_retry_recovers() {
    let store = MemoryListingStore::with_sample_listings();
    store.set_fail_reads(true);
    let mut catalog = CatalogController::new();

    catalog.load(&store).await;
    assert!(matches!(catalog.state(), CatalogState::Error(_)));

    catalog.set_criteria(FilterCriteria::default().with_country("Monaco"));
    assert!(matches!(catalog.state(), CatalogState::Error(_)));

    store.set_fail_reads(false);
    catalog.load(&store).await;

    let ids: Vec<_> = catalog.results().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["penthouse-monte-carlo"]);
}

#[tokio::test]
async fn catalog_limit_caps_the_fetch() {
    let store = MemoryListingStore::new(
        (0..8)
            .map(|i| listing(&format!("p{}", i), 1_000_000))
            .collect(),
    );
    let mut catalog = CatalogController::with_limit(3);
    catalog.load(&store).await;

    assert_eq!(catalog.listings().len(), 3);
}

#[tokio::test]
async fn featured_selection_from_samples() {
    let store = MemoryListingStore::with_sample_listings();
    let featured = load_featured(&store).await.unwrap();

    assert!(featured.iter().all(|p| p.featured));
    assert_eq!(featured.first().map(|p| p.id.as_str()), Some("villa-aurora"));
    assert_eq!(featured.len(), 4);
}
