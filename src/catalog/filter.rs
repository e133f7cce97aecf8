use crate::models::{Property, PropertyStatus, PropertyStyle};
use std::fmt;
use std::str::FromStr;

/// Lowest price the catalog slider offers
pub const MIN_PRICE: u64 = 500_000;
/// Highest price the catalog slider offers
pub const MAX_PRICE: u64 = 50_000_000;
pub const PRICE_STEP: u64 = 500_000;

/// Countries offered by the country selector
pub const COUNTRIES: [&str; 10] = [
    "Italia",
    "Francia",
    "Spagna",
    "Svizzera",
    "Monaco",
    "Grecia",
    "Portogallo",
    "UK",
    "USA",
    "Dubai",
];

/// Bedroom constraint: none, an exact count, or the open-ended "6+"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BedroomFilter {
    #[default]
    Any,
    Exactly(u32),
    SixOrMore,
}

impl BedroomFilter {
    /// Chips shown by the bedroom selector
    pub const OPTIONS: [BedroomFilter; 6] = [
        BedroomFilter::Exactly(1),
        BedroomFilter::Exactly(2),
        BedroomFilter::Exactly(3),
        BedroomFilter::Exactly(4),
        BedroomFilter::Exactly(5),
        BedroomFilter::SixOrMore,
    ];

    pub fn matches(&self, bedrooms: Option<u32>) -> bool {
        match (self, bedrooms) {
            (BedroomFilter::Any, _) => true,
            (BedroomFilter::Exactly(wanted), Some(have)) => *wanted == have,
            (BedroomFilter::SixOrMore, Some(have)) => have >= 6,
            (_, None) => false,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, BedroomFilter::Any)
    }
}

impl fmt::Display for BedroomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedroomFilter::Any => Ok(()),
            BedroomFilter::Exactly(n) => write!(f, "{}", n),
            BedroomFilter::SixOrMore => f.write_str("6+"),
        }
    }
}

impl FromStr for BedroomFilter {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(BedroomFilter::Any),
            "6+" => Ok(BedroomFilter::SixOrMore),
            n => n.parse().map(BedroomFilter::Exactly),
        }
    }
}

/// Active search and facet constraints of the catalog page.
///
/// Empty strings and `None` mean "no constraint"; the price bounds are
/// always active and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub country: String,
    pub style: Option<PropertyStyle>,
    pub min_price: u64,
    pub max_price: u64,
    pub bedrooms: BedroomFilter,
    pub status: Option<PropertyStatus>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            country: String::new(),
            style: None,
            min_price: MIN_PRICE,
            max_price: MAX_PRICE,
            bedrooms: BedroomFilter::Any,
            status: None,
        }
    }
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_style(mut self, style: PropertyStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_price(mut self, min_price: u64, max_price: u64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: BedroomFilter) -> Self {
        self.bedrooms = bedrooms;
        self
    }

    pub fn with_status(mut self, status: PropertyStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True iff the property passes every active predicate
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_search(property)
            && (self.country.is_empty()
                || property.country.as_deref() == Some(self.country.as_str()))
            && self.style.map_or(true, |style| property.style == Some(style))
            && property
                .price
                .map_or(false, |price| (self.min_price..=self.max_price).contains(&price))
            && self.bedrooms.matches(property.bedrooms)
            && self.status.map_or(true, |status| property.status == status)
    }

    fn matches_search(&self, property: &Property) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [
            property.display_title(),
            property.display_location(),
            property.display_country(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Stable filter: matching properties in their input order
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }

    /// Whether anything differs from the defaults (drives the reset button)
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Select a bedroom chip, or clear it when it is already selected
    pub fn toggle_bedrooms(&mut self, option: BedroomFilter) {
        self.bedrooms = if self.bedrooms == option {
            BedroomFilter::Any
        } else {
            option
        };
    }

    /// Select a status chip, or clear it when it is already selected
    pub fn toggle_status(&mut self, status: PropertyStatus) {
        self.status = if self.status == Some(status) {
            None
        } else {
            Some(status)
        };
    }

    /// Set the price range the way the slider does: snapped to the step,
    /// clamped to the catalog bounds, and never inverted
    pub fn set_price_range(&mut self, min_price: u64, max_price: u64) {
        let snap = |value: u64| {
            let stepped = value.saturating_add(PRICE_STEP / 2) / PRICE_STEP * PRICE_STEP;
            stepped.clamp(MIN_PRICE, MAX_PRICE)
        };
        let (low, high) = (snap(min_price), snap(max_price));
        self.min_price = low.min(high);
        self.max_price = low.max(high);
    }
}

/// Evaluate one property against the criteria
pub fn matches(property: &Property, criteria: &FilterCriteria) -> bool {
    criteria.matches(property)
}

/// Owned copy of the properties that pass the criteria, input order kept
pub fn filter_properties(properties: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    criteria.apply(properties).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, price: u64) -> Property {
        Property {
            title: Some(format!("Villa {}", id)),
            location: Some("Como".to_string()),
            country: Some("Italia".to_string()),
            price: Some(price),
            style: Some(PropertyStyle::Villa),
            bedrooms: Some(4),
            ..Property::new(id)
        }
    }

    #[test]
    fn default_criteria_exclude_nothing_in_range() {
        let criteria = FilterCriteria::default();
        assert!(criteria.matches(&listing("a", MIN_PRICE)));
        assert!(criteria.matches(&listing("b", MAX_PRICE)));
        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let property = listing("a", 1_000_000);
        assert!(FilterCriteria::default().with_search("COMO").matches(&property));
        assert!(FilterCriteria::default().with_search("ital").matches(&property));
        assert!(FilterCriteria::default().with_search("villa a").matches(&property));
        assert!(!FilterCriteria::default().with_search("dubai").matches(&property));
    }

    #[test]
    fn search_treats_missing_fields_as_empty() {
        let property = Property {
            price: Some(1_000_000),
            country: Some("Monaco".to_string()),
            ..Property::new("bare")
        };
        assert!(FilterCriteria::default().with_search("mona").matches(&property));
        assert!(!FilterCriteria::default().with_search("villa").matches(&property));
    }

    #[test]
    fn country_is_case_sensitive() {
        let property = listing("a", 1_000_000);
        assert!(FilterCriteria::default().with_country("Italia").matches(&property));
        assert!(!FilterCriteria::default().with_country("italia").matches(&property));
    }

    #[test]
    fn style_and_status_must_match_exactly() {
        let property = listing("a", 1_000_000);
        assert!(!FilterCriteria::default()
            .with_style(PropertyStyle::Castello)
            .matches(&property));
        assert!(FilterCriteria::default()
            .with_status(PropertyStatus::Disponibile)
            .matches(&property));
        assert!(!FilterCriteria::default()
            .with_status(PropertyStatus::Venduto)
            .matches(&property));
    }

    #[test]
    fn style_filter_rejects_unknown_style() {
        let property = Property {
            style: None,
            ..listing("a", 1_000_000)
        };
        assert!(FilterCriteria::default().matches(&property));
        assert!(!FilterCriteria::default()
            .with_style(PropertyStyle::Villa)
            .matches(&property));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let criteria = FilterCriteria::default().with_price(1_000_000, 2_000_000);
        assert!(criteria.matches(&listing("lo", 1_000_000)));
        assert!(criteria.matches(&listing("hi", 2_000_000)));
        assert!(!criteria.matches(&listing("under", 999_999)));
        assert!(!criteria.matches(&listing("over", 2_000_001)));
    }

    #[test]
    fn missing_price_never_matches() {
        let property = Property {
            price: None,
            ..listing("a", 0)
        };
        assert!(!FilterCriteria::default().matches(&property));
        assert!(!FilterCriteria::default().with_price(0, u64::MAX).matches(&property));
    }

    #[test]
    fn six_or_more_bedrooms() {
        let with = |n| Property {
            bedrooms: Some(n),
            ..listing("a", 1_000_000)
        };
        let criteria = FilterCriteria::default().with_bedrooms(BedroomFilter::SixOrMore);
        assert!(criteria.matches(&with(6)));
        assert!(!criteria.matches(&with(5)));
        assert!(criteria.matches(&with(12)));
    }

    #[test]
    fn exact_bedrooms_and_missing_count() {
        let criteria = FilterCriteria::default().with_bedrooms(BedroomFilter::Exactly(4));
        assert!(criteria.matches(&listing("a", 1_000_000)));

        let unknown = Property {
            bedrooms: None,
            ..listing("b", 1_000_000)
        };
        assert!(!criteria.matches(&unknown));
        assert!(FilterCriteria::default().matches(&unknown));
    }

    #[test]
    fn apply_preserves_input_order() {
        let properties = vec![
            listing("A", 1_000_000),
            listing("B", 100),
            listing("C", 2_000_000),
        ];
        let ids: Vec<_> = FilterCriteria::default()
            .apply(&properties)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn toggles_clear_on_second_click() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_bedrooms(BedroomFilter::Exactly(3));
        assert_eq!(criteria.bedrooms, BedroomFilter::Exactly(3));
        criteria.toggle_bedrooms(BedroomFilter::SixOrMore);
        assert_eq!(criteria.bedrooms, BedroomFilter::SixOrMore);
        criteria.toggle_bedrooms(BedroomFilter::SixOrMore);
        assert!(criteria.bedrooms.is_any());

        criteria.toggle_status(PropertyStatus::Riservato);
        assert_eq!(criteria.status, Some(PropertyStatus::Riservato));
        criteria.toggle_status(PropertyStatus::Riservato);
        assert_eq!(criteria.status, None);
    }

    #[test]
    fn slider_snaps_and_clamps() {
        let mut criteria = FilterCriteria::default();
        criteria.set_price_range(1_240_000, 60_000_000);
        assert_eq!((criteria.min_price, criteria.max_price), (1_000_000, MAX_PRICE));

        criteria.set_price_range(9_000_000, 0);
        assert_eq!((criteria.min_price, criteria.max_price), (MIN_PRICE, 9_000_000));
    }

    #[test]
    fn bedroom_filter_parses_chip_labels() {
        assert_eq!("".parse::<BedroomFilter>().unwrap(), BedroomFilter::Any);
        assert_eq!("6+".parse::<BedroomFilter>().unwrap(), BedroomFilter::SixOrMore);
        assert_eq!("2".parse::<BedroomFilter>().unwrap(), BedroomFilter::Exactly(2));
        assert!("many".parse::<BedroomFilter>().is_err());
        assert_eq!(BedroomFilter::SixOrMore.to_string(), "6+");
    }
}
