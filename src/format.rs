//! Display strings for prices, styles and statuses.

use crate::models::{PropertyStatus, PropertyStyle};

const MILLION: u64 = 1_000_000;

/// Group digits in threes with `.` as separator: `1500000` → `1.500.000`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

fn millions(price: u64) -> String {
    format!("€{:.1}M", price as f64 / MILLION as f64)
}

/// Card and map label: `€1.5M`, or the full amount below a million
pub fn compact_price(price: u64) -> String {
    if price >= MILLION {
        millions(price)
    } else {
        format!("€{}", group_thousands(price))
    }
}

/// Slider label: `€1.5M`, or thousands below a million (`€500K`)
pub fn slider_price(price: u64) -> String {
    if price >= MILLION {
        millions(price)
    } else {
        format!("€{:.0}K", price as f64 / 1000.0)
    }
}

/// Italian currency format without decimals: `1.500.000 €`
pub fn full_price(price: u64) -> String {
    format!("{} €", group_thousands(price))
}

/// Label for an optional price; listings without one are priced on request
pub fn price_or_on_request(price: Option<u64>) -> String {
    price
        .map(full_price)
        .unwrap_or_else(|| "Prezzo su richiesta".to_string())
}

pub fn style_label(style: PropertyStyle) -> &'static str {
    match style {
        PropertyStyle::Villa => "Villa",
        PropertyStyle::Penthouse => "Penthouse",
        PropertyStyle::Castello => "Castello",
        PropertyStyle::Tenuta => "Tenuta",
        PropertyStyle::Appartamento => "Appartamento",
        PropertyStyle::Yacht => "Yacht",
    }
}

/// Status with its first letter capitalized
pub fn status_label(status: PropertyStatus) -> String {
    let raw = status.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(50_000_000), "50.000.000");
    }

    #[test]
    fn compact_labels() {
        assert_eq!(compact_price(1_500_000), "€1.5M");
        assert_eq!(compact_price(18_500_000), "€18.5M");
        assert_eq!(compact_price(850_000), "€850.000");
        assert_eq!(slider_price(500_000), "€500K");
        assert_eq!(slider_price(50_000_000), "€50.0M");
    }

    #[test]
    fn full_labels() {
        assert_eq!(full_price(1_500_000), "1.500.000 €");
        assert_eq!(price_or_on_request(None), "Prezzo su richiesta");
    }

    #[test]
    fn status_and_style_labels() {
        assert_eq!(status_label(PropertyStatus::Riservato), "Riservato");
        assert_eq!(style_label(PropertyStyle::Appartamento), "Appartamento");
    }
}
