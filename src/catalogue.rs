// src/catalogue.rs
//
// Shopper-facing filter and sort pipeline. Everything here is pure: the
// input slice is never modified and the result is a fresh list.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::models::{Category, Product};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CatalogueSort {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    DiscountDesc,
}

/// Inclusive range over `discount_price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    // TODO: `0-0` doubles as "not initialised yet"; give the unset state its
    // own representation once no client sends `price=0-0` any more.
    pub fn is_unset(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueFilter {
    /// `None` means all categories.
    pub category: Option<Category>,
    pub query: String,
    pub price_range: PriceRange,
    pub sort: CatalogueSort,
}

impl CatalogueFilter {
    /// The range shown to the shopper: the catalogue bounds until one is picked.
    pub fn effective_range(&self, bounds: PriceRange) -> PriceRange {
        if self.price_range.is_unset() {
            bounds
        } else {
            self.price_range
        }
    }

    pub fn has_active_filters(&self, bounds: PriceRange) -> bool {
        self.category.is_some()
            || !self.query.is_empty()
            || self.sort != CatalogueSort::Relevance
            || self.effective_range(bounds) != bounds
    }
}

/// Case-insensitive substring match on name or category.
fn matches_query(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.category.to_string().to_lowercase().contains(needle)
}

pub fn apply(products: &[Product], filter: &CatalogueFilter) -> Vec<Product> {
    let needle = filter.query.to_lowercase();
    let range = filter.price_range;

    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|p| filter.category.is_none_or(|c| p.category == c))
        .filter(|p| needle.is_empty() || matches_query(p, &needle))
        .filter(|p| range.is_unset() || range.contains(p.discount_price))
        .cloned()
        .collect();

    // sort_by is stable, ties keep catalogue order.
    match filter.sort {
        CatalogueSort::Relevance => {}
        CatalogueSort::PriceAsc => filtered.sort_by(|a, b| a.discount_price.cmp(&b.discount_price)),
        CatalogueSort::PriceDesc => filtered.sort_by(|a, b| b.discount_price.cmp(&a.discount_price)),
        CatalogueSort::DiscountDesc => {
            filtered.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent))
        }
    }
    filtered
}

/// Lowest and highest `discount_price`; `(0, 0)` for an empty catalogue.
pub fn price_bounds(products: &[Product]) -> PriceRange {
    let min = products.iter().map(|p| p.discount_price).min();
    let max = products.iter().map(|p| p.discount_price).max();
    match (min, max) {
        (Some(min), Some(max)) => PriceRange { min, max },
        _ => PriceRange::default(),
    }
}

pub fn trending(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_trending()).cloned().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::seed::DEFAULT_PRODUCTS;

    pub(crate) fn product(id: &str, category: Category, original: i64, discount: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category,
            fabric: None,
            description: "test".to_string(),
            original_price: original,
            discount_price: discount,
            discount_percent: crate::models::discount_percent(original, discount),
            stock: true,
            images: vec!["https://example.com/a.jpg".to_string()],
            trending: None,
            sizes: None,
            colors: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn category_filter_keeps_relative_order() {
        let products = vec![
            product("a", Category::Kurti, 100, 90),
            product("b", Category::Sarees, 100, 90),
            product("c", Category::Kurti, 100, 50),
            product("d", Category::Kurti, 100, 70),
        ];
        let filter = CatalogueFilter {
            category: Some(Category::Kurti),
            ..Default::default()
        };
        let result = apply(&products, &filter);
        assert!(result.iter().all(|p| p.category == Category::Kurti));
        assert_eq!(ids(&result), vec!["a", "c", "d"]);
    }

    #[test]
    fn price_ascending_example() {
        let products = vec![
            product("1", Category::Kurti, 200, 100),
            product("2", Category::Kurti, 200, 50),
            product("3", Category::Kurti, 200, 75),
        ];
        let filter = CatalogueFilter {
            sort: CatalogueSort::PriceAsc,
            ..Default::default()
        };
        let prices: Vec<i64> = apply(&products, &filter)
            .iter()
            .map(|p| p.discount_price)
            .collect();
        assert_eq!(prices, vec![50, 75, 100]);
        // Input untouched.
        assert_eq!(ids(&products), vec!["1", "2", "3"]);
    }

    #[test]
    fn price_sorts_are_ordered_and_stable() {
        let asc = apply(
            &DEFAULT_PRODUCTS,
            &CatalogueFilter {
                sort: CatalogueSort::PriceAsc,
                ..Default::default()
            },
        );
        assert!(asc.windows(2).all(|w| w[0].discount_price <= w[1].discount_price));

        let products = vec![
            product("x", Category::Kurti, 100, 60),
            product("y", Category::Kurti, 100, 60),
            product("z", Category::Kurti, 100, 80),
        ];
        let desc = apply(
            &products,
            &CatalogueFilter {
                sort: CatalogueSort::PriceDesc,
                ..Default::default()
            },
        );
        assert_eq!(ids(&desc), vec!["z", "x", "y"]);
    }

    #[test]
    fn discount_sort_puts_biggest_discount_first() {
        let result = apply(
            &DEFAULT_PRODUCTS,
            &CatalogueFilter {
                sort: CatalogueSort::DiscountDesc,
                ..Default::default()
            },
        );
        assert_eq!(result[0].id, "7");
        assert!(result.windows(2).all(|w| w[0].discount_percent >= w[1].discount_percent));
        // 1 and 3 are both 28%, catalogue order is kept.
        let pos = |id: &str| result.iter().position(|p| p.id == id).unwrap();
        assert!(pos("1") < pos("3"));
    }

    #[test]
    fn query_matches_name_or_category_case_insensitively() {
        let filter = CatalogueFilter {
            query: "SAREE".into(),
            ..Default::default()
        };
        let result = apply(&DEFAULT_PRODUCTS, &filter);
        assert_eq!(ids(&result), vec!["3", "6"]);

        let by_category = CatalogueFilter {
            query: "indo western".into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&DEFAULT_PRODUCTS, &by_category)), vec!["8"]);
    }

    #[test]
    fn price_range_is_inclusive() {
        let filter = CatalogueFilter {
            price_range: PriceRange { min: 599, max: 1799 },
            ..Default::default()
        };
        assert_eq!(ids(&apply(&DEFAULT_PRODUCTS, &filter)), vec!["1", "5"]);
    }

    #[test]
    fn zero_zero_range_skips_price_filter() {
        let filter = CatalogueFilter {
            price_range: PriceRange { min: 0, max: 0 },
            ..Default::default()
        };
        assert_eq!(apply(&DEFAULT_PRODUCTS, &filter).len(), DEFAULT_PRODUCTS.len());

        // Only the exact 0-0 pair is special.
        let filter = CatalogueFilter {
            price_range: PriceRange { min: 0, max: 1 },
            ..Default::default()
        };
        assert!(apply(&DEFAULT_PRODUCTS, &filter).is_empty());
    }

    #[test]
    fn bounds_and_active_filters() {
        let bounds = price_bounds(&DEFAULT_PRODUCTS);
        assert_eq!(bounds, PriceRange { min: 499, max: 9999 });
        assert_eq!(price_bounds(&[]), PriceRange::default());

        let mut filter = CatalogueFilter::default();
        assert!(!filter.has_active_filters(bounds));
        assert_eq!(filter.effective_range(bounds), bounds);

        filter.price_range = bounds;
        assert!(!filter.has_active_filters(bounds));

        filter.price_range = PriceRange { min: 500, max: 9999 };
        assert!(filter.has_active_filters(bounds));
    }

    #[test]
    fn trending_keeps_catalogue_order() {
        assert_eq!(ids(&trending(&DEFAULT_PRODUCTS)), vec!["1", "2", "4", "8"]);
    }
}
