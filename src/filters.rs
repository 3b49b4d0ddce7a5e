// src/filters.rs
//
// Query-string parameters for the catalogue and admin listings, and their
// conversion to and from the pipeline filter types.

use serde::Deserialize;
use std::str::FromStr;

use crate::catalogue::{CatalogueFilter, CatalogueSort, PriceRange};
use crate::inventory::{InventoryQuery, InventorySort, SortDirection, SortField, StockFilter};
use crate::models::{ALL_CATEGORIES, Category};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Catalogue URL state: `?cat=..&q=..&sort=..&price=<min>-<max>`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogueParams {
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl CatalogueParams {
    /// URL → state. Unknown or malformed values fall back to the defaults.
    pub fn to_filter(&self) -> CatalogueFilter {
        let category = self.cat.as_deref().and_then(parse_category_filter);

        let sort = match self.sort.as_deref() {
            Some(raw) => CatalogueSort::from_str(raw).unwrap_or_else(|_| {
                tracing::debug!("Ignoring unknown sort '{}'", raw);
                CatalogueSort::Relevance
            }),
            None => CatalogueSort::Relevance,
        };

        let price_range = self.price.as_deref().and_then(|raw| {
            let parsed = parse_price_range(raw);
            if parsed.is_none() {
                tracing::debug!("Ignoring malformed price range '{}'", raw);
            }
            parsed
        });

        CatalogueFilter {
            category,
            query: self.q.clone().unwrap_or_default(),
            price_range: price_range.unwrap_or_default(),
            sort,
        }
    }
}

/// `None` for the `All` sentinel, empty input and unknown categories.
fn parse_category_filter(raw: &str) -> Option<Category> {
    let raw = raw.trim();
    if raw.is_empty() || raw == ALL_CATEGORIES {
        return None;
    }
    match Category::from_str(raw) {
        Ok(category) => Some(category),
        Err(_) => {
            tracing::warn!("Unknown category '{}' in query, showing all categories", raw);
            None
        }
    }
}

/// Parses `"<min>-<max>"`.
pub fn parse_price_range(raw: &str) -> Option<PriceRange> {
    let (min, max) = raw.split_once('-')?;
    let min = min.trim().parse::<i64>().ok()?;
    let max = max.trim().parse::<i64>().ok()?;
    Some(PriceRange { min, max })
}

/// State → URL. Values equal to their defaults are left out, so the empty
/// state maps to an empty query string.
pub fn catalogue_query_string(filter: &CatalogueFilter, bounds: PriceRange) -> String {
    let mut query_parts = Vec::new();
    if let Some(category) = filter.category {
        query_parts.push(format!("cat={}", urlencoding::encode(&category.to_string())));
    }
    if !filter.query.is_empty() {
        query_parts.push(format!("q={}", urlencoding::encode(&filter.query)));
    }
    if filter.sort != CatalogueSort::Relevance {
        query_parts.push(format!("sort={}", filter.sort));
    }
    let range = filter.effective_range(bounds);
    if range != bounds {
        query_parts.push(format!("price={}-{}", range.min, range.max));
    }
    query_parts.join("&")
}

/// Admin listing: `?q=..&category=..&stock=..&sort_by=..&dir=..&page=..&page_size=..`.
///
/// `toggle=<field>` is a column-header click on top of the current
/// `sort_by`/`dir`: the same field flips direction, another field starts
/// ascending, and either way the listing goes back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub toggle: Option<String>,
}

impl InventoryParams {
    pub fn page_size(&self) -> usize {
        match self.page_size {
            Some(size) if size > 0 && size <= MAX_PAGE_SIZE => size,
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(_) => MAX_PAGE_SIZE,
        }
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn to_query(&self) -> InventoryQuery {
        let stock = self
            .stock
            .as_deref()
            .and_then(|s| StockFilter::from_str(s).ok())
            .unwrap_or_default();
        let field = self
            .sort_by
            .as_deref()
            .and_then(|s| SortField::from_str(s).ok())
            .unwrap_or_default();
        let direction = match self.dir.as_deref() {
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };

        let mut query = InventoryQuery {
            query: self.q.clone().unwrap_or_default(),
            category: self.category.as_deref().and_then(parse_category_filter),
            stock,
            sort: InventorySort { field, direction },
            page: self.page(),
            page_size: self.page_size(),
        };
        match self.toggle.as_deref().map(SortField::from_str) {
            Some(Ok(field)) => query.toggle_sort(field),
            Some(Err(_)) => tracing::debug!("Ignoring unknown sort toggle {:?}", self.toggle),
            None => {}
        }
        query
    }
}
