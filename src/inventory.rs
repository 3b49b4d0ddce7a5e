// src/inventory.rs
//
// Admin inventory listing: catalogue filtering plus a stock filter,
// multi-field sorting with direction toggling, and page slicing.

use serde::Serialize;
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

use crate::models::{Category, Product};
use crate::pagination::{DEFAULT_PAGE_SIZE, PaginatedResponse, paginate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockFilter {
    #[default]
    All,
    In,
    Out,
}

impl StockFilter {
    fn matches(self, product: &Product) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::In => product.stock,
            StockFilter::Out => !product.stock,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    #[default]
    #[strum(to_string = "name")]
    Name,
    #[strum(to_string = "category")]
    Category,
    #[strum(to_string = "price", serialize = "discountPrice")]
    Price,
    #[strum(to_string = "stock")]
    Stock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventorySort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl InventorySort {
    /// Same field flips the direction; another field starts ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            InventorySort {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            InventorySort {
                field,
                direction: SortDirection::Asc,
            }
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.field {
            SortField::Name => compare_text(&a.name, &b.name),
            SortField::Category => compare_text(&a.category.to_string(), &b.category.to_string()),
            SortField::Price => a.discount_price.cmp(&b.discount_price),
            // In stock first.
            SortField::Stock => b.stock.cmp(&a.stock),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryQuery {
    pub query: String,
    pub category: Option<Category>,
    pub stock: StockFilter,
    pub sort: InventorySort,
    pub page: usize,
    pub page_size: usize,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            stock: StockFilter::All,
            sort: InventorySort::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// Setters for clients that keep one `InventoryQuery` across interactions.
// The HTTP listing rebuilds it per request and goes through `toggle_sort`.
// Every criterion change sends the admin back to the first page.
impl InventoryQuery {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_stock(&mut self, stock: StockFilter) {
        self.stock = stock;
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggled(field);
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    fn matches(&self, product: &Product, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || product.name.to_lowercase().contains(needle)
            || product.category.to_string().to_lowercase().contains(needle)
            || product.fabric_or_empty().to_lowercase().contains(needle);
        let matches_category = self.category.is_none_or(|c| product.category == c);
        matches_search && matches_category && self.stock.matches(product)
    }
}

/// Filtered and sorted list, before pagination. This is also what the CSV
/// export writes out.
pub fn filter_and_sort(products: &[Product], query: &InventoryQuery) -> Vec<Product> {
    let needle = query.query.to_lowercase();
    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| query.matches(p, &needle))
        .cloned()
        .collect();
    result.sort_by(|a, b| query.sort.compare(a, b));
    result
}

pub fn page(products: &[Product], query: &InventoryQuery) -> PaginatedResponse<Product> {
    paginate(filter_and_sort(products, query), query.page, query.page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub trending: usize,
}

pub fn stats(products: &[Product]) -> InventoryStats {
    let in_stock = products.iter().filter(|p| p.stock).count();
    InventoryStats {
        total: products.len(),
        in_stock,
        out_of_stock: products.len() - in_stock,
        trending: products.iter().filter(|p| p.is_trending()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::product;
    use crate::seed::DEFAULT_PRODUCTS;
    use std::str::FromStr;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn mixed_stock() -> Vec<Product> {
        (0..8)
            .map(|i| {
                let mut p = product(&i.to_string(), Category::Kurti, 1000, 500 + i);
                p.stock = !(i == 2 || i == 5);
                p
            })
            .collect()
    }

    #[test]
    fn out_of_stock_filter_example() {
        let query = InventoryQuery {
            stock: StockFilter::Out,
            ..Default::default()
        };
        let result = filter_and_sort(&mixed_stock(), &query);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| !p.stock));

        let query = InventoryQuery {
            stock: StockFilter::In,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&mixed_stock(), &query).len(), 6);
    }

    #[test]
    fn search_also_matches_fabric() {
        let query = InventoryQuery {
            query: "chiffon".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&DEFAULT_PRODUCTS, &query)), vec!["7"]);
    }

    #[test]
    fn stock_sort_keeps_original_order_for_ties() {
        let query = InventoryQuery {
            sort: InventorySort {
                field: SortField::Stock,
                direction: SortDirection::Asc,
            },
            ..Default::default()
        };
        let result = filter_and_sort(&mixed_stock(), &query);
        assert_eq!(ids(&result), vec!["0", "1", "3", "4", "6", "7", "2", "5"]);

        let query = InventoryQuery {
            sort: InventorySort {
                field: SortField::Stock,
                direction: SortDirection::Desc,
            },
            ..Default::default()
        };
        let result = filter_and_sort(&mixed_stock(), &query);
        assert_eq!(ids(&result), vec!["2", "5", "0", "1", "3", "4", "6", "7"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut products = vec![
            product("1", Category::Kurti, 100, 90),
            product("2", Category::Kurti, 100, 90),
            product("3", Category::Kurti, 100, 90),
        ];
        products[0].name = "banarasi".into();
        products[1].name = "Anarkali".into();
        products[2].name = "Chikankari".into();

        let query = InventoryQuery::default();
        assert_eq!(ids(&filter_and_sort(&products, &query)), vec!["2", "1", "3"]);
    }

    #[test]
    fn price_sort_descending() {
        let query = InventoryQuery {
            sort: InventorySort {
                field: SortField::Price,
                direction: SortDirection::Desc,
            },
            ..Default::default()
        };
        let result = filter_and_sort(&DEFAULT_PRODUCTS, &query);
        assert!(result.windows(2).all(|w| w[0].discount_price >= w[1].discount_price));
    }

    #[test]
    fn toggling_sort() {
        let sort = InventorySort::default();
        let flipped = sort.toggled(SortField::Name);
        assert_eq!(flipped.direction, SortDirection::Desc);
        assert_eq!(flipped.toggled(SortField::Name).direction, SortDirection::Asc);

        let other = flipped.toggled(SortField::Category);
        assert_eq!(other.field, SortField::Category);
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn criteria_changes_reset_page() {
        let mut query = InventoryQuery::default();
        query.set_page(3);
        query.set_query("silk");
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_category(Some(Category::Sarees));
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_stock(StockFilter::In);
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.toggle_sort(SortField::Price);
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_page_size(12);
        assert_eq!(query.page, 1);

        query.set_page(2);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn page_slices_sorted_list() {
        let query = InventoryQuery {
            page: 2,
            page_size: 3,
            sort: InventorySort {
                field: SortField::Price,
                direction: SortDirection::Asc,
            },
            ..Default::default()
        };
        let result = page(&DEFAULT_PRODUCTS, &query);
        assert_eq!(result.total_items, 8);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.current_page, 2);
        let prices: Vec<i64> = result.data.iter().map(|p| p.discount_price).collect();
        assert_eq!(prices, vec![2499, 2999, 4499]);
    }

    #[test]
    fn stats_over_full_catalogue() {
        let s = stats(&DEFAULT_PRODUCTS);
        assert_eq!(
            s,
            InventoryStats {
                total: 8,
                in_stock: 7,
                out_of_stock: 1,
                trending: 4,
            }
        );
    }

    #[test]
    fn sort_field_names() {
        assert_eq!(SortField::from_str("discountPrice").unwrap(), SortField::Price);
        assert_eq!(SortField::from_str("price").unwrap(), SortField::Price);
        assert_eq!(SortField::Price.to_string(), "price");
        assert_eq!(StockFilter::from_str("OUT").unwrap(), StockFilter::Out);
    }
}
