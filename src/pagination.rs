// src/pagination.rs
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub data: Vec<T>,
}

/// At least one page, even when there are no items.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1)).max(1)
}

/// Cuts out page `page` (1-indexed). The requested page is clamped into
/// `[1, total_pages]`, so asking past the end returns the last page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> PaginatedResponse<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = page.clamp(1, total_pages);

    let start = (current_page - 1) * per_page;
    let data = items.into_iter().skip(start).take(per_page).collect();

    PaginatedResponse {
        total_items,
        total_pages,
        current_page,
        per_page,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_holds_the_remainder() {
        for total in 1..=40usize {
            for per_page in [1usize, 3, 8, 12] {
                let pages = total_pages(total, per_page);
                let items: Vec<usize> = (0..total).collect();

                let last = paginate(items.clone(), pages, per_page);
                assert_eq!(last.data.len(), total - per_page * (pages - 1));
                assert!((1..=per_page).contains(&last.data.len()));

                for page in 1..=pages {
                    assert!(paginate(items.clone(), page, per_page).data.len() <= per_page);
                }
            }
        }
    }

    #[test]
    fn requested_page_is_clamped() {
        let items: Vec<u32> = (1..=10).collect();
        let page = paginate(items.clone(), 99, 4);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.data, vec![9, 10]);

        let page = paginate(items, 0, 4);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let page = paginate(Vec::<u8>::new(), 3, 8);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.data.is_empty());
    }
}
