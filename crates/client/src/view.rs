// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::models::{CategoryFilter, GigRecord};
use serde::Serialize;

/// One page of the filtered gig list. `page` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<GigRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_filtered: usize,
}

impl Page {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Case-insensitive substring match on title or description, and an exact
/// category match unless the filter is `All`. Order is preserved.
pub fn filter_gigs<'a>(
    gigs: &'a [GigRecord],
    search: &str,
    category: CategoryFilter,
) -> Vec<&'a GigRecord> {
    let needle = search.to_lowercase();
    gigs.iter()
        .filter(|gig| {
            gig.title.to_lowercase().contains(&needle)
                || gig.description.to_lowercase().contains(&needle)
        })
        .filter(|gig| category.matches(gig.category))
        .collect()
}

pub fn total_pages(filtered: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    filtered.div_ceil(page_size)
}

/// Pages past the end, and page 0, are empty
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page == 0 || page_size == 0 {
        return vec![];
    }
    items
        .iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}

pub fn view_page(
    gigs: &[GigRecord],
    search: &str,
    category: CategoryFilter,
    page: usize,
    page_size: usize,
) -> Page {
    let filtered: Vec<GigRecord> = filter_gigs(gigs, search, category)
        .into_iter()
        .cloned()
        .collect();
    Page {
        items: paginate(&filtered, page, page_size),
        page,
        total_pages: total_pages(filtered.len(), page_size),
        total_filtered: filtered.len(),
    }
}

/// Keep `page` inside `[1, total_pages]`. An empty list still has page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, GigStatus};
    use alloy::primitives::Address;
    use proptest::prelude::*;

    fn gig(id: usize, title: &str, description: &str, category: Option<Category>) -> GigRecord {
        GigRecord {
            id: format!("gig-{id}"),
            title: title.to_string(),
            description: description.to_string(),
            encrypted_budget: format!("gig-{id}"),
            public_value1: 0,
            public_value2: 0,
            creator: Address::ZERO,
            timestamp: 0,
            is_verified: false,
            decrypted_value: 0,
            category,
            status: GigStatus::Open,
        }
    }

    fn arb_gigs() -> impl Strategy<Value = Vec<GigRecord>> {
        prop::collection::vec(
            (
                "[a-zA-Z ]{0,12}",
                "[a-zA-Z ]{0,12}",
                prop::option::of(prop::sample::select(Category::ALL.to_vec())),
            ),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (t, d, c))| gig(i, &t, &d, c))
                .collect()
        })
    }

    #[test]
    fn test_filter_by_search_and_category() {
        let gigs = vec![
            gig(1, "Logo design", "Need a logo", Some(Category::Design)),
            gig(2, "Landing page", "React LOGO animation", Some(Category::Development)),
            gig(3, "Blog posts", "Weekly articles", Some(Category::Writing)),
            gig(4, "Mystery", "logo?", None),
        ];

        let ids = |v: Vec<&GigRecord>| v.into_iter().map(|g| g.id.clone()).collect::<Vec<_>>();
        assert_eq!(
            ids(filter_gigs(&gigs, "logo", CategoryFilter::All)),
            vec!["gig-1", "gig-2", "gig-4"]
        );
        assert_eq!(
            ids(filter_gigs(
                &gigs,
                "LoGo",
                CategoryFilter::Only(Category::Development)
            )),
            vec!["gig-2"]
        );
        assert!(filter_gigs(&gigs, "", CategoryFilter::Only(Category::Marketing)).is_empty());
    }

    #[test]
    fn test_pages() {
        let gigs: Vec<_> = (0..13).map(|i| gig(i, "t", "d", None)).collect();
        let page = view_page(&gigs, "", CategoryFilter::All, 1, 6);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 6);
        assert!(!page.has_previous());
        assert!(page.has_next());

        let last = view_page(&gigs, "", CategoryFilter::All, 3, 6);
        assert_eq!(last.items.len(), 1);
        assert!(last.has_previous());
        assert!(!last.has_next());

        assert!(view_page(&gigs, "", CategoryFilter::All, 4, 6).items.is_empty());
        assert!(view_page(&gigs, "", CategoryFilter::All, 0, 6).items.is_empty());
        assert!(paginate(&gigs, usize::MAX, 6).is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }

    proptest! {
        #[test]
        fn test_empty_search_with_all_is_identity(gigs in arb_gigs()) {
            let filtered: Vec<GigRecord> =
                filter_gigs(&gigs, "", CategoryFilter::All).into_iter().cloned().collect();
            prop_assert_eq!(filtered, gigs);
        }

        #[test]
        fn test_results_contain_search_term(gigs in arb_gigs(), term in "[a-zA-Z]{0,3}") {
            let needle = term.to_lowercase();
            for gig in filter_gigs(&gigs, &term, CategoryFilter::All) {
                prop_assert!(
                    gig.title.to_lowercase().contains(&needle)
                        || gig.description.to_lowercase().contains(&needle)
                );
            }
        }

        #[test]
        fn test_pages_reconstruct_filtered_list(
            gigs in arb_gigs(),
            term in "[a-z]{0,1}",
            page_size in 1usize..10,
        ) {
            let filtered: Vec<GigRecord> =
                filter_gigs(&gigs, &term, CategoryFilter::All).into_iter().cloned().collect();
            let pages = total_pages(filtered.len(), page_size);
            prop_assert_eq!(pages, filtered.len().div_ceil(page_size));

            let mut rebuilt = vec![];
            for page in 1..=pages {
                let items = paginate(&filtered, page, page_size);
                prop_assert!(items.len() <= page_size);
                prop_assert!(!items.is_empty());
                rebuilt.extend(items);
            }
            prop_assert_eq!(rebuilt, filtered);
        }
    }
}
