//! Query state of a list screen and the reducer that edits it.
//!
//! Every edit goes through [`QueryState::apply`], which returns the
//! [`Effect`] the controller has to run. Edits that change the result set
//! (search, sort, filters, page size) always move back to the first page.

use std::collections::BTreeMap;

use crate::domain::types::{FilterKey, PageSize, SortKey};

/// What is currently requested from the list endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    limit: PageSize,
    search: String,
    sort: SortKey,
    filters: BTreeMap<FilterKey, String>,
}

/// A single edit of the query state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryAction {
    SetSearch(String),
    SetSort(SortKey),
    /// An empty value removes the filter.
    SetFilter(FilterKey, String),
    ClearFilter(FilterKey),
    /// Requested page together with the page count currently known.
    SetPage {
        page: u32,
        total_pages: Option<u32>,
    },
    SetLimit(PageSize),
}

/// Follow-up work produced by an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Re-fetch right away.
    FetchNow,
    /// Re-fetch once the search input settles.
    FetchDebounced,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(PageSize::default(), SortKey::default())
    }
}

impl QueryState {
    pub fn new(limit: PageSize, sort: SortKey) -> Self {
        Self {
            page: 1,
            limit,
            search: String::new(),
            sort,
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> PageSize {
        self.limit
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &SortKey {
        &self.sort
    }

    pub fn filters(&self) -> &BTreeMap<FilterKey, String> {
        &self.filters
    }

    pub fn filter(&self, key: &FilterKey) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Applies `action` and reports what has to happen next.
    pub fn apply(&mut self, action: QueryAction) -> Effect {
        match action {
            QueryAction::SetSearch(text) => {
                if self.search == text {
                    return Effect::None;
                }
                self.search = text;
                self.page = 1;
                Effect::FetchDebounced
            }
            QueryAction::SetSort(sort) => {
                if self.sort == sort {
                    return Effect::None;
                }
                self.sort = sort;
                self.page = 1;
                Effect::FetchNow
            }
            QueryAction::SetFilter(key, value) => {
                let value = value.trim().to_string();
                if value.is_empty() {
                    return self.apply(QueryAction::ClearFilter(key));
                }
                if self.filters.get(&key) == Some(&value) {
                    return Effect::None;
                }
                self.filters.insert(key, value);
                self.page = 1;
                Effect::FetchNow
            }
            QueryAction::ClearFilter(key) => {
                if self.filters.remove(&key).is_none() {
                    return Effect::None;
                }
                self.page = 1;
                Effect::FetchNow
            }
            QueryAction::SetPage { page, total_pages } => {
                let page = clamp_page(page, total_pages);
                if self.page == page {
                    return Effect::None;
                }
                self.page = page;
                Effect::FetchNow
            }
            QueryAction::SetLimit(limit) => {
                if self.limit == limit {
                    return Effect::None;
                }
                self.limit = limit;
                self.page = 1;
                Effect::FetchNow
            }
        }
    }
}

/// Keeps `page` within `1..=total_pages`; an unknown page count only bounds
/// it from below.
fn clamp_page(page: u32, total_pages: Option<u32>) -> u32 {
    let upper = total_pages.map_or(u32::MAX, |total| total.max(1));
    page.clamp(1, upper)
}
