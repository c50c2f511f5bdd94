use serde::Serialize;

/// One slot of a pager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PageLink {
    Page(u32),
    /// Elided run of pages.
    Gap,
}

/// Pages always shown at the start of the pager.
const LEFT_EDGE: u64 = 2;
/// Pages shown on each side of the current one.
const AROUND_CURRENT: u64 = 1;
/// Pages always shown at the end of the pager.
const RIGHT_EDGE: u64 = 1;

/// Compact pager for `total_pages`, e.g. `1 2 … 6 7 8 … 12` around page 7.
///
/// `current_page` is clamped into range. Works in `u64`, so no total the
/// backend reports can overflow.
pub fn page_window(total_pages: u32, current_page: u32) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }
    let total = u64::from(total_pages);
    let current = u64::from(current_page.clamp(1, total_pages));

    let runs = [
        (1, LEFT_EDGE.min(total)),
        (
            current.saturating_sub(AROUND_CURRENT).max(1),
            (current + AROUND_CURRENT).min(total),
        ),
        ((total + 1).saturating_sub(RIGHT_EDGE).max(1), total),
    ];

    let mut pages = Vec::new();
    let mut shown = 0;
    for (start, end) in runs {
        let start = start.max(shown + 1);
        if start > end {
            continue;
        }
        if start > shown + 1 {
            pages.push(PageLink::Gap);
        }
        // `end <= total`, which came from a u32.
        pages.extend((start..=end).map(|page| PageLink::Page(page as u32)));
        shown = end;
    }

    pages
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<PageLink>,
    pub page: u32,
}

impl<T> Paginated<T> {
    /// Without a known total only the current page is shown.
    pub fn new(items: Vec<T>, current_page: u32, total_pages: Option<u32>) -> Self {
        let current_page = current_page.max(1);

        let pages = match total_pages {
            Some(total) => page_window(total, current_page),
            None => vec![PageLink::Page(current_page)],
        };

        Self {
            items,
            pages,
            page: current_page,
        }
    }
}

impl std::fmt::Display for PageLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageLink::Page(page) => write!(f, "{page}"),
            PageLink::Gap => f.write_str("…"),
        }
    }
}
