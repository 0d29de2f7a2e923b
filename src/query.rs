use std::collections::BTreeMap;

/// Page sizes offered by every list page.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// Number of page buttons shown in the pager before ranges collapse into an
/// ellipsis.
pub const MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Filter, sort, search and pagination state for one list page. Every
/// transition keeps the invariant that narrowing the result set (search,
/// sort, filters) returns to page 1, while paging itself leaves the rest of
/// the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    resource: &'static str,
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new(resource: &'static str, sort_field: &str, sort_direction: SortDirection) -> Self {
        Self {
            resource,
            page: 1,
            page_size: PAGE_SIZES[0],
            search: String::new(),
            sort_field: sort_field.to_string(),
            sort_direction,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Commit a (debounced) search term. A changed term returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.page = 1;
        }
    }

    /// Toggle sorting: the active field flips direction, a new field starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Set a named filter; an empty value removes it. Any change returns to
    /// page 1.
    pub fn set_filter(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let changed = if value.is_empty() {
            self.filters.remove(name).is_some()
        } else if self.filters.get(name).map(String::as_str) == Some(value.as_str()) {
            false
        } else {
            self.filters.insert(name.to_string(), value);
            true
        };
        if changed {
            self.page = 1;
        }
    }

    pub fn filter(&self, name: &str) -> &str {
        self.filters.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.page = 1;
        }
    }

    /// Jump to a page. Leaves search, sort and filters untouched.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size in place. Leaves every other field untouched.
    pub fn set_page_size(&mut self, page_size: u32) {
        if PAGE_SIZES.contains(&page_size) {
            self.page_size = page_size;
        }
    }

    /// Wire pairs in the order the remote API expects: the fixed pagination
    /// and sort parameters first, then the named filters in `filter_names`
    /// order (absent filters are sent as empty strings, matching the wire
    /// behavior of the platform API).
    pub fn to_pairs(&self, filter_names: &[&str]) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("search".to_string(), self.search.clone()),
            ("sort".to_string(), self.sort_field.clone()),
            (
                "direction".to_string(),
                self.sort_direction.as_str().to_string(),
            ),
        ];
        for name in filter_names {
            pairs.push((name.to_string(), self.filter(name).to_string()));
        }
        pairs
    }

    /// Normalized descriptor identifying this request for caching: resource
    /// plus the resolved parameters. Identical state yields an identical
    /// string (filters are kept in a sorted map).
    pub fn descriptor(&self) -> String {
        let mut out = format!(
            "{}?page={}&pageSize={}&search={}&sort={}&direction={}",
            self.resource,
            self.page,
            self.page_size,
            urlencoding::encode(&self.search),
            urlencoding::encode(&self.sort_field),
            self.sort_direction.as_str(),
        );
        for (name, value) in &self.filters {
            out.push('&');
            out.push_str(name);
            out.push('=');
            out.push_str(&urlencoding::encode(value));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

/// Bounded pager window: all pages when they fit, otherwise the first and
/// last page always shown with an ellipsis for each collapsed range and a
/// block centered on the current page. Never emits a number outside
/// `[1, total]`.
pub fn pagination_numbers(current: u32, total: u32, max_visible: u32) -> Vec<PageToken> {
    use PageToken::*;

    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    if total <= max_visible {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}
