//! Page/limit/name-filter evaluation for listing endpoints.

/// Default page index when none (or garbage) is supplied.
pub const DEFAULT_PAGE: usize = 0;

/// Default page size when none (or garbage) is supplied.
pub const DEFAULT_LIMIT: usize = 10;

/// Wildcard that disables name filtering.
pub const MATCH_ALL: &str = "*";

/// A bounded slice of an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// True when at least one more record exists after this page.
    pub more: bool,
}

/// Case-insensitive substring filter on a name.
///
/// `"*"` (or an empty value) matches everything. Any other value has its
/// `*` characters stripped, so `*pizza*` and `pizza` behave the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    needle: Option<String>,
}

impl NameFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.filter(|s| !s.is_empty()).unwrap_or(MATCH_ALL);
        if raw == MATCH_ALL {
            return Self { needle: None };
        }

        Self {
            needle: Some(raw.replace('*', "").to_lowercase()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.needle {
            Some(needle) => name.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

/// Page request parsed from loosely-typed query values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Parse raw query values, falling back to defaults on anything that is
    /// not a non-negative integer.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE),
            limit: parse_or(limit, DEFAULT_LIMIT),
        }
    }

    /// Take `limit + 1` records from `page * limit` to learn whether another
    /// page exists, then keep only the first `limit`.
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Page<T> {
        let start = self.page.saturating_mul(self.limit);
        let mut items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(self.limit.saturating_add(1))
            .collect();

        let more = items.len() > self.limit;
        items.truncate(self.limit);

        Page { items, more }
    }
}

fn parse_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
