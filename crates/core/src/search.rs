//! Listing helpers shared by the menu and order endpoints: pagination
//! bounds, `?ordering=` parsing and `?search=` pattern building.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for menu listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for menu listings.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// A validated sort key: one entry of an allow-list plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub field: &'static str,
    pub descending: bool,
}

impl Ordering {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub fn direction(&self) -> &'static str {
        if self.descending {
            "DESC"
        } else {
            "ASC"
        }
    }
}

/// Parse an `?ordering=` value (`field` or `-field`) against an allow-list.
///
/// Unknown or missing fields fall back to `default`, so raw user input never
/// reaches SQL.
pub fn parse_ordering(raw: Option<&str>, allowed: &[&'static str], default: Ordering) -> Ordering {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    let (name, descending) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };

    allowed
        .iter()
        .find(|field| **field == name)
        .map(|field| Ordering {
            field: *field,
            descending,
        })
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Build an `ILIKE` substring pattern, escaping the LIKE wildcards in the
/// user's term. Returns `None` for empty or whitespace-only input.
pub fn like_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
