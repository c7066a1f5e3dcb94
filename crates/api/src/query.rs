//! Query string types for the listing endpoints.
//!
//! Raw values are turned into repository filters here: search terms become
//! escaped `ILIKE` patterns, `ordering` is checked against an allow-list and
//! paging is clamped.

use lemon_core::search::{
    clamp_limit, clamp_offset, like_pattern, parse_ordering, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use lemon_core::types::DbId;
use lemon_db::models::menu_item::{
    MenuItemFilter, DEFAULT_MENU_ITEM_ORDERING, MENU_ITEM_ORDERING_FIELDS,
};
use lemon_db::models::order::{OrderFilter, DEFAULT_ORDER_ORDERING, ORDER_ORDERING_FIELDS};
use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /menu-items` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuItemQuery {
    pub search: Option<String>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    /// Category id.
    pub category: Option<DbId>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MenuItemQuery {
    pub fn into_filter(self) -> MenuItemFilter {
        MenuItemFilter {
            search: self.search.as_deref().and_then(like_pattern),
            title: self.title,
            price: self.price,
            featured: self.featured,
            category_id: self.category,
            ordering: parse_ordering(
                self.ordering.as_deref(),
                MENU_ITEM_ORDERING_FIELDS,
                DEFAULT_MENU_ITEM_ORDERING,
            ),
            limit: clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            offset: clamp_offset(self.offset),
        }
    }
}

/// `GET /orders` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl OrderQuery {
    pub fn into_filter(self) -> OrderFilter {
        OrderFilter {
            search: self.search.as_deref().and_then(like_pattern),
            ordering: parse_ordering(
                self.ordering.as_deref(),
                ORDER_ORDERING_FIELDS,
                DEFAULT_ORDER_ORDERING,
            ),
        }
    }
}
