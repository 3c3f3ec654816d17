//! # History Commands
//!
//! The "recently viewed" bar. Views are recorded by `get_product`; these
//! commands only read the queue and hide the bar.

use serde::{Deserialize, Serialize};
use tracing::debug;

use santos_core::{Product, RecentlyViewed};

use crate::state::StorefrontState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Viewed products, most recent first (at most five).
    pub products: Vec<Product>,
    /// The visibility flag.
    pub visible: bool,
    /// Whether the bar renders: visible and at least two views.
    pub show_bar: bool,
    /// Products shown in the bar.
    pub preview: Vec<Product>,
}

impl From<&RecentlyViewed> for HistoryResponse {
    fn from(history: &RecentlyViewed) -> Self {
        HistoryResponse {
            products: history.entries().cloned().collect(),
            visible: history.is_visible(),
            show_bar: history.shows_bar(),
            preview: history.preview().cloned().collect(),
        }
    }
}

pub fn get_history(storefront: &StorefrontState) -> HistoryResponse {
    debug!("get_history command");
    storefront.with_storefront(|s| HistoryResponse::from(s.history()))
}

pub fn dismiss_history(storefront: &StorefrontState) -> HistoryResponse {
    debug!("dismiss_history command");
    storefront.with_storefront_mut(|s| {
        s.dismiss_history();
        HistoryResponse::from(s.history())
    })
}
