//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Store name, currency and shipping rules for the front end.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
