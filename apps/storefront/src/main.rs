//! # Santos Storefront Entry Point
//!
//! ```text
//! ┌──────────────────┐  stdin:  {"id":1,"cmd":"get_cart"}  ┌───────────────────┐
//! │  Web storefront  │ ──────────────────────────────────► │ santos-storefront │
//! │  (front end)     │ ◄────────────────────────────────── │  (this binary)    │
//! └──────────────────┘  stdout: {"id":1,"ok":{...}}        └─────────┬─────────┘
//!                                                                    │
//!                                                 santos.db, santos_wishlist.json
//! ```
//!
//! Setup lives in lib.rs so it can be tested.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    santos_storefront::run().await
}
