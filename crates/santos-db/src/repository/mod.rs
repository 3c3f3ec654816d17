//! # Repository Module
//!
//! SQL access for the storefront, one repository per table.
//!
//! ```text
//! Storefront command
//!      │
//!      │  db.products().get_by_id("1")
//!      ▼
//! ProductRepository ──► products
//! AccountRepository ──► accounts
//! ```
//!
//! - [`ProductRepository`](product::ProductRepository) - catalog listing, lookup and seeding
//! - [`AccountRepository`](account::AccountRepository) - shopper accounts

pub mod account;
pub mod product;
