//! beanboard: CRUD service and terminal dashboard for the dry-bean dataset
//!
//! The crate carries both halves of the system:
//! - server side: an axum HTTP API over a SQLite table of bean records
//! - client side: an API client, an in-memory cache, and the
//!   filter/sort/paginate pipeline that drives the table view

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod view;
