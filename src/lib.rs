//! TTL Cache - A lightweight in-memory cache server
//!
//! Every entry carries an absolute expiration time; expired entries are
//! reclaimed lazily as a side effect of `set` and `get`.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
