//! Client-side data layer for the HR backend: a typed HTTP client, a generic
//! remote-backed entity store and one configured store per entity.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod logging;
pub mod session;
pub mod store;
pub mod stores;

pub use api::{ApiClient, ApiError, ApiResult, ListParams};
pub use session::Session;
pub use store::ResourceStore;
pub use stores::Stores;
