//! eduadmin-core - Core library for the eduadmin console
//!
//! This crate holds the session store, the REST API client, the route guard
//! and the per-screen controllers used by the eduadmin front ends.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod screens;
pub mod search;
pub mod session;
pub mod util;

pub use api::{ApiClient, ProgressCallback, TextbookUpload, UploadProgress};
pub use error::{ApiError, ApiResult};
pub use routes::{Navigation, Route, RouteGuard};
pub use session::{FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};
