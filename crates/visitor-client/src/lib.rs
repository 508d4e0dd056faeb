//! Frontend side of the visitor book: an HTTP client for the `/api` surface,
//! a query cache mirroring server state, and headless form/list components
//! that render to plain text.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod page;
pub mod sync;

pub use cache::QueryCache;
pub use client::ApiClient;
pub use error::ClientError;
pub use sync::VisitorBook;
