//! # articles
//!
//! A small HTTP service keeping an ordered, in-memory collection of articles
//! and exposing create, read, update and delete over JSON.
//!
//! The collection starts with two seed articles and lives only as long as the
//! process. Routing is a radix tree per method via [`matchit`]; connections are
//! served by hyper on tokio and drained on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use articles::{ArticleStore, Config, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), articles::Error> {
//!     let config = Config::default();
//!     let store = Arc::new(ArticleStore::new(config.seed));
//!
//!     Server::bind(config.addr).await?.serve(api::routes(store)).await
//! }
//! ```

mod article;
mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod api;

pub use article::Article;
pub use config::{Config, PORT, seed_articles};
pub use error::{BoxError, Error};
pub use handler::{Handler, with_state};
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::ArticleStore;
