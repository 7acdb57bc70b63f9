//! HTTP front end for the stock research pipeline
//!
//! Serves a single page plus a JSON endpoint that runs one analysis per
//! request. Handlers share a [`StockResearcher`](research_stock::StockResearcher)
//! built once at startup.

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{ServerConfig, create_app, serve};
pub use error::ApiError;
pub use state::AppState;
