//! biztrack: company and invoice tracking JSON API over PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod state;
pub mod validate;

pub use config::Config;
pub use error::ApiError;
pub use routes::app;
pub use state::AppState;
