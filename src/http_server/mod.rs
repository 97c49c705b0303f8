//! # HTTP Server Module
//!
//! JSON API over the prediction service. Clients log in for a bearer
//! token and send it as `Authorization: Bearer <token>`.
//!
//! # Endpoints
//!
//! - `/health` - liveness, no auth
//! - `/auth/*` - login, logout, current session
//! - `/admin/users*` - account management (admin)
//! - `/catalog/*` - form mappings and presets (user)
//! - `/model/info` - model summary (user)
//! - `/predict*` - validate and predict (user), export (educator)

pub mod admin_routes;
pub mod auth_routes;
pub mod catalog_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod prediction_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
