//! HTTP API with JSON endpoints for browsing and running tools.
//!
//! ```text
//! ┌──────────┐        HTTP + JSON        ┌──────────────┐
//! │  Web UI  │──────────────────────────▶│  API Router  │
//! │  curl    │   (CORS-gated origins)    │  (axum)      │
//! └──────────┘                           └──────┬───────┘
//!                                               │ get(id) / list()
//!                                        ┌──────▼───────┐
//!                                        │ ToolRegistry │
//!                                        └──────────────┘
//! ```

pub mod server;
pub mod types;

pub use server::{ApiState, cors_layer, router, serve};
pub use types::*;
