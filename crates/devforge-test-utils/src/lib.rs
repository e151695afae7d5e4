#![deny(unsafe_code)]

//! Shared test utilities for the DevForge workspace.
//!
//! Provides stub tools, config builders, a throwaway API server, and tracing
//! helpers so that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! devforge-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod server;
pub mod tools;
pub mod tracing_setup;

pub use config::{TestConfigBuilder, TestConfigFile};
pub use server::{TestResponse, TestServer};
pub use tools::{PanickingTool, StubTool};
pub use tracing_setup::init_test_tracing;
