#![deny(unsafe_code)]

//! DevForge core: the tool contract, registry, diff engine, built-in tools,
//! and HTTP API.
//!
//! Front ends (the HTTP API here, the CLI in `devforge-cli`) resolve tools
//! through a [`ToolRegistry`], build a [`ToolInput`], and render the
//! [`ToolOutput`] they get back. They never depend on a tool's internals.

/// HTTP API router, DTOs, and serve loop.
pub mod api;
/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// LCS line diff engine and renderers.
pub mod diff;
/// Tool registry with case-insensitive lookup.
pub mod registry;
/// API server process and shutdown handling.
pub mod server;
/// Tool trait, descriptors, and execution envelope.
pub mod tool;
/// Built-in tool catalog.
pub mod tools;

pub use registry::ToolRegistry;
pub use server::{Server, ServerError};
pub use tool::{
    ParamType, ParamValue, Tool, ToolCategory, ToolDescriptor, ToolError, ToolInput, ToolOutput,
    ToolParameter, execute_guarded,
};
