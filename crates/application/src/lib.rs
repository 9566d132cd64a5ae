//! Application layer - Use cases and orchestration
//!
//! Contains the tool dispatcher, the gateway port it calls through, and the
//! per-request context. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod request_context;
pub mod tools;

pub use error::ApplicationError;
pub use ports::*;
pub use request_context::RequestContext;
pub use tools::{ToolContent, ToolDefinition, ToolDispatcher, ToolResult};
