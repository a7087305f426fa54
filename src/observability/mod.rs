//! Observability for the Giphy MCP server: structured logging to stderr.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

// Span macros for structured logging
pub use logging::{tool_span, upstream_span};
