//! Giphy MCP server
//!
//! Exposes Giphy GIF and sticker search as MCP tools over stdio.
//!
//! # Overview
//!
//! - `search`, `trending`, `random`, `search_stickers`, `translate` tools
//! - One shared [`RequestGateway`] per server: rate limiting, API key
//!   injection, status mapping
//! - Every upstream record is projected onto [`NormalizedMedia`]
//!
//! # Quick Start
//!
//! ```rust
//! use giphy_mcp::normalize::{normalize, UpstreamRecord};
//! use serde_json::json;
//!
//! let record = UpstreamRecord::from(&json!({
//!     "id": "a1",
//!     "embed_url": "https://giphy.com/embed/a1",
//!     "images": { "fixed_width": { "url": "f1" } }
//! }));
//! let media = normalize(&record);
//!
//! assert_eq!(media.fixed_width.as_deref(), Some("f1"));
//! assert_eq!(
//!     serde_json::to_value(&media).unwrap(),
//!     json!({ "id": "a1", "embedUrl": "https://giphy.com/embed/a1", "fixedWidth": "f1" })
//! );
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod observability;
pub mod rate_limiter;
pub mod server;
pub mod tools;

pub use config::{ApiKeySource, ConfigError, GiphyConfig};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{Endpoint, RequestGateway};
pub use normalize::{NormalizedMedia, UpstreamRecord};
pub use rate_limiter::RateLimiter;
pub use server::GiphyServer;
pub use tools::{Tool, ToolDescription, ToolError, ToolOutput, ToolSystem};
