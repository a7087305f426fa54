//! Error types for the Giphy request path
//!
//! Maps every failure of a tool invocation onto one of four categories:
//! configuration, upstream HTTP status, transport, or body decoding.
//! Validation failures never get this far; they are rejected by the tool
//! registry before the gateway is called.

use crate::config::ConfigError;
use std::sync::OnceLock;
use thiserror::Error;

/// Failure of a single gateway fetch
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Configuration(#[from] ConfigError),

    #[error("Giphy {status}")]
    Upstream { status: u16 },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Malformed response body: {message}")]
    Decode { message: String },
}

impl GatewayError {
    /// Create upstream status error
    pub fn upstream(status: u16) -> Self {
        Self::Upstream { status }
    }

    /// Create transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Upstream HTTP status, if this is an upstream error
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

fn secret_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r"(?i)(password|token|key|secret)[=:]\s*[^\s&)]+")
            .expect("secret pattern compiles")
    })
}

fn sensitive_path_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+")
            .expect("path pattern compiles")
    })
}

/// Sanitize error messages before they leave the process.
///
/// reqwest includes the full request URL in its errors, and that URL carries
/// `api_key=...`, so the secret pattern runs over every outbound message.
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = secret_pattern()
        .replace_all(message, "${1}=***")
        .to_string();

    sanitized = sensitive_path_pattern()
        .replace_all(&sanitized, "/***REDACTED***/")
        .to_string();

    // Total length stays <= 500
    if sanitized.len() > 500 {
        let truncate_suffix = "...[truncated]";
        let mut cut = 500 - truncate_suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized = format!("{}{}", &sanitized[..cut], truncate_suffix);
    }

    sanitized
}
