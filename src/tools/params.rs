//! Typed parameters for the Giphy tools
//!
//! Each parameter struct carries its JSON schema (what clients see in
//! `tools/list` and what the registry validates against) and knows how to
//! turn itself into upstream query pairs. Defaults are applied by serde.

use crate::gateway::Query;
use crate::tools::ToolError;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 50;
pub const DEFAULT_WEIRDNESS: u8 = 5;
pub const MAX_WEIRDNESS: u8 = 10;

/// Parameters accepted by one tool
pub trait ToolParams: DeserializeOwned {
    /// JSON schema for the parameter object
    fn schema() -> Value;

    /// Upstream query pairs, in upstream order
    fn into_query(self) -> Query;
}

/// Deserialize validated arguments and build the upstream query
pub fn build_query<P: ToolParams>(arguments: &Value) -> Result<Query, ToolError> {
    let params: P = serde_json::from_value(arguments.clone())
        .map_err(|e| ToolError::ValidationError(e.to_string()))?;
    Ok(params.into_query())
}

/// Content rating filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    #[serde(rename = "g")]
    G,
    #[serde(rename = "pg")]
    Pg,
    #[serde(rename = "pg-13")]
    Pg13,
    #[serde(rename = "r")]
    R,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::G, Rating::Pg, Rating::Pg13, Rating::R];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::Pg13 => "pg-13",
            Rating::R => "r",
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_weirdness() -> u8 {
    DEFAULT_WEIRDNESS
}

/// Accept any JSON number with no fractional part, so `2.0` reads as `2`.
/// JSON Schema's `integer` type admits such values.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| de::Error::custom(format!("expected a whole number in range, got {number}")))
}

fn limit_schema() -> Value {
    json!({
        "type": "integer",
        "minimum": MIN_LIMIT,
        "maximum": MAX_LIMIT,
        "default": DEFAULT_LIMIT
    })
}

fn required_text_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}

/// `search`: GIF search
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
    #[serde(default)]
    pub rating: Rating,
}

impl ToolParams for SearchParams {
    fn schema() -> Value {
        let ratings: Vec<&str> = Rating::ALL.iter().map(Rating::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                "query": required_text_schema("Search term"),
                "limit": limit_schema(),
                "rating": {
                    "type": "string",
                    "enum": ratings,
                    "default": Rating::default().as_str()
                }
            },
            "required": ["query"]
        })
    }

    fn into_query(self) -> Query {
        vec![
            ("q", self.query),
            ("limit", self.limit.to_string()),
            ("rating", self.rating.as_str().to_string()),
        ]
    }
}

/// `trending`: currently trending GIFs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendingParams {
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

impl ToolParams for TrendingParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": limit_schema()
            }
        })
    }

    fn into_query(self) -> Query {
        vec![("limit", self.limit.to_string())]
    }
}

/// `random`: one random GIF, optionally filtered by tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RandomParams {
    #[serde(default)]
    pub tag: Option<String>,
}

impl ToolParams for RandomParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "tag": {
                    "type": "string",
                    "description": "Filter by tag"
                }
            }
        })
    }

    fn into_query(self) -> Query {
        // An empty tag means no filter
        self.tag
            .filter(|tag| !tag.is_empty())
            .map(|tag| vec![("tag", tag)])
            .unwrap_or_default()
    }
}

/// `search_stickers`: sticker search
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StickerSearchParams {
    pub query: String,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

impl ToolParams for StickerSearchParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": required_text_schema("Search term"),
                "limit": limit_schema()
            },
            "required": ["query"]
        })
    }

    fn into_query(self) -> Query {
        vec![("q", self.query), ("limit", self.limit.to_string())]
    }
}

/// `translate`: phrase to a single GIF
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslateParams {
    pub phrase: String,
    #[serde(default = "default_weirdness", deserialize_with = "whole_number")]
    pub weirdness: u8,
}

impl ToolParams for TranslateParams {
    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "phrase": required_text_schema("Phrase to translate"),
                "weirdness": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_WEIRDNESS,
                    "default": DEFAULT_WEIRDNESS
                }
            },
            "required": ["phrase"]
        })
    }

    fn into_query(self) -> Query {
        vec![("s", self.phrase), ("weirdness", self.weirdness.to_string())]
    }
}
