//! Projection of upstream Giphy records onto one stable media shape
//!
//! Upstream bodies are loosely structured, so records are read field by field
//! from a `serde_json::Value`. Any field that is missing or not a string
//! becomes `None`; nothing in here can fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rendition keys read from the upstream `images` mapping
pub const RENDITION_ORIGINAL: &str = "original";
pub const RENDITION_PREVIEW: &str = "preview_gif";
pub const RENDITION_FIXED_WIDTH: &str = "fixed_width";

/// A single record as returned by Giphy, reduced to the fields we project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub embed_url: Option<String>,
    pub images: Renditions,
    pub rating: Option<String>,
}

/// Rendition URLs keyed by rendition name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Renditions {
    pub original: Option<String>,
    pub preview_gif: Option<String>,
    pub fixed_width: Option<String>,
}

/// Provider-independent media entity returned by every tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl From<&Value> for UpstreamRecord {
    fn from(value: &Value) -> Self {
        let images = value.get("images");
        Self {
            id: string_field(Some(value), "id"),
            title: string_field(Some(value), "title"),
            url: string_field(Some(value), "url"),
            embed_url: string_field(Some(value), "embed_url"),
            images: Renditions {
                original: rendition_url(images, RENDITION_ORIGINAL),
                preview_gif: rendition_url(images, RENDITION_PREVIEW),
                fixed_width: rendition_url(images, RENDITION_FIXED_WIDTH),
            },
            rating: string_field(Some(value), "rating"),
        }
    }
}

fn string_field(value: Option<&Value>, key: &str) -> Option<String> {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn rendition_url(images: Option<&Value>, rendition: &str) -> Option<String> {
    string_field(images.and_then(|i| i.get(rendition)), "url")
}

/// Map one upstream record to the stable output shape
pub fn normalize(record: &UpstreamRecord) -> NormalizedMedia {
    NormalizedMedia {
        id: record.id.clone(),
        title: record.title.clone(),
        url: record.url.clone(),
        embed_url: record.embed_url.clone(),
        original: record.images.original.clone(),
        preview: record.images.preview_gif.clone(),
        fixed_width: record.images.fixed_width.clone(),
        rating: record.rating.clone(),
    }
}

/// Normalize the `data` array of a list response.
///
/// A missing or non-array `data` yields an empty list.
pub fn normalize_list(body: &Value) -> Vec<NormalizedMedia> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|records| {
            records
                .iter()
                .map(|r| normalize(&UpstreamRecord::from(r)))
                .collect()
        })
        .unwrap_or_default()
}

/// Normalize the `data` object of a single-record response.
///
/// Giphy answers `random` and `translate` misses with `data: []`; anything
/// that is not an object maps to an all-absent record.
pub fn normalize_single(body: &Value) -> NormalizedMedia {
    match body.get("data") {
        Some(record) if record.is_object() => normalize(&UpstreamRecord::from(record)),
        _ => NormalizedMedia::default(),
    }
}
