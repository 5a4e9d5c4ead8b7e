//! Permissive mirror of the HAR 1.2 entry shape.
//!
//! Only the fields the normalizer reads are modelled. Everything defaults so
//! that exporters omitting optional sections still load.

use super::types::{Cookie, NameValue};
use serde::Deserialize;

/// Individual HTTP transaction entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEntry {
    #[serde(rename = "startedDateTime")]
    pub started_date_time: String,
    pub time: Option<f64>,
    pub request: RawRequest,
    pub response: RawResponse,
}

/// HTTP request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawRequest {
    pub method: String,
    pub url: String,
    pub cookies: Vec<Cookie>,
    pub headers: Vec<NameValue>,
    #[serde(rename = "queryString")]
    pub query_string: Vec<NameValue>,
    #[serde(rename = "postData")]
    pub post_data: Option<RawPostData>,
    #[serde(rename = "bodySize")]
    pub body_size: Option<i64>,
}

/// HTTP response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawResponse {
    pub status: i64,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub cookies: Vec<Cookie>,
    pub headers: Vec<NameValue>,
    pub content: Option<RawContent>,
}

/// POST data
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPostData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: Option<String>,
}

/// Response content
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawContent {
    pub size: Option<i64>,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: Option<String>,
}
