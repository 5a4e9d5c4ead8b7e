use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use url::Url;

/// One normalized HTTP exchange from a HAR capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticHarEntry {
    /// Positional identifier, `entry-<index>`
    pub entry_id: String,
    /// Capture start time as recorded in the HAR (`startedDateTime`)
    pub timestamp: String,
    /// Elapsed time in milliseconds, never negative
    pub duration: f64,
    pub request: SemanticRequest,
    pub response: SemanticResponse,
    /// Populated by the external analyzer only
    pub tokens: Vec<ExtractedToken>,
    /// Entry IDs this entry depends on, populated by the external analyzer only
    pub dependencies: Vec<String>,
}

impl SemanticHarEntry {
    /// Parse the capture timestamp, if it is valid RFC 3339
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }

    /// Case-insensitive request header lookup (first match wins)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Hostname of the request URL, if the URL parses
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.request.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

/// Normalized HTTP request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<NameValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub cookies: Vec<Cookie>,
    pub query_string: Vec<NameValue>,
}

/// Normalized HTTP response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticResponse {
    pub status: i64,
    pub status_text: String,
    pub headers: Vec<NameValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub cookies: Vec<Cookie>,
}

/// Request or response payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub mime_type: String,
    pub text: String,
    pub size: u64,
}

/// Name/value pair used for headers and query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Cookie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(rename = "httpOnly", skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
}

/// A dynamic value the analyzer found in one exchange and reused in another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedToken {
    pub name: String,
    pub value: String,
    pub location: TokenLocation,
}

/// Where an extracted token was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLocation {
    Header,
    Cookie,
    Query,
    Body,
}
