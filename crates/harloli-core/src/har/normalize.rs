use super::raw::{RawContent, RawEntry, RawPostData};
use super::types::{Body, SemanticHarEntry, SemanticRequest, SemanticResponse};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Normalize the text of a HAR file into semantic entries
///
/// Only `log.entries` is required. Fields inside each entry are read
/// permissively; the whole payload is rejected if any entry fails to load,
/// so callers never see a partial result.
pub fn normalize(content: &str) -> Result<Vec<SemanticHarEntry>> {
    tracing::debug!("Normalizing HAR payload ({} bytes)", content.len());

    let root: Value = serde_json::from_str(content)
        .map_err(|e| Error::Format(format!("HAR payload is not valid JSON: {}", e)))?;

    let log = root
        .get("log")
        .filter(|log| log.is_object())
        .ok_or_else(|| Error::Format("Missing top-level \"log\" object".to_string()))?;

    let raw_entries = log
        .get("entries")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Format("Missing \"log.entries\" array".to_string()))?;

    let entries = raw_entries
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let raw = RawEntry::deserialize(value)
                .map_err(|e| Error::Format(format!("Entry {} is malformed: {}", idx, e)))?;
            Ok(to_semantic(idx, raw))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Normalized {} HAR entries", entries.len());

    Ok(entries)
}

/// Read a HAR file from disk and normalize it
pub async fn read_har_file(path: &Path) -> Result<Vec<SemanticHarEntry>> {
    tracing::debug!("Reading HAR file from: {}", path.display());

    let content = tokio::fs::read_to_string(path).await?;
    let entries = normalize(&content)?;

    tracing::info!(
        "Successfully loaded {} with {} entries",
        path.display(),
        entries.len()
    );

    Ok(entries)
}

fn to_semantic(idx: usize, raw: RawEntry) -> SemanticHarEntry {
    let request_body = raw
        .request
        .post_data
        .map(|post| request_body(post, raw.request.body_size));
    let response_body = raw.response.content.map(response_body);

    SemanticHarEntry {
        entry_id: format!("entry-{}", idx),
        timestamp: raw.started_date_time,
        duration: raw.time.filter(|t| t.is_finite()).unwrap_or(0.0).max(0.0),
        request: SemanticRequest {
            method: raw.request.method,
            url: raw.request.url,
            headers: raw.request.headers,
            body: request_body,
            cookies: raw.request.cookies,
            query_string: raw.request.query_string,
        },
        response: SemanticResponse {
            status: raw.response.status,
            status_text: raw.response.status_text,
            headers: raw.response.headers,
            body: response_body,
            cookies: raw.response.cookies,
        },
        tokens: Vec::new(),
        dependencies: Vec::new(),
    }
}

fn request_body(post: RawPostData, body_size: Option<i64>) -> Body {
    let text = post.text.unwrap_or_default();
    Body {
        size: known_size(body_size).unwrap_or(text.len() as u64),
        mime_type: post.mime_type,
        text,
    }
}

fn response_body(content: RawContent) -> Body {
    let text = content.text.unwrap_or_default();
    Body {
        size: known_size(content.size).unwrap_or(text.len() as u64),
        mime_type: content.mime_type,
        text,
    }
}

// HAR uses -1 for "unknown"
fn known_size(size: Option<i64>) -> Option<u64> {
    size.and_then(|s| u64::try_from(s).ok())
}
