use crate::har::SemanticHarEntry;
use url::Url;

/// Short display label for the entry at `index`
///
/// `"<METHOD> <last path segment>"` when the URL parses, otherwise
/// `"<METHOD> Request #<n>"` with a 1-based `n`. Indices with no entry
/// (a matrix that outlived its entries) get `"UNKNOWN Request #<n>"`.
pub fn label(entries: &[SemanticHarEntry], index: usize) -> String {
    let Some(entry) = resolve(entries, index) else {
        tracing::debug!("No entry at index {} for label", index);
        return format!("UNKNOWN Request #{}", index.saturating_add(1));
    };

    let method = &entry.request.method;
    match Url::parse(&entry.request.url) {
        Ok(url) => format!("{} {}", method, last_segment(&url)),
        Err(e) => {
            tracing::debug!("Failed to parse URL {}: {}", entry.request.url, e);
            format!("{} Request #{}", method, index.saturating_add(1))
        }
    }
}

/// Entry behind a matrix index, `None` when the index is out of range
pub fn resolve(entries: &[SemanticHarEntry], index: usize) -> Option<&SemanticHarEntry> {
    entries.get(index)
}

fn last_segment(url: &Url) -> &str {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .unwrap_or("/")
}
