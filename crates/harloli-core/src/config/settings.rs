use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECS: u32 = 30;
pub const MIN_TIMEOUT_SECS: u32 = 1;
pub const MAX_TIMEOUT_SECS: u32 = 300;
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const MAX_RETRY_COUNT: u32 = 10;

/// Execution settings forwarded to the generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionSettings {
    pub use_proxy: bool,
    pub follow_redirects: bool,
    /// Request timeout in seconds, within `[1, 300]`
    pub timeout: u32,
    /// Retries per request, within `[0, 10]`
    pub retry_count: u32,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            use_proxy: false,
            follow_redirects: true,
            timeout: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
        }
    }
}

impl ExecutionSettings {
    pub fn toggle_use_proxy(&mut self) {
        self.use_proxy = !self.use_proxy;
    }

    pub fn toggle_follow_redirects(&mut self) {
        self.follow_redirects = !self.follow_redirects;
    }

    /// Set the timeout from raw user input
    ///
    /// Non-numeric input and values below 1 fall back to 30 seconds; values
    /// above 300 are capped at 300.
    pub fn set_timeout(&mut self, raw: &str) {
        self.timeout = clamp_timeout(parse_integer(raw));
    }

    pub fn set_timeout_secs(&mut self, secs: i64) {
        self.timeout = clamp_timeout(Some(secs));
    }

    /// Set the retry count from raw user input
    ///
    /// Non-numeric and negative input become 0; values above 10 are capped.
    pub fn set_retry_count(&mut self, raw: &str) {
        self.retry_count = clamp_retry_count(parse_integer(raw));
    }

    pub fn set_retry_count_value(&mut self, count: i64) {
        self.retry_count = clamp_retry_count(Some(count));
    }

    /// Re-apply the allowed ranges, e.g. after deserializing from a file
    pub fn clamped(self) -> Self {
        Self {
            timeout: clamp_timeout(Some(i64::from(self.timeout))),
            retry_count: clamp_retry_count(Some(i64::from(self.retry_count))),
            ..self
        }
    }
}

/// Coerce a timeout into `[1, 300]`; missing or non-positive input means 30
pub fn clamp_timeout(value: Option<i64>) -> u32 {
    let clamped = match value {
        Some(v) if v >= i64::from(MIN_TIMEOUT_SECS) => v.min(i64::from(MAX_TIMEOUT_SECS)) as u32,
        _ => DEFAULT_TIMEOUT_SECS,
    };
    if value != Some(i64::from(clamped)) {
        tracing::debug!("Timeout input {:?} coerced to {}s", value, clamped);
    }
    clamped
}

/// Coerce a retry count into `[0, 10]`; missing or negative input means 0
pub fn clamp_retry_count(value: Option<i64>) -> u32 {
    let clamped = match value {
        Some(v) if v >= 0 => v.min(i64::from(MAX_RETRY_COUNT)) as u32,
        _ => 0,
    };
    if value != Some(i64::from(clamped)) {
        tracing::debug!("Retry count input {:?} coerced to {}", value, clamped);
    }
    clamped
}

/// Leading-integer parse: "12" and "12.7" give 12, "abc" gives None
fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}
