use crate::har::NameValue;
use serde::{Deserialize, Serialize};

/// Which half of a header pair to edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Name,
    Value,
}

/// User-defined headers applied to every generated request
///
/// Names are not deduplicated; the generator receives the list as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomHeaders {
    headers: Vec<NameValue>,
}

impl CustomHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty pair, returning its position
    pub fn add(&mut self) -> usize {
        self.headers.push(NameValue::default());
        self.headers.len() - 1
    }

    /// Append a filled pair
    pub fn push(&mut self, header: NameValue) {
        self.headers.push(header);
    }

    /// Returns `false` if `position` is out of range
    pub fn update(&mut self, position: usize, field: HeaderField, value: impl Into<String>) -> bool {
        let Some(header) = self.headers.get_mut(position) else {
            tracing::debug!("No custom header at position {}", position);
            return false;
        };
        match field {
            HeaderField::Name => header.name = value.into(),
            HeaderField::Value => header.value = value.into(),
        }
        true
    }

    /// Returns `false` if `position` is out of range
    pub fn remove(&mut self, position: usize) -> bool {
        if position >= self.headers.len() {
            tracing::debug!("No custom header at position {}", position);
            return false;
        }
        self.headers.remove(position);
        true
    }

    pub fn as_slice(&self) -> &[NameValue] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl From<Vec<NameValue>> for CustomHeaders {
    fn from(headers: Vec<NameValue>) -> Self {
        Self { headers }
    }
}
