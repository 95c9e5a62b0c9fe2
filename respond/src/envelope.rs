//! The JSON shapes every response body takes.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// `{"success":true,"data":...}`, `data` left out when there is nothing to send.
///
/// `data` holds the payload exactly as it was serialized, field order included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

impl SuccessEnvelope {
    /// Wraps `data`. A payload that serializes to `null` (`()`, `None`)
    /// counts as no data at all.
    pub fn new<T: Serialize>(data: T) -> serde_json::Result<Self> {
        let data = serde_json::value::to_raw_value(&data)?;

        Ok(Self {
            success: true,
            data: (data.get() != "null").then_some(data),
        })
    }
}

/// `{"success":false,"code":...,"message":...}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub code: u16,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// `{"status":...,"message":...}` carrying the status' reason phrase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMessageEnvelope {
    pub status: u16,
    pub message: String,
}

impl DefaultMessageEnvelope {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_owned(),
        }
    }
}
