//! Method-channel envelopes.
//!
//! Calls are `{"method": "...", "args": ...}`. Replies are a JSON array:
//! `[result]` on success, `[code, message, details]` on error, and an empty
//! message when the method is not implemented.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ChannelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self { method: method.into(), args }
    }

    /// Named argument, `None` if args is not a map or the value is missing,
    /// null or of another type.
    pub fn argument<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.args.as_object()?.get(key)?;
        if value.is_null() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodResult {
    Success(Value),
    Error {
        code: String,
        message: Option<String>,
        details: Value,
    },
    NotImplemented,
}

impl MethodResult {
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success(value.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub fn decode_method_call(bytes: &[u8]) -> Result<MethodCall, ChannelError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_method_call(call: &MethodCall) -> Result<Vec<u8>, ChannelError> {
    Ok(serde_json::to_vec(call)?)
}

pub fn encode_envelope(result: &MethodResult) -> Vec<u8> {
    let envelope = match result {
        MethodResult::NotImplemented => return Vec::new(),
        MethodResult::Success(value) => json!([value]),
        MethodResult::Error { code, message, details } => json!([code, message, details]),
    };
    // a Value always serializes
    serde_json::to_vec(&envelope).unwrap_or_default()
}

pub fn decode_envelope(bytes: &[u8]) -> Result<MethodResult, ChannelError> {
    if bytes.is_empty() {
        return Ok(MethodResult::NotImplemented);
    }
    let envelope: Vec<Value> = serde_json::from_slice(bytes)?;
    match envelope.len() {
        1 => Ok(MethodResult::Success(envelope.into_iter().next().unwrap_or(Value::Null))),
        3 => {
            let mut fields = envelope.into_iter();
            let code = match fields.next() {
                Some(Value::String(code)) => code,
                other => {
                    return Err(ChannelError::InvalidEnvelope(format!(
                        "error code must be a string, got {other:?}"
                    )))
                }
            };
            let message = match fields.next() {
                Some(Value::String(msg)) => Some(msg),
                Some(Value::Null) | None => None,
                Some(other) => {
                    return Err(ChannelError::InvalidEnvelope(format!(
                        "error message must be a string, got {other}"
                    )))
                }
            };
            let details = fields.next().unwrap_or(Value::Null);
            Ok(MethodResult::Error { code, message, details })
        }
        n => Err(ChannelError::InvalidEnvelope(format!("{n} elements"))),
    }
}
