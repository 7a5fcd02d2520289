use serde_json::Value;
use thiserror::Error;

use crate::channel::MethodResult;
use crate::def::*;

/// Failures of a `setWallpaper` call. Each one is answered across the bridge,
/// never raised past it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WallpaperError {
    #[error("image path was not provided")]
    MissingPath,
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("wallpaper manager failed: {0}")]
    SystemApi(String),
}

impl WallpaperError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPath => CODE_PATH_ERROR,
            Self::Decode(_) => CODE_BITMAP_ERROR,
            Self::SystemApi(_) => CODE_WALLPAPER_ERROR,
        }
    }

    /// Message sent to the caller. OS messages are forwarded verbatim,
    /// decoder causes stay in the log.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::MissingPath => Some(MSG_PATH_ERROR.to_string()),
            Self::Decode(_) => Some(MSG_BITMAP_ERROR.to_string()),
            Self::SystemApi(msg) => Some(msg.clone()),
        }
    }

    pub fn into_method_result(self) -> MethodResult {
        MethodResult::Error {
            code: self.code().to_string(),
            message: self.message(),
            details: Value::Null,
        }
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid reply envelope: {0}")]
    InvalidEnvelope(String),
}
