use std::fmt::Display;
use std::path::Path;

use log::{error, info, warn};

use crate::channel::{self, MethodCall, MethodResult};
use crate::decode;
use crate::def::*;
use crate::error::WallpaperError;
use crate::sink::{self, WallpaperSink};

/// Answers calls on the wallpaper channel. Holds nothing between calls
/// except the sink itself.
pub struct WallpaperHandler<S> {
    sink: S,
}

impl<S: WallpaperSink> WallpaperHandler<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Exactly one result per call.
    pub fn handle(&mut self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            METHOD_SET_WALLPAPER => match self.set_wallpaper(call) {
                Ok(msg) => {
                    info!("{METHOD_SET_WALLPAPER}: {msg}");
                    MethodResult::success(msg)
                }
                Err(err) => {
                    error!("{METHOD_SET_WALLPAPER} failed: {err}");
                    err.into_method_result()
                }
            },
            other => {
                warn!("method not implemented: {other}");
                MethodResult::NotImplemented
            }
        }
    }

    /// Decode a call envelope, dispatch it and encode the reply. A message
    /// that cannot be decoded still gets an (empty) reply.
    pub fn handle_message(&mut self, message: &[u8]) -> Vec<u8> {
        let result = match channel::decode_method_call(message) {
            Ok(call) => self.handle(&call),
            Err(err) => {
                error!("dropping undecodable call: {err}");
                MethodResult::NotImplemented
            }
        };
        channel::encode_envelope(&result)
    }

    fn set_wallpaper(&mut self, call: &MethodCall) -> Result<&'static str, WallpaperError> {
        let path = call
            .argument::<String>(ARG_PATH)
            .filter(|p| !p.is_empty())
            .ok_or(WallpaperError::MissingPath)?;
        let image = decode::decode_file(Path::new(&path))?;
        sink::submit(&mut self.sink, &image)
            .map_err(|e| WallpaperError::SystemApi(e.to_string()))?;
        Ok(SUCCESS_MESSAGE)
    }
}

/// Reply for a call whose bytes never reached the handler, so the caller
/// still gets an answer.
pub fn unreadable_message_reply(reason: impl Display) -> Vec<u8> {
    error!("unreadable call: {reason}");
    let err = WallpaperError::SystemApi(format!("unreadable call: {reason}"));
    channel::encode_envelope(&err.into_method_result())
}
