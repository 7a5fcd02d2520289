use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use image::{Rgba, RgbaImage};
use serde_json::{json, Value};

use lunya_wallpaper::channel::{self, MethodCall, MethodResult};
use lunya_wallpaper::def::*;
use lunya_wallpaper::{ApiLevel, Destination, WallpaperHandler, WallpaperSink};

/// Stands in for the device wallpaper and remembers what was last set.
struct RecordingSink {
    level: u32,
    fail_with: Option<String>,
    calls: Vec<Option<Destination>>,
    current: Option<RgbaImage>,
}

impl RecordingSink {
    fn at_level(level: u32) -> Self {
        Self { level, fail_with: None, calls: Vec::new(), current: None }
    }

    fn failing(msg: &str) -> Self {
        Self { fail_with: Some(msg.to_string()), ..Self::at_level(34) }
    }

    fn apply(&mut self, image: &RgbaImage, destination: Option<Destination>) -> Result<()> {
        self.calls.push(destination);
        if let Some(msg) = &self.fail_with {
            bail!("{msg}");
        }
        self.current = Some(image.clone());
        Ok(())
    }
}

impl WallpaperSink for RecordingSink {
    fn api_level(&self) -> ApiLevel {
        ApiLevel(self.level)
    }

    fn set_bitmap(&mut self, image: &RgbaImage) -> Result<()> {
        self.apply(image, None)
    }

    fn set_bitmap_for(&mut self, image: &RgbaImage, destination: Destination) -> Result<()> {
        self.apply(image, Some(destination))
    }
}

fn write_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(8, 6, Rgba(color)).save(&path).unwrap();
    path
}

fn set_wallpaper(path: &Path) -> MethodCall {
    MethodCall::new(METHOD_SET_WALLPAPER, json!({ "path": path.to_str().unwrap() }))
}

fn assert_error(result: &MethodResult, expected_code: &str) {
    match result {
        MethodResult::Error { code, details, .. } => {
            assert_eq!(code, expected_code);
            assert!(details.is_null());
        }
        other => panic!("expected {expected_code}, got {other:?}"),
    }
}

#[test]
fn sets_home_screen_wallpaper() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "cat.png", [200, 100, 50, 255]);
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));

    let result = handler.handle(&set_wallpaper(&path));

    assert_eq!(result, MethodResult::success(SUCCESS_MESSAGE));
    let sink = handler.sink();
    assert_eq!(sink.calls, vec![Some(Destination::SYSTEM)]);
    let current = sink.current.as_ref().unwrap();
    assert_eq!(current.dimensions(), (8, 6));
    assert_eq!(current.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));
}

#[test]
fn old_api_levels_use_unqualified_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "cat.png", [1, 2, 3, 255]);
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(23));

    assert!(handler.handle(&set_wallpaper(&path)).is_success());
    assert_eq!(handler.sink().calls, vec![None]);
}

#[test]
fn missing_or_empty_path_never_touches_sink() {
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));
    let calls = [
        MethodCall::new(METHOD_SET_WALLPAPER, Value::Null),
        MethodCall::new(METHOD_SET_WALLPAPER, json!({})),
        MethodCall::new(METHOD_SET_WALLPAPER, json!({ "path": null })),
        MethodCall::new(METHOD_SET_WALLPAPER, json!({ "path": "" })),
        MethodCall::new(METHOD_SET_WALLPAPER, json!({ "path": 42 })),
    ];
    for call in &calls {
        let result = handler.handle(call);
        assert_error(&result, CODE_PATH_ERROR);
    }
    assert!(handler.sink().calls.is_empty());
    assert!(handler.sink().current.is_none());
}

#[test]
fn undecodable_files_never_touch_sink() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("readme.png");
    std::fs::write(&text, "definitely not pixels").unwrap();
    let missing = dir.path().join("gone.png");
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));

    for path in [&text, &missing] {
        let result = handler.handle(&set_wallpaper(path));
        assert_error(&result, CODE_BITMAP_ERROR);
        if let MethodResult::Error { message, .. } = result {
            assert_eq!(message.as_deref(), Some(MSG_BITMAP_ERROR));
        }
    }
    assert!(handler.sink().calls.is_empty());
}

#[test]
fn system_failure_forwards_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "cat.png", [0, 0, 0, 255]);
    let mut handler = WallpaperHandler::new(RecordingSink::failing("Permission denial: SET_WALLPAPER"));

    let result = handler.handle(&set_wallpaper(&path));

    assert_eq!(
        result,
        MethodResult::Error {
            code: CODE_WALLPAPER_ERROR.to_string(),
            message: Some("Permission denial: SET_WALLPAPER".to_string()),
            details: Value::Null,
        }
    );
    assert!(handler.sink().current.is_none());
}

#[test]
fn unknown_methods_are_not_implemented() {
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));
    for method in ["getWallpaper", "setwallpaper", ""] {
        let call = MethodCall::new(method, json!({ "path": "/sdcard/cat.png" }));
        assert_eq!(handler.handle(&call), MethodResult::NotImplemented);
    }
    assert!(handler.sink().calls.is_empty());
}

#[test]
fn setting_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "cat.png", [9, 9, 9, 255]);
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(30));

    assert!(handler.handle(&set_wallpaper(&path)).is_success());
    assert!(handler.handle(&set_wallpaper(&path)).is_success());

    let sink = handler.into_sink();
    assert_eq!(sink.calls.len(), 2);
    assert_eq!(sink.current.unwrap().get_pixel(7, 5), &Rgba([9, 9, 9, 255]));
}

#[test]
fn envelope_round_trip_through_handler() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "cat.png", [10, 20, 30, 255]);
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));

    let message = channel::encode_method_call(&set_wallpaper(&path)).unwrap();
    let reply = handler.handle_message(&message);
    assert_eq!(reply, format!("[\"{SUCCESS_MESSAGE}\"]").into_bytes());

    let reply = handler.handle_message(br#"{"method":"setWallpaper","args":{}}"#);
    assert_eq!(
        channel::decode_envelope(&reply).unwrap().error_code(),
        Some(CODE_PATH_ERROR)
    );

    let reply = handler.handle_message(br#"{"method":"ping"}"#);
    assert!(reply.is_empty());
}

#[test]
fn garbage_message_still_gets_a_reply() {
    let mut handler = WallpaperHandler::new(RecordingSink::at_level(34));
    let reply = handler.handle_message(b"\x00\x01not json");
    assert_eq!(channel::decode_envelope(&reply).unwrap(), MethodResult::NotImplemented);
}
