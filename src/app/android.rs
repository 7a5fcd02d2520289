use std::path::Path;

use anyhow::{anyhow, Result};
use image::RgbaImage;
use jni::{
    objects::{JByteArray, JObject, JString, JValue},
    sys::JNI_TRUE,
    JNIEnv,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;

use crate::config::{self, Config};
use crate::decode::to_argb_pixels;
use crate::def::APP_NAME_E;
use crate::handler::{unreadable_message_reply, WallpaperHandler};
use crate::sink::{ApiLevel, Destination, WallpaperSink};

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn init_logger(level: LevelFilter) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(APP_NAME_E),
    );
}

/// Process-wide config, read from the app files dir on first use.
pub fn init<'local>(env: &mut JNIEnv<'local>, context: &JObject<'local>) -> &'static Config {
    CONFIG.get_or_init(|| {
        let cfg = match get_files_dir(env, context) {
            Ok(dir) => config::load(Path::new(&dir)),
            Err(_) => Config::default(),
        };
        init_logger(cfg.log_level());
        info!("channel {}", cfg.channel);
        cfg
    })
}

/// Run one encoded method call against the device wallpaper. Fails only when
/// the reply array cannot be allocated.
pub fn handle_call<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'local>,
    call: &JByteArray<'local>,
) -> Result<JByteArray<'local>> {
    let reply = match env.convert_byte_array(call) {
        Ok(message) => {
            let mut handler = WallpaperHandler::new(AndroidWallpaperSink::new(env, context));
            handler.handle_message(&message)
        }
        Err(err) => {
            let _ = env.exception_clear();
            unreadable_message_reply(err)
        }
    };
    Ok(env.byte_array_from_slice(&reply)?)
}

trait JavaResultExt<T> {
    /// Turn a pending Java exception into an error carrying its message.
    fn java(self, env: &mut JNIEnv) -> Result<T>;
}

impl<T> JavaResultExt<T> for jni::errors::Result<T> {
    fn java(self, env: &mut JNIEnv) -> Result<T> {
        self.map_err(|err| java_error(env, err))
    }
}

fn java_error(env: &mut JNIEnv, err: jni::errors::Error) -> anyhow::Error {
    if !matches!(err, jni::errors::Error::JavaException) {
        return anyhow!(err);
    }
    match describe_exception(env) {
        Ok(msg) => anyhow!(msg),
        Err(e) => anyhow!("{err} ({e})"),
    }
}

/// Message of the pending throwable, or its class name when it has none.
fn describe_exception(env: &mut JNIEnv) -> jni::errors::Result<String> {
    let throwable = env.exception_occurred()?;
    env.exception_clear()?;
    let message = env
        .call_method(&throwable, "getMessage", "()Ljava/lang/String;", &[])?
        .l()?;
    if !message.is_null() {
        return Ok(env.get_string(&JString::from(message))?.into());
    }
    let class = env.get_object_class(&throwable)?;
    let name = env
        .call_method(&class, "getName", "()Ljava/lang/String;", &[])?
        .l()?;
    Ok(env.get_string(&JString::from(name))?.into())
}

pub fn get_files_dir<'local>(env: &mut JNIEnv<'local>, context: &JObject<'local>) -> Result<String> {
    let file = env
        .call_method(context, "getFilesDir", "()Ljava/io/File;", &[])
        .java(env)?
        .l()?;
    if file.is_null() {
        return Err(anyhow!("object is not a file"));
    }
    let path = env
        .call_method(&file, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .java(env)?
        .l()?;
    if path.is_null() {
        return Err(anyhow!("object is not a string"));
    }
    Ok(env.get_string(&JString::from(path))?.into())
}

pub fn sdk_version(env: &mut JNIEnv) -> Result<i32> {
    Ok(env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .java(env)?
        .i()?)
}

/// `Bitmap.createBitmap(int[], w, h, ARGB_8888)`
fn create_java_bitmap<'local>(env: &mut JNIEnv<'local>, image: &RgbaImage) -> Result<JObject<'local>> {
    let colors = to_argb_pixels(image);
    let (width, height) = (image.width() as i32, image.height() as i32);

    let config = env
        .get_static_field(
            "android/graphics/Bitmap$Config",
            "ARGB_8888",
            "Landroid/graphics/Bitmap$Config;",
        )
        .java(env)?
        .l()?;
    let pixels = env.new_int_array(colors.len() as i32).java(env)?;
    env.set_int_array_region(&pixels, 0, &colors).java(env)?;

    let bitmap = env
        .call_static_method(
            "android/graphics/Bitmap",
            "createBitmap",
            "([IIILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
            &[
                JValue::Object(&pixels),
                JValue::Int(width),
                JValue::Int(height),
                JValue::Object(&config),
            ],
        )
        .java(env)?
        .l()?;
    info!("bitmap {width}x{height} created");
    Ok(bitmap)
}

/// `android.app.WallpaperManager` for the given context.
pub struct AndroidWallpaperSink<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    context: &'a JObject<'local>,
    api_level: ApiLevel,
    sdk_error: Option<String>,
}

impl<'a, 'local> AndroidWallpaperSink<'a, 'local> {
    /// A failed `SDK_INT` read is reported by the first wallpaper call.
    pub fn new(env: &'a mut JNIEnv<'local>, context: &'a JObject<'local>) -> Self {
        let (api_level, sdk_error) = match sdk_version(env) {
            Ok(level) => {
                info!("sdk version:{level}");
                (ApiLevel(level.max(0) as u32), None)
            }
            Err(err) => {
                error!("sdk version unavailable: {err:?}");
                (ApiLevel(0), Some(err.to_string()))
            }
        };
        Self {
            env,
            context,
            api_level,
            sdk_error,
        }
    }

    fn wallpaper_manager(&mut self) -> Result<JObject<'local>> {
        if let Some(err) = &self.sdk_error {
            return Err(anyhow!("{err}"));
        }
        let env = &mut *self.env;
        let manager = env
            .call_static_method(
                "android/app/WallpaperManager",
                "getInstance",
                "(Landroid/content/Context;)Landroid/app/WallpaperManager;",
                &[JValue::Object(self.context)],
            )
            .java(env)?
            .l()?;
        Ok(manager)
    }
}

impl WallpaperSink for AndroidWallpaperSink<'_, '_> {
    fn api_level(&self) -> ApiLevel {
        self.api_level
    }

    fn set_bitmap(&mut self, image: &RgbaImage) -> Result<()> {
        let manager = self.wallpaper_manager()?;
        let env = &mut *self.env;
        let bitmap = create_java_bitmap(env, image)?;
        env.call_method(
            &manager,
            "setBitmap",
            "(Landroid/graphics/Bitmap;)V",
            &[JValue::Object(&bitmap)],
        )
        .java(env)?
        .v()?;
        Ok(())
    }

    fn set_bitmap_for(&mut self, image: &RgbaImage, destination: Destination) -> Result<()> {
        let manager = self.wallpaper_manager()?;
        let env = &mut *self.env;
        let bitmap = create_java_bitmap(env, image)?;
        let id = env
            .call_method(
                &manager,
                "setBitmap",
                "(Landroid/graphics/Bitmap;Landroid/graphics/Rect;ZI)I",
                &[
                    JValue::Object(&bitmap),
                    JValue::Object(&JObject::null()),
                    JValue::Bool(JNI_TRUE),
                    JValue::Int(destination.bits()),
                ],
            )
            .java(env)?
            .i()?;
        info!("wallpaper id {id} set for {destination:?}");
        Ok(())
    }
}
