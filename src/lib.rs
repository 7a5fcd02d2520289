pub mod app;
pub mod channel;
pub mod config;
pub mod decode;
pub mod def;
pub mod error;
pub mod handler;
pub mod sink;

pub use channel::{MethodCall, MethodResult};
pub use error::WallpaperError;
pub use handler::WallpaperHandler;
pub use sink::{ApiLevel, Destination, WallpaperSink};

/// Called by the host activity's method-channel callback with an encoded
/// call; returns the encoded reply. Unreadable call bytes are answered with a
/// `WALLPAPER_ERROR` envelope. Null is returned only when the JVM cannot
/// allocate the reply array, and the host must answer that with an error.
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_example_lunya_WallpaperBridge_nativeHandle<'local>(
    mut env: jni::JNIEnv<'local>,
    _class: jni::objects::JClass<'local>,
    context: jni::objects::JObject<'local>,
    call: jni::objects::JByteArray<'local>,
) -> jni::sys::jbyteArray {
    app::init(&mut env, &context);
    match app::handle_call(&mut env, &context, &call) {
        Ok(reply) => reply.into_raw(),
        Err(err) => {
            log::error!("nativeHandle: {err:?}");
            std::ptr::null_mut()
        }
    }
}

/// Channel name the host registers the handler on.
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_example_lunya_WallpaperBridge_nativeChannelName<'local>(
    mut env: jni::JNIEnv<'local>,
    _class: jni::objects::JClass<'local>,
    context: jni::objects::JObject<'local>,
) -> jni::sys::jstring {
    let cfg = app::init(&mut env, &context);
    match env.new_string(&cfg.channel) {
        Ok(name) => name.into_raw(),
        Err(err) => {
            log::error!("nativeChannelName: {err:?}");
            std::ptr::null_mut()
        }
    }
}
