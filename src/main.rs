use anyhow::Result;
use std::process::ExitCode;

#[cfg(not(target_os = "android"))]
mod cli {
    use std::io::{Read, Write};
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use anyhow::{anyhow, Context, Result};
    use clap::Parser;
    use log::info;
    use serde_json::json;

    use lunya_wallpaper::app::{self, DesktopWallpaperSink};
    use lunya_wallpaper::channel::{self, MethodCall, MethodResult};
    use lunya_wallpaper::config;
    use lunya_wallpaper::def::{ARG_PATH, METHOD_SET_WALLPAPER};
    use lunya_wallpaper::WallpaperHandler;

    /// Set the desktop wallpaper through the wallpaper channel handler.
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// Image to use as wallpaper
        #[arg(required_unless_present = "raw")]
        path: Option<PathBuf>,

        /// Read an encoded method call from stdin and write the encoded reply to stdout
        #[arg(long, conflicts_with = "path")]
        raw: bool,

        /// Directory holding lunya_wallpaper.toml
        #[arg(long)]
        config_dir: Option<PathBuf>,
    }

    /// The path goes over the channel as a string, so it must be UTF-8.
    fn set_wallpaper_call(path: &Path) -> Result<MethodCall> {
        let path = path
            .to_str()
            .ok_or_else(|| anyhow!("image path is not valid UTF-8: {path:?}"))?;
        Ok(MethodCall::new(METHOD_SET_WALLPAPER, json!({ ARG_PATH: path })))
    }

    pub fn run() -> Result<ExitCode> {
        let args = Args::parse();
        let config_dir = args.config_dir.unwrap_or_else(app::get_config_dir);
        let cfg = config::load_or_init(&config_dir);
        app::init_logger(cfg.log_level());
        info!("channel {}", cfg.channel);

        let sink = DesktopWallpaperSink::new(app::get_cache_dir(&cfg));
        let mut handler = WallpaperHandler::new(sink);

        if args.raw {
            let mut message = Vec::new();
            std::io::stdin().read_to_end(&mut message).context("reading stdin")?;
            let reply = handler.handle_message(&message);
            std::io::stdout().write_all(&reply).context("writing stdout")?;
            return Ok(ExitCode::SUCCESS);
        }

        let call = set_wallpaper_call(&args.path.unwrap_or_default())?;
        let reply = handler.handle_message(&channel::encode_method_call(&call)?);
        match channel::decode_envelope(&reply)? {
            MethodResult::Success(msg) => {
                println!("OK {}", msg.as_str().unwrap_or_default());
                Ok(ExitCode::SUCCESS)
            }
            MethodResult::Error { code, message, .. } => {
                eprintln!("ERR {code}: {}", message.unwrap_or_default());
                Ok(ExitCode::FAILURE)
            }
            MethodResult::NotImplemented => {
                eprintln!("ERR not implemented");
                Ok(ExitCode::FAILURE)
            }
        }
    }

}

fn main() -> Result<ExitCode> {
    #[cfg(not(target_os = "android"))]
    return cli::run();
    #[cfg(target_os = "android")]
    Ok(ExitCode::SUCCESS)
}
