// SPDX-License-Identifier: MPL-2.0
use iced_reel::app::{self, paths, Flags};

const HELP: &str = "\
iced_reel

USAGE:
  iced_reel [OPTIONS] [URL]

OPTIONS:
  --lang <LOCALE>      Interface language (e.g. en-US, fr)
  --config-dir <DIR>   Directory holding settings.toml
  -h, --help           Print this help

ARGS:
  <URL>                Video to open on startup
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    iced_reel::init_logging();

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --lang");
        None
    });
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid --config-dir");
        None
    });
    let url = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    paths::init_cli_overrides(config_dir.clone());
    if let Err(err) = iced_reel::video_player::init_ffmpeg() {
        tracing::error!(%err, "native playback unavailable");
    }

    app::run(Flags {
        lang,
        url,
        config_dir,
    })
}
