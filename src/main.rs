use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use clipforge::{
    composition::{AssemblyJob, CompositionEngine},
    config::Config,
    media::BgmKind,
    video::{ConcatMode, TransitionMode, VideoAspect},
};

#[derive(Parser)]
#[command(
    name = "clipforge",
    version,
    about = "Assemble narrated short videos from heterogeneous clips",
    long_about = "Clipforge slices a directory of raw clips into fixed-length windows, \
                  normalizes them to a target aspect ratio, and assembles one rendered \
                  video matching the narration track's duration, with optional background \
                  music and subtitle overlays."
)]
struct Cli {
    /// Narration audio file (MP3, WAV, M4A, ...)
    #[arg(short, long)]
    audio: PathBuf,

    /// Directory containing raw video/image materials
    #[arg(short, long)]
    clips: PathBuf,

    /// Output video file path
    #[arg(short, long)]
    output: PathBuf,

    /// SRT subtitle file (optional)
    #[arg(long)]
    subtitles: Option<PathBuf>,

    /// Background music file (optional)
    #[arg(long)]
    bgm: Option<PathBuf>,

    /// Directory to pick random background music from (optional)
    #[arg(long)]
    song_dir: Option<PathBuf>,

    /// Target aspect ratio (portrait, landscape, square); overrides the
    /// config file when given
    #[arg(long)]
    aspect: Option<String>,

    /// Window ordering (random, sequential); overrides the config file when
    /// given
    #[arg(long)]
    mode: Option<String>,

    /// Transition per segment (none, shuffle, fade_in, fade_out, slide_in,
    /// slide_out); overrides the config file when given
    #[arg(long)]
    transition: Option<String>,

    /// Configuration file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("starting clipforge v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };

    // CLI flags override the config file only when actually passed
    if let Some(aspect) = cli.aspect.as_deref() {
        config.video.params.aspect = VideoAspect::from_name(aspect)
            .ok_or_else(|| anyhow::anyhow!("Unknown aspect ratio: {}", aspect))?;
    }
    if let Some(mode) = cli.mode.as_deref() {
        config.composition.concat_mode = ConcatMode::from_name(mode)
            .ok_or_else(|| anyhow::anyhow!("Unknown concat mode: {}", mode))?;
    }
    if let Some(transition) = cli.transition.as_deref() {
        config.composition.transition_mode = TransitionMode::from_name(transition)
            .ok_or_else(|| anyhow::anyhow!("Unknown transition: {}", transition))?;
    }

    config.validate()?;

    let bgm_kind = if cli.bgm.is_some() {
        BgmKind::File
    } else if cli.song_dir.is_some() {
        BgmKind::Random
    } else {
        BgmKind::None
    };

    let job = AssemblyJob {
        audio_path: cli.audio,
        clip_dir: cli.clips,
        output_path: cli.output.clone(),
        subtitle_path: cli.subtitles,
        bgm_kind,
        bgm_file: cli.bgm,
        song_dir: cli.song_dir,
    };

    let mut engine = CompositionEngine::new(config);
    engine.compose(&job).await?;

    info!("output saved to: {:?}", cli.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_do_not_override_config() {
        let cli = Cli::parse_from([
            "clipforge", "-a", "voice.mp3", "-c", "clips", "-o", "out.mp4",
        ]);
        assert!(cli.aspect.is_none());
        assert!(cli.mode.is_none());
        assert!(cli.transition.is_none());
    }

    #[test]
    fn explicit_flags_are_captured() {
        let cli = Cli::parse_from([
            "clipforge",
            "-a",
            "voice.mp3",
            "-c",
            "clips",
            "-o",
            "out.mp4",
            "--aspect",
            "landscape",
            "--mode",
            "sequential",
            "--transition",
            "fade_in",
        ]);
        assert_eq!(cli.aspect.as_deref(), Some("landscape"));
        assert_eq!(cli.mode.as_deref(), Some("sequential"));
        assert_eq!(cli.transition.as_deref(), Some("fade_in"));
    }
}
