//! # Clipforge
//!
//! Assemble narrated short videos from heterogeneous clips.
//!
//! Given a directory of raw video/image materials, an audio narration track,
//! optional background music, and an optional SRT subtitle file, clipforge
//! plans fixed-length sub-clip windows, normalizes them to a canonical frame,
//! and produces one rendered output video covering the narration's duration.
//! All decoding, compositing, and encoding is delegated to an external ffmpeg
//! installation; this crate owns the bookkeeping around it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clipforge::{
//!     composition::{AssemblyJob, CompositionEngine},
//!     config::Config,
//!     media::BgmKind,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let mut engine = CompositionEngine::new(config);
//!
//! let job = AssemblyJob {
//!     audio_path: "narration.mp3".into(),
//!     clip_dir: "materials/".into(),
//!     output_path: "final.mp4".into(),
//!     subtitle_path: Some("narration.srt".into()),
//!     bgm_kind: BgmKind::None,
//!     bgm_file: None,
//!     song_dir: None,
//! };
//! engine.compose(&job).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`planner`] - Window slicing, ordering, and duration accumulation
//! - [`video`] - Segment rendering, assembly, and ffmpeg plumbing
//! - [`media`] - ffprobe metadata and background-music selection
//! - [`composition`] - Pipeline orchestration
//! - [`config`] - Configuration management

pub mod composition;
pub mod config;
pub mod error;
pub mod media;
pub mod planner;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{AssemblyJob, CompositionEngine},
    config::Config,
    error::{PipelineError, Result},
    video::{ConcatMode, TransitionMode, VideoAspect},
};
