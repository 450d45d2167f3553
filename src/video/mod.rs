//! # Video Processing Module
//!
//! Segment rendering, concatenation/assembly, image-material promotion, and
//! the ffmpeg subprocess plumbing underneath all of them.

pub mod assembler;
pub mod ffmpeg;
pub mod preprocess;
pub mod renderer;
pub mod types;

pub use assembler::{FinalMix, VideoAssembler};
pub use renderer::SegmentRenderer;
pub use types::{
    ClipSource, ConcatMode, RenderedSegment, SubClip, TransitionMode, VideoAspect, VideoParams,
};
