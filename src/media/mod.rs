//! # Media Module
//!
//! ffprobe-backed metadata probing and background-music selection.

pub mod bgm;
pub mod probe;

pub use bgm::{select_bgm, BgmKind};
pub use probe::{MediaInfo, MediaProber};
