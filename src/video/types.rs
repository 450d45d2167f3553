use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target aspect ratio for the assembled video
///
/// Each aspect maps to a fixed canonical resolution; every rendered segment
/// and the final output use exactly these dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoAspect {
    /// 9:16, 1080x1920 (shorts / reels)
    Portrait,
    /// 16:9, 1920x1080
    Landscape,
    /// 1:1, 1080x1080
    Square,
}

impl VideoAspect {
    /// Canonical output resolution for this aspect
    pub fn resolution(self) -> (u32, u32) {
        match self {
            Self::Portrait => (1080, 1920),
            Self::Landscape => (1920, 1080),
            Self::Square => (1080, 1080),
        }
    }

    /// Width / height ratio
    pub fn ratio(self) -> f64 {
        let (w, h) = self.resolution();
        w as f64 / h as f64
    }

    /// Look up an aspect by name ("portrait", "landscape", "square")
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "portrait" | "9:16" => Some(Self::Portrait),
            "landscape" | "16:9" => Some(Self::Landscape),
            "square" | "1:1" => Some(Self::Square),
            _ => None,
        }
    }
}

impl Default for VideoAspect {
    fn default() -> Self {
        Self::Portrait
    }
}

/// How planned sub-clip windows are ordered before selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatMode {
    /// Shuffle all candidate windows across all sources
    Random,
    /// Keep source order, one window per source
    Sequential,
}

impl ConcatMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "sequential" => Some(Self::Sequential),
            _ => None,
        }
    }
}

impl Default for ConcatMode {
    fn default() -> Self {
        Self::Random
    }
}

/// Transition applied to each rendered segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    None,
    /// Pick one of the four transitions at random per segment
    Shuffle,
    FadeIn,
    FadeOut,
    SlideIn,
    SlideOut,
}

impl TransitionMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "shuffle" => Some(Self::Shuffle),
            "fade_in" | "fadein" => Some(Self::FadeIn),
            "fade_out" | "fadeout" => Some(Self::FadeOut),
            "slide_in" | "slidein" => Some(Self::SlideIn),
            "slide_out" | "slideout" => Some(Self::SlideOut),
            _ => None,
        }
    }
}

impl Default for TransitionMode {
    fn default() -> Self {
        Self::None
    }
}

/// Edge a slide transition enters from or leaves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Top,
    Bottom,
}

impl SlideDirection {
    pub const ALL: [SlideDirection; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];
}

/// Vertical placement of rendered subtitles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "percent")]
pub enum SubtitlePosition {
    Bottom,
    Top,
    Center,
    /// Percent of frame height measured from the top (clamped on-screen)
    Custom(f32),
}

impl Default for SubtitlePosition {
    fn default() -> Self {
        Self::Bottom
    }
}

/// Encoder-facing video parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoParams {
    /// Target frame rate for all rendered artifacts
    pub fps: u32,

    /// Target aspect ratio (fixes the canonical resolution)
    pub aspect: VideoAspect,

    /// Video codec passed to ffmpeg
    pub video_codec: String,

    /// Audio codec passed to ffmpeg
    pub audio_codec: String,
}

impl VideoParams {
    /// Canonical output resolution
    pub fn resolution(&self) -> (u32, u32) {
        self.aspect.resolution()
    }
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            fps: 30,
            aspect: VideoAspect::Portrait,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// A probed source material (video clip, or image promoted to a clip)
#[derive(Debug, Clone)]
pub struct ClipSource {
    pub path: PathBuf,
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

impl ClipSource {
    pub fn new<P: Into<PathBuf>>(path: P, duration: f64, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            duration,
            width,
            height,
        }
    }

    /// Check if this is a supported video format
    pub fn is_supported_video<P: AsRef<std::path::Path>>(path: P) -> bool {
        matches!(
            path.as_ref().extension().and_then(|ext| ext.to_str()),
            Some(ext) if matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp4" | "avi" | "mov" | "mkv" | "webm"
            )
        )
    }

    /// Check if this is a supported image format
    pub fn is_supported_image<P: AsRef<std::path::Path>>(path: P) -> bool {
        matches!(
            path.as_ref().extension().and_then(|ext| ext.to_str()),
            Some(ext) if matches!(
                ext.to_ascii_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "bmp" | "webp"
            )
        )
    }
}

/// A planned fixed-length window cut out of a source clip
#[derive(Debug, Clone, PartialEq)]
pub struct SubClip {
    /// Source file the window is cut from
    pub path: PathBuf,

    /// Start offset within the source, seconds
    pub start: f64,

    /// End offset within the source, seconds
    pub end: f64,

    /// Source resolution (pre-normalization)
    pub width: u32,
    pub height: u32,
}

impl SubClip {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A segment rendered to an intermediate artifact, ready for concatenation
#[derive(Debug, Clone)]
pub struct RenderedSegment {
    pub path: PathBuf,
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_resolutions() {
        assert_eq!(VideoAspect::Portrait.resolution(), (1080, 1920));
        assert_eq!(VideoAspect::Landscape.resolution(), (1920, 1080));
        assert_eq!(VideoAspect::Square.resolution(), (1080, 1080));
    }

    #[test]
    fn aspect_from_name_accepts_ratios() {
        assert_eq!(VideoAspect::from_name("9:16"), Some(VideoAspect::Portrait));
        assert_eq!(VideoAspect::from_name("Landscape"), Some(VideoAspect::Landscape));
        assert_eq!(VideoAspect::from_name("4:3"), None);
    }

    #[test]
    fn transition_from_name_accepts_both_spellings() {
        assert_eq!(TransitionMode::from_name("fade_in"), Some(TransitionMode::FadeIn));
        assert_eq!(TransitionMode::from_name("fadein"), Some(TransitionMode::FadeIn));
        assert_eq!(TransitionMode::from_name("wipe"), None);
    }

    #[test]
    fn subclip_duration() {
        let sub = SubClip {
            path: "a.mp4".into(),
            start: 5.0,
            end: 10.0,
            width: 1280,
            height: 720,
        };
        assert_eq!(sub.duration(), 5.0);
    }

    #[test]
    fn supported_formats() {
        assert!(ClipSource::is_supported_video("clips/01.mp4"));
        assert!(ClipSource::is_supported_video("clips/01.MOV"));
        assert!(!ClipSource::is_supported_video("clips/01.srt"));
        assert!(ClipSource::is_supported_image("stills/cover.png"));
        assert!(!ClipSource::is_supported_image("stills/cover.mp4"));
    }
}
