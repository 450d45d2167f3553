use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    video::types::{ConcatMode, SubtitlePosition, TransitionMode, VideoParams},
};

/// Main configuration for the clipforge pipeline
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Video frame and material settings
    pub video: VideoConfig,

    /// Segment planning and ordering settings
    pub composition: CompositionConfig,

    /// Encoder quality tiers
    pub encoder: EncoderConfig,

    /// Subtitle overlay settings
    pub subtitle: SubtitleConfig,

    /// Narration / background-music mixing settings
    pub audio: AudioConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.video.validate()?;
        self.composition.validate()?;
        self.encoder.validate()?;
        self.subtitle.validate()?;
        self.audio.validate()?;
        Ok(())
    }
}

/// Video frame and material settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Encoder-facing frame parameters
    pub params: VideoParams,

    /// Fixed window length for planned sub-clips, seconds
    pub max_clip_duration: f64,

    /// Duration of motion clips generated from image materials, seconds
    pub image_clip_duration: f64,

    /// Minimum acceptable material resolution on either axis, pixels
    pub min_material_resolution: u32,

    /// Encoder thread count (passed straight through to ffmpeg)
    pub threads: usize,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            params: VideoParams::default(),
            max_clip_duration: 5.0,
            image_clip_duration: 4.0,
            min_material_resolution: 480,
            threads: num_cpus::get(),
        }
    }
}

impl VideoConfig {
    fn validate(&self) -> Result<()> {
        if self.max_clip_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "video.max_clip_duration".to_string(),
                value: self.max_clip_duration.to_string(),
            }
            .into());
        }

        if self.image_clip_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "video.image_clip_duration".to_string(),
                value: self.image_clip_duration.to_string(),
            }
            .into());
        }

        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "video.threads".to_string(),
                value: self.threads.to_string(),
            }
            .into());
        }

        if self.params.fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "video.params.fps".to_string(),
                value: self.params.fps.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Segment planning and ordering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// Window ordering strategy
    pub concat_mode: ConcatMode,

    /// Transition applied to each segment
    pub transition_mode: TransitionMode,

    /// Transition length, seconds
    pub transition_duration: f64,

    /// Render everything in one ffmpeg pass instead of via intermediate
    /// segment artifacts (avoids one generation of re-encoding)
    pub single_pass: bool,

    /// RNG seed for reproducible shuffles and transition picks
    pub seed: Option<u64>,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            concat_mode: ConcatMode::Random,
            transition_mode: TransitionMode::None,
            transition_duration: 1.0,
            single_pass: false,
            seed: None,
        }
    }
}

impl CompositionConfig {
    fn validate(&self) -> Result<()> {
        if self.transition_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "composition.transition_duration".to_string(),
                value: self.transition_duration.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// One encoder quality tier (bitrate + x264 preset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityTier {
    pub bitrate: String,
    pub preset: String,
}

impl QualityTier {
    fn new(bitrate: &str, preset: &str) -> Self {
        Self {
            bitrate: bitrate.to_string(),
            preset: preset.to_string(),
        }
    }

    fn validate(&self, key: &str) -> Result<()> {
        if self.bitrate.is_empty() || self.preset.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: format!("{}/{}", self.bitrate, self.preset),
            }
            .into());
        }
        Ok(())
    }
}

/// Encoder quality tiers for the three render stages plus image promotion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Per-segment intermediate artifacts
    pub intermediate: QualityTier,

    /// Concatenated combined video
    pub merge: QualityTier,

    /// Final output
    pub final_pass: QualityTier,

    /// CRF for the final pass (lower is higher quality)
    pub final_crf: u8,

    /// Image-to-motion-clip promotion
    pub image: QualityTier,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            intermediate: QualityTier::new("4000k", "faster"),
            merge: QualityTier::new("7000k", "medium"),
            final_pass: QualityTier::new("8000k", "slow"),
            final_crf: 18,
            image: QualityTier::new("6000k", "medium"),
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<()> {
        self.intermediate.validate("encoder.intermediate")?;
        self.merge.validate("encoder.merge")?;
        self.final_pass.validate("encoder.final_pass")?;
        self.image.validate("encoder.image")?;

        if self.final_crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "encoder.final_crf".to_string(),
                value: self.final_crf.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Subtitle overlay settings
///
/// The SRT file itself is handed to ffmpeg untouched; these settings only
/// shape the libass `force_style` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    pub enabled: bool,

    /// Font family name (must be resolvable by libass/fontconfig)
    pub font_name: String,

    /// Font size in output-frame pixels
    pub font_size: u32,

    pub position: SubtitlePosition,

    /// Primary text color, "#RRGGBB"
    pub fore_color: String,

    /// Outline color, "#RRGGBB"
    pub outline_color: String,

    /// Outline width in libass units
    pub outline_width: f32,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_name: "Arial".to_string(),
            font_size: 60,
            position: SubtitlePosition::Bottom,
            fore_color: "#FFFFFF".to_string(),
            outline_color: "#000000".to_string(),
            outline_width: 1.5,
        }
    }
}

impl SubtitleConfig {
    fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "subtitle.font_size".to_string(),
                value: self.font_size.to_string(),
            }
            .into());
        }

        if let SubtitlePosition::Custom(percent) = self.position {
            if !(0.0..=100.0).contains(&percent) {
                return Err(ConfigError::InvalidValue {
                    key: "subtitle.position".to_string(),
                    value: percent.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Narration / background-music mixing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Narration volume multiplier
    pub voice_volume: f32,

    /// Background music volume multiplier
    pub bgm_volume: f32,

    /// Background music fade-out length, seconds
    pub bgm_fade_out: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            voice_volume: 1.0,
            bgm_volume: 0.2,
            bgm_fade_out: 3.0,
        }
    }
}

impl AudioConfig {
    fn validate(&self) -> Result<()> {
        if self.voice_volume < 0.0 || self.bgm_volume < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "audio.volume".to_string(),
                value: format!("{}/{}", self.voice_volume, self.bgm_volume),
            }
            .into());
        }

        Ok(())
    }
}
