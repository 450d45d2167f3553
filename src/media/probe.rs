use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{MediaError, Result};
use crate::video::ffmpeg;

/// Probed stream/container metadata for one media file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub codec: String,
    pub has_video: bool,
    pub has_audio: bool,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// ffprobe-backed metadata prober with a per-path cache
pub struct MediaProber {
    cache: HashMap<PathBuf, MediaInfo>,
}

impl MediaProber {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Probe a media file, hitting the cache when possible
    pub async fn probe<P: AsRef<Path>>(&mut self, path: P) -> Result<MediaInfo> {
        let path = path.as_ref();

        if let Some(info) = self.cache.get(path) {
            return Ok(info.clone());
        }

        let args = vec![
            "-v".to_string(),
            "error".to_string(),
            "-print_format".to_string(),
            "json".to_string(),
            "-show_format".to_string(),
            "-show_streams".to_string(),
            path.display().to_string(),
        ];

        let stdout = ffmpeg::run_ffprobe(args).await.map_err(|e| {
            debug!("ffprobe failed for {:?}: {}", path, e);
            MediaError::ProbeFailed {
                path: path.display().to_string(),
            }
        })?;

        let info = parse_probe_json(&stdout).map_err(|reason| MediaError::ProbeUnreadable {
            path: path.display().to_string(),
            reason,
        })?;

        self.cache.insert(path.to_path_buf(), info.clone());
        Ok(info)
    }

    /// Duration of an audio file, seconds
    pub async fn audio_duration<P: AsRef<Path>>(&mut self, path: P) -> Result<f64> {
        let path = path.as_ref();
        let info = self.probe(path).await?;
        if !info.has_audio {
            return Err(MediaError::NoStream {
                path: path.display().to_string(),
            }
            .into());
        }
        Ok(info.duration)
    }

    /// Log a quality report for a rendered output file
    pub async fn diagnose<P: AsRef<Path>>(&mut self, path: P) -> Result<MediaInfo> {
        let path = path.as_ref();
        let info = self.probe(path).await?;
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        info!(
            "quality report for {:?}: {:.2}s, {}x{}, {:.2} fps, codec {}, {:.1} MB",
            path,
            info.duration,
            info.width,
            info.height,
            info.fps,
            info.codec,
            file_size as f64 / 1024.0 / 1024.0
        );

        Ok(info)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for MediaProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse ffprobe `-print_format json` output into a [`MediaInfo`]
fn parse_probe_json(json: &str) -> std::result::Result<MediaInfo, String> {
    let probe: ProbeOutput = serde_json::from_str(json).map_err(|e| e.to_string())?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));
    let audio = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    if video.is_none() && audio.is_none() {
        return Err("no audio or video stream".to_string());
    }

    // Container duration is the most reliable; fall back to stream duration.
    let duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or_else(|| {
            video
                .and_then(|s| s.duration.as_deref())
                .or_else(|| audio.and_then(|s| s.duration.as_deref()))
        })
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    let (width, height, fps, codec) = match video {
        Some(stream) => (
            stream.width.unwrap_or(0),
            stream.height.unwrap_or(0),
            stream
                .r_frame_rate
                .as_deref()
                .and_then(parse_fraction)
                .unwrap_or(0.0),
            stream.codec_name.clone().unwrap_or_else(|| "unknown".to_string()),
        ),
        None => (
            0,
            0,
            0.0,
            audio
                .and_then(|s| s.codec_name.clone())
                .unwrap_or_else(|| "unknown".to_string()),
        ),
    };

    Ok(MediaInfo {
        duration,
        width,
        height,
        fps,
        codec,
        has_video: video.is_some(),
        has_audio: audio.is_some(),
    })
}

/// Parse an ffprobe rational like "30000/1001" (or a plain number)
fn parse_fraction(value: &str) -> Option<f64> {
    match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => value.parse().ok(),
    }
}
