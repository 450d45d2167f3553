//! Image material preprocessing.
//!
//! Still images are promoted to short motion clips (a slow zoom) so the
//! planner can treat every material uniformly. Materials below the minimum
//! resolution are rejected with a warning and skipped.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{MediaError, Result};
use crate::media::MediaProber;
use crate::video::ffmpeg;
use crate::video::types::ClipSource;

/// Zoom growth per second of clip duration (4s clip ends at 112%)
const ZOOM_RATE_PER_SECOND: f64 = 0.03;

/// Check an image's dimensions against the minimum without decoding it
pub fn check_image_resolution(path: &Path, minimum: u32) -> Result<(u32, u32)> {
    let (width, height) =
        image::image_dimensions(path).map_err(|_| MediaError::ProbeFailed {
            path: path.display().to_string(),
        })?;

    if width < minimum || height < minimum {
        return Err(MediaError::ResolutionTooLow {
            width,
            height,
            minimum,
        }
        .into());
    }

    Ok((width, height))
}

/// Argument list for promoting one image to a motion clip
pub fn build_image_clip_args(
    config: &Config,
    image_path: &Path,
    width: u32,
    height: u32,
    output: &Path,
) -> Vec<String> {
    let fps = config.video.params.fps;
    let duration = config.video.image_clip_duration;
    let tier = &config.encoder.image;
    let frames = (duration * f64::from(fps)).round() as u64;
    let max_zoom = 1.0 + duration * ZOOM_RATE_PER_SECOND;

    // zoompan needs even output dimensions
    let even_w = width & !1;
    let even_h = height & !1;

    vec![
        "-loop".into(),
        "1".into(),
        "-i".into(),
        image_path.display().to_string(),
        "-vf".into(),
        format!(
            "zoompan=z='1+({max_zoom}-1)*on/{frames}':d={frames}:x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={even_w}x{even_h}:fps={fps}"
        ),
        "-t".into(),
        format!("{duration:.3}"),
        "-c:v".into(),
        config.video.params.video_codec.clone(),
        "-b:v".into(),
        tier.bitrate.clone(),
        "-preset".into(),
        tier.preset.clone(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-an".into(),
        "-y".into(),
        output.display().to_string(),
    ]
}

/// Promote image materials to motion clips, probe video materials.
///
/// Returns one [`ClipSource`] per usable material; unusable materials are
/// logged and dropped, never fatal.
pub async fn preprocess_materials(
    materials: &[PathBuf],
    config: &Config,
    prober: &mut MediaProber,
    temp_dir: &Path,
) -> Result<Vec<ClipSource>> {
    let minimum = config.video.min_material_resolution;
    let mut sources = Vec::with_capacity(materials.len());

    for (i, material) in materials.iter().enumerate() {
        if ClipSource::is_supported_image(material) {
            let (width, height) = match check_image_resolution(material, minimum) {
                Ok(dims) => dims,
                Err(e) => {
                    warn!("skipping image material {:?}: {}", material, e);
                    continue;
                }
            };

            let output = temp_dir.join(format!("image-clip-{:03}.mp4", i + 1));
            let args = build_image_clip_args(config, material, width, height, &output);
            if let Err(e) = ffmpeg::run_ffmpeg(args).await {
                warn!("failed to promote image {:?}: {}", material, e);
                continue;
            }

            info!("promoted image {:?} to motion clip", material);
            // The promoted clip uses even dimensions; record those, not the
            // source image's
            sources.push(ClipSource::new(
                output,
                config.video.image_clip_duration,
                width & !1,
                height & !1,
            ));
        } else if ClipSource::is_supported_video(material) {
            let info = match prober.probe(material).await {
                Ok(info) => info,
                Err(e) => {
                    warn!("skipping unprobeable material {:?}: {}", material, e);
                    continue;
                }
            };

            if info.width < minimum || info.height < minimum {
                warn!(
                    "skipping low resolution material {:?}: {}x{} (minimum {})",
                    material, info.width, info.height, minimum
                );
                continue;
            }

            sources.push(ClipSource::new(
                material.clone(),
                info.duration,
                info.width,
                info.height,
            ));
        } else {
            warn!("skipping unsupported material {:?}", material);
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_clip_args_zoom_and_tier() {
        let config = Config::default();
        let args = build_image_clip_args(
            &config,
            Path::new("photo.jpg"),
            1281,
            721,
            Path::new("photo.mp4"),
        );
        let joined = args.join(" ");

        assert!(joined.starts_with("-loop 1 -i photo.jpg"));
        // 4s at 30fps = 120 frames, zoom target 1.12, dimensions rounded even
        assert!(joined.contains("zoompan=z='1+(1.12-1)*on/120':d=120"));
        assert!(joined.contains("s=1280x720"));
        assert!(joined.contains("-t 4.000"));
        assert!(joined.contains("-b:v 6000k"));
        assert!(joined.contains("-preset medium"));
        assert!(joined.contains("-an"));
    }

    #[test]
    fn missing_image_fails_resolution_check() {
        let err = check_image_resolution(Path::new("/nonexistent.png"), 480);
        assert!(err.is_err());
    }
}
