//! # Segment Renderer
//!
//! Cuts each planned window out of its source, normalizes it to the canonical
//! frame (exact resize or scale-to-fit plus centered black letterboxing),
//! applies the configured transition, and encodes it to an intermediate
//! artifact with the intermediate quality tier.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info};

use crate::config::{Config, QualityTier};
use crate::error::{RenderError, Result};
use crate::video::ffmpeg;
use crate::video::types::{RenderedSegment, SlideDirection, SubClip, TransitionMode, VideoParams};

/// A transition resolved to a concrete effect for one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTransition {
    FadeIn,
    FadeOut,
    SlideIn(SlideDirection),
    SlideOut(SlideDirection),
}

/// Resolve the configured transition mode for one segment.
///
/// `Shuffle` picks one of the four effects at random; slides get a random
/// direction per segment, as the original cut behavior does.
pub fn resolve_transition<R: Rng>(mode: TransitionMode, rng: &mut R) -> Option<ResolvedTransition> {
    let direction = *SlideDirection::ALL.choose(rng).unwrap_or(&SlideDirection::Left);

    match mode {
        TransitionMode::None => None,
        TransitionMode::FadeIn => Some(ResolvedTransition::FadeIn),
        TransitionMode::FadeOut => Some(ResolvedTransition::FadeOut),
        TransitionMode::SlideIn => Some(ResolvedTransition::SlideIn(direction)),
        TransitionMode::SlideOut => Some(ResolvedTransition::SlideOut(direction)),
        TransitionMode::Shuffle => {
            let choices = [
                ResolvedTransition::FadeIn,
                ResolvedTransition::FadeOut,
                ResolvedTransition::SlideIn(direction),
                ResolvedTransition::SlideOut(direction),
            ];
            choices.choose(rng).copied()
        }
    }
}

/// Normalization filter for a source of `src_w` x `src_h` into the canonical
/// `target_w` x `target_h` frame.
///
/// Matching aspect ratios get a plain resize; mismatched ones are scaled to
/// fit and letterboxed with centered black padding.
pub fn normalize_filter(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> Option<String> {
    if src_w == target_w && src_h == target_h {
        return None;
    }

    // Integer cross-multiplication avoids float ratio comparison
    if u64::from(src_w) * u64::from(target_h) == u64::from(src_h) * u64::from(target_w) {
        return Some(format!("scale={target_w}:{target_h}"));
    }

    Some(format!(
        "scale={target_w}:{target_h}:force_original_aspect_ratio=decrease,pad={target_w}:{target_h}:(ow-iw)/2:(oh-ih)/2"
    ))
}

/// Fade/slide filter expression for a resolved transition.
///
/// Fades are a single chain filter. Slides return an overlay x/y expression
/// pair moving the frame over a black base; the caller wires the overlay.
pub(crate) fn fade_filter(
    transition: ResolvedTransition,
    duration: f64,
    segment_duration: f64,
) -> Option<String> {
    match transition {
        ResolvedTransition::FadeIn => Some(format!("fade=t=in:st=0:d={duration}")),
        ResolvedTransition::FadeOut => {
            let start = (segment_duration - duration).max(0.0);
            Some(format!("fade=t=out:st={start:.3}:d={duration}"))
        }
        _ => None,
    }
}

pub(crate) fn slide_overlay_expr(
    transition: ResolvedTransition,
    duration: f64,
    segment_duration: f64,
) -> Option<(String, String)> {
    match transition {
        ResolvedTransition::SlideIn(dir) => Some(match dir {
            SlideDirection::Left => (format!("'-w+min(w*t/{duration},w)'"), "0".to_string()),
            SlideDirection::Right => (format!("'w-min(w*t/{duration},w)'"), "0".to_string()),
            SlideDirection::Top => ("0".to_string(), format!("'-h+min(h*t/{duration},h)'")),
            SlideDirection::Bottom => ("0".to_string(), format!("'h-min(h*t/{duration},h)'")),
        }),
        ResolvedTransition::SlideOut(dir) => {
            let start = (segment_duration - duration).max(0.0);
            Some(match dir {
                SlideDirection::Left => {
                    (format!("'-w*max(t-{start:.3},0)/{duration}'"), "0".to_string())
                }
                SlideDirection::Right => {
                    (format!("'w*max(t-{start:.3},0)/{duration}'"), "0".to_string())
                }
                SlideDirection::Top => {
                    ("0".to_string(), format!("'-h*max(t-{start:.3},0)/{duration}'"))
                }
                SlideDirection::Bottom => {
                    ("0".to_string(), format!("'h*max(t-{start:.3},0)/{duration}'"))
                }
            })
        }
        _ => None,
    }
}

/// Renders planned windows into intermediate segment artifacts
pub struct SegmentRenderer {
    params: VideoParams,
    tier: QualityTier,
    transition_duration: f64,
    threads: usize,
}

impl SegmentRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            params: config.video.params.clone(),
            tier: config.encoder.intermediate.clone(),
            transition_duration: config.composition.transition_duration,
            threads: config.video.threads,
        }
    }

    /// Build the full ffmpeg argument list for one segment render
    pub fn build_segment_args(
        &self,
        sub: &SubClip,
        transition: Option<ResolvedTransition>,
        output: &Path,
    ) -> Vec<String> {
        let (target_w, target_h) = self.params.resolution();
        let segment_duration = sub.duration();
        let fps = self.params.fps;

        // Base chain: normalize geometry, then lock the frame rate
        let mut chain: Vec<String> = Vec::new();
        if let Some(filter) = normalize_filter(sub.width, sub.height, target_w, target_h) {
            chain.push(filter);
        }
        chain.push(format!("fps={fps}"));

        if let Some(t) = transition {
            if let Some(fade) = fade_filter(t, self.transition_duration, segment_duration) {
                chain.push(fade);
            }
        }

        let slide = transition
            .and_then(|t| slide_overlay_expr(t, self.transition_duration, segment_duration));

        let filter_complex = match slide {
            Some((x, y)) => {
                // Slides move the frame over a black base of the same size
                format!(
                    "color=c=black:s={target_w}x{target_h}:r={fps}:d={segment_duration:.3}[bg];[0:v]{chain}[fg];[bg][fg]overlay=x={x}:y={y}:shortest=1[outv]",
                    chain = chain.join(",")
                )
            }
            None => format!("[0:v]{}[outv]", chain.join(",")),
        };

        let mut args: Vec<String> = vec![
            "-ss".into(),
            format!("{:.3}", sub.start),
            "-t".into(),
            format!("{:.3}", segment_duration),
            "-i".into(),
            sub.path.display().to_string(),
            "-filter_complex".into(),
            filter_complex,
            "-map".into(),
            "[outv]".into(),
            "-an".into(),
            "-c:v".into(),
            self.params.video_codec.clone(),
            "-b:v".into(),
            self.tier.bitrate.clone(),
            "-preset".into(),
            self.tier.preset.clone(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-threads".into(),
            self.threads.to_string(),
            "-y".into(),
        ];
        args.push(output.display().to_string());
        args
    }

    /// Render one planned window to an intermediate artifact
    pub async fn render_segment(
        &self,
        sub: &SubClip,
        transition: Option<ResolvedTransition>,
        output: &Path,
    ) -> Result<RenderedSegment> {
        let args = self.build_segment_args(sub, transition, output);
        ffmpeg::run_ffmpeg(args).await?;

        Ok(RenderedSegment {
            path: output.to_path_buf(),
            duration: sub.duration(),
        })
    }

    /// Render all planned windows, best effort.
    ///
    /// A failing segment is logged and skipped; only a fully failed plan is
    /// an error.
    pub async fn render_all<R: Rng>(
        &self,
        plan: &[SubClip],
        mode: TransitionMode,
        temp_dir: &Path,
        rng: &mut R,
    ) -> Result<Vec<RenderedSegment>> {
        let mut segments = Vec::with_capacity(plan.len());

        for (i, sub) in plan.iter().enumerate() {
            let transition = resolve_transition(mode, rng);
            let output: PathBuf = temp_dir.join(format!("segment-{:04}.mp4", i + 1));

            debug!(
                "rendering segment {}/{}: {:?} [{:.2}s..{:.2}s]",
                i + 1,
                plan.len(),
                sub.path,
                sub.start,
                sub.end
            );

            match self.render_segment(sub, transition, &output).await {
                Ok(segment) => segments.push(segment),
                Err(e) => error!("failed to render segment {}: {}", i + 1, e),
            }
        }

        if segments.is_empty() {
            return Err(RenderError::AllSegmentsFailed { count: plan.len() }.into());
        }

        info!("rendered {}/{} segments", segments.len(), plan.len());
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::types::VideoAspect;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn renderer() -> SegmentRenderer {
        let mut config = Config::default();
        config.video.params.aspect = VideoAspect::Portrait;
        config.video.threads = 2;
        SegmentRenderer::new(&config)
    }

    fn sub(width: u32, height: u32) -> SubClip {
        SubClip {
            path: "clips/a.mp4".into(),
            start: 10.0,
            end: 15.0,
            width,
            height,
        }
    }

    #[test]
    fn exact_match_needs_no_normalization() {
        assert_eq!(normalize_filter(1080, 1920, 1080, 1920), None);
    }

    #[test]
    fn matching_ratio_gets_plain_resize() {
        assert_eq!(
            normalize_filter(540, 960, 1080, 1920),
            Some("scale=1080:1920".to_string())
        );
    }

    #[test]
    fn mismatched_ratio_gets_letterbox() {
        let filter = normalize_filter(1920, 1080, 1080, 1920).unwrap();
        assert!(filter.contains("force_original_aspect_ratio=decrease"));
        assert!(filter.contains("pad=1080:1920:(ow-iw)/2:(oh-ih)/2"));
    }

    #[test]
    fn segment_args_cut_and_encode() {
        let r = renderer();
        let args = r.build_segment_args(&sub(1280, 720), None, Path::new("/tmp/seg.mp4"));
        let joined = args.join(" ");

        assert!(joined.starts_with("-ss 10.000 -t 5.000 -i clips/a.mp4"));
        assert!(joined.contains("-an"));
        assert!(joined.contains("-b:v 4000k"));
        assert!(joined.contains("-preset faster"));
        assert!(joined.contains("-threads 2"));
        assert!(joined.contains("fps=30"));
        assert!(joined.ends_with("-y /tmp/seg.mp4"));
    }

    #[test]
    fn fade_out_starts_before_segment_end() {
        let r = renderer();
        let args = r.build_segment_args(
            &sub(1080, 1920),
            Some(ResolvedTransition::FadeOut),
            Path::new("seg.mp4"),
        );
        let graph = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];
        assert!(graph.contains("fade=t=out:st=4.000:d=1"));
    }

    #[test]
    fn slide_in_builds_overlay_over_black() {
        let r = renderer();
        let args = r.build_segment_args(
            &sub(1280, 720),
            Some(ResolvedTransition::SlideIn(SlideDirection::Left)),
            Path::new("seg.mp4"),
        );
        let graph = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];
        assert!(graph.contains("color=c=black:s=1080x1920"));
        assert!(graph.contains("overlay=x='-w+min(w*t/1,w)':y=0"));
        // Normalization still happens inside the foreground chain
        assert!(graph.contains("force_original_aspect_ratio=decrease"));
    }

    #[test]
    fn none_transition_resolves_to_none() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(resolve_transition(TransitionMode::None, &mut rng), None);
    }

    #[test]
    fn shuffle_resolves_to_some_transition() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..16 {
            assert!(resolve_transition(TransitionMode::Shuffle, &mut rng).is_some());
        }
    }
}
