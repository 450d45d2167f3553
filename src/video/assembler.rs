//! # Assembler
//!
//! Concatenates rendered segments into one combined video, then produces the
//! final artifact: subtitle overlay, narration/background-music mix, and the
//! final-tier encode. Also hosts the single-pass graph builder that renders
//! plan and mux in one ffmpeg invocation.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AssemblyError, Result};
use crate::video::ffmpeg;
use crate::video::renderer::{fade_filter, normalize_filter, slide_overlay_expr, ResolvedTransition};
use crate::video::types::{RenderedSegment, SubClip, SubtitlePosition};

/// Inputs for the final mux
#[derive(Debug, Clone)]
pub struct FinalMix<'a> {
    /// Narration track
    pub voice_path: &'a Path,

    /// Optional background music
    pub bgm_path: Option<&'a Path>,

    /// Optional SRT file, handed to ffmpeg untouched
    pub subtitle_path: Option<&'a Path>,

    /// Expected duration of the trimmed output, seconds (drives the bgm
    /// fade-out). The mux is capped at the narration by `-shortest`, so this
    /// is the narration duration, not the raw segment total.
    pub output_duration: f64,
}

/// Assembles rendered segments and mixes the final output
pub struct VideoAssembler {
    config: Config,
}

impl VideoAssembler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write an ffmpeg concat-demuxer list for the rendered segments
    pub fn write_concat_list(&self, segments: &[RenderedSegment], list_path: &Path) -> Result<()> {
        if segments.is_empty() {
            return Err(AssemblyError::NoSegments.into());
        }

        let mut file = File::create(list_path).map_err(|e| AssemblyError::ConcatListFailed {
            reason: e.to_string(),
        })?;

        for segment in segments {
            // Absolute paths sidestep concat's relative-path resolution
            let absolute = segment
                .path
                .canonicalize()
                .unwrap_or_else(|_| segment.path.clone());
            writeln!(file, "file '{}'", absolute.display()).map_err(|e| {
                AssemblyError::ConcatListFailed {
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }

    /// Argument list for the merge re-encode of the concat list
    pub fn build_concat_args(&self, list_path: &Path, output: &Path) -> Vec<String> {
        let params = &self.config.video.params;
        let tier = &self.config.encoder.merge;

        vec![
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_path.display().to_string(),
            "-c:v".into(),
            params.video_codec.clone(),
            "-b:v".into(),
            tier.bitrate.clone(),
            "-preset".into(),
            tier.preset.clone(),
            "-r".into(),
            params.fps.to_string(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-an".into(),
            "-threads".into(),
            self.config.video.threads.to_string(),
            "-y".into(),
            output.display().to_string(),
        ]
    }

    /// Concatenate rendered segments into one combined video.
    ///
    /// A single segment is copied instead of re-encoded.
    pub async fn concatenate(
        &self,
        segments: &[RenderedSegment],
        temp_dir: &Path,
        output: &Path,
    ) -> Result<()> {
        if segments.is_empty() {
            return Err(AssemblyError::NoSegments.into());
        }

        if segments.len() == 1 {
            info!("single segment, copying instead of re-encoding");
            std::fs::copy(&segments[0].path, output)?;
            return Ok(());
        }

        info!("concatenating {} segments", segments.len());
        let list_path = temp_dir.join("concat-list.txt");
        self.write_concat_list(segments, &list_path)?;
        ffmpeg::run_ffmpeg(self.build_concat_args(&list_path, output)).await
    }

    /// Build the filter graph and argument list for the final mux
    pub fn build_final_args(&self, video: &Path, mix: &FinalMix<'_>, output: &Path) -> Vec<String> {
        let params = &self.config.video.params;
        let tier = &self.config.encoder.final_pass;
        let audio_cfg = &self.config.audio;

        let mut args: Vec<String> = vec![
            "-i".into(),
            video.display().to_string(),
            "-i".into(),
            mix.voice_path.display().to_string(),
        ];

        if let Some(bgm) = mix.bgm_path {
            // Loop the music under the whole video; -shortest caps it
            args.push("-stream_loop".into());
            args.push("-1".into());
            args.push("-i".into());
            args.push(bgm.display().to_string());
        }

        let mut filters: Vec<String> = Vec::new();

        let video_label = match mix.subtitle_path {
            Some(srt) => {
                filters.push(format!(
                    "[0:v]subtitles='{}':force_style='{}'[outv]",
                    escape_filter_path(srt),
                    subtitle_force_style(&self.config)
                ));
                "[outv]"
            }
            None => "0:v",
        };

        filters.push(format!("[1:a]volume={}[voice]", audio_cfg.voice_volume));

        let audio_label = match mix.bgm_path {
            Some(_) => {
                let fade_start = (mix.output_duration - audio_cfg.bgm_fade_out).max(0.0);
                filters.push(format!(
                    "[2:a]volume={},afade=t=out:st={:.3}:d={}[bgm]",
                    audio_cfg.bgm_volume, fade_start, audio_cfg.bgm_fade_out
                ));
                // normalize=0 keeps the configured volumes; amix would
                // otherwise scale each input by 1/n
                filters.push(
                    "[voice][bgm]amix=inputs=2:duration=first:dropout_transition=0:normalize=0[outa]"
                        .to_string(),
                );
                "[outa]"
            }
            None => "[voice]",
        };

        args.push("-filter_complex".into());
        args.push(filters.join(";"));
        args.push("-map".into());
        args.push(video_label.to_string());
        args.push("-map".into());
        args.push(audio_label.to_string());

        args.extend([
            "-c:v".into(),
            params.video_codec.clone(),
            "-b:v".into(),
            tier.bitrate.clone(),
            "-preset".into(),
            tier.preset.clone(),
            "-crf".into(),
            self.config.encoder.final_crf.to_string(),
            "-profile:v".into(),
            "high".into(),
            "-level".into(),
            "4.1".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-movflags".into(),
            "+faststart".into(),
            "-c:a".into(),
            params.audio_codec.clone(),
            "-r".into(),
            params.fps.to_string(),
            "-threads".into(),
            self.config.video.threads.to_string(),
            "-shortest".into(),
            "-y".into(),
            output.display().to_string(),
        ]);

        args
    }

    /// Render the final output: subtitles, audio mix, final-tier encode
    pub async fn render_final(
        &self,
        video: &Path,
        mix: &FinalMix<'_>,
        output: &Path,
    ) -> Result<()> {
        info!("rendering final output to {:?}", output);
        ffmpeg::run_ffmpeg(self.build_final_args(video, mix, output))
            .await
            .map_err(|e| {
                AssemblyError::OutputFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Build the single-invocation graph: per-window trim/normalize/transition
    /// chains, concat, optional subtitles, audio mix, final-tier encode.
    /// Avoids the intermediate re-encode generation loss at the cost of one
    /// big graph. `transitions` is aligned with `plan`, one entry per window.
    pub fn build_direct_args(
        &self,
        plan: &[SubClip],
        transitions: &[Option<ResolvedTransition>],
        mix: &FinalMix<'_>,
        output: &Path,
    ) -> Vec<String> {
        let params = &self.config.video.params;
        let tier = &self.config.encoder.final_pass;
        let audio_cfg = &self.config.audio;
        let transition_duration = self.config.composition.transition_duration;
        let (target_w, target_h) = params.resolution();
        let fps = params.fps;

        // Deduplicate source files across windows
        let mut input_paths: Vec<PathBuf> = Vec::new();
        let mut args: Vec<String> = Vec::new();
        let mut input_index = |path: &Path, args: &mut Vec<String>| -> usize {
            if let Some(idx) = input_paths.iter().position(|p| p == path) {
                return idx;
            }
            args.push("-i".into());
            args.push(path.display().to_string());
            input_paths.push(path.to_path_buf());
            input_paths.len() - 1
        };

        let mut filters: Vec<String> = Vec::new();
        for (i, sub) in plan.iter().enumerate() {
            let idx = input_index(&sub.path, &mut args);
            let transition = transitions.get(i).copied().flatten();
            let segment_duration = sub.duration();

            let mut chain: Vec<String> = vec![
                format!("trim=start={:.3}:end={:.3}", sub.start, sub.end),
                "setpts=PTS-STARTPTS".to_string(),
            ];
            if let Some(norm) = normalize_filter(sub.width, sub.height, target_w, target_h) {
                chain.push(norm);
            }
            chain.push(format!("fps={fps}"));
            if let Some(t) = transition {
                if let Some(fade) = fade_filter(t, transition_duration, segment_duration) {
                    chain.push(fade);
                }
            }

            let slide = transition
                .and_then(|t| slide_overlay_expr(t, transition_duration, segment_duration));
            match slide {
                Some((x, y)) => {
                    filters.push(format!(
                        "color=c=black:s={target_w}x{target_h}:r={fps}:d={segment_duration:.3}[b{i}]"
                    ));
                    filters.push(format!("[{idx}:v]{}[f{i}]", chain.join(",")));
                    filters.push(format!("[b{i}][f{i}]overlay=x={x}:y={y}:shortest=1[v{i}]"));
                }
                None => {
                    filters.push(format!("[{idx}:v]{}[v{i}]", chain.join(",")));
                }
            }
        }

        let concat_inputs: String = (0..plan.len()).map(|i| format!("[v{i}]")).collect();
        let base_label = if mix.subtitle_path.is_some() { "basev" } else { "outv" };
        filters.push(format!(
            "{concat_inputs}concat=n={}:v=1:a=0[{base_label}]",
            plan.len()
        ));

        if let Some(srt) = mix.subtitle_path {
            filters.push(format!(
                "[basev]subtitles='{}':force_style='{}'[outv]",
                escape_filter_path(srt),
                subtitle_force_style(&self.config)
            ));
        }

        let voice_idx = input_index(mix.voice_path, &mut args);
        filters.push(format!("[{voice_idx}:a]volume={}[voice]", audio_cfg.voice_volume));

        let audio_label = match mix.bgm_path {
            Some(bgm) => {
                args.push("-stream_loop".into());
                args.push("-1".into());
                let bgm_idx = input_index(bgm, &mut args);
                let fade_start = (mix.output_duration - audio_cfg.bgm_fade_out).max(0.0);
                filters.push(format!(
                    "[{bgm_idx}:a]volume={},afade=t=out:st={:.3}:d={}[bgm]",
                    audio_cfg.bgm_volume, fade_start, audio_cfg.bgm_fade_out
                ));
                filters.push(
                    "[voice][bgm]amix=inputs=2:duration=first:dropout_transition=0:normalize=0[outa]"
                        .to_string(),
                );
                "[outa]"
            }
            None => "[voice]",
        };

        args.push("-filter_complex".into());
        args.push(filters.join(";"));
        args.push("-map".into());
        args.push("[outv]".into());
        args.push("-map".into());
        args.push(audio_label.to_string());

        args.extend([
            "-c:v".into(),
            params.video_codec.clone(),
            "-b:v".into(),
            tier.bitrate.clone(),
            "-preset".into(),
            tier.preset.clone(),
            "-crf".into(),
            self.config.encoder.final_crf.to_string(),
            "-profile:v".into(),
            "high".into(),
            "-level".into(),
            "4.1".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-movflags".into(),
            "+faststart".into(),
            "-c:a".into(),
            params.audio_codec.clone(),
            "-r".into(),
            params.fps.to_string(),
            "-threads".into(),
            self.config.video.threads.to_string(),
            "-shortest".into(),
            "-y".into(),
            output.display().to_string(),
        ]);

        args
    }

    /// Render the whole plan and final mux in one ffmpeg invocation
    pub async fn render_direct(
        &self,
        plan: &[SubClip],
        transitions: &[Option<ResolvedTransition>],
        mix: &FinalMix<'_>,
        output: &Path,
    ) -> Result<()> {
        if plan.is_empty() {
            return Err(AssemblyError::NoSegments.into());
        }

        info!(
            "single-pass render: {} windows into {:?}",
            plan.len(),
            output
        );
        ffmpeg::run_ffmpeg(self.build_direct_args(plan, transitions, mix, output))
            .await
            .map_err(|e| {
                AssemblyError::OutputFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// Build the libass `force_style` string from the subtitle settings.
///
/// Style values live in libass's default 384x288 script space for SRT input
/// and get scaled to the frame at render time, so the configured frame-space
/// font size is converted down before it goes into the string.
pub fn subtitle_force_style(config: &Config) -> String {
    const PLAY_RES_Y: f32 = 288.0;
    let sub = &config.subtitle;

    let (_, frame_h) = config.video.params.resolution();
    let font_size = ((sub.font_size as f32 * PLAY_RES_Y / frame_h as f32).round() as u32).max(1);

    let (alignment, margin_v) = match sub.position {
        SubtitlePosition::Bottom => (2, (PLAY_RES_Y * 0.05) as u32),
        SubtitlePosition::Top => (8, (PLAY_RES_Y * 0.05) as u32),
        SubtitlePosition::Center => (5, 0),
        SubtitlePosition::Custom(percent) => {
            // Percent measured from the top; anchor to the nearer edge and
            // clamp the margin so the text stays on-screen
            let clamped = percent.clamp(0.0, 100.0);
            if clamped < 50.0 {
                (8, ((PLAY_RES_Y * clamped / 100.0) as u32).max(4))
            } else {
                (2, ((PLAY_RES_Y * (100.0 - clamped) / 100.0) as u32).max(4))
            }
        }
    };

    format!(
        "FontName={},FontSize={},PrimaryColour={},OutlineColour={},Outline={},Alignment={},MarginV={}",
        sub.font_name,
        font_size,
        hex_to_ass_color(&sub.fore_color),
        hex_to_ass_color(&sub.outline_color),
        sub.outline_width,
        alignment,
        margin_v
    )
}

/// Convert "#RRGGBB" to libass "&H00BBGGRR" (libass stores BGR)
fn hex_to_ass_color(hex: &str) -> String {
    let raw = hex.trim_start_matches('#');
    if raw.len() != 6 || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        warn!("unparseable subtitle color {:?}, using white", hex);
        return "&H00FFFFFF".to_string();
    }

    let r = &raw[0..2];
    let g = &raw[2..4];
    let b = &raw[4..6];
    format!("&H00{}{}{}", b, g, r).to_uppercase()
}

/// Escape a path for use inside an ffmpeg filter argument
fn escape_filter_path(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::types::VideoAspect;
    use tempfile::tempdir;

    fn assembler() -> VideoAssembler {
        let mut config = Config::default();
        config.video.params.aspect = VideoAspect::Portrait;
        config.video.threads = 4;
        VideoAssembler::new(config)
    }

    fn segment(path: &str) -> RenderedSegment {
        RenderedSegment {
            path: path.into(),
            duration: 5.0,
        }
    }

    #[test]
    fn concat_list_contains_all_segments() {
        let dir = tempdir().unwrap();
        let seg_a = dir.path().join("seg-a.mp4");
        let seg_b = dir.path().join("seg-b.mp4");
        std::fs::write(&seg_a, b"x").unwrap();
        std::fs::write(&seg_b, b"x").unwrap();

        let list = dir.path().join("list.txt");
        let segments = vec![
            segment(seg_a.to_str().unwrap()),
            segment(seg_b.to_str().unwrap()),
        ];
        assembler().write_concat_list(&segments, &list).unwrap();

        let content = std::fs::read_to_string(&list).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().all(|l| l.starts_with("file '")));
        assert!(content.contains("seg-a.mp4"));
        assert!(content.contains("seg-b.mp4"));
    }

    #[test]
    fn concat_list_rejects_empty_plan() {
        let dir = tempdir().unwrap();
        let list = dir.path().join("list.txt");
        assert!(assembler().write_concat_list(&[], &list).is_err());
    }

    #[test]
    fn concat_args_use_merge_tier() {
        let args = assembler().build_concat_args(Path::new("list.txt"), Path::new("combined.mp4"));
        let joined = args.join(" ");
        assert!(joined.starts_with("-f concat -safe 0 -i list.txt"));
        assert!(joined.contains("-b:v 7000k"));
        assert!(joined.contains("-preset medium"));
        assert!(joined.contains("-an"));
        assert!(joined.ends_with("-y combined.mp4"));
    }

    #[test]
    fn final_args_without_bgm_or_subtitles() {
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: None,
            subtitle_path: None,
            output_duration: 30.0,
        };
        let args = assembler().build_final_args(Path::new("combined.mp4"), &mix, Path::new("out.mp4"));
        let joined = args.join(" ");

        assert!(joined.contains("-map 0:v -map [voice]"));
        assert!(joined.contains("[1:a]volume=1[voice]"));
        assert!(!joined.contains("amix"));
        assert!(!joined.contains("subtitles"));
        assert!(joined.contains("-crf 18"));
        assert!(joined.contains("-profile:v high"));
        assert!(joined.contains("-movflags +faststart"));
        assert!(joined.contains("-shortest"));
    }

    #[test]
    fn final_args_mix_bgm_with_fade_and_loop() {
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: Some(Path::new("music.mp3")),
            subtitle_path: None,
            output_duration: 30.0,
        };
        let args = assembler().build_final_args(Path::new("combined.mp4"), &mix, Path::new("out.mp4"));
        let joined = args.join(" ");

        assert!(joined.contains("-stream_loop -1 -i music.mp3"));
        assert!(joined.contains("[2:a]volume=0.2,afade=t=out:st=27.000:d=3"));
        assert!(joined.contains("amix=inputs=2:duration=first:dropout_transition=0:normalize=0"));
        assert!(joined.contains("-map [outa]"));
    }

    #[test]
    fn bgm_fade_plays_inside_trimmed_output() {
        // The output is capped at the narration length, so a 12s narration
        // with 15s of selected segments must fade at 9s, not past the end
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: Some(Path::new("music.mp3")),
            subtitle_path: None,
            output_duration: 12.0,
        };
        let args = assembler().build_final_args(Path::new("combined.mp4"), &mix, Path::new("out.mp4"));
        let joined = args.join(" ");

        assert!(joined.contains("afade=t=out:st=9.000:d=3"));
        assert!(!joined.contains("afade=t=out:st=12.000"));
    }

    #[test]
    fn final_args_overlay_subtitles_with_style() {
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: None,
            subtitle_path: Some(Path::new("subs.srt")),
            output_duration: 30.0,
        };
        let args = assembler().build_final_args(Path::new("combined.mp4"), &mix, Path::new("out.mp4"));
        let graph = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];

        assert!(graph.contains("subtitles='subs.srt'"));
        // 60 frame-space pixels on the 1920-high frame = 9 in script space
        assert!(graph.contains("FontSize=9"));
        assert!(graph.contains("PrimaryColour=&H00FFFFFF"));
        assert!(graph.contains("Alignment=2"));
        assert!(args.join(" ").contains("-map [outv]"));
    }

    #[test]
    fn font_size_scales_with_frame_height() {
        let mut config = Config::default();
        config.video.params.aspect = VideoAspect::Portrait;
        let style = subtitle_force_style(&config);
        assert!(style.contains("FontSize=9,"));

        config.video.params.aspect = VideoAspect::Landscape;
        let style = subtitle_force_style(&config);
        assert!(style.contains("FontSize=16,"));
    }

    #[test]
    fn direct_args_dedup_inputs_and_concat() {
        let plan = vec![
            SubClip {
                path: "a.mp4".into(),
                start: 0.0,
                end: 5.0,
                width: 1280,
                height: 720,
            },
            SubClip {
                path: "a.mp4".into(),
                start: 5.0,
                end: 10.0,
                width: 1280,
                height: 720,
            },
            SubClip {
                path: "b.mp4".into(),
                start: 0.0,
                end: 5.0,
                width: 1080,
                height: 1920,
            },
        ];
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: None,
            subtitle_path: None,
            output_duration: 15.0,
        };
        let transitions = vec![None; plan.len()];
        let args = assembler().build_direct_args(&plan, &transitions, &mix, Path::new("out.mp4"));
        let joined = args.join(" ");

        // a.mp4 appears once as input despite two windows
        assert_eq!(args.iter().filter(|a| *a == "a.mp4").count(), 1);
        assert!(joined.contains("concat=n=3:v=1:a=0[outv]"));
        assert!(joined.contains("trim=start=0.000:end=5.000,setpts=PTS-STARTPTS"));
        // The already-canonical source needs no scale
        assert!(joined.contains("[1:v]trim=start=0.000:end=5.000,setpts=PTS-STARTPTS,fps=30[v2]"));
    }

    #[test]
    fn direct_graph_applies_fades_per_window() {
        let plan = vec![
            SubClip {
                path: "a.mp4".into(),
                start: 0.0,
                end: 5.0,
                width: 1080,
                height: 1920,
            },
            SubClip {
                path: "a.mp4".into(),
                start: 5.0,
                end: 10.0,
                width: 1080,
                height: 1920,
            },
        ];
        let transitions = vec![
            Some(ResolvedTransition::FadeIn),
            Some(ResolvedTransition::FadeOut),
        ];
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: None,
            subtitle_path: None,
            output_duration: 10.0,
        };
        let args = assembler().build_direct_args(&plan, &transitions, &mix, Path::new("out.mp4"));
        let graph = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];

        assert!(graph.contains("fps=30,fade=t=in:st=0:d=1[v0]"));
        assert!(graph.contains("fps=30,fade=t=out:st=4.000:d=1[v1]"));
        assert!(graph.contains("concat=n=2:v=1:a=0"));
    }

    #[test]
    fn direct_graph_slides_over_black() {
        let plan = vec![SubClip {
            path: "a.mp4".into(),
            start: 0.0,
            end: 5.0,
            width: 1280,
            height: 720,
        }];
        let transitions = vec![Some(ResolvedTransition::SlideIn(
            crate::video::types::SlideDirection::Left,
        ))];
        let mix = FinalMix {
            voice_path: Path::new("voice.mp3"),
            bgm_path: None,
            subtitle_path: None,
            output_duration: 5.0,
        };
        let args = assembler().build_direct_args(&plan, &transitions, &mix, Path::new("out.mp4"));
        let graph = &args[args.iter().position(|a| a == "-filter_complex").unwrap() + 1];

        assert!(graph.contains("color=c=black:s=1080x1920:r=30:d=5.000[b0]"));
        assert!(graph.contains("[b0][f0]overlay=x='-w+min(w*t/1,w)':y=0:shortest=1[v0]"));
        // Normalization still happens inside the foreground chain
        assert!(graph.contains("force_original_aspect_ratio=decrease"));
    }

    #[test]
    fn ass_color_conversion_swaps_channels() {
        assert_eq!(hex_to_ass_color("#FFFFFF"), "&H00FFFFFF");
        assert_eq!(hex_to_ass_color("#FF0000"), "&H000000FF");
        assert_eq!(hex_to_ass_color("#0000FF"), "&H00FF0000");
        assert_eq!(hex_to_ass_color("garbage"), "&H00FFFFFF");
    }

    #[test]
    fn custom_position_clamps_margin() {
        let mut config = Config::default();
        config.subtitle.position = SubtitlePosition::Custom(95.0);
        let style = subtitle_force_style(&config);
        assert!(style.contains("Alignment=2"));
        assert!(style.contains("MarginV=14"));

        config.subtitle.position = SubtitlePosition::Custom(10.0);
        let style = subtitle_force_style(&config);
        assert!(style.contains("Alignment=8"));
        assert!(style.contains("MarginV=28"));
    }

    #[test]
    fn filter_path_escaping() {
        assert_eq!(
            escape_filter_path(Path::new("C:\\subs\\it's.srt")),
            "C\\:\\\\subs\\\\it\\'s.srt"
        );
    }
}
