use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{PlanError, RenderError, Result},
    media::{select_bgm, BgmKind, MediaProber},
    planner,
    video::{
        assembler::FinalMix, ffmpeg, preprocess, renderer, ClipSource, SegmentRenderer,
        VideoAssembler,
    },
};

/// One assembly request: the inputs and the output target
#[derive(Debug, Clone)]
pub struct AssemblyJob {
    /// Narration audio track
    pub audio_path: PathBuf,

    /// Directory of raw clip/image materials
    pub clip_dir: PathBuf,

    /// Final output file
    pub output_path: PathBuf,

    /// Optional SRT subtitle file
    pub subtitle_path: Option<PathBuf>,

    /// Background music selection
    pub bgm_kind: BgmKind,
    pub bgm_file: Option<PathBuf>,
    pub song_dir: Option<PathBuf>,
}

/// Main composition engine that orchestrates the whole assembly pipeline
///
/// The engine follows a clear pipeline:
/// 1. Probing - narration duration and material metadata
/// 2. Planning - slice materials into windows and pick enough of them
/// 3. Rendering - normalize each window into a uniform segment artifact
/// 4. Assembly - concatenate, overlay subtitles, mix audio, final encode
pub struct CompositionEngine {
    config: Config,
    rng: StdRng,
    temp_dir: Option<PathBuf>,
}

impl CompositionEngine {
    /// Create a new composition engine with the given configuration
    pub fn new(config: Config) -> Self {
        let rng = match config.composition.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng,
            temp_dir: None,
        }
    }

    /// Run the full pipeline for one job
    pub async fn compose(&mut self, job: &AssemblyJob) -> Result<()> {
        info!("starting composition");
        info!("   audio: {:?}", job.audio_path);
        info!("   clips: {:?}", job.clip_dir);
        info!("   output: {:?}", job.output_path);

        if !ffmpeg::check_ffmpeg_available() || !ffmpeg::check_ffprobe_available() {
            return Err(RenderError::FfmpegMissing.into());
        }

        let temp_dir = self.ensure_temp_dir(&job.output_path)?;
        let mut prober = MediaProber::new();

        // Step 1: probe the narration and the materials
        let audio_duration = prober.audio_duration(&job.audio_path).await?;
        info!("narration duration: {:.2}s", audio_duration);

        let materials = self.discover_materials(&job.clip_dir)?;
        let sources =
            preprocess::preprocess_materials(&materials, &self.config, &mut prober, &temp_dir)
                .await?;
        if sources.is_empty() {
            return Err(PlanError::NoClipsFound {
                path: job.clip_dir.display().to_string(),
            }
            .into());
        }
        info!("usable materials: {}/{}", sources.len(), materials.len());

        // Step 2: plan the windows
        let plan = planner::plan(
            &sources,
            audio_duration,
            self.config.video.max_clip_duration,
            self.config.composition.concat_mode,
            &mut self.rng,
        )?;
        info!("planned {} windows", plan.len());

        // Step 3/4: render and assemble
        let bgm = select_bgm(
            job.bgm_kind,
            job.bgm_file.as_deref(),
            job.song_dir.as_deref(),
            &mut self.rng,
        );
        if let Some(ref bgm) = bgm {
            info!("background music: {:?}", bgm);
        }

        let assembler = VideoAssembler::new(self.config.clone());

        if self.config.composition.single_pass {
            let mut plan = plan;
            planner::cycle_fill(&mut plan, |w| w.duration(), audio_duration);

            let mode = self.config.composition.transition_mode;
            let transitions: Vec<_> = plan
                .iter()
                .map(|_| renderer::resolve_transition(mode, &mut self.rng))
                .collect();

            let video_total: f64 = plan.iter().map(|w| w.duration()).sum();
            let mix = FinalMix {
                voice_path: &job.audio_path,
                bgm_path: bgm.as_deref(),
                subtitle_path: self.subtitle_path(job),
                output_duration: video_total.min(audio_duration),
            };
            assembler
                .render_direct(&plan, &transitions, &mix, &job.output_path)
                .await?;
        } else {
            let renderer = SegmentRenderer::new(&self.config);
            let mut segments = renderer
                .render_all(
                    &plan,
                    self.config.composition.transition_mode,
                    &temp_dir,
                    &mut self.rng,
                )
                .await?;

            // Rendering is best effort; the survivors may fall short of the
            // narration, so loop them before concatenating.
            let rendered: f64 = segments.iter().map(|s| s.duration).sum();
            if rendered < audio_duration {
                warn!(
                    "rendered video ({:.2}s) shorter than narration ({:.2}s), looping segments",
                    rendered, audio_duration
                );
                planner::cycle_fill(&mut segments, |s| s.duration, audio_duration);
            }

            let combined = temp_dir.join("combined.mp4");
            assembler.concatenate(&segments, &temp_dir, &combined).await?;

            // -shortest trims the mux to the narration, so the fade anchors
            // there rather than at the raw segment total
            let video_total: f64 = segments.iter().map(|s| s.duration).sum();
            let mix = FinalMix {
                voice_path: &job.audio_path,
                bgm_path: bgm.as_deref(),
                subtitle_path: self.subtitle_path(job),
                output_duration: video_total.min(audio_duration),
            };
            assembler.render_final(&combined, &mix, &job.output_path).await?;
        }

        // Step 5: report and clean up
        report_output_quality(&mut prober, &job.output_path).await;
        self.cleanup()?;

        info!("composition complete: {:?}", job.output_path);
        Ok(())
    }

    fn subtitle_path<'a>(&self, job: &'a AssemblyJob) -> Option<&'a Path> {
        if !self.config.subtitle.enabled {
            return None;
        }

        match job.subtitle_path.as_deref() {
            Some(path) if path.exists() => Some(path),
            Some(path) => {
                warn!("subtitle file {:?} not found, skipping overlay", path);
                None
            }
            None => None,
        }
    }

    /// Discover supported materials in the clip directory, sorted by name
    fn discover_materials(&self, clip_dir: &Path) -> Result<Vec<PathBuf>> {
        if !clip_dir.is_dir() {
            return Err(PlanError::NoClipsFound {
                path: clip_dir.display().to_string(),
            }
            .into());
        }

        let mut materials: Vec<PathBuf> = std::fs::read_dir(clip_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && !is_hidden(path)
                    && (ClipSource::is_supported_video(path)
                        || ClipSource::is_supported_image(path))
            })
            .collect();

        if materials.is_empty() {
            return Err(PlanError::NoClipsFound {
                path: clip_dir.display().to_string(),
            }
            .into());
        }

        materials.sort();
        debug!("discovered {} materials", materials.len());
        Ok(materials)
    }

    fn ensure_temp_dir(&mut self, output_path: &Path) -> Result<PathBuf> {
        if let Some(ref temp_dir) = self.temp_dir {
            return Ok(temp_dir.clone());
        }

        // Intermediates live next to the output so the final rename/copy
        // never crosses filesystems.
        let base = output_path.parent().unwrap_or_else(|| Path::new("."));
        let temp_dir = base.join(format!("clipforge-tmp-{}", std::process::id()));
        create_dir_all(&temp_dir)?;
        self.temp_dir = Some(temp_dir.clone());
        Ok(temp_dir)
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(temp_dir) = self.temp_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&temp_dir) {
                warn!("failed to remove temporary directory {:?}: {}", temp_dir, e);
            }
        }
        Ok(())
    }
}

impl Drop for CompositionEngine {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Log a quality report for the finished output. The file is already written
/// at this point, so a failed probe only warns.
async fn report_output_quality(prober: &mut MediaProber, path: &Path) {
    if let Err(e) = prober.diagnose(path).await {
        warn!("quality report for {:?} failed: {}", path, e);
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
