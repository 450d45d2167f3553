//! # Segment Planner
//!
//! Pure bookkeeping: slices source clips into fixed-length candidate windows,
//! orders them, and accumulates enough of them to cover the narration. No
//! media is touched here; everything operates on probed metadata.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::video::types::{ClipSource, ConcatMode, SubClip};

/// Slice every source into `max_clip_duration`-long candidate windows.
///
/// Only windows with a full `max_clip_duration` of material are kept; short
/// tails are dropped so every rendered segment has uniform length. In
/// `Sequential` mode only the first window of each source is taken.
pub fn slice_windows(
    sources: &[ClipSource],
    max_clip_duration: f64,
    mode: ConcatMode,
) -> Vec<SubClip> {
    let mut windows = Vec::new();

    for source in sources {
        let mut start = 0.0;
        while start < source.duration {
            let end = (start + max_clip_duration).min(source.duration);
            if source.duration - start >= max_clip_duration {
                windows.push(SubClip {
                    path: source.path.clone(),
                    start,
                    end,
                    width: source.width,
                    height: source.height,
                });
            }
            start = end;

            if mode == ConcatMode::Sequential {
                break;
            }
        }
    }

    windows
}

/// Order candidate windows: shuffled in `Random` mode, untouched otherwise
pub fn order_windows<R: Rng>(windows: &mut [SubClip], mode: ConcatMode, rng: &mut R) {
    if mode == ConcatMode::Random {
        windows.shuffle(rng);
    }
}

/// Take windows in order until the running total crosses the audio duration.
///
/// The window that crosses the threshold is included, so the selected total
/// may exceed the target; the final mux trims with `-shortest`.
pub fn select_for_duration(windows: Vec<SubClip>, audio_duration: f64) -> Vec<SubClip> {
    let mut selected = Vec::new();
    let mut total = 0.0;

    for window in windows {
        if total > audio_duration {
            break;
        }
        total += window.duration();
        selected.push(window);
    }

    debug!(
        "selected {} windows covering {:.2}s of {:.2}s narration",
        selected.len(),
        total,
        audio_duration
    );

    selected
}

/// Cycle already-selected items, appending repeats until their total duration
/// reaches `target`. Used when the sources are too short to cover the
/// narration.
pub fn cycle_fill<T: Clone>(items: &mut Vec<T>, duration_of: impl Fn(&T) -> f64, target: f64) {
    let base_total: f64 = items.iter().map(&duration_of).sum();
    if base_total <= 0.0 || items.is_empty() {
        return;
    }

    let base_len = items.len();
    let mut total = base_total;
    let mut i = 0;
    while total < target {
        let repeat = items[i % base_len].clone();
        total += duration_of(&repeat);
        items.push(repeat);
        i += 1;
    }
}

/// Full planning pass: slice, order, select.
///
/// Errors when no usable windows exist (all sources shorter than one window).
pub fn plan<R: Rng>(
    sources: &[ClipSource],
    audio_duration: f64,
    max_clip_duration: f64,
    mode: ConcatMode,
    rng: &mut R,
) -> Result<Vec<SubClip>> {
    if max_clip_duration <= 0.0 {
        return Err(PlanError::InvalidParameters {
            details: format!("max_clip_duration = {}", max_clip_duration),
        }
        .into());
    }

    let mut windows = slice_windows(sources, max_clip_duration, mode);
    if windows.is_empty() {
        return Err(PlanError::NoWindows {
            reason: format!(
                "no source provides a full {:.1}s window ({} sources)",
                max_clip_duration,
                sources.len()
            ),
        }
        .into());
    }

    debug!("total candidate windows: {}", windows.len());

    order_windows(&mut windows, mode, rng);
    Ok(select_for_duration(windows, audio_duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn source(path: &str, duration: f64) -> ClipSource {
        ClipSource::new(path, duration, 1280, 720)
    }

    #[test]
    fn slicing_drops_short_tails() {
        // 12s source with 5s windows: [0,5), [5,10), tail of 2s dropped
        let windows = slice_windows(&[source("a.mp4", 12.0)], 5.0, ConcatMode::Random);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, 0.0);
        assert_eq!(windows[0].end, 5.0);
        assert_eq!(windows[1].start, 5.0);
        assert_eq!(windows[1].end, 10.0);
    }

    #[test]
    fn slicing_skips_sources_shorter_than_window() {
        let windows = slice_windows(&[source("a.mp4", 3.0)], 5.0, ConcatMode::Random);
        assert!(windows.is_empty());
    }

    #[test]
    fn sequential_takes_one_window_per_source() {
        let sources = vec![source("a.mp4", 20.0), source("b.mp4", 20.0)];
        let windows = slice_windows(&sources, 5.0, ConcatMode::Sequential);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].path, std::path::PathBuf::from("a.mp4"));
        assert_eq!(windows[1].path, std::path::PathBuf::from("b.mp4"));
        assert!(windows.iter().all(|w| w.start == 0.0 && w.end == 5.0));
    }

    #[test]
    fn exact_multiple_produces_all_windows() {
        let windows = slice_windows(&[source("a.mp4", 15.0)], 5.0, ConcatMode::Random);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2].end, 15.0);
    }

    #[test]
    fn selection_stops_after_crossing_audio_duration() {
        let windows = slice_windows(&[source("a.mp4", 50.0)], 5.0, ConcatMode::Random);
        let selected = select_for_duration(windows, 12.0);
        // 5 + 5 = 10 <= 12, third window crosses, fourth is not taken
        assert_eq!(selected.len(), 3);
        let total: f64 = selected.iter().map(|w| w.duration()).sum();
        assert!(total >= 12.0);
    }

    #[test]
    fn selection_with_audio_shorter_than_one_window() {
        let windows = slice_windows(&[source("a.mp4", 50.0)], 5.0, ConcatMode::Random);
        let selected = select_for_duration(windows, 2.0);
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn random_order_is_seed_deterministic() {
        let sources = vec![source("a.mp4", 30.0), source("b.mp4", 30.0)];
        let mut first = slice_windows(&sources, 5.0, ConcatMode::Random);
        let mut second = first.clone();

        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);
        order_windows(&mut first, ConcatMode::Random, &mut rng_a);
        order_windows(&mut second, ConcatMode::Random, &mut rng_b);
        assert_eq!(first, second);
    }

    #[test]
    fn sequential_order_is_untouched() {
        let sources = vec![source("a.mp4", 30.0), source("b.mp4", 30.0)];
        let windows = slice_windows(&sources, 5.0, ConcatMode::Sequential);
        let mut ordered = windows.clone();
        let mut rng = SmallRng::seed_from_u64(42);
        order_windows(&mut ordered, ConcatMode::Sequential, &mut rng);
        assert_eq!(ordered, windows);
    }

    #[test]
    fn cycle_fill_loops_until_target() {
        let mut items = vec![3.0_f64, 2.0];
        cycle_fill(&mut items, |d| *d, 12.0);
        // base 5.0, repeats 3, 2, 3 -> 13.0
        assert_eq!(items, vec![3.0, 2.0, 3.0, 2.0, 3.0]);
    }

    #[test]
    fn cycle_fill_no_op_when_already_covered() {
        let mut items = vec![10.0_f64];
        cycle_fill(&mut items, |d| *d, 8.0);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn cycle_fill_ignores_empty_list() {
        let mut items: Vec<f64> = vec![];
        cycle_fill(&mut items, |d| *d, 8.0);
        assert!(items.is_empty());
    }

    #[test]
    fn plan_errors_when_no_windows() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = plan(&[source("a.mp4", 1.0)], 30.0, 5.0, ConcatMode::Random, &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn plan_errors_on_bad_window_length() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = plan(&[source("a.mp4", 30.0)], 30.0, 0.0, ConcatMode::Random, &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn plan_windows_respect_source_bounds() {
        let mut rng = SmallRng::seed_from_u64(9);
        let sources = vec![source("a.mp4", 23.0), source("b.mp4", 7.5)];
        let windows = plan(&sources, 60.0, 5.0, ConcatMode::Random, &mut rng).unwrap();

        for w in &windows {
            assert!(w.start >= 0.0);
            assert!(w.end > w.start);
            assert!(w.duration() <= 5.0 + 1e-9);
            let max = if w.path == std::path::PathBuf::from("a.mp4") { 23.0 } else { 7.5 };
            assert!(w.end <= max + 1e-9);
        }
    }
}
