//! Background music selection.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// How background music is chosen for the final mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgmKind {
    /// No background music
    None,
    /// Pick a random mp3 from the song directory
    Random,
    /// Use an explicitly supplied file
    File,
}

impl Default for BgmKind {
    fn default() -> Self {
        Self::None
    }
}

/// Resolve the background-music track to mix under the narration.
///
/// An explicit file that exists always wins, regardless of kind. `Random`
/// scans `song_dir` for mp3 files. Returns `None` when nothing usable is
/// found; a missing track is never an error.
pub fn select_bgm<R: Rng>(
    kind: BgmKind,
    explicit_file: Option<&Path>,
    song_dir: Option<&Path>,
    rng: &mut R,
) -> Option<PathBuf> {
    if kind == BgmKind::None {
        return None;
    }

    if let Some(file) = explicit_file {
        if file.exists() {
            debug!("using explicit bgm file: {:?}", file);
            return Some(file.to_path_buf());
        }
        warn!("bgm file {:?} does not exist, falling back", file);
    }

    if kind == BgmKind::Random {
        let dir = song_dir?;
        let mut songs: Vec<PathBuf> = std::fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("mp3"))
                    .unwrap_or(false)
            })
            .collect();

        // Deterministic pick order under a seeded rng
        songs.sort();

        let chosen = songs.choose(rng).cloned();
        if chosen.is_none() {
            warn!("no mp3 files found in song directory {:?}", dir);
        }
        return chosen;
    }

    None
}
