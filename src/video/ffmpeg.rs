//! Thin wrappers around the external ffmpeg/ffprobe binaries.
//!
//! All invocations run blocking `std::process::Command` calls on the tokio
//! blocking pool and surface stderr on failure.

use std::process::{Command, Stdio};

use tokio::task;
use tracing::debug;

use crate::error::{RenderError, Result};

/// Check whether ffmpeg is reachable on PATH
pub fn check_ffmpeg_available() -> bool {
    tool_available("ffmpeg")
}

/// Check whether ffprobe is reachable on PATH
pub fn check_ffprobe_available() -> bool {
    tool_available("ffprobe")
}

fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Run ffmpeg with the given arguments, failing on a non-zero exit
pub async fn run_ffmpeg(args: Vec<String>) -> Result<()> {
    debug!("ffmpeg {}", args.join(" "));

    let output = task::spawn_blocking(move || Command::new("ffmpeg").args(&args).output())
        .await
        .map_err(|e| RenderError::SpawnFailed {
            reason: e.to_string(),
        })?
        .map_err(|e| RenderError::SpawnFailed {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::CommandFailed {
            stderr: truncate_stderr(&stderr),
        }
        .into());
    }

    Ok(())
}

/// Run ffprobe with the given arguments, returning stdout on success
pub async fn run_ffprobe(args: Vec<String>) -> Result<String> {
    debug!("ffprobe {}", args.join(" "));

    let output = task::spawn_blocking(move || Command::new("ffprobe").args(&args).output())
        .await
        .map_err(|e| RenderError::SpawnFailed {
            reason: e.to_string(),
        })?
        .map_err(|e| RenderError::SpawnFailed {
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::CommandFailed {
            stderr: truncate_stderr(&stderr),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ffmpeg dumps its whole banner on error; keep only the tail where the
// actual failure reason lives.
fn truncate_stderr(stderr: &str) -> String {
    const MAX_LINES: usize = 8;
    let lines: Vec<&str> = stderr.lines().collect();
    if lines.len() <= MAX_LINES {
        return stderr.trim().to_string();
    }
    lines[lines.len() - MAX_LINES..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_output() {
        let out = truncate_stderr("one\ntwo");
        assert_eq!(out, "one\ntwo");
    }

    #[test]
    fn truncate_keeps_tail_of_long_output() {
        let long: String = (0..20).map(|i| format!("line{}\n", i)).collect();
        let out = truncate_stderr(&long);
        assert!(out.contains("line19"));
        assert!(!out.contains("line0\n"));
    }
}
