use thiserror::Error;

/// Main error type for the clipforge library
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Media probing error: {0}")]
    Media(#[from] MediaError),

    #[error("Segment planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Segment rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Probing and media discovery errors
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to probe media file: {path}")]
    ProbeFailed { path: String },

    #[error("ffprobe produced unreadable output for {path}: {reason}")]
    ProbeUnreadable { path: String, reason: String },

    #[error("Media file has no usable stream: {path}")]
    NoStream { path: String },

    #[error("Unsupported media format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Material resolution too low: {width}x{height} (minimum {minimum}x{minimum})")]
    ResolutionTooLow { width: u32, height: u32, minimum: u32 },
}

/// Segment planning errors
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No video clips found in directory: {path}")]
    NoClipsFound { path: String },

    #[error("No usable sub-clip windows: {reason}")]
    NoWindows { reason: String },

    #[error("Invalid planning parameters: {details}")]
    InvalidParameters { details: String },
}

/// Per-segment rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("ffmpeg not found on PATH")]
    FfmpegMissing,

    #[error("ffmpeg exited with failure: {stderr}")]
    CommandFailed { stderr: String },

    #[error("Failed to spawn ffmpeg process: {reason}")]
    SpawnFailed { reason: String },

    #[error("All {count} planned segments failed to render")]
    AllSegmentsFailed { count: usize },
}

/// Final assembly errors
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("No rendered segments to assemble")]
    NoSegments,

    #[error("Concat list generation failed: {reason}")]
    ConcatListFailed { reason: String },

    #[error("Final output generation failed: {reason}")]
    OutputFailed { reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // IO errors might be temporary
            Self::Io(_) => true,
            // Probing might work on retry (file still downloading, NFS hiccup)
            Self::Media(MediaError::ProbeFailed { .. }) => true,
            // Most other errors are permanent
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Render(RenderError::FfmpegMissing) => {
                "ffmpeg was not found on PATH. Please install ffmpeg and ffprobe.".to_string()
            }
            Self::Media(MediaError::ProbeFailed { path }) => {
                format!(
                    "Could not probe media file '{}'. Please check the file exists and is a supported format.",
                    path
                )
            }
            Self::Plan(PlanError::NoClipsFound { path }) => {
                format!("No video clips found in '{}'.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
