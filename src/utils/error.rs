use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlicerError {
    #[error("Invalid timestamp '{raw}': {reason}")]
    InvalidTimestampFormat { raw: String, reason: String },

    #[error("Unable to read audio source '{path}': {reason}")]
    UnreadableSource { path: String, reason: String },

    #[error(
        "Slice range {start_ms}ms..{end_ms}ms exceeds source duration of {total_ms}ms"
    )]
    RangeExceedsSource {
        start_ms: u64,
        end_ms: u64,
        total_ms: u64,
    },

    #[error("{message}")]
    Usage { message: String },

    #[error("Required tool '{tool}' was not found")]
    MissingDependency { tool: String },

    #[error("Failed to encode '{path}': {reason}")]
    EncodeFailed { path: String, reason: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },
}

impl SlicerError {
    /// Process exit status for this error. `main` is the only caller that exits.
    pub fn exit_code(&self) -> i32 {
        match self {
            SlicerError::Usage { .. } => 2,
            SlicerError::MissingDependency { .. } => 3,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SlicerError::InvalidTimestampFormat { raw, .. } => format!(
                "Error! Audio slice time '{}' is invalid. Times must be given as minutes or minutes:seconds.",
                raw
            ),
            SlicerError::UnreadableSource { path, .. } => {
                format!("Error! Could not open or decode audio file '{}'.", path)
            }
            SlicerError::RangeExceedsSource { total_ms, .. } => format!(
                "Error! Audio slice times cannot be greater than the original audio length ({}).",
                format_ms(*total_ms)
            ),
            SlicerError::Usage { message } => message.clone(),
            SlicerError::MissingDependency { tool } => {
                format!("Please install {}: https://ffmpeg.org/download.html", tool)
            }
            SlicerError::EncodeFailed { path, .. } => {
                format!("Error! Could not write sliced audio to '{}'.", path)
            }
            SlicerError::InvalidArgument { field, reason, .. } => {
                format!("Error! Invalid {}: {}.", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SlicerError::InvalidTimestampFormat { .. } => {
                "Use whole numbers such as '2' (2 minutes) or '105:40' (105 minutes 40 seconds)"
            }
            SlicerError::UnreadableSource { .. } => {
                "Check that the file exists and is an audio format ffmpeg can decode"
            }
            SlicerError::RangeExceedsSource { .. } => {
                "Pick start and end times within the length of the source audio"
            }
            SlicerError::Usage { .. } => "Run with --help to see the expected arguments",
            SlicerError::MissingDependency { .. } => {
                "On mac you can: brew install ffmpeg, or pass --ffmpeg/--ffprobe with explicit paths"
            }
            SlicerError::EncodeFailed { .. } => {
                "Check that the output directory is writable and ffmpeg was built with MP3 support"
            }
            SlicerError::InvalidArgument { .. } => "Fix the argument and try again",
        }
    }
}

/// Renders milliseconds as `MM:SS.mmm` for messages.
pub fn format_ms(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

pub type Result<T> = std::result::Result<T, SlicerError>;
