pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::ffmpeg::FfmpegCodec;
pub use crate::config::CliConfig;
pub use crate::core::slicer::TimeRangeSlicer;
pub use crate::core::timestamp::{derive_label, parse_timestamp, to_milliseconds};
pub use crate::domain::model::{OutputArtifact, SliceRequest, SourceAudio, Timestamp};
pub use crate::domain::ports::AudioCodec;
pub use crate::utils::error::{Result, SlicerError};
