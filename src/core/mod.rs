pub mod slicer;
pub mod timestamp;

pub use crate::domain::model::{OutputArtifact, SliceRequest, SourceAudio, Timestamp};
pub use crate::domain::ports::AudioCodec;
pub use crate::utils::error::Result;
