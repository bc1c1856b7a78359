use crate::domain::model::SourceAudio;
use crate::utils::error::Result;
use std::path::Path;

/// Decode/encode capability backing the slicer.
///
/// The real implementation shells out to ffmpeg; tests plug in an in-memory double.
pub trait AudioCodec {
    /// Fails with `MissingDependency` when the backing tool cannot be found.
    fn ensure_available(&self) -> Result<()>;

    fn decode(&self, path: &Path) -> Result<SourceAudio>;

    /// Writes `audio` as MP3 at `path`.
    fn encode(&self, audio: &SourceAudio, path: &Path) -> Result<()>;
}
