use crate::core::timestamp::{derive_label, to_milliseconds};
use crate::domain::model::{OutputArtifact, SliceRequest, SourceAudio};
use crate::domain::ports::AudioCodec;
use crate::utils::error::{format_ms, Result, SlicerError};
use std::path::{Path, PathBuf};

const OUTPUT_PREFIX: &str = "sampled";
const OUTPUT_EXTENSION: &str = "mp3";

pub struct TimeRangeSlicer<C: AudioCodec> {
    codec: C,
}

impl<C: AudioCodec> TimeRangeSlicer<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn load_source(&self, path: &Path) -> Result<SourceAudio> {
        tracing::debug!("Decoding {}", path.display());
        let audio = self.codec.decode(path)?;
        tracing::info!(
            "Loaded {} ({} Hz, {} ch, {})",
            path.display(),
            audio.sample_rate,
            audio.channels,
            format_ms(audio.duration_ms())
        );
        Ok(audio)
    }

    /// Decodes, validates and cuts the requested range without writing anything.
    pub fn prepare(&self, request: &SliceRequest) -> Result<OutputArtifact> {
        let start_ms = to_milliseconds(&request.start);
        let end_ms = to_milliseconds(&request.end);

        let source = self.load_source(&request.source_path)?;
        validate_range(start_ms, end_ms, source.duration_ms())?;

        if start_ms > end_ms {
            tracing::warn!(
                "Start {} is after end {}, the slice will be empty",
                format_ms(start_ms),
                format_ms(end_ms)
            );
        }

        extract(source, request)
    }

    pub fn write(&self, artifact: &OutputArtifact) -> Result<PathBuf> {
        tracing::debug!(
            "Encoding {} frames to {}",
            artifact.audio.frame_count(),
            artifact.path.display()
        );
        self.codec.encode(&artifact.audio, &artifact.path)?;
        Ok(artifact.path.clone())
    }

    /// Full pipeline: decode, validate, cut and encode. Nothing is written
    /// unless every earlier step succeeds.
    pub fn slice(&self, request: &SliceRequest) -> Result<PathBuf> {
        let artifact = self.prepare(request)?;
        self.write(&artifact)
    }
}

/// Both bounds may equal the source duration; ordering is not checked.
pub fn validate_range(start_ms: u64, end_ms: u64, total_duration_ms: u64) -> Result<()> {
    if start_ms > total_duration_ms || end_ms > total_duration_ms {
        return Err(SlicerError::RangeExceedsSource {
            start_ms,
            end_ms,
            total_ms: total_duration_ms,
        });
    }
    Ok(())
}

/// Copies frames in `[start_ms, end_ms)`. An inverted range gives an empty slice.
pub fn slice_audio(source: &SourceAudio, start_ms: u64, end_ms: u64) -> SourceAudio {
    if start_ms >= end_ms {
        return SourceAudio::new(Vec::new(), source.sample_rate, source.channels);
    }

    let frames = source.frame_count();
    let channels = source.channels as usize;

    let start = source.ms_to_frame(start_ms).min(frames);
    // 結束點等於總長時取到最後一個 frame，避免截斷不足 1ms 的尾端
    let end = if end_ms >= source.duration_ms() {
        frames
    } else {
        source.ms_to_frame(end_ms).min(frames)
    };

    let samples = if start < end {
        source.samples[start * channels..end * channels].to_vec()
    } else {
        Vec::new()
    };

    SourceAudio::new(samples, source.sample_rate, source.channels)
}

pub fn extract(source: SourceAudio, request: &SliceRequest) -> Result<OutputArtifact> {
    let start_ms = to_milliseconds(&request.start);
    let end_ms = to_milliseconds(&request.end);

    let audio = slice_audio(&source, start_ms, end_ms);
    let path = output_path(request)?;

    Ok(OutputArtifact { audio, path })
}

/// `<dir>/sampled-<start>-<end>-<name>.mp3`, next to the source file.
pub fn output_path(request: &SliceRequest) -> Result<PathBuf> {
    let source = &request.source_path;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SlicerError::InvalidArgument {
            field: "source_path".to_string(),
            value: source.display().to_string(),
            reason: "path has no file name".to_string(),
        })?;

    let file_name = format!(
        "{}-{}-{}-{}.{}",
        OUTPUT_PREFIX,
        derive_label(&request.start),
        derive_label(&request.end),
        stem,
        OUTPUT_EXTENSION
    );

    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(file_name))
}
