use std::path::PathBuf;

/// A minutes or minutes:seconds offset, as typed on the command line.
///
/// The variant remembers how many parts were given so the output label
/// can be rebuilt with the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Minutes(u64),
    MinutesSeconds { minutes: u64, seconds: u8 },
}

impl Timestamp {
    pub fn minutes(&self) -> u64 {
        match self {
            Timestamp::Minutes(minutes) => *minutes,
            Timestamp::MinutesSeconds { minutes, .. } => *minutes,
        }
    }

    pub fn seconds(&self) -> Option<u8> {
        match self {
            Timestamp::Minutes(_) => None,
            Timestamp::MinutesSeconds { seconds, .. } => Some(*seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRequest {
    pub source_path: PathBuf,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Decoded audio held in memory as interleaved signed 16-bit PCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl SourceAudio {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Whole milliseconds, truncated. This is the bound used for range checks.
    pub fn duration_ms(&self) -> u64 {
        (self.duration_seconds() * 1000.0) as u64
    }

    pub fn ms_to_frame(&self, ms: u64) -> usize {
        (ms as u128 * self.sample_rate as u128 / 1000) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub audio: SourceAudio,
    pub path: PathBuf,
}
