#![allow(dead_code)]

use audio_slicer::{AudioCodec, Result, SlicerError, SourceAudio};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for ffmpeg. Encoded audio is kept for inspection and an
/// empty marker file is written so the output path exists on disk.
#[derive(Clone, Default)]
pub struct MemoryCodec {
    sources: Arc<Mutex<HashMap<PathBuf, SourceAudio>>>,
    written: Arc<Mutex<HashMap<PathBuf, SourceAudio>>>,
    available: bool,
}

impl MemoryCodec {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    pub fn without_ffmpeg() -> Self {
        Self::default()
    }

    pub fn add_source(&self, path: &Path, audio: SourceAudio) {
        self.sources
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), audio);
    }

    pub fn written(&self, path: &Path) -> Option<SourceAudio> {
        self.written.lock().unwrap().get(path).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.written.lock().unwrap().len()
    }
}

impl AudioCodec for MemoryCodec {
    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(SlicerError::MissingDependency {
                tool: "ffmpeg".to_string(),
            })
        }
    }

    fn decode(&self, path: &Path) -> Result<SourceAudio> {
        self.sources
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| SlicerError::UnreadableSource {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            })
    }

    fn encode(&self, audio: &SourceAudio, path: &Path) -> Result<()> {
        std::fs::write(path, b"").map_err(|e| SlicerError::EncodeFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.written
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), audio.clone());
        Ok(())
    }
}

/// Stereo tone-ish signal; each sample encodes its own frame index.
pub fn stereo_source(seconds: u32, sample_rate: u32) -> SourceAudio {
    let frames = (seconds * sample_rate) as usize;
    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let v = (i % 32_000) as i16;
        samples.push(v);
        samples.push(-v);
    }
    SourceAudio::new(samples, sample_rate, 2)
}
