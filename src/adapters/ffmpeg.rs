//! ffmpeg-backed codec.
//!
//! Decoding probes the first audio stream with `ffprobe`, then has `ffmpeg`
//! emit interleaved `s16le` PCM on stdout. Encoding pipes the same PCM layout
//! back into `ffmpeg` on stdin and lets it write an MP3.

use crate::domain::model::SourceAudio;
use crate::domain::ports::AudioCodec;
use crate::utils::error::{Result, SlicerError};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const PCM_FORMAT: &str = "s16le";
const PCM_CODEC: &str = "pcm_s16le";

#[derive(Debug, Clone)]
pub struct FfmpegCodec {
    ffmpeg: String,
    ffprobe: String,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    sample_rate: Option<String>,
    channels: Option<u16>,
}

impl FfmpegCodec {
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Sample rate and channel count of the first audio stream.
    fn probe(&self, path: &Path) -> Result<(u32, u16)> {
        let unreadable = |reason: String| SlicerError::UnreadableSource {
            path: path.display().to_string(),
            reason,
        };

        let mut cmd = Command::new(&self.ffprobe);
        cmd.arg("-v")
            .arg("error")
            .arg("-select_streams")
            .arg("a:0")
            .arg("-show_entries")
            .arg("stream=sample_rate,channels")
            .arg("-of")
            .arg("json")
            .arg(path)
            .stdin(Stdio::null());

        tracing::debug!("Running ffprobe: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| unreadable(format!("failed to launch {}: {}", self.ffprobe, e)))?;

        if !output.status.success() {
            return Err(unreadable(format!(
                "ffprobe exited with code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let probed: ProbeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| unreadable(format!("unexpected ffprobe output: {}", e)))?;

        let stream = probed
            .streams
            .into_iter()
            .next()
            .ok_or_else(|| unreadable("no audio stream found".to_string()))?;

        let sample_rate = stream
            .sample_rate
            .as_deref()
            .and_then(|rate| rate.parse::<u32>().ok())
            .filter(|rate| *rate > 0)
            .ok_or_else(|| unreadable("audio stream has no sample rate".to_string()))?;

        let channels = stream
            .channels
            .filter(|channels| *channels > 0)
            .ok_or_else(|| unreadable("audio stream has no channels".to_string()))?;

        Ok((sample_rate, channels))
    }
}

impl Default for FfmpegCodec {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl AudioCodec for FfmpegCodec {
    fn ensure_available(&self) -> Result<()> {
        for tool in [&self.ffmpeg, &self.ffprobe] {
            match locate_tool(tool) {
                Some(found) => tracing::debug!("Using {} at {}", tool, found.display()),
                None => {
                    return Err(SlicerError::MissingDependency { tool: tool.clone() });
                }
            }
        }
        Ok(())
    }

    fn decode(&self, path: &Path) -> Result<SourceAudio> {
        if !path.is_file() {
            return Err(SlicerError::UnreadableSource {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            });
        }

        let (sample_rate, channels) = self.probe(path)?;

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-v")
            .arg("error")
            .arg("-nostdin")
            .arg("-i")
            .arg(path)
            .arg("-vn")
            .arg("-ac")
            .arg(channels.to_string())
            .arg("-ar")
            .arg(sample_rate.to_string())
            .arg("-f")
            .arg(PCM_FORMAT)
            .arg("-acodec")
            .arg(PCM_CODEC)
            .arg("pipe:1")
            .stdin(Stdio::null());

        tracing::debug!("Running ffmpeg (decode): {:?}", cmd);

        let output = cmd.output().map_err(|e| SlicerError::UnreadableSource {
            path: path.display().to_string(),
            reason: format!("failed to launch {}: {}", self.ffmpeg, e),
        })?;

        if !output.status.success() {
            return Err(SlicerError::UnreadableSource {
                path: path.display().to_string(),
                reason: format!(
                    "ffmpeg exited with code {:?}: {}",
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let samples = pcm_from_bytes(&output.stdout);
        tracing::debug!(
            "Decoded {} samples ({} Hz, {} ch) from {}",
            samples.len(),
            sample_rate,
            channels,
            path.display()
        );

        Ok(SourceAudio::new(samples, sample_rate, channels))
    }

    fn encode(&self, audio: &SourceAudio, path: &Path) -> Result<()> {
        let encode_failed = |reason: String| SlicerError::EncodeFailed {
            path: path.display().to_string(),
            reason,
        };

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-v")
            .arg("error")
            .arg("-y")
            .arg("-f")
            .arg(PCM_FORMAT)
            .arg("-ar")
            .arg(audio.sample_rate.to_string())
            .arg("-ac")
            .arg(audio.channels.to_string())
            .arg("-i")
            .arg("pipe:0")
            .arg("-f")
            .arg("mp3")
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!("Running ffmpeg (encode): {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| encode_failed(format!("failed to launch {}: {}", self.ffmpeg, e)))?;

        // stdin 寫完後必須關閉，ffmpeg 才會結束
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&pcm_to_bytes(&audio.samples)),
            None => Err(std::io::Error::other("failed to capture ffmpeg stdin")),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| encode_failed(format!("ffmpeg process error: {}", e)))?;

        let failure = if !output.status.success() {
            Some(format!(
                "ffmpeg exited with code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        } else {
            write_result
                .err()
                .map(|e| format!("failed to stream audio to ffmpeg: {}", e))
        };

        if let Some(reason) = failure {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!("Could not remove partial output {}: {}", path.display(), e);
                }
            }
            return Err(encode_failed(reason));
        }

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn pcm_from_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

fn pcm_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Resolves a tool name the way a shell would: explicit paths must exist,
/// bare names are searched on `PATH`.
pub fn locate_tool(tool: &str) -> Option<PathBuf> {
    let candidate = Path::new(tool);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{tool}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}
