mod common;

use anyhow::Result;
use audio_slicer::app::run_with;
use audio_slicer::{CliConfig, SlicerError};
use clap::Parser;
use common::{stereo_source, MemoryCodec};
use tempfile::TempDir;

fn config(args: &[&str]) -> CliConfig {
    let mut argv = vec!["slicer"];
    argv.extend_from_slice(args);
    CliConfig::try_parse_from(argv).unwrap()
}

#[test]
fn test_slice_names_output_after_labels() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("Martine+Barrat_FINAL.mp3");

    let codec = MemoryCodec::new();
    codec.add_source(&source, stereo_source(200, 8000));

    let cfg = config(&[source.to_str().unwrap(), "1", "2:30"]);
    let output = run_with(&cfg, codec.clone())?;

    assert_eq!(
        output,
        temp_dir
            .path()
            .join("sampled-1m-2m30s-Martine+Barrat_FINAL.mp3")
    );
    assert!(output.exists());

    let written = codec.written(&output).expect("slice was not encoded");
    assert_eq!(written.duration_ms(), 90_000);
    assert_eq!(written.channels, 2);
    assert_eq!(written.sample_rate, 8000);
    // 第一個 frame 應該對應 60 秒處
    assert_eq!(written.samples[0], ((60 * 8000) % 32_000) as i16);
    Ok(())
}

#[test]
fn test_inverted_range_writes_empty_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("talk.mp3");

    let codec = MemoryCodec::new();
    codec.add_source(&source, stereo_source(200, 8000));

    let cfg = config(&[source.to_str().unwrap(), "3", "1"]);
    let output = run_with(&cfg, codec.clone())?;

    assert_eq!(output, temp_dir.path().join("sampled-3m-1m-talk.mp3"));
    let written = codec.written(&output).unwrap();
    assert_eq!(written.duration_ms(), 0);
    assert!(written.samples.is_empty());
    Ok(())
}

#[test]
fn test_full_range_reproduces_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("full.wav");
    let audio = stereo_source(180, 4000);

    let codec = MemoryCodec::new();
    codec.add_source(&source, audio.clone());

    let cfg = config(&[source.to_str().unwrap(), "0", "3"]);
    let output = run_with(&cfg, codec.clone())?;

    assert_eq!(output, temp_dir.path().join("sampled-0m-3m-full.mp3"));
    assert_eq!(codec.written(&output).unwrap(), audio);
    Ok(())
}

#[test]
fn test_end_past_source_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("short.mp3");

    let codec = MemoryCodec::new();
    codec.add_source(&source, stereo_source(180, 1000));

    let cfg = config(&[source.to_str().unwrap(), "0", "3:01"]);
    let err = run_with(&cfg, codec.clone()).unwrap_err();

    assert!(matches!(
        err,
        SlicerError::RangeExceedsSource {
            start_ms: 0,
            end_ms: 181_000,
            total_ms: 180_000
        }
    ));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(codec.write_count(), 0);
    assert!(!temp_dir.path().join("sampled-0m-3m1s-short.mp3").exists());
    Ok(())
}

#[test]
fn test_bad_timestamp_fails_before_decoding() -> Result<()> {
    let codec = MemoryCodec::new();

    let cfg = config(&["nowhere.mp3", "1:2:3", "4"]);
    let err = run_with(&cfg, codec.clone()).unwrap_err();
    assert!(matches!(err, SlicerError::InvalidTimestampFormat { .. }));

    let cfg = config(&["nowhere.mp3", "1", "x:30"]);
    let err = run_with(&cfg, codec.clone()).unwrap_err();
    assert!(matches!(err, SlicerError::InvalidTimestampFormat { .. }));

    assert_eq!(codec.write_count(), 0);
    Ok(())
}

#[test]
fn test_missing_source_is_unreadable() -> Result<()> {
    let codec = MemoryCodec::new();
    let cfg = config(&["nowhere.mp3", "0", "1"]);

    let err = run_with(&cfg, codec).unwrap_err();
    assert!(matches!(err, SlicerError::UnreadableSource { .. }));
    Ok(())
}

#[test]
fn test_missing_ffmpeg_aborts_at_startup() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("talk.mp3");

    let codec = MemoryCodec::without_ffmpeg();
    codec.add_source(&source, stereo_source(10, 1000));

    let cfg = config(&[source.to_str().unwrap(), "0", "0:05"]);
    let err = run_with(&cfg, codec.clone()).unwrap_err();

    assert!(matches!(err, SlicerError::MissingDependency { .. }));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(codec.write_count(), 0);
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let source = temp_dir.path().join("talk.mp3");

    let codec = MemoryCodec::new();
    codec.add_source(&source, stereo_source(120, 1000));

    let cfg = config(&["--dry-run", source.to_str().unwrap(), "0:30", "1:15"]);
    let output = run_with(&cfg, codec.clone())?;

    assert_eq!(output, temp_dir.path().join("sampled-0m30s-1m15s-talk.mp3"));
    assert!(!output.exists());
    assert_eq!(codec.write_count(), 0);
    Ok(())
}

#[test]
fn test_blank_time_is_a_timestamp_error() -> Result<()> {
    let codec = MemoryCodec::new();

    for (start, end) in [("", "1"), ("0", "   ")] {
        let cfg = config(&["a.mp3", start, end]);
        let err = run_with(&cfg, codec.clone()).unwrap_err();
        assert!(
            matches!(err, SlicerError::InvalidTimestampFormat { .. }),
            "unexpected error for {:?}: {:?}",
            (start, end),
            err
        );
        assert!(err.user_friendly_message().contains("minutes:seconds"));
    }

    assert_eq!(codec.write_count(), 0);
    Ok(())
}
