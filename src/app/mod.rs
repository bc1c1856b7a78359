// Application layer: the command-line boundary. Only this layer prints to the user
// and turns errors into exit codes.

use crate::adapters::ffmpeg::FfmpegCodec;
use crate::config::CliConfig;
use crate::core::slicer::TimeRangeSlicer;
use crate::core::timestamp::parse_timestamp;
use crate::domain::model::SliceRequest;
use crate::domain::ports::AudioCodec;
use crate::utils::error::{Result, SlicerError};
use crate::utils::logger;
use crate::utils::validation::Validate;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Parses `argv`, runs one slice and returns the process exit code.
pub fn run<I, T>(argv: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = match CliConfig::try_parse_from(argv) {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", e.render());
            return 0;
        }
        Err(e) => {
            return report(&SlicerError::Usage {
                message: e.render().to_string(),
            })
        }
    };

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let codec = FfmpegCodec::new(config.ffmpeg.clone(), config.ffprobe.clone());
    match run_with(&config, codec) {
        Ok(_) => 0,
        Err(e) => report(&e),
    }
}

/// Runs the slice described by `config` against any codec.
pub fn run_with<C: AudioCodec>(config: &CliConfig, codec: C) -> Result<PathBuf> {
    config.validate()?;

    // 啟動時先確認 ffmpeg 存在
    codec.ensure_available()?;

    println!(
        "Sampling {} from {} to {}",
        config.source_path, config.start_time, config.end_time
    );

    let request = SliceRequest {
        source_path: PathBuf::from(&config.source_path),
        start: parse_timestamp(&config.start_time)?,
        end: parse_timestamp(&config.end_time)?,
    };

    let slicer = TimeRangeSlicer::new(codec);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let artifact = slicer.prepare(&request)?;
        println!("Would create new file: {}", artifact.path.display());
        return Ok(artifact.path);
    }

    let output_path = slicer.slice(&request)?;
    tracing::info!("✅ Slice written to {}", output_path.display());
    println!("Created new file: {}", output_path.display());
    Ok(output_path)
}

fn report(e: &SlicerError) -> i32 {
    tracing::error!("❌ Slicing failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());

    println!("❌ {}", e.user_friendly_message());
    if !matches!(e, SlicerError::Usage { .. }) {
        println!("💡 {}", e.recovery_suggestion());
    }
    e.exit_code()
}
