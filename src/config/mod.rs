use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "slicer", version)]
#[command(about = "Slice a minutes or minutes:seconds range out of an audio file into a new MP3")]
#[command(
    after_help = "Example: slicer data/Martine+Barrat_FINAL.mp3 105:40 107:40\n\
                  writes data/sampled-105m40s-107m40s-Martine+Barrat_FINAL.mp3"
)]
pub struct CliConfig {
    /// Path to the source audio file
    pub source_path: String,

    /// Slice start, as MM or MM:SS
    #[arg(allow_hyphen_values = true)]
    pub start_time: String,

    /// Slice end, as MM or MM:SS
    #[arg(allow_hyphen_values = true)]
    pub end_time: String,

    #[arg(long, default_value = "ffmpeg", help = "ffmpeg binary used to decode and encode")]
    pub ffmpeg: String,

    #[arg(long, default_value = "ffprobe", help = "ffprobe binary used to inspect the source")]
    pub ffprobe: String,

    #[arg(long, help = "Validate the slice and print the output path without writing it")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source_path", &self.source_path)?;
        validate_path("ffmpeg", &self.ffmpeg)?;
        validate_path("ffprobe", &self.ffprobe)?;
        Ok(())
    }
}
