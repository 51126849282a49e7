use clap::Parser;
use std::path::PathBuf;

/// Build a browsable photo album from a batch of images.
#[derive(Clone, Parser)]
#[command(name = "album")]
#[command(
    about = "Generate thumbnails, rotate and caption each image interactively, and write a gallery page."
)]
pub struct Cli {
    /// Images, directories or glob patterns (`photos/*.jpg`). Order is kept.
    #[arg(value_name = "PATTERNS", required = true, num_args = 1..)]
    pub patterns: Vec<String>,

    /// Gallery page to write. Default: index.html.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// JSON run summary to write (entries and skipped images). Default: album.json.
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Thumbnail scale in percent.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub thumbnail_percent: Option<u32>,

    /// Final image scale in percent.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub final_percent: Option<u32>,

    /// Executable used to resize images.
    #[arg(long)]
    pub resize_program: Option<String>,

    /// Executable used to rotate images.
    #[arg(long)]
    pub rotate_program: Option<String>,

    /// Longest caption accepted; longer input is truncated.
    #[arg(long)]
    pub caption_max_len: Option<usize>,

    /// Buffered records between the thumbnail and editing stages.
    #[arg(long)]
    pub channel_capacity: Option<usize>,

    /// Do not prompt: keep orientation and use each file name as its caption.
    #[arg(long, short = 'n', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub no_prompt: Option<bool>,

    /// Config file. Default: `.album.toml` in the current directory.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
