//! Command line surface of the renderer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output image container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Uncompressed 32-bit TGA with the render-time trailer.
    Tga,
    /// 8-bit RGB PNG.
    Png,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Tga => "tga",
            Format::Png => "png",
        }
    }
}

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Recursive Whitted-style ray tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Worker thread count (defaults to every core but one)
    #[arg(long, short = 'j')]
    pub workers: Option<usize>,

    /// Output file path (defaults to a timestamped name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output image format
    #[arg(long, value_enum, default_value = "tga")]
    pub format: Format,

    /// G3DM model to add to the demo scene
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Comment stored in the TGA image-ID field
    #[arg(long, default_value = "glint render")]
    pub comment: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
