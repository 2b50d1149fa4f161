//! Render driver: parses arguments, renders the demo scene and writes
//! the image.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use glint_core::FrameBuffer;
use glint_render::{default_workers, render_with_workers, RenderControl};

mod cli;
mod demo;

use cli::{Args, Format};

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    let scene = demo::build(args.model.as_deref());
    let camera = demo::camera(args.width, args.height);
    let frame = FrameBuffer::new(args.width, args.height);
    frame.fill(0);

    let workers = args.workers.unwrap_or_else(default_workers);
    let stats = render_with_workers(&scene, &camera, &frame, workers, &RenderControl::new());

    let path = args
        .output
        .unwrap_or_else(|| timestamped_output(args.format));
    match args.format {
        Format::Tga => frame
            .save_tga(&path, &args.comment, split_hms(stats.elapsed))
            .with_context(|| format!("saving {}", path.display()))?,
        Format::Png => frame
            .save_png(&path)
            .with_context(|| format!("saving {}", path.display()))?,
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Default output name: `glint-YYYYMMDD-HHMMSS.<ext>` in UTC.
fn timestamped_output(format: Format) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (y, mo, d) = civil_from_days((secs / 86400) as i64);
    let (h, mi, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    PathBuf::from(format!(
        "glint-{y:04}{mo:02}{d:02}-{h:02}{mi:02}{s:02}.{}",
        format.extension()
    ))
}

// Gregorian date from days since the Unix epoch.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Elapsed render time as the (hours, minutes, seconds) TGA job time.
fn split_hms(elapsed: Duration) -> (u16, u16, u16) {
    let secs = elapsed.as_secs();
    (
        (secs / 3600).min(u16::MAX as u64) as u16,
        (secs / 60 % 60) as u16,
        (secs % 60) as u16,
    )
}
