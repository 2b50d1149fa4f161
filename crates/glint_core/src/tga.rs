//! Uncompressed 32-bit TGA 2.0 writer.
//!
//! Byte layout: 18-byte header, NUL-terminated comment in the image-ID
//! field, little-endian 0x00RRGGBB pixel DWORDs (BGRA byte order on
//! disk), a 495-byte extension area carrying the author/software tags and
//! the job time, then the footer with the extension offset and the
//! `TRUEVISION-XFILE.` signature.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::frame::FrameBuffer;

/// Author tag stored in the extension area.
pub const AUTHOR_TAG: &str = "glint";

/// Software tag stored in the extension area.
pub const SOFTWARE_TAG: &str = "glint raytracer";

const SIGNATURE: &[u8] = b"TRUEVISION-XFILE.";
const EXTENSION_SIZE: u16 = 495;

impl FrameBuffer {
    /// Save the buffer as an uncompressed true-color TGA.
    ///
    /// `comment` lands in the image-ID field (truncated to fit its 255
    /// byte limit); `job_time` is the elapsed render time as
    /// (hours, minutes, seconds) for the extension area.
    pub fn save_tga<P: AsRef<Path>>(
        &self,
        path: P,
        comment: &str,
        job_time: (u16, u16, u16),
    ) -> io::Result<()> {
        let (w, h, pixels) = self.snapshot();
        let mut f = BufWriter::new(File::create(path)?);

        let comment = comment.as_bytes();
        let id_len: usize = if comment.len() > 254 {
            255
        } else if !comment.is_empty() {
            comment.len() + 1
        } else {
            0
        };

        // 18-byte header: true-color, 32 bpp, rows from the top-left
        f.write_all(&[id_len as u8, 0, 2])?;
        f.write_all(&[0; 5])?; // color map specification
        f.write_all(&0u16.to_le_bytes())?; // x origin
        f.write_all(&0u16.to_le_bytes())?; // y origin
        f.write_all(&(w as u16).to_le_bytes())?;
        f.write_all(&(h as u16).to_le_bytes())?;
        f.write_all(&[32, 1 << 5])?;

        if id_len != 0 {
            f.write_all(&comment[..id_len - 1])?;
            f.write_all(&[0])?;
        }

        for p in &pixels {
            f.write_all(&p.to_le_bytes())?;
        }

        write_extension_area(&mut f, job_time)?;

        // 26-byte footer
        let extension_offset = 18 + id_len as u32 + 4 * w * h;
        f.write_all(&extension_offset.to_le_bytes())?;
        f.write_all(&0u32.to_le_bytes())?; // developer area offset
        f.write_all(SIGNATURE)?;
        f.write_all(&[0])?;
        f.flush()
    }
}

fn write_extension_area<W: Write>(f: &mut W, job_time: (u16, u16, u16)) -> io::Result<()> {
    f.write_all(&EXTENSION_SIZE.to_le_bytes())?;
    write_fixed(f, AUTHOR_TAG, 41)?; // author name
    write_fixed(f, "", 324)?; // author comments
    f.write_all(&[0; 12])?; // date/time stamp
    write_fixed(f, "", 41)?; // job name
    f.write_all(&job_time.0.to_le_bytes())?;
    f.write_all(&job_time.1.to_le_bytes())?;
    f.write_all(&job_time.2.to_le_bytes())?;
    write_fixed(f, SOFTWARE_TAG, 41)?; // software id
    f.write_all(&100u16.to_le_bytes())?; // software version x100
    f.write_all(&[b' '])?; // version letter
    f.write_all(&0u32.to_le_bytes())?; // key color
    f.write_all(&1u16.to_le_bytes())?; // pixel aspect numerator
    f.write_all(&1u16.to_le_bytes())?; // pixel aspect denominator
    f.write_all(&1u16.to_le_bytes())?; // gamma numerator
    f.write_all(&1u16.to_le_bytes())?; // gamma denominator
    f.write_all(&0u32.to_le_bytes())?; // color correction offset
    f.write_all(&0u32.to_le_bytes())?; // postage stamp offset
    f.write_all(&0u32.to_le_bytes())?; // scan line offset
    f.write_all(&[0]) // attributes type
}

// Fixed-width ASCII field, always NUL terminated.
fn write_fixed<W: Write>(f: &mut W, s: &str, n: usize) -> io::Result<()> {
    let bytes = s.as_bytes();
    let len = bytes.len().min(n - 1);
    f.write_all(&bytes[..len])?;
    f.write_all(&vec![0u8; n - len])
}
