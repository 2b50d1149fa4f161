//! Thread-safe frame buffer.

use std::path::Path;
use std::sync::Mutex;

use glint_math::Vec3;

/// Clamp a floating color to [0, 1] per channel and pack it as
/// 0x00RRGGBB.
///
/// This is the only place the tracer clamps color values; everything
/// upstream works in open-range floats.
pub fn pack_color(color: Vec3) -> u32 {
    fn byte(v: f64) -> u32 {
        if v > 1.0 {
            255
        } else if v < 0.0 {
            0
        } else {
            (v * 255.0) as u32
        }
    }
    (byte(color.x) << 16) | (byte(color.y) << 8) | byte(color.z)
}

struct Inner {
    w: u32,
    h: u32,
    pixels: Vec<u32>,
}

/// Packed-pixel buffer guarded by one lock.
///
/// Render workers write disjoint rows while a presentation reader may
/// copy the buffer concurrently; both serialize through the same mutex at
/// call granularity. Out-of-range accesses are silent no-ops so a worker
/// racing a resize cannot fault.
pub struct FrameBuffer {
    inner: Mutex<Inner>,
}

impl FrameBuffer {
    /// Create a zero-filled buffer.
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                w,
                h,
                pixels: vec![0; (w as usize) * (h as usize)],
            }),
        }
    }

    /// Reallocate pixel storage, zero filled.
    pub fn resize(&self, w: u32, h: u32) {
        let mut inner = self.inner.lock().unwrap();
        // Old storage is dropped before the new allocation.
        inner.pixels = Vec::new();
        inner.pixels = vec![0; (w as usize) * (h as usize)];
        inner.w = w;
        inner.h = h;
    }

    pub fn size(&self) -> (u32, u32) {
        let inner = self.inner.lock().unwrap();
        (inner.w, inner.h)
    }

    /// Write one pixel; out-of-range coordinates are ignored.
    pub fn put_pixel(&self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let mut inner = self.inner.lock().unwrap();
        let (x, y) = (x as u32, y as u32);
        if x >= inner.w || y >= inner.h {
            return;
        }
        let idx = (y * inner.w + x) as usize;
        inner.pixels[idx] = color;
    }

    /// Read one pixel; out-of-range coordinates read as zero.
    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 {
            return 0;
        }
        let inner = self.inner.lock().unwrap();
        let (x, y) = (x as u32, y as u32);
        if x >= inner.w || y >= inner.h {
            return 0;
        }
        inner.pixels[(y * inner.w + x) as usize]
    }

    /// Bulk-set every pixel.
    pub fn fill(&self, color: u32) {
        let mut inner = self.inner.lock().unwrap();
        inner.pixels.fill(color);
    }

    /// Copy out dimensions and pixels under one lock acquisition.
    ///
    /// This is the presentation read: callers get a consistent snapshot
    /// even while workers keep writing.
    pub fn snapshot(&self) -> (u32, u32, Vec<u32>) {
        let inner = self.inner.lock().unwrap();
        (inner.w, inner.h, inner.pixels.clone())
    }

    /// Save the buffer as an 8-bit RGB PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let (w, h, pixels) = self.snapshot();
        let mut rgb = Vec::with_capacity(pixels.len() * 3);
        for p in &pixels {
            rgb.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, *p as u8]);
        }
        image::save_buffer(path, &rgb, w, h, image::ColorType::Rgb8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_color_clamps() {
        assert_eq!(pack_color(Vec3::ZERO), 0);
        assert_eq!(pack_color(Vec3::ONE), 0x00FF_FFFF);
        assert_eq!(pack_color(Vec3::new(2.0, -1.0, 0.5)), 0x00FF_007F);
    }

    #[test]
    fn test_put_get_roundtrip() {
        let frame = FrameBuffer::new(4, 3);
        frame.put_pixel(2, 1, 0xABCDEF);
        assert_eq!(frame.get_pixel(2, 1), 0xABCDEF);
        assert_eq!(frame.get_pixel(0, 0), 0);
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let frame = FrameBuffer::new(4, 3);
        frame.put_pixel(-1, 0, 1);
        frame.put_pixel(4, 0, 1);
        frame.put_pixel(0, 3, 1);
        assert_eq!(frame.get_pixel(-1, 0), 0);
        assert_eq!(frame.get_pixel(4, 0), 0);
        let (_, _, pixels) = frame.snapshot();
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_fill_and_resize() {
        let frame = FrameBuffer::new(2, 2);
        frame.fill(0x123456);
        assert_eq!(frame.get_pixel(1, 1), 0x123456);

        frame.resize(3, 2);
        assert_eq!(frame.size(), (3, 2));
        let (_, _, pixels) = frame.snapshot();
        assert_eq!(pixels.len(), 6);
        assert!(pixels.iter().all(|&p| p == 0));
    }
}
