//! Camera for primary ray generation.

use crate::{Ray, Vec3};

/// Pin-hole camera with an orthonormal basis and a projection plane.
///
/// `frame_ray` maps floating pixel coordinates into world-space rays
/// through the projection plane. Derived values are cached and refreshed
/// whenever the view, projection or frame size changes.
#[derive(Debug, Clone)]
pub struct Camera {
    // View positioning
    pub loc: Vec3,
    pub at: Vec3,
    pub dir: Vec3,
    pub up: Vec3,
    pub right: Vec3,

    // Projection settings
    pub proj_size: f64,
    pub proj_dist: f64,
    pub far_clip: f64,

    // Frame size in pixels
    pub frame_w: u32,
    pub frame_h: u32,

    // Cached projection plane extents (set by update_proj)
    wp: f64,
    hp: f64,
}

impl Camera {
    /// Create a camera at (0, 0, 5) looking down -Z.
    pub fn new() -> Self {
        let mut cam = Self {
            loc: Vec3::new(0.0, 0.0, 5.0),
            at: Vec3::ZERO,
            dir: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            right: Vec3::X,
            proj_size: 0.1,
            proj_dist: 0.1,
            far_clip: 500.0,
            frame_w: 30,
            frame_h: 30,
            wp: 0.1,
            hp: 0.1,
        };
        cam.update_proj();
        cam
    }

    /// Point the camera: location, target and approximate up.
    pub fn set_loc_at_up(&mut self, loc: Vec3, at: Vec3, up: Vec3) -> &mut Self {
        self.loc = loc;
        self.at = at;
        self.dir = (at - loc).normalize();
        self.right = self.dir.cross(up).normalize();
        self.up = self.right.cross(self.dir);
        self
    }

    /// Set projection plane size, projection distance and far clip.
    pub fn set_proj(&mut self, size: f64, proj_dist: f64, far_clip: f64) -> &mut Self {
        self.proj_size = size;
        self.proj_dist = proj_dist;
        self.far_clip = far_clip;
        self.update_proj();
        self
    }

    /// Set the frame size in pixels.
    pub fn resize(&mut self, w: u32, h: u32) -> &mut Self {
        self.frame_w = w.max(1);
        self.frame_h = h.max(1);
        self.update_proj();
        self
    }

    /// Build the primary ray through floating pixel coordinates.
    ///
    /// The ray starts on the projection plane, not at the camera location,
    /// and carries a unit direction.
    pub fn frame_ray(&self, xs: f64, ys: f64) -> Ray {
        let w = self.frame_w as f64;
        let h = self.frame_h as f64;
        let x = self.dir * self.proj_dist
            + self.right * ((xs - w / 2.0) * self.wp / w)
            + self.up * ((h / 2.0 - ys) * self.hp / h);
        Ray::new(self.loc + x, x)
    }

    // The wider frame dimension stretches the projection plane by the
    // aspect ratio; the narrower one keeps proj_size.
    fn update_proj(&mut self) {
        self.wp = self.proj_size;
        self.hp = self.proj_size;
        let w = self.frame_w as f64;
        let h = self.frame_h as f64;
        if w > h {
            self.wp *= w / h;
        } else {
            self.hp *= h / w;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_matches_view_direction() {
        let mut cam = Camera::new();
        cam.resize(100, 100);
        let ray = cam.frame_ray(50.0, 50.0);
        assert!((ray.direction - cam.dir).length() < 1e-12);
        assert!((ray.origin - (cam.loc + cam.dir * cam.proj_dist)).length() < 1e-12);
    }

    #[test]
    fn test_basis_is_orthonormal_after_set_loc_at_up() {
        let mut cam = Camera::new();
        cam.set_loc_at_up(
            Vec3::new(4.0, 3.0, 8.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Y,
        );
        assert!(cam.dir.dot(cam.right).abs() < 1e-12);
        assert!(cam.dir.dot(cam.up).abs() < 1e-12);
        assert!(cam.right.dot(cam.up).abs() < 1e-12);
        assert!((cam.dir.length() - 1.0).abs() < 1e-12);
        assert!((cam.up.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wider_frame_scales_horizontal_extent() {
        let mut cam = Camera::new();
        cam.resize(200, 100);
        // Left edge of a 2:1 frame sits a full proj_size off center.
        let left = cam.frame_ray(0.0, 50.0);
        let dx = (left.origin - cam.loc).dot(cam.right);
        assert!((dx + cam.proj_size).abs() < 1e-12);

        cam.resize(100, 100);
        let left = cam.frame_ray(0.0, 50.0);
        let dx = (left.origin - cam.loc).dot(cam.right);
        assert!((dx + cam.proj_size / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_axis_points_up_in_pixel_space() {
        let mut cam = Camera::new();
        cam.resize(100, 100);
        // Smaller ys is higher on screen.
        let top = cam.frame_ray(50.0, 0.0);
        let bottom = cam.frame_ray(50.0, 100.0);
        assert!((top.origin - cam.loc).dot(cam.up) > 0.0);
        assert!((bottom.origin - cam.loc).dot(cam.up) < 0.0);
    }
}
