//! Row-claiming render scheduler.
//!
//! A fixed pool of worker threads pulls rows off a shared counter and
//! traces one primary ray per pixel. Every pixel is a pure function of
//! the scene and camera, so the output is identical for any worker
//! count. Cancellation is cooperative: workers poll a stop flag at
//! pixel granularity.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glint_core::{pack_color, FrameBuffer};
use glint_math::Camera;

use crate::scene::Scene;
use crate::shade::trace;

/// Shared state of one render: the row claim counter and the lifecycle
/// flags workers and observers poll.
///
/// A control is single use; start each render with a fresh one.
#[derive(Debug, Default)]
pub struct RenderControl {
    next_row: AtomicUsize,
    stop: AtomicBool,
    active: AtomicBool,
    finished: AtomicBool,
}

impl RenderControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the workers to stop after the pixel they are on. Requesting
    /// a stop before the render starts cancels it outright.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// True while workers are claiming rows.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// True once every worker has been joined.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

/// Summary of one finished or cancelled render.
#[derive(Debug, Clone)]
pub struct RenderStats {
    pub width: u32,
    pub height: u32,
    pub workers: usize,
    /// Rows dispatched to workers before the render ended.
    pub rows: usize,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// Default worker count: every core but one, at least one.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Render the scene through the camera into the frame buffer, blocking
/// until every row is done.
pub fn render(scene: &Scene, camera: &Camera, frame: &FrameBuffer) -> RenderStats {
    let control = RenderControl::new();
    render_with_workers(scene, camera, frame, default_workers(), &control)
}

/// Render with an explicit worker count and an external control.
///
/// Returns only after every worker has been joined; the control's
/// finished flag goes up strictly after that.
pub fn render_with_workers(
    scene: &Scene,
    camera: &Camera,
    frame: &FrameBuffer,
    workers: usize,
    control: &RenderControl,
) -> RenderStats {
    let workers = workers.max(1);
    let (width, height) = frame.size();
    let started = Instant::now();

    log::info!("rendering {}x{} with {} workers", width, height, workers);
    control.active.store(true, Ordering::Relaxed);

    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| worker_loop(scene, camera, frame, control, width, height));
        }
    });

    control.active.store(false, Ordering::Relaxed);
    control.finished.store(true, Ordering::Relaxed);

    let stats = RenderStats {
        width,
        height,
        workers,
        rows: control
            .next_row
            .load(Ordering::Relaxed)
            .min(height as usize),
        elapsed: started.elapsed(),
        cancelled: control.stop_requested(),
    };
    log::info!(
        "render {} after {:.3}s",
        if stats.cancelled { "cancelled" } else { "finished" },
        stats.elapsed.as_secs_f64()
    );
    stats
}

fn worker_loop(
    scene: &Scene,
    camera: &Camera,
    frame: &FrameBuffer,
    control: &RenderControl,
    width: u32,
    height: u32,
) {
    loop {
        let y = control.next_row.fetch_add(1, Ordering::Relaxed);
        if y >= height as usize || control.stop_requested() {
            return;
        }
        for x in 0..width {
            if control.stop_requested() {
                return;
            }
            let ray = camera.frame_ray(x as f64 + 0.5, y as f64 + 0.5);
            let color = trace(scene, &ray, &scene.air, 1.0, 0);
            frame.put_pixel(x as i32, y as i32, pack_color(color));
        }
    }
}

/// A render running on a background thread.
///
/// Dropping the session requests a stop and joins the thread, so an
/// abandoned render never outlives its scene or frame buffer.
pub struct RenderSession {
    control: Arc<RenderControl>,
    handle: Option<thread::JoinHandle<RenderStats>>,
}

impl RenderSession {
    /// Start rendering on a background thread.
    pub fn start(
        scene: Arc<Scene>,
        camera: Camera,
        frame: Arc<FrameBuffer>,
        workers: usize,
    ) -> Self {
        let control = Arc::new(RenderControl::new());
        let thread_control = Arc::clone(&control);
        let handle = thread::spawn(move || {
            render_with_workers(&scene, &camera, &frame, workers, &thread_control)
        });
        Self {
            control,
            handle: Some(handle),
        }
    }

    pub fn request_stop(&self) {
        self.control.request_stop();
    }

    pub fn is_active(&self) -> bool {
        self.control.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.control.is_finished()
    }

    /// Wait for the render to end and return its stats.
    pub fn join(mut self) -> Option<RenderStats> {
        self.handle.take().and_then(|handle| handle.join().ok())
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.control.request_stop();
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::PointLight;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use glint_core::Surface;
    use glint_math::Vec3;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Box::new(
            Plane::new(
                Vec3::new(0.0, -2.0, 0.0),
                Vec3::Y,
                Surface::new(Vec3::splat(0.1), Vec3::splat(0.7), Vec3::ZERO, 47.0),
            )
            .checkerboard(),
        ));
        scene.add_shape(Box::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Surface::new(Vec3::splat(0.1), Vec3::ONE, Vec3::ZERO, 47.0),
        )));
        scene.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::ONE,
            10.0,
        )));
        scene
    }

    #[test]
    fn test_worker_count_does_not_change_pixels() {
        let scene = sample_scene();
        let mut camera = Camera::new();
        camera.resize(16, 16);

        let solo = FrameBuffer::new(16, 16);
        let pooled = FrameBuffer::new(16, 16);
        render_with_workers(&scene, &camera, &solo, 1, &RenderControl::new());
        render_with_workers(&scene, &camera, &pooled, 4, &RenderControl::new());

        assert_eq!(solo.snapshot(), pooled.snapshot());
    }

    #[test]
    fn test_prestopped_render_writes_nothing() {
        let scene = sample_scene();
        let mut camera = Camera::new();
        camera.resize(8, 8);

        let frame = FrameBuffer::new(8, 8);
        frame.fill(0x00AB_CDEF);

        let control = RenderControl::new();
        control.request_stop();
        let stats = render_with_workers(&scene, &camera, &frame, 2, &control);

        assert!(stats.cancelled);
        assert!(control.is_finished());
        assert!(!control.is_active());
        let (_, _, pixels) = frame.snapshot();
        assert!(pixels.iter().all(|&p| p == 0x00AB_CDEF));
    }

    #[test]
    fn test_unit_sphere_silhouette() {
        let mut scene = Scene::new();
        scene.add_shape(Box::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Surface::new(Vec3::splat(0.1), Vec3::ONE, Vec3::ZERO, 47.0),
        )));
        scene.add_light(Box::new(PointLight::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::ONE,
            10.0,
        )));

        // Stock camera: at (0, 0, 5) looking down -Z through a 0.1
        // projection plane at distance 0.1.
        let mut camera = Camera::new();
        camera.resize(10, 10);

        let frame = FrameBuffer::new(10, 10);
        render_with_workers(&scene, &camera, &frame, 3, &RenderControl::new());

        let background = pack_color(scene.background);
        for y in 0..10u32 {
            for x in 0..10u32 {
                // Perpendicular distance from the sphere center to the
                // pixel ray, from the frustum parameters: the ray runs
                // from the eye through (or, ou, -0.1) in camera space.
                let or = (x as f64 + 0.5 - 5.0) * 0.1 / 10.0;
                let ou = (5.0 - (y as f64 + 0.5)) * 0.1 / 10.0;
                let offset2 = or * or + ou * ou;
                let dist2 = 25.0 * offset2 / (offset2 + 0.01);
                let expected_hit = dist2 <= 1.0;

                let shaded = frame.get_pixel(x as i32, y as i32) != background;
                assert_eq!(shaded, expected_hit, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_session_runs_to_completion() {
        let scene = Arc::new(sample_scene());
        let mut camera = Camera::new();
        camera.resize(8, 8);
        let frame = Arc::new(FrameBuffer::new(8, 8));

        let session = RenderSession::start(scene, camera, Arc::clone(&frame), 2);
        let stats = session.join().unwrap();

        assert!(!stats.cancelled);
        assert_eq!((stats.width, stats.height), (8, 8));
        assert_eq!(stats.rows, 8);

        // Every pixel was written; the corners see the background.
        let background = pack_color(Scene::new().background);
        assert_eq!(frame.get_pixel(0, 0), background);
    }

    #[test]
    fn test_stop_bounds_remaining_work() {
        // Never produced by pack_color, whose high byte is always zero.
        const SENTINEL: u32 = 0xFF00_0000;

        let scene = Arc::new(sample_scene());
        let mut camera = Camera::new();
        camera.resize(512, 512);
        let frame = Arc::new(FrameBuffer::new(512, 512));
        frame.fill(SENTINEL);

        let session = RenderSession::start(scene, camera, Arc::clone(&frame), 2);
        session.request_stop();
        let stats = session.join().unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.workers, 2);

        // Workers poll the stop flag per pixel, so the render cannot run
        // to completion and every written pixel sits in a row that was
        // dispatched before the workers wound down.
        assert!(stats.rows < 512);
        let (_, _, pixels) = frame.snapshot();
        let written = pixels.iter().filter(|&&p| p != SENTINEL).count();
        assert!(written <= stats.rows * 512);
    }

    #[test]
    fn test_default_workers_at_least_one() {
        assert!(default_workers() >= 1);
    }
}
