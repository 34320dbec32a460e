// ---------------------------------------------------------------------------
// Orbit camera for the 3D scatter view
// ---------------------------------------------------------------------------

/// Orthographic orbit camera.  The scene is normalized into `[-1, 1]^3`
/// with z up; yaw spins the scene around the z axis, pitch tilts it toward
/// the viewer.  Dragging rotates, scrolling zooms.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    /// Rotation around the z (value) axis, radians.
    pub yaw: f32,
    /// Tilt toward the viewer, radians, kept shy of the poles.
    pub pitch: f32,
    pub zoom: f32,
}

const PITCH_LIMIT: f32 = 1.55;
const DRAG_SENSITIVITY: f32 = 0.01;
const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 10.0;

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera {
            yaw: -0.6,
            pitch: 0.5,
            zoom: 1.0,
        }
    }
}

impl OrbitCamera {
    /// Apply a drag delta in screen pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Project a normalized scene point to screen offsets from the
    /// viewport center (x right, y up) plus a depth used for draw order.
    pub fn project(&self, p: [f32; 3]) -> ([f32; 2], f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let xr = p[0] * cos_yaw - p[1] * sin_yaw;
        let yr = p[0] * sin_yaw + p[1] * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let screen_x = xr * self.zoom;
        let screen_y = (p[2] * cos_pitch - yr * sin_pitch) * self.zoom;
        let depth = yr * cos_pitch + p[2] * sin_pitch;

        ([screen_x, screen_y], depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(yaw: f32, pitch: f32) -> OrbitCamera {
        OrbitCamera {
            yaw,
            pitch,
            zoom: 1.0,
        }
    }

    #[test]
    fn level_camera_projects_x_and_z_unchanged() {
        let cam = camera(0.0, 0.0);
        let ([x, y], depth) = cam.project([0.3, -0.7, 0.9]);
        assert!((x - 0.3).abs() < 1e-6);
        assert!((y - 0.9).abs() < 1e-6);
        assert!((depth - -0.7).abs() < 1e-6);
    }

    #[test]
    fn quarter_yaw_swaps_the_ground_axes() {
        let cam = camera(std::f32::consts::FRAC_PI_2, 0.0);
        let ([x, _], depth) = cam.project([1.0, 0.0, 0.0]);
        assert!(x.abs() < 1e-6);
        assert!((depth - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pitch_stays_clamped_under_long_drags() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 10_000.0);
        assert!(cam.pitch <= PITCH_LIMIT);
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.zoom_by(2.0);
        }
        assert!(cam.zoom <= MAX_ZOOM);
        for _ in 0..100 {
            cam.zoom_by(0.5);
        }
        assert!(cam.zoom >= MIN_ZOOM);
    }

    #[test]
    fn zoom_scales_screen_coordinates() {
        let mut cam = camera(0.0, 0.0);
        let ([x1, _], _) = cam.project([0.5, 0.0, 0.0]);
        cam.zoom_by(2.0);
        let ([x2, _], _) = cam.project([0.5, 0.0, 0.0]);
        assert!((x2 - x1 * 2.0).abs() < 1e-6);
    }
}
