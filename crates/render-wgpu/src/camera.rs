use glam::{Mat4, Vec3};

/// Orbit camera circling a target point.
///
/// Yaw/pitch place the eye on a sphere around the target; distance is the
/// sphere radius, clamped to `[min_distance, max_distance]` when zooming.
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 45.0_f32.to_radians(),
            pitch: 25.0_f32.to_radians(),
            distance: 4.0,
            min_distance: 1.5,
            max_distance: 30.0,
            fov: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.001,
            zoom_sensitivity: 0.1,
        }
    }
}

impl OrbitCamera {
    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        ) * self.distance;
        self.target + offset
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalize()
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Pointer-drag orbit: rotate the eye around the target.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.orbit_sensitivity;
        self.pitch += dy * self.orbit_sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Scroll zoom: exponential dolly toward/away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (-scroll * self.zoom_sensitivity).exp())
            .clamp(self.min_distance, self.max_distance);
    }

    /// Secondary-drag pan: slide the target in the camera plane.
    ///
    /// Scaled by distance so a drag covers the same fraction of the view
    /// at any zoom level.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right();
        let up = right.cross(self.forward()).normalize();
        let scale = self.pan_sensitivity * self.distance;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Restore the default framing while keeping projection parameters.
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Self {
            aspect,
            ..Self::default()
        };
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_at_origin() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(cam.eye().length() > 0.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn orbit_moves_eye_not_target() {
        let mut cam = OrbitCamera::default();
        let eye_before = cam.eye();
        cam.orbit(50.0, 20.0);
        assert_ne!(cam.eye(), eye_before);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn pitch_clamped_short_of_poles() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 10_000.0);
        assert!(cam.pitch < 90.0_f32.to_radians());
        cam.orbit(0.0, -20_000.0);
        assert!(cam.pitch > -90.0_f32.to_radians());
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.zoom(10.0);
        }
        assert_eq!(cam.distance, cam.min_distance);
        for _ in 0..100 {
            cam.zoom(-10.0);
        }
        assert_eq!(cam.distance, cam.max_distance);
    }

    #[test]
    fn pan_moves_target() {
        let mut cam = OrbitCamera::default();
        cam.pan(100.0, 0.0);
        assert_ne!(cam.target, Vec3::ZERO);
        // Distance to target is preserved by panning.
        assert!((cam.eye().distance(cam.target) - cam.distance).abs() < 1e-4);
    }

    #[test]
    fn reset_restores_framing_keeps_aspect() {
        let mut cam = OrbitCamera::default();
        cam.aspect = 2.0;
        cam.orbit(300.0, 100.0);
        cam.zoom(5.0);
        cam.pan(40.0, 40.0);
        cam.reset();
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(cam.distance, OrbitCamera::default().distance);
        assert_eq!(cam.aspect, 2.0);
    }
}
