use std::time::Duration;

use bridgewalk_common::CameraView;
use glam::{Mat4, Vec2, Vec3};

/// Camera height above its target at zoom 0.
const BASE_HEIGHT: f32 = 15.0;

/// Third-person camera that trails a focus point from behind and above.
///
/// Camera motion is presentation only; it never feeds back into the
/// simulation except through ray casts the input layer makes from it.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    target: Vec3,
    position: Vec3,
    zoom: i32,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl FollowCamera {
    /// Camera looking at `(0, 0, 1)` from just behind `start`.
    pub fn new(start: Vec2, aspect: f32) -> Self {
        Self {
            target: Vec3::new(0.0, 0.0, 1.0),
            position: Vec3::new(start.x, start.y - 4.0, 4.0),
            zoom: 0,
            fov_degrees: 45.0,
            aspect,
            near: 0.125,
            far: 1024.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    /// Positive steps move the camera away.
    pub fn zoom_by(&mut self, steps: i32) {
        self.zoom = self.zoom.saturating_add(steps);
    }

    /// Distance above (and behind) the target: doubles every four steps.
    pub fn height(&self) -> f32 {
        BASE_HEIGHT * 2f32.powf(self.zoom as f32 / 4.0)
    }

    /// Ignored unless positive and finite, e.g. while a window is minimized.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Ease the target toward `focus` by the fraction of a second `dt`
    /// spans, then place the eye behind it at the zoom height.
    pub fn follow(&mut self, focus: Vec3, dt: Duration) {
        let progress = dt.as_secs_f32().clamp(0.0, 1.0);
        self.target += (focus - self.target) * progress;
        let h = self.height();
        self.position = self.target + Vec3::new(0.0, -h, h);
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position,
            target: self.target,
            up: Vec3::Y,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_behind_player_looking_at_centre() {
        let cam = FollowCamera::new(Vec2::new(2.0, 3.0), 1.5);
        assert_eq!(cam.target(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(cam.position(), Vec3::new(2.0, -1.0, 4.0));
        assert!(cam.view_projection().is_finite());
    }

    #[test]
    fn height_doubles_every_four_zoom_steps() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 1.0);
        assert_eq!(cam.height(), 15.0);
        cam.zoom_by(4);
        assert!((cam.height() - 30.0).abs() < 1e-4);
        cam.zoom_by(-8);
        assert!((cam.height() - 7.5).abs() < 1e-4);
    }

    #[test]
    fn follow_eases_by_elapsed_fraction() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 1.0);
        cam.follow(Vec3::new(10.0, 0.0, 1.0), Duration::from_millis(250));
        assert!((cam.target().x - 2.5).abs() < 1e-5);
        assert_eq!(cam.position(), cam.target() + Vec3::new(0.0, -15.0, 15.0));
    }

    #[test]
    fn long_frames_snap_without_overshoot() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 1.0);
        let focus = Vec3::new(-4.0, 8.0, 1.0);
        cam.follow(focus, Duration::from_secs(3));
        assert_eq!(cam.target(), focus);
    }

    #[test]
    fn zero_frame_still_applies_zoom() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 1.0);
        cam.zoom_by(4);
        cam.follow(Vec3::ZERO, Duration::ZERO);
        let h = cam.height();
        assert_eq!(cam.position(), cam.target() + Vec3::new(0.0, -h, h));
    }

    #[test]
    fn bad_aspect_is_ignored() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 1.5);
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 1.5);
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn view_matches_camera_vectors() {
        let cam = FollowCamera::new(Vec2::ZERO, 1.0);
        let view = cam.view();
        assert_eq!(view.position, cam.position());
        assert_eq!(view.target, cam.target());
        assert_eq!(view.up, Vec3::Y);
    }
}
