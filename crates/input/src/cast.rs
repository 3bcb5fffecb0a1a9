use bridgewalk_common::CameraView;
use glam::{Mat4, Vec2, Vec3};

/// Rays flatter than this against the ground plane are treated as parallel.
const MIN_RAY_Z: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CastError {
    #[error("camera view is degenerate (zero direction, direction along up, or singular transform)")]
    DegenerateView,
    #[error("ray is parallel to the ground plane")]
    RayParallelToGround,
    #[error("ray points above the horizon")]
    RayAboveHorizon,
    #[error("viewport has zero area")]
    EmptyViewport,
}

/// Convert a pixel coordinate (origin top-left, y down) into clip space.
pub fn pixel_to_clip(pixel: Vec2, viewport: Vec2) -> Result<Vec2, CastError> {
    if !(viewport.x > 0.0 && viewport.y > 0.0 && viewport.is_finite()) {
        return Err(CastError::EmptyViewport);
    }
    Ok(Vec2::new(
        -1.0 + pixel.x / viewport.x * 2.0,
        1.0 - pixel.y / viewport.y * 2.0,
    ))
}

/// World-space direction of the ray through `clip`, ignoring the camera's
/// position.
pub fn clip_ray(clip: Vec2, view: &CameraView, projection: Mat4) -> Result<Vec3, CastError> {
    let direction = view.direction();
    if direction.length_squared() == 0.0 || direction.cross(view.up).length_squared() == 0.0 {
        return Err(CastError::DegenerateView);
    }

    // Rotation only: the eye sits at the origin so the ray comes out as a
    // pure direction.
    let rotation = Mat4::look_at_rh(Vec3::ZERO, direction, view.up);
    let combined = projection * rotation;
    let det = combined.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(CastError::DegenerateView);
    }
    let inverse = combined.inverse();

    let unproject = |z: f32| {
        let p = inverse * clip.extend(z).extend(1.0);
        p.truncate() / p.w
    };
    let ray = (unproject(1.0) - unproject(-1.0)).normalize_or_zero();
    if ray == Vec3::ZERO || !ray.is_finite() {
        return Err(CastError::DegenerateView);
    }
    Ok(ray)
}

/// Intersect the ray through `clip` with the ground plane `z = 0`.
pub fn cast_to_ground(clip: Vec2, view: &CameraView, projection: Mat4) -> Result<Vec3, CastError> {
    let ray = clip_ray(clip, view, projection)?;
    if ray.z.abs() < MIN_RAY_Z {
        return Err(CastError::RayParallelToGround);
    }
    if ray.z > 0.0 {
        return Err(CastError::RayAboveHorizon);
    }

    let t = view.position.z / -ray.z;
    let hit = view.position + ray * t;
    tracing::trace!(x = hit.x, y = hit.y, "ground cast");
    Ok(Vec3::new(hit.x, hit.y, 0.0))
}
