use bridgewalk_mesh::Mesh;
use glam::{DVec2, Vec2};

/// The single simulated entity.
///
/// `position` and `prev_position` are written only by [`Player::tick`] and
/// [`Player::teleport`]; `target` only by input.
#[derive(Debug, Clone)]
pub struct Player {
    position: DVec2,
    prev_position: DVec2,
    target: DVec2,
    /// Facing, radians from +x, taken from the last movement direction.
    angle: f64,
    width: f64,
    height: f64,
    sprite_scale: Vec2,
    model: Mesh,
}

impl Player {
    /// A player standing still at `start`, with its target on itself.
    pub fn new(start: DVec2, model: Mesh, sprite_scale: Vec2, width: f64, height: f64) -> Self {
        Self {
            position: start,
            prev_position: start,
            target: start,
            angle: 0.0,
            width,
            height,
            sprite_scale,
            model,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Position at the previous tick, the interpolation start point.
    pub fn prev_position(&self) -> DVec2 {
        self.prev_position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sprite_scale(&self) -> Vec2 {
        self.sprite_scale
    }

    pub fn model(&self) -> &Mesh {
        &self.model
    }

    pub fn set_target_position(&mut self, target: DVec2) {
        self.target = target;
    }

    pub fn target_position(&self) -> DVec2 {
        self.target
    }

    /// True while the player is not exactly on its target.
    ///
    /// Exact comparison is sound because [`Player::tick`] snaps onto the
    /// target once it is within one step.
    pub fn has_target_position(&self) -> bool {
        self.position.x != self.target.x || self.position.y != self.target.y
    }

    /// Jump to `position` with no interpolation trail and no pending move.
    pub fn teleport(&mut self, position: DVec2) {
        self.position = position;
        self.prev_position = position;
        self.target = position;
    }

    /// Advance one simulation tick, moving at most `step` toward the target.
    pub fn tick(&mut self, step: f64) {
        self.prev_position = self.position;

        if !self.has_target_position() {
            return;
        }

        let diff = self.target - self.position;
        let distance = diff.length();

        if distance > 0.0 {
            let direction = diff / distance;
            self.angle = direction.y.atan2(direction.x);
        }

        if distance <= step {
            // Covers a zero-length difference too, so no division by zero.
            self.position = self.target;
        } else {
            self.position += diff / distance * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgewalk_mesh::build_quads;

    const STEP: f64 = 0.2;

    fn player_at(x: f64, y: f64) -> Player {
        let model = build_quads(&[], 1.0).unwrap();
        Player::new(DVec2::new(x, y), model, Vec2::splat(0.5), 1.0, 2.0)
    }

    #[test]
    fn new_player_has_no_target() {
        let p = player_at(3.0, -1.0);
        assert!(!p.has_target_position());
        assert_eq!(p.target_position(), DVec2::new(3.0, -1.0));
        assert_eq!(p.prev_position(), p.position());
    }

    #[test]
    fn tick_moves_one_step_toward_target() {
        let mut p = player_at(0.0, 0.0);
        p.set_target_position(DVec2::new(10.0, 0.0));
        p.tick(STEP);
        assert_eq!(p.position(), DVec2::new(STEP, 0.0));
        assert_eq!(p.prev_position(), DVec2::ZERO);
        assert_eq!(p.angle(), 0.0);
        assert!(p.has_target_position());
    }

    #[test]
    fn tick_sets_facing_from_direction() {
        let mut p = player_at(0.0, 0.0);
        p.set_target_position(DVec2::new(0.0, -5.0));
        p.tick(STEP);
        assert!((p.angle() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn converges_within_ceil_distance_over_step() {
        // A power-of-two step along an axis accumulates with no rounding.
        let step = 0.25;
        let targets = [
            DVec2::new(3.0, 0.0),
            DVec2::new(0.0, -7.25),
            DVec2::new(-12.5, 0.0),
            DVec2::new(0.05, 0.05),
        ];
        for target in targets {
            let mut p = player_at(0.0, 0.0);
            p.set_target_position(target);
            let bound = (target.length() / step).ceil() as usize;
            for _ in 0..bound {
                p.tick(step);
            }
            assert_eq!(p.position(), target, "target {target:?} after {bound} ticks");
            assert!(!p.has_target_position());

            // Idempotent once reached.
            for _ in 0..10 {
                p.tick(step);
                assert_eq!(p.position(), target);
                assert_eq!(p.prev_position(), target);
            }
        }
    }

    #[test]
    fn never_moves_more_than_one_step() {
        let mut p = player_at(0.0, 0.0);
        let target = DVec2::new(STEP + 5e-10, 0.0);
        p.set_target_position(target);
        p.tick(STEP);
        let moved = p.position().distance(p.prev_position());
        assert!(moved <= STEP, "moved {moved}");
        assert!(p.has_target_position());
        p.tick(STEP);
        assert_eq!(p.position(), target);
    }

    #[test]
    fn does_not_arrive_early() {
        let mut p = player_at(0.0, 0.0);
        p.set_target_position(DVec2::new(0.0, 1.0));
        for _ in 0..4 {
            p.tick(STEP);
            assert!(p.has_target_position());
        }
        p.tick(STEP);
        assert!(!p.has_target_position());
    }

    #[test]
    fn previous_position_updates_without_target() {
        let mut p = player_at(1.0, 1.0);
        p.set_target_position(DVec2::new(1.0, 2.0));
        p.tick(STEP);
        let after_move = p.position();
        p.set_target_position(after_move);
        p.tick(STEP);
        assert_eq!(p.prev_position(), after_move);
        assert_eq!(p.position(), after_move);
    }

    #[test]
    fn teleport_clears_trail_and_pending_move() {
        let mut p = player_at(0.0, 0.0);
        p.set_target_position(DVec2::new(5.0, 5.0));
        p.tick(STEP);
        p.teleport(DVec2::new(-4.0, 2.0));
        assert_eq!(p.position(), DVec2::new(-4.0, 2.0));
        assert_eq!(p.prev_position(), DVec2::new(-4.0, 2.0));
        assert!(!p.has_target_position());
    }

    #[test]
    fn subnormal_gap_lands_on_target() {
        let mut p = player_at(0.0, 0.0);
        let target = DVec2::new(f64::MIN_POSITIVE / 4.0, 0.0);
        p.set_target_position(target);
        assert!(p.has_target_position());
        p.tick(STEP);
        assert_eq!(p.position(), target);
        assert!(p.position().is_finite());
    }
}
