use glam::{Mat4, Vec2, Vec3};

use crate::config::*;
use crate::input::MoveFlags;

/// First-person camera body. Velocities are per tick, not per second.
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Horizontal components use the camera-relative convention: the camera moves by
    /// `-velocity.x` to the right and `-velocity.z` forward.
    pub velocity: Vec3,
    pub jump_velocity: f32,
    pub can_jump: bool,
}

impl Player {
    pub fn new(spawn_position: Vec3) -> Self {
        Self {
            position: Vec3::new(spawn_position.x, EYE_HEIGHT, spawn_position.z),
            yaw: 0.0,
            pitch: 0.0,
            velocity: Vec3::ZERO,
            jump_velocity: 0.0,
            can_jump: false,
        }
    }

    /// Point the camera along the horizontal direction `dir`.
    pub fn face(&mut self, dir: Vec3) {
        self.yaw = dir.x.atan2(-dir.z);
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.jump_velocity = JUMP_FORCE;
        self.can_jump = false;
        true
    }

    /// One movement tick: steer from held keys, integrate, clamp to the ground, apply
    /// friction.
    pub fn update(&mut self, flags: MoveFlags) {
        let direction = Vec2::new(
            (flags.right as i32 - flags.left as i32) as f32,
            (flags.forward as i32 - flags.backward as i32) as f32,
        )
        .normalize_or_zero();

        if flags.forward || flags.backward {
            self.velocity.z = -direction.y * MOVE_SPEED;
        }
        if flags.left || flags.right {
            self.velocity.x = -direction.x * MOVE_SPEED;
        }

        self.velocity.y -= GRAVITY;
        self.jump_velocity -= GRAVITY;

        let (forward, right) = self.horizontal_axes();
        self.position += right * -self.velocity.x + forward * -self.velocity.z;
        self.position.y += self.jump_velocity;

        if self.position.y < EYE_HEIGHT {
            self.position.y = EYE_HEIGHT;
            self.jump_velocity = 0.0;
            self.velocity.y = 0.0;
            self.can_jump = true;
        }

        self.velocity.x *= FRICTION;
        self.velocity.z *= FRICTION;
    }

    /// Drop all momentum, e.g. when a problem appears.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    fn horizontal_axes(&self) -> (Vec3, Vec3) {
        let (sin, cos) = (self.yaw.sin(), self.yaw.cos());
        (Vec3::new(sin, 0.0, -cos), Vec3::new(cos, 0.0, sin))
    }

    pub fn look_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look_direction(), Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> MoveFlags {
        MoveFlags {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn spawns_at_eye_height() {
        let player = Player::new(Vec3::new(-15.0, 0.0, 2.0));
        assert_eq!(player.position, Vec3::new(-15.0, EYE_HEIGHT, 2.0));
    }

    #[test]
    fn walks_along_facing_direction() {
        let mut player = Player::new(Vec3::ZERO);
        player.face(Vec3::X);
        player.update(forward());
        assert!((player.position.x - MOVE_SPEED).abs() < 1e-6);
        assert!(player.position.z.abs() < 1e-6);
    }

    #[test]
    fn friction_lets_player_drift_to_a_stop() {
        let mut player = Player::new(Vec3::ZERO);
        player.update(forward());
        let after_press = player.position;
        player.update(MoveFlags::default());
        let drift = player.position.distance(after_press);
        assert!((drift - MOVE_SPEED * FRICTION).abs() < 1e-6);

        for _ in 0..200 {
            player.update(MoveFlags::default());
        }
        assert!(player.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut player = Player::new(Vec3::ZERO);
        player.update(MoveFlags {
            forward: true,
            right: true,
            ..Default::default()
        });
        let step = Vec2::new(player.position.x, player.position.z).length();
        assert!((step - MOVE_SPEED).abs() < 1e-6);
    }

    #[test]
    fn jump_needs_ground_contact() {
        let mut player = Player::new(Vec3::ZERO);
        assert!(!player.jump());

        player.update(MoveFlags::default());
        assert!(player.can_jump);
        assert!(player.jump());
        assert!(!player.jump());

        player.update(MoveFlags::default());
        assert!(player.position.y > EYE_HEIGHT);

        for _ in 0..500 {
            player.update(MoveFlags::default());
        }
        assert_eq!(player.position.y, EYE_HEIGHT);
        assert!(player.can_jump);
    }

    #[test]
    fn face_matches_look_direction() {
        let mut player = Player::new(Vec3::ZERO);
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        player.face(dir);
        assert!(player.look_direction().distance(dir) < 1e-5);
    }

    #[test]
    fn view_matrix_puts_look_target_in_front() {
        let mut player = Player::new(Vec3::new(3.0, 0.0, -4.0));
        player.face(Vec3::X);
        let ahead = player.position + Vec3::X * 5.0;
        let view_space = player.view_matrix().transform_point3(ahead);
        assert!(view_space.z < 0.0);
        assert!(view_space.x.abs() < 1e-5 && view_space.y.abs() < 1e-5);
    }
}
