//! Vibes FC - a one-player soccer kick-about for the browser
//!
//! Core modules:
//! - `sim`: Per-tick physics (player locomotion, ball dynamics, kicks, goals)
//! - `camera`: Camera follow policy derived from player/ball state
//! - `minimap`: Top-down projection for the minimap overlay
//! - `platform`: Sink traits the host page implements (render, score, minimap)
//! - `game`: Frame driver wiring the core to injected host sinks
//! - `settings`: Data-driven tuning, persisted in LocalStorage

pub mod camera;
pub mod error;
pub mod game;
pub mod minimap;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
///
/// These are the defaults behind `PhysicsConfig`/`CameraConfig`; the
/// simulation itself only reads the config.
pub mod consts {
    /// Regulation pitch (meters), centered at the origin. X = width, Z = length.
    pub const FIELD_WIDTH: f32 = 75.0;
    pub const FIELD_LENGTH: f32 = 110.0;
    pub const FIELD_WIDTH_HALF: f32 = FIELD_WIDTH / 2.0;
    pub const FIELD_LENGTH_HALF: f32 = FIELD_LENGTH / 2.0;
    /// Out-of-bounds strip around the pitch the player may run on
    pub const FIELD_MARGIN: f32 = 5.0;
    pub const FIELD_EXTENDED_WIDTH: f32 = FIELD_WIDTH + 2.0 * FIELD_MARGIN;
    pub const FIELD_EXTENDED_LENGTH: f32 = FIELD_LENGTH + 2.0 * FIELD_MARGIN;

    /// Goal mouth
    pub const GOAL_WIDTH: f32 = 7.32;
    pub const GOAL_HEIGHT: f32 = 2.44;

    /// Player defaults
    pub const PLAYER_BODY_RADIUS: f32 = 0.4;
    pub const PLAYER_GROUND_LEVEL: f32 = 0.5;
    pub const PLAYER_MOVE_SPEED: f32 = 16.0;
    pub const PLAYER_SPRINT_MULTIPLIER: f32 = 1.5;
    pub const PLAYER_ROTATION_SPEED: f32 = 2.0; // radians per second
    pub const PLAYER_JUMP_FORCE: f32 = 8.0;
    pub const GRAVITY: f32 = 20.0;
    /// Spawn point on the south half, facing the ball at the center spot
    pub const PLAYER_SPAWN_Z: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.5;
    /// Per-tick velocity retention while rolling
    pub const BALL_FRICTION: f32 = 0.99;
    pub const BALL_BOUNCE: f32 = 0.8;
    pub const BALL_KICK_FORCE: f32 = 10.0;
    /// Fixed upward velocity on a kick (controlled lob)
    pub const BALL_KICK_LIFT: f32 = 2.0;
    /// Momentum multiplier for the additive kick policy
    pub const BALL_PUSH_STRENGTH: f32 = 2.0;
    /// Vertical bounces slower than this come to rest
    pub const BALL_REST_SPEED: f32 = 0.5;
    /// Drop height of the ball after a goal
    pub const BALL_RESTART_HEIGHT: f32 = 5.0;

    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal display refresh step, used for the first frame
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Horizontal unit vector the player faces for a given yaw.
///
/// Yaw 0 faces -Z; positive yaw turns toward -X.
#[inline]
pub fn forward_dir(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_forward_dir() {
        let f = forward_dir(0.0);
        assert!((f - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        let f = forward_dir(FRAC_PI_2);
        assert!((f - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) - (-FRAC_PI_2)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }
}
