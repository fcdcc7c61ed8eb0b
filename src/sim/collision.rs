//! Player/ball contact: overlap correction and kick impulse
//!
//! The player body is treated as a sphere of `body_radius` around its
//! position. Contact pushes the two apart to exactly the touching distance,
//! then the kick policy decides the ball's new velocity.

use glam::Vec3;

use super::config::{KickPolicy, PhysicsConfig, SeparationPolicy};
use super::input::{Action, TickInput};
use super::player::clamp_player;
use super::state::{BallState, PlayerState};

/// Result of a contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the bodies overlap
    pub hit: bool,
    /// Unit vector from player to ball
    pub normal: Vec3,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether the ball overlaps the player body.
///
/// Coincident centers fall back to the player's facing so the ball is
/// always pushed somewhere.
pub fn player_ball_contact(
    player: &PlayerState,
    ball_pos: Vec3,
    config: &PhysicsConfig,
) -> CollisionResult {
    let to_ball = ball_pos - player.position;
    let distance = to_ball.length();
    let collision_distance = config.collision_distance();

    if distance >= collision_distance {
        return CollisionResult::miss();
    }

    let normal = if distance > f32::EPSILON {
        to_ball / distance
    } else {
        player.forward()
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: collision_distance - distance,
    }
}

/// Player velocity implied by the held movement keys.
///
/// The kick reads intent, not last frame's displacement.
pub fn intended_velocity(player: &PlayerState, input: &TickInput, config: &PhysicsConfig) -> Vec3 {
    let step = player.forward() * config.move_speed(player.is_running);
    let mut velocity = Vec3::ZERO;
    if input.held(Action::MoveForward) {
        velocity += step;
    }
    if input.held(Action::MoveBackward) {
        velocity -= step;
    }
    velocity
}

/// Resolve a player/ball overlap. Returns the kick strength if they touched.
pub fn resolve_player_ball(
    player: &mut PlayerState,
    ball: &mut BallState,
    input: &TickInput,
    config: &PhysicsConfig,
) -> Option<f32> {
    let contact = player_ball_contact(player, ball.position, config);
    if !contact.hit {
        return None;
    }

    if config.separation_policy == SeparationPolicy::Split {
        player.position -= contact.normal * (contact.penetration * 0.5);
        clamp_player(player, config);
    }
    ball.position = separated_position(player, contact.normal, config);

    let player_velocity = intended_velocity(player, input, config);
    let strength = match config.kick_policy {
        KickPolicy::Replace => {
            let strength =
                config.kick_force * (1.0 + player_velocity.length() / config.move_speed);
            let direction = contact
                .normal
                .try_normalize()
                .unwrap_or_else(|| player.forward());
            ball.velocity = direction * strength;
            ball.velocity.y = config.kick_lift;
            strength
        }
        KickPolicy::Additive => {
            let impulse = player_velocity * config.push_strength;
            ball.velocity += impulse;
            impulse.length()
        }
    };

    Some(strength)
}

/// Step the player back off a ball that cannot move (pinned against a wall).
///
/// Keeps the player's height and restores the touching distance on the
/// ground plane.
pub fn back_off_player(player: &mut PlayerState, ball_pos: Vec3, config: &PhysicsConfig) {
    let collision_distance = config.collision_distance();
    if player.position.distance(ball_pos) >= collision_distance {
        return;
    }

    let dy = player.position.y - ball_pos.y;
    let reach = (collision_distance * collision_distance - dy * dy).max(0.0).sqrt();
    let away = horizontal(player.position - ball_pos).unwrap_or_else(|| -player.forward());
    player.position.x = ball_pos.x + away.x * reach;
    player.position.z = ball_pos.z + away.z * reach;
    clamp_player(player, config);
}

/// Ball center exactly `collision_distance` from the player along `normal`,
/// kept on or above the ground.
fn separated_position(player: &PlayerState, normal: Vec3, config: &PhysicsConfig) -> Vec3 {
    let collision_distance = config.collision_distance();
    let target = player.position + normal * collision_distance;
    if target.y >= config.ball_radius {
        return target;
    }

    // Pushed into the ground (player landing on the ball): sit the ball on
    // the ground and slide it out sideways instead.
    let dy = config.ball_radius - player.position.y;
    let reach = (collision_distance * collision_distance - dy * dy).max(0.0).sqrt();
    let side = horizontal(normal).unwrap_or_else(|| player.forward());
    Vec3::new(
        player.position.x + side.x * reach,
        config.ball_radius,
        player.position.z + side.z * reach,
    )
}

/// Unit projection onto the ground plane, if it has any length
fn horizontal(v: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if flat.length_squared() > f32::EPSILON {
        Some(flat.normalize())
    } else {
        None
    }
}
