//! Player locomotion: rotation, translation, jumping under gravity
//!
//! Cannot fail; unknown or conflicting input is simply combined or ignored.

use super::config::PhysicsConfig;
use super::input::{Action, TickInput};
use super::state::{AirState, PlayerState};

/// Advance the player by `dt` seconds
pub fn update_player(player: &mut PlayerState, input: &TickInput, config: &PhysicsConfig, dt: f32) {
    player.is_running = input.held(Action::Sprint);

    // Rotation (both keys held cancel out)
    if input.held(Action::RotateLeft) {
        player.yaw += config.rotation_speed * dt;
    }
    if input.held(Action::RotateRight) {
        player.yaw -= config.rotation_speed * dt;
    }
    player.yaw = crate::normalize_angle(player.yaw + input.drag_yaw);

    // Translation along facing
    let step = player.forward() * config.move_speed(player.is_running) * dt;
    if input.held(Action::MoveForward) {
        player.position += step;
    }
    if input.held(Action::MoveBackward) {
        player.position -= step;
    }

    // Jump on key-down edge only; ignored mid-air
    if input.pressed(Action::Jump) && player.air == AirState::Grounded {
        player.air = AirState::Airborne;
        player.vertical_velocity = config.jump_force;
    }

    if player.air == AirState::Airborne {
        player.vertical_velocity -= config.gravity * dt;
        player.position.y += player.vertical_velocity * dt;

        if player.position.y <= config.ground_level {
            player.position.y = config.ground_level;
            player.air = AirState::Grounded;
            player.vertical_velocity = 0.0;
        }
    }

    clamp_player(player, config);
}

/// Keep the player on the extended field and never below ground level
pub fn clamp_player(player: &mut PlayerState, config: &PhysicsConfig) {
    let max_x = config.player_max_x();
    let max_z = config.player_max_z();
    player.position.x = player.position.x.clamp(-max_x, max_x);
    player.position.z = player.position.z.clamp(-max_z, max_z);
    if player.position.y < config.ground_level {
        player.position.y = config.ground_level;
    }
}
