//! Minimap projection
//!
//! Maps the regulation pitch onto a small canvas, north (+Z) at the bottom.
//! Drawing itself is done by the host.

use glam::{Vec2, Vec3};

use crate::sim::{GameState, PhysicsConfig};

/// Canvas size in CSS pixels
pub const MINIMAP_WIDTH: f32 = 176.0;
pub const MINIMAP_HEIGHT: f32 = 120.0;

/// Player marker color (blue kit)
pub const PLAYER_COLOR: &str = "#0000ff";
pub const BALL_COLOR: &str = "#ff0000";

/// World (x, z) to canvas pixels for a pitch of the configured size
pub fn project(world: Vec3, config: &PhysicsConfig) -> Vec2 {
    Vec2::new(
        world.x / config.field_width * MINIMAP_WIDTH + MINIMAP_WIDTH / 2.0,
        world.z / config.field_length * MINIMAP_HEIGHT + MINIMAP_HEIGHT / 2.0,
    )
}

/// Everything the minimap needs for one redraw
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapFrame {
    pub player: Vec2,
    /// Marker rotation, radians
    pub player_yaw: f32,
    pub player_color: &'static str,
    /// Absent until the ball has loaded
    pub ball: Option<Vec2>,
}

impl MinimapFrame {
    pub fn from_state(state: &GameState, config: &PhysicsConfig) -> Self {
        Self {
            player: project(state.player.position, config),
            player_yaw: state.player.yaw,
            player_color: PLAYER_COLOR,
            ball: state.ball.get().map(|b| project(b.position, config)),
        }
    }
}
