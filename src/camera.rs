//! Camera follow policy
//!
//! The rig only remembers its mode and zoom distance; the pose is derived
//! fresh from player/ball state every frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::input::{Action, TickInput};
use crate::sim::state::{BallSlot, PlayerState};

/// How the camera tracks the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    /// Behind the player along its facing
    #[default]
    ThirdPersonFollow,
    /// Behind the player on the player→ball line, looking at the ball
    BallFacing,
    /// Fixed sideways offset, looking at the player
    SideFollow,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::ThirdPersonFollow => "Follow",
            CameraMode::BallFacing => "Ball",
            CameraMode::SideFollow => "Side",
        }
    }
}

/// Camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height at minimum zoom
    pub min_height: f32,
    /// Height at maximum zoom
    pub max_height: f32,
    /// Constant lift added on top of the interpolated height
    pub height_offset: f32,
    /// World-space X offset for side view
    pub side_offset: f32,
    /// Follow view looks at the ball (when loaded) instead of the player
    pub look_at_ball: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 3.0,
            max_distance: 20.0,
            min_height: 2.0,
            max_height: 8.0,
            height_offset: 0.5,
            side_offset: 12.0,
            look_at_ball: true,
        }
    }
}

/// Persistent camera state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::ThirdPersonFollow,
            distance: 8.0,
        }
    }
}

impl CameraRig {
    /// Adjust zoom distance, clamped to the configured range
    pub fn zoom(&mut self, delta: f32, config: &CameraConfig) {
        self.distance = (self.distance + delta).clamp(config.min_distance, config.max_distance);
    }

    /// Zoom progress in [0, 1] (0 = closest)
    pub fn zoom_progress(&self, config: &CameraConfig) -> f32 {
        let span = config.max_distance - config.min_distance;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.distance - config.min_distance) / span).clamp(0.0, 1.0)
    }

    /// Height above the player, rising as the camera zooms out
    pub fn height(&self, config: &CameraConfig) -> f32 {
        crate::lerp(config.min_height, config.max_height, self.zoom_progress(config))
            + config.height_offset
    }

    /// Apply mode-switch edges and wheel zoom from this tick's input
    pub fn apply_input(&mut self, input: &TickInput, config: &CameraConfig) {
        let requested = [
            (Action::CameraFollow, CameraMode::ThirdPersonFollow),
            (Action::CameraBallFacing, CameraMode::BallFacing),
            (Action::CameraSide, CameraMode::SideFollow),
        ]
        .into_iter()
        .find(|(action, _)| input.pressed(*action))
        .map(|(_, mode)| mode);

        if let Some(mode) = requested {
            if mode != self.mode {
                log::debug!("Camera mode: {}", mode.as_str());
                self.mode = mode;
            }
        }

        if input.zoom != 0.0 {
            self.zoom(input.zoom, config);
        }
    }
}

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Derive the camera pose for this frame
pub fn update_camera(
    rig: &CameraRig,
    config: &CameraConfig,
    player: &PlayerState,
    ball: &BallSlot,
) -> CameraPose {
    let height = rig.height(config);
    let ball_pos = ball.get().map(|b| b.position);

    match (rig.mode, ball_pos) {
        (CameraMode::BallFacing, Some(ball_pos)) => {
            let to_ball = Vec3::new(
                ball_pos.x - player.position.x,
                0.0,
                ball_pos.z - player.position.z,
            );
            let dir = to_ball.try_normalize().unwrap_or_else(|| player.forward());
            CameraPose {
                position: player.position - dir * rig.distance + Vec3::Y * height,
                target: ball_pos,
            }
        }
        (CameraMode::SideFollow, _) => CameraPose {
            position: player.position + Vec3::new(config.side_offset, height, 0.0),
            target: player.position,
        },
        // Ball-facing without a ball degrades to the follow view
        (CameraMode::ThirdPersonFollow, _) | (CameraMode::BallFacing, None) => {
            let offset = Vec3::new(
                player.yaw.sin() * rig.distance,
                height,
                player.yaw.cos() * rig.distance,
            );
            let target = match ball_pos {
                Some(ball_pos) if config.look_at_ball => ball_pos,
                _ => player.position,
            };
            CameraPose {
                position: player.position + offset,
                target,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BallState;
    use crate::sim::input::ActionSet;

    fn player() -> PlayerState {
        PlayerState::new(Vec3::new(0.0, 0.5, 0.0))
    }

    #[test]
    fn test_follow_sits_behind_player() {
        let config = CameraConfig::default();
        let rig = CameraRig::default();
        let pose = update_camera(&rig, &config, &player(), &BallSlot::Empty);

        // Facing -Z, so behind is +Z
        assert!(pose.position.x.abs() < 1e-5);
        assert!((pose.position.z - rig.distance).abs() < 1e-5);
        assert!((pose.position.y - (0.5 + rig.height(&config))).abs() < 1e-5);
        assert_eq!(pose.target, player().position);
    }

    #[test]
    fn test_follow_looks_at_ball_when_present() {
        let config = CameraConfig::default();
        let ball = BallSlot::Present(BallState::at(Vec3::new(3.0, 0.5, -4.0)));
        let pose = update_camera(&CameraRig::default(), &config, &player(), &ball);
        assert_eq!(pose.target, Vec3::new(3.0, 0.5, -4.0));

        let config = CameraConfig {
            look_at_ball: false,
            ..Default::default()
        };
        let pose = update_camera(&CameraRig::default(), &config, &player(), &ball);
        assert_eq!(pose.target, player().position);
    }

    #[test]
    fn test_ball_facing() {
        let config = CameraConfig::default();
        let rig = CameraRig {
            mode: CameraMode::BallFacing,
            distance: 10.0,
        };
        let ball = BallSlot::Present(BallState::at(Vec3::new(10.0, 0.5, 0.0)));
        let pose = update_camera(&rig, &config, &player(), &ball);

        // Ball is toward +X, camera is on the far side (-X)
        assert!((pose.position.x - (-10.0)).abs() < 1e-5);
        assert!(pose.position.z.abs() < 1e-5);
        assert_eq!(pose.target, Vec3::new(10.0, 0.5, 0.0));
    }

    #[test]
    fn test_ball_facing_without_ball_falls_back() {
        let config = CameraConfig::default();
        let rig = CameraRig {
            mode: CameraMode::BallFacing,
            distance: 8.0,
        };
        let follow = CameraRig::default();
        let a = update_camera(&rig, &config, &player(), &BallSlot::Empty);
        let b = update_camera(&follow, &config, &player(), &BallSlot::Empty);
        assert_eq!(a, b);
    }

    #[test]
    fn test_side_follow() {
        let config = CameraConfig::default();
        let rig = CameraRig {
            mode: CameraMode::SideFollow,
            distance: 8.0,
        };
        let pose = update_camera(&rig, &config, &player(), &BallSlot::Empty);
        assert_eq!(pose.position.x, config.side_offset);
        assert_eq!(pose.target, player().position);
    }

    #[test]
    fn test_zoom_clamps_and_raises_height() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::default();

        rig.zoom(-100.0, &config);
        assert_eq!(rig.distance, config.min_distance);
        assert_eq!(rig.height(&config), config.min_height + config.height_offset);

        rig.zoom(100.0, &config);
        assert_eq!(rig.distance, config.max_distance);
        assert_eq!(rig.height(&config), config.max_height + config.height_offset);
    }

    #[test]
    fn test_apply_input_switches_mode() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::default();
        let input = TickInput {
            pressed: [Action::CameraSide].into_iter().collect(),
            zoom: 2.0,
            ..Default::default()
        };
        rig.apply_input(&input, &config);
        assert_eq!(rig.mode, CameraMode::SideFollow);
        assert_eq!(rig.distance, 10.0);

        // Holding the key without a new edge changes nothing
        let held = TickInput {
            held: [Action::CameraFollow].into_iter().collect(),
            pressed: ActionSet::EMPTY,
            ..Default::default()
        };
        rig.apply_input(&held, &config);
        assert_eq!(rig.mode, CameraMode::SideFollow);
    }
}
