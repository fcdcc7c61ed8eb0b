//! Platform abstraction layer
//!
//! The 3D scene, scoreboard and minimap belong to the host page. The game
//! only talks to them through these sinks, handed in at construction.

use glam::Vec3;

use crate::camera::CameraPose;
use crate::minimap::MinimapFrame;
use crate::sim::{BallState, Score, Team};

/// Snapshot of what the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub camera: CameraPose,
    pub player_position: Vec3,
    pub player_yaw: f32,
    /// None until the ball model has loaded
    pub ball: Option<BallState>,
}

/// Draws the scene from the camera. Called once per frame; assumed to succeed.
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame);
}

/// Scoreboard display (mesh texture, DOM overlay, ...)
pub trait ScoreSink {
    fn team_scored(&mut self, team: Team, score: Score);
}

/// 2D minimap redrawn every frame
pub trait MinimapSink {
    fn draw(&mut self, frame: &MinimapFrame);
}

/// Host objects injected into the game.
///
/// The renderer is mandatory; the overlays are optional.
#[derive(Default)]
pub struct HostHandles {
    pub render: Option<Box<dyn RenderSink>>,
    pub score: Option<Box<dyn ScoreSink>>,
    pub minimap: Option<Box<dyn MinimapSink>>,
}

impl HostHandles {
    pub fn with_render(mut self, sink: impl RenderSink + 'static) -> Self {
        self.render = Some(Box::new(sink));
        self
    }

    pub fn with_score(mut self, sink: impl ScoreSink + 'static) -> Self {
        self.score = Some(Box::new(sink));
        self
    }

    pub fn with_minimap(mut self, sink: impl MinimapSink + 'static) -> Self {
        self.minimap = Some(Box::new(sink));
        self
    }
}
