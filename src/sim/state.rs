//! Game state and core simulation types
//!
//! One player, one (possibly not yet loaded) ball, a score, and the camera
//! rig. Everything resets on page reload.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::PhysicsConfig;
use crate::camera::CameraRig;

/// Vertical motion state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AirState {
    #[default]
    Grounded,
    Airborne,
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Body center; `y` rests at the configured ground level
    pub position: Vec3,
    /// Rotation about +Y, radians. 0 faces -Z.
    pub yaw: f32,
    /// Only meaningful while airborne (m/s, positive is up)
    pub vertical_velocity: f32,
    pub air: AirState,
    /// Sprint held this tick
    pub is_running: bool,
}

impl PlayerState {
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            yaw: 0.0,
            vertical_velocity: 0.0,
            air: AirState::Grounded,
            is_running: false,
        }
    }

    pub fn grounded(&self) -> bool {
        self.air == AirState::Grounded
    }

    /// Forward unit vector on the ground plane
    pub fn forward(&self) -> Vec3 {
        crate::forward_dir(self.yaw)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated rolling rotation (radians per axis), visual only
    pub spin: Vec3,
}

impl BallState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    /// Put the ball back at kick-off with no motion
    pub fn reset(&mut self, position: Vec3) {
        *self = Self::at(position);
    }
}

/// The ball only exists once the host has finished loading its model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum BallSlot {
    #[default]
    Empty,
    Present(BallState),
}

impl BallSlot {
    pub fn get(&self) -> Option<&BallState> {
        match self {
            BallSlot::Empty => None,
            BallSlot::Present(ball) => Some(ball),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, BallSlot::Present(_))
    }
}

/// Teams. Red defends the north goal (+Z), Blue the south goal (-Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Team credited when the ball crosses the end line on the side of `z`
    pub fn scoring_at(z: f32) -> Self {
        if z > 0.0 { Team::Blue } else { Team::Red }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
        }
    }
}

/// Goal counters; only ever incremented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub red: u32,
    pub blue: u32,
}

impl Score {
    pub fn increment(&mut self, team: Team) -> u32 {
        let counter = match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        };
        *counter += 1;
        *counter
    }

    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }
}

/// Things the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball crossed an end line inside the goal mouth
    GoalScored { team: Team, score: Score },
    /// Player touched the ball
    BallKicked { strength: f32 },
    /// Ball model arrived and physics started
    BallLoaded,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    pub ball: BallSlot,
    pub score: Score,
    pub camera: CameraRig,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            player: PlayerState::new(config.spawn),
            ball: BallSlot::Empty,
            score: Score::default(),
            camera: CameraRig::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Asset loader finished: the ball appears on the center spot.
    ///
    /// Returns false if the ball was already present.
    pub fn supply_ball(&mut self, config: &PhysicsConfig) -> bool {
        if self.ball.is_present() {
            return false;
        }
        self.ball = BallSlot::Present(BallState::at(config.ball_start()));
        self.events.push(GameEvent::BallLoaded);
        true
    }

    /// Hand accumulated events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
