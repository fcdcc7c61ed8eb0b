//! Physics tuning
//!
//! Every constant the simulation reads lives here so it can be tweaked from
//! settings without touching code.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// How rolling friction is applied to the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum FrictionModel {
    /// `velocity *= friction` once per tick, whatever the tick length.
    /// Matches the shipped game but decays faster at higher frame rates.
    #[default]
    PerTick,
    /// `velocity *= friction^(dt / reference_dt)`, frame-rate independent
    TimeScaled { reference_dt: f32 },
}

impl FrictionModel {
    /// Velocity retention factor for one step of length `dt`
    pub fn factor(&self, friction: f32, dt: f32) -> f32 {
        match *self {
            FrictionModel::PerTick => friction,
            FrictionModel::TimeScaled { reference_dt } => friction.powf(dt / reference_dt),
        }
    }
}

/// What a player/ball contact does to the ball's velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KickPolicy {
    /// Ball velocity is replaced by the kick (controlled lob)
    #[default]
    Replace,
    /// Player momentum is added on top of the current ball velocity
    Additive,
}

/// Who gets moved when player and ball overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeparationPolicy {
    /// Only the ball is pushed out; the player is never displaced
    #[default]
    BallOnly,
    /// Overlap is split 50/50 between ball and player
    Split,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Field ===
    pub field_width: f32,
    pub field_length: f32,
    /// Area the player may move in (pitch plus margin)
    pub extended_field_width: f32,
    pub extended_field_length: f32,
    pub goal_width: f32,
    pub goal_height: f32,

    // === Player ===
    pub ground_level: f32,
    pub body_radius: f32,
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub rotation_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub spawn: Vec3,

    // === Ball ===
    pub ball_radius: f32,
    pub friction: f32,
    pub friction_model: FrictionModel,
    pub bounce: f32,
    /// Ground bounces leaving slower than this are zeroed so the ball
    /// settles. 0 keeps every bounce (`vy = -vy * bounce`).
    pub rest_speed: f32,
    pub kick_force: f32,
    pub kick_lift: f32,
    pub push_strength: f32,
    pub kick_policy: KickPolicy,
    pub separation_policy: SeparationPolicy,
    pub restart_height: f32,

    // === Loop ===
    pub max_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_length: FIELD_LENGTH,
            extended_field_width: FIELD_EXTENDED_WIDTH,
            extended_field_length: FIELD_EXTENDED_LENGTH,
            goal_width: GOAL_WIDTH,
            goal_height: GOAL_HEIGHT,

            ground_level: PLAYER_GROUND_LEVEL,
            body_radius: PLAYER_BODY_RADIUS,
            move_speed: PLAYER_MOVE_SPEED,
            sprint_multiplier: PLAYER_SPRINT_MULTIPLIER,
            rotation_speed: PLAYER_ROTATION_SPEED,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: GRAVITY,
            spawn: Vec3::new(0.0, PLAYER_GROUND_LEVEL, PLAYER_SPAWN_Z),

            ball_radius: BALL_RADIUS,
            friction: BALL_FRICTION,
            friction_model: FrictionModel::PerTick,
            bounce: BALL_BOUNCE,
            rest_speed: BALL_REST_SPEED,
            kick_force: BALL_KICK_FORCE,
            kick_lift: BALL_KICK_LIFT,
            push_strength: BALL_PUSH_STRENGTH,
            kick_policy: KickPolicy::Replace,
            separation_policy: SeparationPolicy::BallOnly,
            restart_height: BALL_RESTART_HEIGHT,

            max_dt: MAX_FRAME_DT,
        }
    }
}

impl PhysicsConfig {
    /// Player X bound (extended field half-width minus body radius)
    pub fn player_max_x(&self) -> f32 {
        self.extended_field_width / 2.0 - self.body_radius
    }

    /// Player Z bound (extended field half-length minus body radius)
    pub fn player_max_z(&self) -> f32 {
        self.extended_field_length / 2.0 - self.body_radius
    }

    /// Ball side-wall bound on X
    pub fn ball_max_x(&self) -> f32 {
        self.field_width / 2.0 - self.ball_radius
    }

    /// Ball end-wall bound on Z
    pub fn ball_max_z(&self) -> f32 {
        self.field_length / 2.0 - self.ball_radius
    }

    pub fn goal_half_width(&self) -> f32 {
        self.goal_width / 2.0
    }

    /// Center distance at which player and ball touch
    pub fn collision_distance(&self) -> f32 {
        self.body_radius + self.ball_radius
    }

    /// Effective move speed (sprint-scaled while running)
    pub fn move_speed(&self, running: bool) -> f32 {
        if running {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        }
    }

    /// Kick-off point: above the center spot
    pub fn restart_point(&self) -> Vec3 {
        Vec3::new(0.0, self.restart_height, 0.0)
    }

    /// Resting position of a freshly loaded ball: on the center spot
    pub fn ball_start(&self) -> Vec3 {
        Vec3::new(0.0, self.ball_radius, 0.0)
    }

    /// Reject configurations that would break the simulation invariants
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_length", self.field_length),
            ("ball_radius", self.ball_radius),
            ("body_radius", self.body_radius),
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidSetting {
                    field,
                    reason: "must be positive",
                });
            }
        }
        if !(0.0..1.0).contains(&self.bounce) {
            return Err(GameError::InvalidSetting {
                field: "bounce",
                reason: "must be in [0, 1)",
            });
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(GameError::InvalidSetting {
                field: "friction",
                reason: "must be in [0, 1]",
            });
        }
        if let FrictionModel::TimeScaled { reference_dt } = self.friction_model {
            if !(reference_dt > 0.0) {
                return Err(GameError::InvalidSetting {
                    field: "friction_model",
                    reason: "reference_dt must be positive",
                });
            }
        }
        if self.extended_field_width < self.field_width
            || self.extended_field_length < self.field_length
        {
            return Err(GameError::InvalidSetting {
                field: "extended_field",
                reason: "must contain the regulation field",
            });
        }
        if self.goal_width >= self.field_width {
            return Err(GameError::InvalidSetting {
                field: "goal_width",
                reason: "must be narrower than the field",
            });
        }
        Ok(())
    }
}
