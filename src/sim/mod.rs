//! Simulation module
//!
//! All gameplay logic lives here. Pure functions of (state, input, dt):
//! - No rendering or platform dependencies
//! - Never fails; a bad frame is superseded by the next one
//! - Ball physics is skipped entirely until the ball has loaded

pub mod ball;
pub mod collision;
pub mod config;
pub mod input;
pub mod player;
pub mod state;
pub mod tick;

pub use ball::{BallStep, update_ball};
pub use collision::{CollisionResult, player_ball_contact, resolve_player_ball};
pub use config::{FrictionModel, KickPolicy, PhysicsConfig, SeparationPolicy};
pub use input::{Action, ActionSet, InputState, TickInput};
pub use player::update_player;
pub use state::{
    AirState, BallSlot, BallState, GameEvent, GameState, PlayerState, Score, Team,
};
pub use tick::{sanitize_dt, tick};
