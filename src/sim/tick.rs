//! Per-frame simulation tick
//!
//! Order is fixed: player, then ball (if loaded). Camera and rendering are
//! driven by the caller afterwards.

use super::ball::update_ball;
use super::config::PhysicsConfig;
use super::input::TickInput;
use super::player::update_player;
use super::state::{BallSlot, GameEvent, GameState};

/// Clamp a raw frame delta to something safe to integrate.
///
/// Negative or non-finite deltas (clock anomalies) become zero; long frames
/// (tab suspended, hitches) are capped so the ball cannot tunnel through walls.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::debug!("Discarding frame delta {dt}");
        return 0.0;
    }
    dt.min(max_dt)
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, config: &PhysicsConfig, dt: f32) {
    let dt = sanitize_dt(dt, config.max_dt);
    state.time_ticks += 1;

    update_player(&mut state.player, input, config, dt);

    let step = match &mut state.ball {
        BallSlot::Empty => return,
        BallSlot::Present(ball) => update_ball(ball, &mut state.player, input, config, dt),
    };

    if let Some(strength) = step.kick {
        log::debug!("Ball kicked (strength {strength:.1})");
        state.events.push(GameEvent::BallKicked { strength });
    }

    if let Some(team) = step.goal {
        state.score.increment(team);
        log::info!(
            "GOAL for {}! Red {} - {} Blue",
            team.as_str(),
            state.score.red,
            state.score.blue
        );
        state.events.push(GameEvent::GoalScored {
            team,
            score: state.score,
        });
    }
}
