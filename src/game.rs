//! Frame driver
//!
//! Owns the simulation state and the host sinks. One `frame()` call per
//! display refresh: sample input, tick, move the camera, notify overlays,
//! render.

use crate::GameError;
use crate::camera::{CameraPose, update_camera};
use crate::consts::FRAME_DT;
use crate::minimap::MinimapFrame;
use crate::platform::{HostHandles, MinimapSink, RenderFrame, RenderSink, ScoreSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputState, tick};

/// Game instance holding all state
pub struct Game {
    settings: Settings,
    state: GameState,
    input: InputState,
    render: Box<dyn RenderSink>,
    score: Option<Box<dyn ScoreSink>>,
    minimap: Option<Box<dyn MinimapSink>>,
    last_time: Option<f64>,
}

impl Game {
    /// Build a game around the host's objects.
    ///
    /// Fails fast if the renderer is missing or the settings are invalid.
    pub fn new(settings: Settings, host: HostHandles) -> Result<Self, GameError> {
        settings.validate()?;
        let render = host
            .render
            .ok_or(GameError::MissingHostObject("renderer"))?;
        if host.score.is_none() {
            log::warn!("No scoreboard attached; goals will only be logged");
        }

        let state = GameState::new(&settings.physics);
        log::info!("Game initialized, player at {}", state.player.position);

        Ok(Self {
            settings,
            state,
            input: InputState::default(),
            render,
            score: host.score,
            minimap: host.minimap,
            last_time: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Event handlers write here between frames
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// The ball model finished loading
    pub fn ball_loaded(&mut self) {
        if self.state.supply_ball(&self.settings.physics) {
            log::info!("Ball loaded, kick-off!");
        }
    }

    /// Run one frame at host timestamp `now_ms` (milliseconds)
    pub fn frame(&mut self, now_ms: f64) -> CameraPose {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(now_ms);

        let input = self.input.snapshot();
        tick(&mut self.state, &input, &self.settings.physics, dt);
        self.state.camera.apply_input(&input, &self.settings.camera);
        // Clear one-shot inputs after processing
        self.input.clear_one_shot();

        for event in self.state.drain_events() {
            if let GameEvent::GoalScored { team, score } = event {
                if let Some(sink) = self.score.as_mut() {
                    sink.team_scored(team, score);
                }
            }
        }

        let pose = update_camera(
            &self.state.camera,
            &self.settings.camera,
            &self.state.player,
            &self.state.ball,
        );

        if self.settings.show_minimap {
            if let Some(sink) = self.minimap.as_mut() {
                sink.draw(&MinimapFrame::from_state(&self.state, &self.settings.physics));
            }
        }

        self.render.render(&RenderFrame {
            camera: pose,
            player_position: self.state.player.position,
            player_yaw: self.state.player.yaw,
            ball: self.state.ball.get().cloned(),
        });

        pose
    }
}
