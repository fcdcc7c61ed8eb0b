//! Semantic input actions
//!
//! The host translates raw key/pointer events into `Action`s; the simulation
//! only ever sees a `TickInput` snapshot.

use serde::{Deserialize, Serialize};

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    RotateLeft,
    RotateRight,
    Jump,
    Sprint,
    CameraFollow,
    CameraBallFacing,
    CameraSide,
}

impl Action {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Action::MoveForward),
            "ArrowDown" | "s" | "S" => Some(Action::MoveBackward),
            "ArrowLeft" | "a" | "A" => Some(Action::RotateLeft),
            "ArrowRight" | "d" | "D" => Some(Action::RotateRight),
            " " => Some(Action::Jump),
            "Shift" => Some(Action::Sprint),
            "1" => Some(Action::CameraFollow),
            "2" => Some(Action::CameraBallFacing),
            "3" => Some(Action::CameraSide),
            _ => None,
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Small bitset of actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.0 &= !action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Actions currently held down
    pub held: ActionSet,
    /// Actions whose key went down since the previous tick (edges, no repeats)
    pub pressed: ActionSet,
    /// Accumulated pointer-drag rotation, radians
    pub drag_yaw: f32,
    /// Accumulated wheel delta (positive zooms out)
    pub zoom: f32,
}

impl TickInput {
    pub fn held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }
}

/// Host-side input accumulator, mutated by event handlers between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    input: TickInput,
    dragging: bool,
    last_pointer_x: f32,
}

impl InputState {
    pub fn key_down(&mut self, action: Action, repeat: bool) {
        if !repeat && !self.input.held.contains(action) {
            self.input.pressed.insert(action);
        }
        self.input.held.insert(action);
    }

    pub fn key_up(&mut self, action: Action) {
        self.input.held.remove(action);
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.dragging = true;
        self.last_pointer_x = x;
    }

    /// Pointer moved to `x`; accumulates rotation while dragging
    pub fn pointer_move(&mut self, x: f32, sensitivity: f32) {
        if !self.dragging {
            return;
        }
        self.input.drag_yaw += (x - self.last_pointer_x) * sensitivity;
        self.last_pointer_x = x;
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn wheel(&mut self, delta_y: f32, sensitivity: f32) {
        self.input.zoom += delta_y * sensitivity;
    }

    /// Release everything (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.input.held = ActionSet::EMPTY;
        self.dragging = false;
    }

    pub fn snapshot(&self) -> TickInput {
        self.input
    }

    /// Clear edges and accumulators after they have been consumed by a tick
    pub fn clear_one_shot(&mut self) {
        self.input.pressed = ActionSet::EMPTY;
        self.input.drag_yaw = 0.0;
        self.input.zoom = 0.0;
    }
}
