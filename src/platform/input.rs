//! Input handling
//!
//! Converts keyboard codes and touch joystick deflection into the boolean
//! control state the frame driver samples once per tick.

use serde::{Deserialize, Serialize};

use crate::sim::Intent;

/// Default joystick deflection needed to register a direction
pub const JOYSTICK_THRESHOLD: f32 = 0.25;

/// One logical control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

/// Pressed state of every control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl ControlState {
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Forward => self.forward = pressed,
            Control::Backward => self.backward = pressed,
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Jump => self.jump = pressed,
        }
    }

    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Forward => self.forward,
            Control::Backward => self.backward,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
        }
    }

    /// Axes for the locomotion controller. Opposing keys cancel.
    pub fn intent(&self) -> Intent {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Intent {
            move_axis: axis(self.forward, self.backward),
            turn_axis: axis(self.right, self.left),
            jump: self.jump,
        }
    }
}

/// `KeyboardEvent.code` values bound to each control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| (*c).to_owned()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: codes(&["KeyW", "ArrowUp"]),
            backward: codes(&["KeyS", "ArrowDown"]),
            left: codes(&["KeyA", "ArrowLeft"]),
            right: codes(&["KeyD", "ArrowRight"]),
            jump: codes(&["Space"]),
        }
    }
}

impl KeyBindings {
    /// Layout with the horizontal arrow keys swapped, so that ArrowLeft turns
    /// the creature toward screen-left under the chase camera
    pub fn mirrored_arrows() -> Self {
        Self {
            left: codes(&["KeyA", "ArrowRight"]),
            right: codes(&["KeyD", "ArrowLeft"]),
            ..Self::default()
        }
    }

    /// Control bound to a key code, if any
    pub fn control_for(&self, code: &str) -> Option<Control> {
        [
            (Control::Forward, &self.forward),
            (Control::Backward, &self.backward),
            (Control::Left, &self.left),
            (Control::Right, &self.right),
            (Control::Jump, &self.jump),
        ]
        .into_iter()
        .find(|(_, bound)| bound.iter().any(|c| c == code))
        .map(|(control, _)| control)
    }
}

/// Mutable control state fed by keyboard and touch callbacks
#[derive(Debug, Clone)]
pub struct IntentSource {
    bindings: KeyBindings,
    state: ControlState,
    joystick_threshold: f32,
}

impl Default for IntentSource {
    fn default() -> Self {
        Self::new(KeyBindings::default(), JOYSTICK_THRESHOLD)
    }
}

impl IntentSource {
    pub fn new(bindings: KeyBindings, joystick_threshold: f32) -> Self {
        Self {
            bindings,
            state: ControlState::default(),
            joystick_threshold,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Returns whether `code` is bound, so the caller can suppress the
    /// browser default (arrow-key scrolling)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.key(code, false)
    }

    fn key(&mut self, code: &str, pressed: bool) -> bool {
        match self.bindings.control_for(code) {
            Some(control) => {
                self.state.set(control, pressed);
                true
            }
            None => false,
        }
    }

    pub fn set_control(&mut self, control: Control, pressed: bool) {
        self.state.set(control, pressed);
    }

    /// Map a joystick deflection in [-1, 1]² (screen space, +y down) onto the
    /// four directional controls
    pub fn apply_joystick(&mut self, x: f32, y: f32) {
        let t = self.joystick_threshold;
        self.state.forward = -y > t;
        self.state.backward = y > t;
        self.state.left = x < -t;
        self.state.right = x > t;
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.state = ControlState::default();
    }

    pub fn snapshot(&self) -> ControlState {
        self.state
    }

    pub fn intent(&self) -> Intent {
        self.state.intent()
    }
}
