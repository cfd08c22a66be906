//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard codes, touch joystick)
//! - Session ownership and teardown
//! - Browser bindings (wasm only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

pub use input::{Control, ControlState, IntentSource, JOYSTICK_THRESHOLD, KeyBindings};

use crate::settings::Settings;
use crate::sim::{FrameOutput, TickInput, World};

/// A world plus the input that drives it
///
/// Event callbacks hold clones of the shared [`IntentSource`] handle; the
/// session reads one snapshot per frame.
#[derive(Debug)]
pub struct Session {
    world: World,
    input: Rc<RefCell<IntentSource>>,
    pub idle_mode: bool,
}

impl Session {
    pub fn new(settings: &Settings, ambient_seed: u64) -> Self {
        let input = IntentSource::new(settings.bindings.clone(), settings.touch_threshold);
        Self {
            world: World::new(settings.world, settings.firefly_count(), ambient_seed),
            input: Rc::new(RefCell::new(input)),
            idle_mode: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Shared handle for event callbacks
    pub fn input(&self) -> Rc<RefCell<IntentSource>> {
        Rc::clone(&self.input)
    }

    /// Start a fresh session: intro dialog, nothing collected, keys released
    pub fn play(&mut self) {
        self.input.borrow_mut().reset();
        self.world.play();
    }

    /// Dismiss the intro
    pub fn begin(&mut self) {
        self.input.borrow_mut().reset();
        self.world.begin();
    }

    pub fn frame(&mut self, dt: f32) -> FrameOutput<'_> {
        let input = TickInput {
            intent: self.input.borrow().intent(),
            idle_mode: self.idle_mode,
        };
        self.world.frame(&input, dt)
    }
}
