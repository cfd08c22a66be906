//! Session state
//!
//! Everything the overlay reads (phase, counts) and the collected set live
//! here. The set only grows during a session; `play()` starts a fresh one.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::layout::{LayoutSet, PlacementKind};

/// A pickup orb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub position: Vec3,
}

impl Collectible {
    /// Collectibles from a layout, ids assigned in placement order
    pub fn from_layout(layout: &LayoutSet) -> Vec<Collectible> {
        layout
            .placements
            .iter()
            .filter(|p| matches!(p.kind, PlacementKind::Collectible))
            .enumerate()
            .map(|(id, p)| Collectible {
                id: id as u32,
                position: p.position,
            })
            .collect()
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Landing,
    /// World visible, intro dialog up, controls locked
    Intro,
    /// Free roaming
    Playing,
}

/// Events emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Collected { id: u32 },
    /// Every orb has been collected (fires once per session)
    AllCollected,
}

/// Session-level game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub coins: Vec<Collectible>,
    collected: BTreeSet<u32>,
    /// Seconds since the session started
    pub elapsed: f64,
    completion_reported: bool,
}

impl GameState {
    pub fn new(coins: Vec<Collectible>) -> Self {
        Self {
            phase: GamePhase::Landing,
            coins,
            collected: BTreeSet::new(),
            elapsed: 0.0,
            completion_reported: false,
        }
    }

    /// Leave the landing screen for the intro. Clears progress.
    pub fn play(&mut self) {
        self.collected.clear();
        self.completion_reported = false;
        self.phase = GamePhase::Intro;
    }

    /// Dismiss the intro and hand over control
    pub fn begin(&mut self) {
        if self.phase == GamePhase::Intro {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::Landing
    }

    pub fn intro_complete(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn controls_enabled(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Mark an orb collected. Returns true only the first time; unknown ids
    /// are ignored.
    pub fn collect(&mut self, id: u32) -> bool {
        if !self.coins.iter().any(|c| c.id == id) {
            return false;
        }
        self.collected.insert(id)
    }

    pub fn is_collected(&self, id: u32) -> bool {
        self.collected.contains(&id)
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn total_count(&self) -> usize {
        self.coins.len()
    }

    /// Collected fraction in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.collected.len() as f32 / self.coins.len().max(1) as f32).min(1.0)
    }

    /// True exactly once, the first time every orb is collected
    pub(crate) fn take_completion(&mut self) -> bool {
        if self.completion_reported || self.coins.is_empty() {
            return false;
        }
        if self.collected.len() == self.coins.len() {
            self.completion_reported = true;
            return true;
        }
        false
    }
}
