//! Player locomotion
//!
//! Tank-style steering: the turn axis spins the heading, the move axis pushes
//! along it. Velocity eases toward the desired value so stops and starts glide.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{normalize_angle, smoothing_factor};

use super::state::Collectible;

/// Directional intent sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Forward (+1) / backward (-1)
    pub move_axis: f32,
    /// Heading increases with +1
    pub turn_axis: f32,
    pub jump: bool,
}

impl Intent {
    pub const IDLE: Intent = Intent {
        move_axis: 0.0,
        turn_axis: 0.0,
        jump: false,
    };

    pub fn clamped(self) -> Self {
        Self {
            move_axis: self.move_axis.clamp(-1.0, 1.0),
            turn_axis: self.turn_axis.clamp(-1.0, 1.0),
            jump: self.jump,
        }
    }
}

/// Locomotion tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    pub max_speed: f32,
    pub turn_rate: f32,
    /// Velocity smoothing rate (1/τ) while steering
    pub velocity_smoothing: f32,
    /// Velocity decay rate while controls are disabled
    pub disabled_decay: f32,
    pub snap_epsilon: f32,
    pub world_bound: f32,
    pub hover_height: f32,
    pub bob_rate: f32,
    pub bob_amplitude: f32,
    pub pickup_radius_sq: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_speed: MOVE_SPEED,
            turn_rate: TURN_SPEED,
            velocity_smoothing: VELOCITY_SMOOTHING,
            disabled_decay: DISABLED_DECAY,
            snap_epsilon: VELOCITY_SNAP_EPSILON,
            world_bound: WORLD_BOUND,
            hover_height: HOVER_HEIGHT,
            bob_rate: BOB_RATE,
            bob_amplitude: BOB_AMPLITUDE,
            pickup_radius_sq: PICKUP_RADIUS_SQ,
        }
    }
}

/// Visual pose handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarPose {
    /// Logical position with the hover bob applied to y
    pub position: Vec3,
    /// Yaw in [-π, π)
    pub yaw: f32,
    /// Wing roll (left, right) in radians
    pub wings: (f32, f32),
}

/// Player controller; owns the locomotion state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionController {
    pub config: LocomotionConfig,
    position: Vec3,
    heading: f32,
    velocity: Vec3,
    bob_phase: f32,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig, bob_phase: f32) -> Self {
        let position = Vec3::new(0.0, config.hover_height, 0.0);
        Self {
            config,
            position,
            heading: 0.0,
            velocity: Vec3::ZERO,
            bob_phase,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading in [-π, π)
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Facing direction on the ground plane
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    /// Advance one tick. With `enabled == false` the intent is ignored and
    /// velocity bleeds off on the faster disabled decay.
    pub fn step(&mut self, intent: Intent, enabled: bool, dt: f32) {
        let cfg = &self.config;
        let intent = if enabled {
            intent.clamped()
        } else {
            Intent::IDLE
        };

        if intent.turn_axis != 0.0 {
            self.heading = normalize_angle(self.heading + intent.turn_axis * cfg.turn_rate * dt);
        }

        let desired = self.facing() * intent.move_axis * cfg.max_speed;
        let rate = if enabled {
            cfg.velocity_smoothing
        } else {
            cfg.disabled_decay
        };
        self.velocity = self.velocity.lerp(desired, smoothing_factor(rate, dt));

        if intent.move_axis == 0.0 && self.velocity.length_squared() < cfg.snap_epsilon {
            self.velocity = Vec3::ZERO;
        }

        self.position += self.velocity * dt;
        let bound = cfg.world_bound;
        self.position.x = self.position.x.clamp(-bound, bound);
        self.position.z = self.position.z.clamp(-bound, bound);
        self.position.y = cfg.hover_height;

        self.bob_phase += dt * cfg.bob_rate;
    }

    /// Ids of uncollected orbs within pickup range of the player
    pub fn touching<'a>(
        &'a self,
        coins: &'a [Collectible],
        is_collected: impl Fn(u32) -> bool + 'a,
    ) -> impl Iterator<Item = u32> + 'a {
        coins
            .iter()
            .filter(move |c| !is_collected(c.id))
            .filter(move |c| c.position.distance_squared(self.position) < self.config.pickup_radius_sq)
            .map(|c| c.id)
    }

    /// Whether some in-bounds position puts `point` within pickup range
    pub fn can_reach(&self, point: Vec3) -> bool {
        let bound = self.config.world_bound;
        let closest = Vec3::new(
            point.x.clamp(-bound, bound),
            self.config.hover_height,
            point.z.clamp(-bound, bound),
        );
        closest.distance_squared(point) < self.config.pickup_radius_sq
    }

    pub fn pose(&self) -> AvatarPose {
        let bob = self.bob_phase.sin() * self.config.bob_amplitude;
        let flap = (self.bob_phase * 2.8).sin() * 0.5;
        AvatarPose {
            position: self.position + Vec3::Y * bob,
            yaw: self.heading,
            wings: (0.6 + flap, -0.6 - flap),
        }
    }
}
