//! Ambient motion
//!
//! Decorative movement that never feeds back into gameplay: hovering orbs,
//! orbiting asteroids and comets, drifting fireflies. All of it is a pure
//! function of elapsed time plus per-instance parameters.
//!
//! Time is a `f64` session clock. Angles are formed in `f64` and only the
//! resulting offsets are narrowed, so motion stays smooth in long sessions.

use std::f32::consts::TAU;
use std::f64::consts::{FRAC_PI_2, TAU as TAU64};

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::OrbitDescriptor;
use super::state::Collectible;

const ORB_SWAY_RADIUS: f32 = 0.4;
const ORB_SWAY_SPEED: f64 = 0.8;
const ORB_LIFT: f32 = 0.6;
const ORB_SPIN: f32 = 1.8 * 0.4;

/// Rendered transform of an orb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbPose {
    pub position: Vec3,
    pub spin: f32,
    pub visible: bool,
}

/// Hover/sway of an orb around its base position. `spin` is the accumulated
/// yaw; collected orbs stop spinning and disappear.
pub fn orb_pose(coin: &Collectible, collected: bool, time: f64, spin: f32) -> OrbPose {
    let phase = f64::from(coin.id);
    let bob = (time * 2.0 + phase).sin() as f32 * 0.18;
    OrbPose {
        position: coin.position
            + Vec3::new(
                (time * ORB_SWAY_SPEED + phase).cos() as f32 * ORB_SWAY_RADIUS,
                ORB_LIFT + bob,
                (time * ORB_SWAY_SPEED * 0.87 + phase).sin() as f32 * ORB_SWAY_RADIUS,
            ),
        spin,
        visible: !collected,
    }
}

/// Spin rate of an orb (radians/s)
pub fn orb_spin_rate(collected: bool) -> f32 {
    if collected { 0.0 } else { ORB_SPIN }
}

/// Position and euler rotation of something on an orbit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

/// Orbit angle, wrapped to [0, 2π) before narrowing
fn wrapped(angle: f64) -> f32 {
    angle.rem_euclid(TAU64) as f32
}

pub fn asteroid_pose(orbit: &OrbitDescriptor, time: f64) -> OrbitPose {
    let a = time * f64::from(orbit.speed) + f64::from(orbit.offset);
    let y = 8.0 + (a * 0.7 + f64::from(orbit.offset)).sin() * 6.0 + (a * 1.3).cos() * 2.0;
    OrbitPose {
        position: Vec3::new(
            a.cos() as f32 * orbit.radius,
            y as f32,
            a.sin() as f32 * orbit.radius,
        ),
        rotation: Vec3::new(
            (a * 0.6).sin() as f32 * 0.8 + orbit.tilt,
            wrapped(a * 0.4),
            (a * 0.5).cos() as f32 * 0.6,
        ),
        scale: orbit.scale,
    }
}

/// A glowing comet on a fixed circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comet {
    pub radius: f32,
    pub speed: f32,
    pub height: f32,
    pub offset: f32,
    pub color: u32,
}

pub const COMETS: [Comet; 3] = [
    Comet {
        radius: 32.0,
        speed: 0.38,
        height: 18.0,
        offset: 0.2,
        color: 0x6bd8ff,
    },
    Comet {
        radius: 46.0,
        speed: 0.28,
        height: 26.0,
        offset: 1.1,
        color: 0xff9bff,
    },
    Comet {
        radius: 54.0,
        speed: 0.22,
        height: 34.0,
        offset: 2.4,
        color: 0x9bf9ff,
    },
];

impl Comet {
    pub fn pose(&self, time: f64) -> OrbitPose {
        let a = time * f64::from(self.speed) + f64::from(self.offset);
        OrbitPose {
            position: Vec3::new(
                a.cos() as f32 * self.radius,
                self.height + (a * 1.2).sin() as f32 * 1.4,
                a.sin() as f32 * self.radius,
            ),
            rotation: Vec3::new(0.0, wrapped(FRAC_PI_2 - a), 0.0),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Firefly {
    base: Vec3,
    speed: f32,
    sway: f32,
}

/// Point-sprite swarm drifting above the play area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireflySwarm {
    flies: Vec<Firefly>,
}

impl FireflySwarm {
    pub fn new(count: usize, rng: &mut Pcg32) -> Self {
        let flies = (0..count)
            .map(|_| {
                let radius = 8.0 + rng.random::<f32>() * 24.0;
                let angle = rng.random::<f32>() * TAU;
                let height = 2.4 + rng.random::<f32>() * 18.0;
                Firefly {
                    base: Vec3::new(angle.cos() * radius, height, angle.sin() * radius),
                    speed: 0.4 + rng.random::<f32>() * 0.9,
                    sway: 0.6 + rng.random::<f32>() * 1.4,
                }
            })
            .collect();
        Self { flies }
    }

    pub fn len(&self) -> usize {
        self.flies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flies.is_empty()
    }

    /// Write current positions into `out` (cleared first)
    pub fn positions(&self, time: f64, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(self.flies.iter().enumerate().map(|(i, fly)| {
            let i = i as f64;
            let orbit = time * f64::from(fly.sway) + i;
            fly.base
                + Vec3::new(
                    orbit.cos() as f32 * 0.6,
                    (time * f64::from(fly.speed) + i).sin() as f32 * 0.8,
                    (orbit * 0.9).sin() as f32 * 0.6,
                )
        }));
    }

    /// (opacity, point size) pulse shared by the whole swarm
    pub fn material(time: f64) -> (f32, f32) {
        (
            0.32 + (time * 1.6).sin() as f32 * 0.18,
            0.12 + (time * 1.1).sin() as f32 * 0.03,
        )
    }
}
