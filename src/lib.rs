//! Orb Forage - collect glowing orbs in a procedurally laid out world
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, locomotion, camera, occlusion, feedback)
//! - `renderer`: Instance buffers and the scene binding the renderer implements
//! - `platform`: Input capture and browser bindings
//! - `settings`: Data-driven configuration (key bindings, quality)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the driver will simulate (tab backgrounding etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Half-extent of the walkable square (player x/z are clamped to ±this)
    pub const WORLD_BOUND: f32 = 20.0;
    /// Player cruise speed (units/s)
    pub const MOVE_SPEED: f32 = 1.8;
    /// Player turn rate (radians/s)
    pub const TURN_SPEED: f32 = 2.6;
    /// Velocity smoothing rate while steering
    pub const VELOCITY_SMOOTHING: f32 = 6.0;
    /// Velocity decay rate while controls are locked (intro etc.)
    pub const DISABLED_DECAY: f32 = 10.0;
    /// Below this squared speed an idle player stops dead
    pub const VELOCITY_SNAP_EPSILON: f32 = 0.0002;
    /// Logical hover height of the player
    pub const HOVER_HEIGHT: f32 = 0.8;
    pub const BOB_RATE: f32 = 2.2;
    pub const BOB_AMPLITUDE: f32 = 0.2;
    /// Squared pickup distance between player and orb
    pub const PICKUP_RADIUS_SQ: f32 = 1.1;

    /// Camera target follow rate
    pub const CAMERA_TARGET_SMOOTHING: f32 = 5.0;
    /// Camera position follow rate
    pub const CAMERA_SMOOTHING: f32 = 3.0;
    pub const CAMERA_LOOK_LIFT: f32 = 0.6;

    /// Sightlines shorter than this never hide anything
    pub const OCCLUSION_MIN_DISTANCE: f32 = 0.5;

    pub const PROGRESS_SMOOTHING: f32 = 3.2;
    pub const PROGRESS_SNAP_EPSILON: f32 = 0.0001;
    pub const INTENSITY_SMOOTHING: f32 = 6.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Frame-rate independent lerp factor for exponential smoothing at `rate` per second
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert an `0xRRGGBB` literal to RGB components in [0, 1]
#[inline]
pub fn hex_rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// HSL (all components in [0, 1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let h = h.rem_euclid(1.0);
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
