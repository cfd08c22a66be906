//! Progress-driven glow
//!
//! Two smoothing stages: the displayed progress chases the real ratio, and each
//! material intensity chases the value implied by the eased displayed progress.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{hex_rgb, lerp, smoothing_factor};

/// Start/end appearance of one material as progress goes 0 → 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialRamp {
    pub color: (u32, u32),
    pub emissive: (u32, u32),
    pub intensity: (f32, f32),
}

impl MaterialRamp {
    fn sample(&self, eased: f32) -> (Vec3, Vec3, f32) {
        (
            hex_rgb(self.color.0).lerp(hex_rgb(self.color.1), eased),
            hex_rgb(self.emissive.0).lerp(hex_rgb(self.emissive.1), eased),
            lerp(self.intensity.0, self.intensity.1, eased),
        )
    }
}

pub const BODY_RAMP: MaterialRamp = MaterialRamp {
    color: (0x4f5465, 0x59d3ff),
    emissive: (0x141924, 0x2fb6ff),
    intensity: (0.08, 1.6),
};

pub const TAIL_RAMP: MaterialRamp = MaterialRamp {
    color: (0x5a5f72, 0x69ddff),
    emissive: (0x1b1d28, 0x36c4ff),
    intensity: (0.12, 1.8),
};

pub const WING_RAMP: MaterialRamp = MaterialRamp {
    color: (0x8ca2ba, 0xb9ecff),
    emissive: (0x1a2d3a, 0x4fe6ff),
    intensity: (0.4, 1.5),
};

pub const WING_OPACITY: (f32, f32) = (0.45, 0.8);
pub const GLOW_INTENSITY: (f32, f32) = (0.4, 2.4);

/// Resolved material parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialState {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

/// Everything the avatar's materials and glow light need this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub eased: f32,
    pub body: MaterialState,
    pub tail: MaterialState,
    pub wings: MaterialState,
    pub wing_opacity: f32,
    pub glow_color: Vec3,
    pub glow_intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressMapper {
    pub smoothing: f32,
    pub snap_epsilon: f32,
    pub intensity_smoothing: f32,
    smoothed: f32,
    body_intensity: f32,
    tail_intensity: f32,
    wing_intensity: f32,
    glow_intensity: f32,
}

impl Default for ProgressMapper {
    fn default() -> Self {
        Self {
            smoothing: PROGRESS_SMOOTHING,
            snap_epsilon: PROGRESS_SNAP_EPSILON,
            intensity_smoothing: INTENSITY_SMOOTHING,
            smoothed: 0.0,
            body_intensity: BODY_RAMP.intensity.0,
            tail_intensity: TAIL_RAMP.intensity.0,
            wing_intensity: WING_RAMP.intensity.0,
            glow_intensity: 0.6,
        }
    }
}

/// Quadratic ease-out
#[inline]
pub fn ease_out_quad(p: f32) -> f32 {
    1.0 - (1.0 - p) * (1.0 - p)
}

impl ProgressMapper {
    /// Displayed (smoothed, un-eased) progress
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    pub fn update(&mut self, collected: usize, total: usize, dt: f32) -> Feedback {
        let ratio = (collected as f32 / total.max(1) as f32).min(1.0);
        self.smoothed = lerp(self.smoothed, ratio, smoothing_factor(self.smoothing, dt));
        if (ratio - self.smoothed).abs() < self.snap_epsilon {
            self.smoothed = ratio;
        }
        let eased = ease_out_quad(self.smoothed);
        let k = smoothing_factor(self.intensity_smoothing, dt);

        let chase = |current: &mut f32, ramp: &MaterialRamp| {
            let (color, emissive, target) = ramp.sample(eased);
            *current = lerp(*current, target, k);
            MaterialState {
                color,
                emissive,
                emissive_intensity: *current,
            }
        };
        let body = chase(&mut self.body_intensity, &BODY_RAMP);
        let tail = chase(&mut self.tail_intensity, &TAIL_RAMP);
        let wings = chase(&mut self.wing_intensity, &WING_RAMP);

        let glow_target = lerp(GLOW_INTENSITY.0, GLOW_INTENSITY.1, eased);
        self.glow_intensity = lerp(self.glow_intensity, glow_target, k);

        Feedback {
            eased,
            body,
            tail,
            wings,
            wing_opacity: lerp(WING_OPACITY.0, WING_OPACITY.1, eased),
            glow_color: body.emissive,
            glow_intensity: self.glow_intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_snaps_exactly_to_ratio() {
        let mut m = ProgressMapper::default();
        for _ in 0..600 {
            m.update(3, 30, DT);
        }
        assert_eq!(m.smoothed(), 0.1);
    }

    #[test]
    fn test_progress_lags_then_rises_monotonically() {
        let mut m = ProgressMapper::default();
        let first = m.update(30, 30, DT);
        assert!(first.eased > 0.0 && first.eased < 0.2);
        let mut last = first.eased;
        for _ in 0..120 {
            let f = m.update(30, 30, DT);
            assert!(f.eased >= last);
            last = f.eased;
        }
    }

    #[test]
    fn test_full_progress_reaches_end_palette() {
        let mut m = ProgressMapper::default();
        let mut f = m.update(30, 30, DT);
        for _ in 0..1200 {
            f = m.update(30, 30, DT);
        }
        assert_eq!(f.eased, 1.0);
        assert!((f.body.color - hex_rgb(0x59d3ff)).length() < 1e-5);
        assert!((f.body.emissive_intensity - 1.6).abs() < 1e-3);
        assert!((f.glow_intensity - 2.4).abs() < 1e-3);
        assert!((f.wing_opacity - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_total_does_not_divide_by_zero() {
        let mut m = ProgressMapper::default();
        let f = m.update(0, 0, DT);
        assert_eq!(f.eased, 0.0);
        assert_eq!(f.body.color, hex_rgb(0x4f5465));
    }

    #[test]
    fn test_ratio_is_clamped() {
        let mut m = ProgressMapper::default();
        for _ in 0..600 {
            m.update(50, 30, DT);
        }
        assert_eq!(m.smoothed(), 1.0);
    }

    #[test]
    fn test_ease_out_quad() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
    }
}
