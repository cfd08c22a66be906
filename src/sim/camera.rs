//! Chase camera
//!
//! Two-stage follow: a target point trails the player, and the camera trails
//! the target plus a heading-relative offset. The slower camera stage hides
//! jitter when the player stops abruptly.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::smoothing_factor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Offset from the target in the player's local frame (z is forward)
    pub offset: Vec3,
    pub target_smoothing: f32,
    pub position_smoothing: f32,
    pub look_lift: f32,
    pub initial_position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 2.6, -6.5),
            target_smoothing: CAMERA_TARGET_SMOOTHING,
            position_smoothing: CAMERA_SMOOTHING,
            look_lift: CAMERA_LOOK_LIFT,
            initial_position: Vec3::new(0.0, 3.5, -7.0),
        }
    }
}

/// What the renderer's camera should do this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    pub config: CameraConfig,
    /// `None` until the first tick
    target: Option<Vec3>,
    position: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let position = config.initial_position;
        Self {
            config,
            target: None,
            position,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Drop the follow target so the next tick snaps to the player again
    pub fn reset(&mut self) {
        self.target = None;
    }

    /// Point on the offset orbit the camera is easing toward
    pub fn ideal_position(&self, target: Vec3, yaw: f32) -> Vec3 {
        target + Quat::from_rotation_y(yaw) * self.config.offset
    }

    pub fn update(&mut self, player: Vec3, yaw: f32, dt: f32) -> CameraTransform {
        let target = match self.target {
            Some(t) => t.lerp(player, smoothing_factor(self.config.target_smoothing, dt)),
            None => player,
        };
        self.target = Some(target);

        let ideal = self.ideal_position(target, yaw);
        self.position = self
            .position
            .lerp(ideal, smoothing_factor(self.config.position_smoothing, dt));

        self.transform(player)
    }

    /// Current camera position looking at the lifted player, without advancing
    pub fn transform(&self, player: Vec3) -> CameraTransform {
        CameraTransform {
            position: self.position,
            look_at: player + Vec3::Y * self.config.look_lift,
        }
    }
}
