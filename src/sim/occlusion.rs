//! Sightline occlusion
//!
//! Scenery standing between the camera and the player is hidden so the player
//! is never lost behind a tree trunk.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::OCCLUSION_MIN_DISTANCE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occluder {
    /// Squared distance from the sightline inside which an instance is hidden
    pub radius_sq: f32,
    /// Sightlines shorter than this hide nothing
    pub min_distance: f32,
}

impl Occluder {
    pub const fn new(radius_sq: f32) -> Self {
        Self {
            radius_sq,
            min_distance: OCCLUSION_MIN_DISTANCE,
        }
    }

    /// Whether a single instance stays visible
    pub fn is_visible(&self, camera: Vec3, player: Vec3, instance: Vec3) -> bool {
        let sightline = player - camera;
        let length = sightline.length();
        if length < self.min_distance {
            return true;
        }
        self.visible_along(camera, sightline / length, length, instance)
    }

    #[inline]
    fn visible_along(&self, camera: Vec3, direction: Vec3, length: f32, instance: Vec3) -> bool {
        let to_instance = instance - camera;
        let t = to_instance.dot(direction);
        if t <= 0.0 || t >= length {
            return true;
        }
        let perpendicular_sq = (to_instance.length_squared() - t * t).max(0.0);
        perpendicular_sq > self.radius_sq
    }

    /// Write a visibility flag per instance. Only the overlapping prefix of
    /// `instances` and `visible` is touched.
    pub fn update(&self, camera: Vec3, player: Vec3, instances: &[Vec3], visible: &mut [bool]) {
        let sightline = player - camera;
        let length = sightline.length();
        if length < self.min_distance {
            visible.iter_mut().for_each(|v| *v = true);
            return;
        }
        let direction = sightline / length;
        for (flag, &instance) in visible.iter_mut().zip(instances) {
            *flag = self.visible_along(camera, direction, length, instance);
        }
    }
}
