//! Scene binding
//!
//! The renderer owns meshes, materials and lights. It exposes them to the
//! simulation through [`SceneBinding`]; any handle that is not mounted yet is
//! reported as `None` and skipped for that frame.

use glam::{Mat4, Quat, Vec3};

use super::instance::{InstanceRaw, colors};
use crate::hex_rgb;
use crate::sim::{COMETS, FrameOutput, MaterialState};

pub trait CameraNode {
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, target: Vec3);
}

pub trait AvatarNode {
    fn set_transform(&mut self, model: Mat4);
    /// Wing roll in radians
    fn set_wings(&mut self, left: f32, right: f32);
    fn set_body_material(&mut self, material: &MaterialState);
    fn set_tail_material(&mut self, material: &MaterialState);
    fn set_wing_material(&mut self, material: &MaterialState, opacity: f32);
    fn set_glow(&mut self, color: Vec3, intensity: f32);
}

/// Handles the renderer exposes to the frame driver
pub trait SceneBinding {
    fn camera(&mut self) -> Option<&mut dyn CameraNode>;
    fn avatar(&mut self) -> Option<&mut dyn AvatarNode>;
    /// Visibility flags of the occluding scenery, in layout order
    fn scenery_visibility(&mut self) -> Option<&mut [bool]>;

    /// Instance buffer for the orbs
    fn orb_instances(&mut self) -> Option<&mut Vec<InstanceRaw>> {
        None
    }

    /// Instance buffer for asteroids and comets
    fn orbit_instances(&mut self) -> Option<&mut Vec<InstanceRaw>> {
        None
    }
}

/// Push one frame of simulation output into the scene
pub fn apply_frame(scene: &mut dyn SceneBinding, frame: &FrameOutput<'_>) {
    if let Some(camera) = scene.camera() {
        camera.set_position(frame.camera.position);
        camera.look_at(frame.camera.look_at);
    }

    if let Some(avatar) = scene.avatar() {
        let pose = &frame.pose;
        let fb = &frame.feedback;
        avatar.set_transform(Mat4::from_rotation_translation(
            Quat::from_rotation_y(pose.yaw),
            pose.position,
        ));
        avatar.set_wings(pose.wings.0, pose.wings.1);
        avatar.set_body_material(&fb.body);
        avatar.set_tail_material(&fb.tail);
        avatar.set_wing_material(&fb.wings, fb.wing_opacity);
        avatar.set_glow(fb.glow_color, fb.glow_intensity);
    }

    if let Some(flags) = scene.scenery_visibility() {
        let n = flags.len().min(frame.visibility.len());
        flags[..n].copy_from_slice(&frame.visibility[..n]);
    }

    if let Some(buffer) = scene.orb_instances() {
        buffer.clear();
        buffer.extend(frame.orbs.iter().map(InstanceRaw::from_orb));
    }

    if let Some(buffer) = scene.orbit_instances() {
        buffer.clear();
        let rock = hex_rgb(colors::ASTEROID);
        buffer.extend(
            frame
                .asteroids
                .iter()
                .map(|pose| InstanceRaw::from_orbit(pose, rock)),
        );
        buffer.extend(
            frame
                .comets
                .iter()
                .zip(COMETS.iter())
                .map(|(pose, comet)| InstanceRaw::from_orbit(pose, hex_rgb(comet.color))),
        );
    }
}
