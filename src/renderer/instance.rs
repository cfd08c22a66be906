//! Instance types for instanced scenery meshes

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::{Category, LayoutSet, OrbPose, OrbitPose, Placement, PlacementKind};
use crate::{hex_rgb, hsl_to_rgb};

/// Per-instance model matrix and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: Vec3) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }

    /// Yawed instance standing on the ground, lifted by `lift`
    fn grounded(p: &Placement, lift: f32, scale: Vec3, color: Vec3) -> Self {
        let translation = p.position + Vec3::Y * lift;
        Self::new(
            Mat4::from_scale_rotation_translation(
                scale,
                Quat::from_rotation_y(p.rotation),
                translation,
            ),
            color,
        )
    }

    pub fn from_placement(p: &Placement) -> Self {
        let s = p.scale;
        let blade = Vec3::new(s * 0.35, s, s * 0.35);
        match p.kind {
            PlacementKind::Collectible => Self::grounded(p, 0.0, Vec3::ONE, hex_rgb(colors::ORB)),
            PlacementKind::Tree(variant) => {
                Self::grounded(p, 0.0, Vec3::splat(s), hex_rgb(variant.palette().1))
            }
            PlacementKind::Shrub => {
                Self::grounded(p, s * 0.45, Vec3::splat(s), hex_rgb(colors::SHRUB))
            }
            PlacementKind::Grass => Self::grounded(p, s * 0.3, blade, hex_rgb(colors::GRASS)),
            // Stalk and bulb scale live in the plant mesh itself
            PlacementKind::AlienPlant { hue, .. } => {
                Self::grounded(p, 0.0, Vec3::ONE, hsl_to_rgb(hue, 0.65, 0.42))
            }
            PlacementKind::Sprout { hue } => {
                Self::grounded(p, s * 0.3, blade, hsl_to_rgb(hue, 0.7, 0.55))
            }
        }
    }

    /// Spinning orb; collected orbs collapse to zero scale
    pub fn from_orb(orb: &OrbPose) -> Self {
        let scale = if orb.visible { Vec3::ONE } else { Vec3::ZERO };
        Self::new(
            Mat4::from_scale_rotation_translation(
                scale,
                Quat::from_rotation_y(orb.spin),
                orb.position,
            ),
            hex_rgb(colors::ORB),
        )
    }

    pub fn from_orbit(pose: &OrbitPose, color: Vec3) -> Self {
        let rotation = Quat::from_euler(
            glam::EulerRot::XYZ,
            pose.rotation.x,
            pose.rotation.y,
            pose.rotation.z,
        );
        Self::new(
            Mat4::from_scale_rotation_translation(Vec3::splat(pose.scale), rotation, pose.position),
            color,
        )
    }
}

/// Instances for every placement of one category, in layout order
pub fn category_instances(layout: &LayoutSet, category: Category) -> Vec<InstanceRaw> {
    layout
        .of_category(category)
        .map(InstanceRaw::from_placement)
        .collect()
}

/// Base colors (0xRRGGBB)
pub mod colors {
    pub const ORB: u32 = 0x5dffb1;
    pub const SHRUB: u32 = 0x2f5e34;
    pub const GRASS: u32 = 0x1f6a3b;
    pub const ASTEROID: u32 = 0x5e6a88;
}
