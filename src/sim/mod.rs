//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas are clamped before anything reads them
//! - Layouts come from seeded mulberry32 streams only
//! - Stable iteration order (placement order, orb id)
//! - No rendering or platform dependencies

pub mod ambient;
pub mod camera;
pub mod layout;
pub mod locomotion;
pub mod occlusion;
pub mod progress;
pub mod rng;
pub mod state;
pub mod tick;

pub use ambient::{COMETS, Comet, FireflySwarm, OrbPose, OrbitPose};
pub use camera::{CameraConfig, CameraRig, CameraTransform};
pub use layout::{
    Category, CategoryRule, Exclusion, LayoutRules, LayoutSet, OrbitDescriptor, Placement,
    PlacementKind, Rect, Sampling, TreeVariant, generate, generate_orbits, generate_with, presets,
};
pub use locomotion::{AvatarPose, Intent, LocomotionConfig, LocomotionController};
pub use occlusion::Occluder;
pub use progress::{Feedback, MaterialState, ProgressMapper, ease_out_quad};
pub use rng::Mulberry32;
pub use state::{Collectible, GameEvent, GamePhase, GameState};
pub use tick::{FrameOutput, TickInput, World, WorldKind};
