//! Rendering boundary
//!
//! GPU-ready instance data for the scenery plus the [`SceneBinding`] trait the
//! host renderer implements. Drawing itself happens outside this crate.

pub mod instance;
pub mod scene;

pub use instance::{InstanceRaw, category_instances};
pub use scene::{AvatarNode, CameraNode, SceneBinding, apply_frame};
