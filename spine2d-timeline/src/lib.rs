//! Keyframe timeline evaluation and pose blending for Spine 3.8 skeletal animation
//! (unofficial).
//!
//! Timelines sample keyframed values at a time and blend them into a caller-owned
//! [`Skeleton`]. World transforms, constraint solving and rendering are left to the consumer.

#![forbid(unsafe_code)]

pub mod curve;
mod error;
pub mod frames;
mod ids;
mod model;
mod runtime;

#[cfg(feature = "json")]
pub mod pose;

pub use curve::{Curve, CurveTable, CurveType, BEZIER_SIZE};
pub use error::*;
pub use frames::{
    AttachmentFrame, ColorFrame, DeformFrame, DrawOrderFrame, FloatFrame, IkFrame, PathMixFrame,
    RotateFrame, TransformFrame, TwoColorFrame, Vec2Frame,
};
pub use model::*;
pub use runtime::*;

#[cfg(test)]
mod test_util;
