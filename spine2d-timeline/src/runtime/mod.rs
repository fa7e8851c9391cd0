mod animation;
mod bone_timelines;
mod constraint_timelines;
mod event_timelines;
mod skeleton;
mod slot_timelines;
mod timeline;

pub use animation::*;
pub use bone_timelines::*;
pub use constraint_timelines::*;
pub use event_timelines::*;
pub use skeleton::*;
pub use slot_timelines::*;
pub use timeline::{MixBlend, MixDirection, Timeline, TimelineKind};

#[cfg(test)]
mod skeleton_tests;


#[cfg(test)]
mod slot_timeline_tests;
