//! Keyframe payloads and the lookups timelines use to find them.
//!
//! Frame stores are plain `Vec`s of one struct per keyframe, sorted by time. The keyframe
//! "before" index `i` is always `i - 1`.

use crate::Event;

pub trait Keyframe {
    fn time(&self) -> f32;
}

/// Returns the index of the first keyframe whose time is greater than `time`.
///
/// Callers only use this when `frames[0].time <= time < frames[last].time`, so the result
/// `k` satisfies `1 <= k <= last` and `frames[k - 1].time <= time < frames[k].time`.
pub fn search_after<F: Keyframe>(frames: &[F], time: f32) -> usize {
    frames.partition_point(|f| f.time() <= time)
}

/// Returns the index of the last keyframe at or before `time` (clamped to `0`).
pub fn search_at_or_before<F: Keyframe>(frames: &[F], time: f32) -> usize {
    let last = frames.len().saturating_sub(1);
    if frames.last().is_some_and(|f| time >= f.time()) {
        return last;
    }
    search_after(frames, time).saturating_sub(1)
}

/// Segment position for continuous timelines.
///
/// `search_after` returns the later bracket point, so the fraction is measured backward from
/// it: `1 - (time - next) / (prev - next)`.
pub(crate) fn segment_percent(prev_time: f32, next_time: f32, time: f32) -> f32 {
    1.0 - (time - next_time) / (prev_time - next_time)
}

macro_rules! impl_keyframe {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyframe for $ty {
            fn time(&self) -> f32 {
                self.time
            }
        })*
    };
}

impl_keyframe!(
    RotateFrame,
    Vec2Frame,
    ColorFrame,
    TwoColorFrame,
    AttachmentFrame,
    DeformFrame,
    DrawOrderFrame,
    Event,
    IkFrame,
    TransformFrame,
    FloatFrame,
    PathMixFrame,
);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RotateFrame {
    pub time: f32,
    /// Degrees, relative to the bone's setup rotation.
    pub angle: f32,
}

/// Translate and shear store offsets from setup; scale stores multipliers of setup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vec2Frame {
    pub time: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorFrame {
    pub time: f32,
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TwoColorFrame {
    pub time: f32,
    pub light: [f32; 4],
    pub dark: [f32; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachmentFrame {
    pub time: f32,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeformFrame {
    pub time: f32,
    /// `None` keys the setup pose: setup vertices for unweighted attachments, zero offsets for
    /// weighted ones.
    pub vertices: Option<Vec<f32>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawOrderFrame {
    pub time: f32,
    /// `draw_order[i] = setup slot index`; `None` is the setup order.
    pub draw_order_to_setup_index: Option<Vec<usize>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IkFrame {
    pub time: f32,
    pub mix: f32,
    pub softness: f32,
    pub bend_direction: i32,
    pub compress: bool,
    pub stretch: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformFrame {
    pub time: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatFrame {
    pub time: f32,
    pub value: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathMixFrame {
    pub time: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
}
