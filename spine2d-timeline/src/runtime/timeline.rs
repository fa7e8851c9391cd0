use crate::curve::CurveTable;
use crate::frames::{search_after, segment_percent, Keyframe};
use crate::{
    AttachmentTimeline, ColorTimeline, DeformTimeline, DrawOrderTimeline, Error, Event,
    EventTimeline, IkConstraintTimeline, PathConstraintMixTimeline,
    PathConstraintPositionTimeline, PathConstraintSpacingTimeline, RotateTimeline, ScaleTimeline,
    ShearTimeline, Skeleton, SkeletonData, TransformConstraintTimeline, TranslateTimeline,
    TwoColorTimeline,
};

/// How a timeline's value is combined with the current pose.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MixBlend {
    /// Start from the setup pose, blended toward the timeline value by alpha.
    Setup,
    /// Like `Setup`, but blends from the current value.
    First,
    /// Blends from the current value toward the timeline value.
    Replace,
    /// Adds the timeline value, scaled by alpha, to the current value.
    Add,
}

/// Whether the animation is being mixed in or out. Only discrete values read this.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MixDirection {
    In,
    Out,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TimelineKind {
    Rotate,
    Translate,
    Scale,
    Shear,
    Attachment,
    Color,
    Deform,
    Event,
    DrawOrder,
    IkConstraint,
    TransformConstraint,
    PathConstraintPosition,
    PathConstraintSpacing,
    PathConstraintMix,
    TwoColor,
}

impl TimelineKind {
    /// Stable numeric tag stored in the high bits of property ids.
    pub fn tag(self) -> u32 {
        match self {
            Self::Rotate => 0,
            Self::Translate => 1,
            Self::Scale => 2,
            Self::Shear => 3,
            Self::Attachment => 4,
            Self::Color => 5,
            Self::Deform => 6,
            Self::Event => 7,
            Self::DrawOrder => 8,
            Self::IkConstraint => 9,
            Self::TransformConstraint => 10,
            Self::PathConstraintPosition => 11,
            Self::PathConstraintSpacing => 12,
            Self::PathConstraintMix => 13,
            Self::TwoColor => 14,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Shear => "shear",
            Self::Attachment => "attachment",
            Self::Color => "color",
            Self::Deform => "deform",
            Self::Event => "event",
            Self::DrawOrder => "draw order",
            Self::IkConstraint => "ik constraint",
            Self::TransformConstraint => "transform constraint",
            Self::PathConstraintPosition => "path constraint position",
            Self::PathConstraintSpacing => "path constraint spacing",
            Self::PathConstraintMix => "path constraint mix",
            Self::TwoColor => "two color",
        }
    }

    pub(crate) fn property_id(self, target: usize) -> u32 {
        (self.tag() << 24).wrapping_add(target as u32)
    }
}

macro_rules! each_timeline {
    ($timeline:expr, $t:ident => $body:expr) => {
        match $timeline {
            Timeline::Rotate($t) => $body,
            Timeline::Translate($t) => $body,
            Timeline::Scale($t) => $body,
            Timeline::Shear($t) => $body,
            Timeline::Attachment($t) => $body,
            Timeline::Color($t) => $body,
            Timeline::Deform($t) => $body,
            Timeline::Event($t) => $body,
            Timeline::DrawOrder($t) => $body,
            Timeline::IkConstraint($t) => $body,
            Timeline::TransformConstraint($t) => $body,
            Timeline::PathConstraintPosition($t) => $body,
            Timeline::PathConstraintSpacing($t) => $body,
            Timeline::PathConstraintMix($t) => $body,
            Timeline::TwoColor($t) => $body,
        }
    };
}

#[derive(Clone, Debug)]
pub enum Timeline {
    Rotate(RotateTimeline),
    Translate(TranslateTimeline),
    Scale(ScaleTimeline),
    Shear(ShearTimeline),
    Attachment(AttachmentTimeline),
    Color(ColorTimeline),
    Deform(DeformTimeline),
    Event(EventTimeline),
    DrawOrder(DrawOrderTimeline),
    IkConstraint(IkConstraintTimeline),
    TransformConstraint(TransformConstraintTimeline),
    PathConstraintPosition(PathConstraintPositionTimeline),
    PathConstraintSpacing(PathConstraintSpacingTimeline),
    PathConstraintMix(PathConstraintMixTimeline),
    TwoColor(TwoColorTimeline),
}

impl Timeline {
    pub fn kind(&self) -> TimelineKind {
        match self {
            Self::Rotate(_) => TimelineKind::Rotate,
            Self::Translate(_) => TimelineKind::Translate,
            Self::Scale(_) => TimelineKind::Scale,
            Self::Shear(_) => TimelineKind::Shear,
            Self::Attachment(_) => TimelineKind::Attachment,
            Self::Color(_) => TimelineKind::Color,
            Self::Deform(_) => TimelineKind::Deform,
            Self::Event(_) => TimelineKind::Event,
            Self::DrawOrder(_) => TimelineKind::DrawOrder,
            Self::IkConstraint(_) => TimelineKind::IkConstraint,
            Self::TransformConstraint(_) => TimelineKind::TransformConstraint,
            Self::PathConstraintPosition(_) => TimelineKind::PathConstraintPosition,
            Self::PathConstraintSpacing(_) => TimelineKind::PathConstraintSpacing,
            Self::PathConstraintMix(_) => TimelineKind::PathConstraintMix,
            Self::TwoColor(_) => TimelineKind::TwoColor,
        }
    }

    /// Key identifying the skeleton property this timeline writes. Two timelines with the same
    /// id conflict when mixed.
    pub fn property_id(&self) -> u32 {
        let kind = self.kind();
        match self {
            Self::Rotate(t) => kind.property_id(t.bone_index),
            Self::Translate(t) => kind.property_id(t.bone_index),
            Self::Scale(t) => kind.property_id(t.bone_index),
            Self::Shear(t) => kind.property_id(t.bone_index),
            Self::Attachment(t) => kind.property_id(t.slot_index),
            Self::Color(t) => kind.property_id(t.slot_index),
            Self::Deform(t) => (kind.tag() << 27)
                .wrapping_add(t.attachment_id())
                .wrapping_add(t.slot_index as u32),
            Self::Event(_) | Self::DrawOrder(_) => kind.tag() << 24,
            Self::IkConstraint(t) => kind.property_id(t.constraint_index),
            Self::TransformConstraint(t) => kind.property_id(t.constraint_index),
            Self::PathConstraintPosition(t) => kind.property_id(t.constraint_index),
            Self::PathConstraintSpacing(t) => kind.property_id(t.constraint_index),
            Self::PathConstraintMix(t) => kind.property_id(t.constraint_index),
            Self::TwoColor(t) => kind.property_id(t.slot_index),
        }
    }

    pub fn frame_count(&self) -> usize {
        each_timeline!(self, t => t.frames.len())
    }

    /// Time of the last keyframe, or `0` for an empty timeline.
    pub fn duration(&self) -> f32 {
        each_timeline!(self, t => t.frames.last().map_or(0.0, Keyframe::time))
    }

    fn frame_times(&self) -> Vec<f32> {
        each_timeline!(self, t => t.frames.iter().map(Keyframe::time).collect())
    }

    fn curves(&self) -> Option<&CurveTable> {
        match self {
            Self::Rotate(t) => Some(&t.curves),
            Self::Translate(t) => Some(&t.curves),
            Self::Scale(t) => Some(&t.curves),
            Self::Shear(t) => Some(&t.curves),
            Self::Color(t) => Some(&t.curves),
            Self::Deform(t) => Some(&t.curves),
            Self::IkConstraint(t) => Some(&t.curves),
            Self::TransformConstraint(t) => Some(&t.curves),
            Self::PathConstraintPosition(t) => Some(&t.curves),
            Self::PathConstraintSpacing(t) => Some(&t.curves),
            Self::PathConstraintMix(t) => Some(&t.curves),
            Self::TwoColor(t) => Some(&t.curves),
            Self::Attachment(_) | Self::Event(_) | Self::DrawOrder(_) => None,
        }
    }

    /// Applies this timeline to `skeleton`.
    ///
    /// `last_time` and `events` are only read by event timelines; `direction` only by timelines
    /// with discrete values. Timelines with no keyframes do nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        events: Option<&mut Vec<Event>>,
        alpha: f32,
        blend: MixBlend,
        direction: MixDirection,
    ) {
        match self {
            Self::Rotate(t) => t.apply(skeleton, time, alpha, blend),
            Self::Translate(t) => t.apply(skeleton, time, alpha, blend),
            Self::Scale(t) => t.apply(skeleton, time, alpha, blend, direction),
            Self::Shear(t) => t.apply(skeleton, time, alpha, blend),
            Self::Attachment(t) => t.apply(skeleton, time, blend, direction),
            Self::Color(t) => t.apply(skeleton, time, alpha, blend),
            Self::Deform(t) => t.apply(skeleton, time, alpha, blend),
            Self::Event(t) => {
                if let Some(events) = events {
                    t.collect(last_time, time, events);
                }
            }
            Self::DrawOrder(t) => t.apply(skeleton, time, blend, direction),
            Self::IkConstraint(t) => t.apply(skeleton, time, alpha, blend, direction),
            Self::TransformConstraint(t) => t.apply(skeleton, time, alpha, blend),
            Self::PathConstraintPosition(t) => t.apply(skeleton, time, alpha, blend),
            Self::PathConstraintSpacing(t) => t.apply(skeleton, time, alpha, blend),
            Self::PathConstraintMix(t) => t.apply(skeleton, time, alpha, blend),
            Self::TwoColor(t) => t.apply(skeleton, time, alpha, blend),
        }
    }

    /// Checks the invariants playback relies on against the skeleton the timeline will drive.
    pub(crate) fn validate(&self, animation: &str, data: &SkeletonData) -> Result<(), Error> {
        let kind = self.kind();
        let times = self.frame_times();
        if times.is_empty() {
            return Err(Error::EmptyTimeline {
                animation: animation.to_string(),
                timeline: kind.name().to_string(),
            });
        }
        if let Some((index, time)) = times.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(Error::InvalidValue {
                message: format!(
                    "{} timeline in animation '{animation}' has keyframe {index} at time {time}",
                    kind.name()
                ),
            });
        }
        for (index, pair) in times.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(Error::UnsortedKeyframes {
                    animation: animation.to_string(),
                    timeline: kind.name().to_string(),
                    index: index + 1,
                    time: pair[1],
                    previous: pair[0],
                });
            }
        }
        if let Some(curves) = self.curves() {
            if curves.segment_count() != times.len() - 1 {
                return Err(Error::CurveTableMismatch {
                    animation: animation.to_string(),
                    timeline: kind.name().to_string(),
                    segments: curves.segment_count(),
                    frames: times.len(),
                });
            }
        }

        let target = |target: &str, index: usize, count: usize| {
            if index < count {
                Ok(())
            } else {
                Err(Error::TargetOutOfRange {
                    animation: animation.to_string(),
                    timeline: kind.name().to_string(),
                    target: target.to_string(),
                    index,
                    count,
                })
            }
        };
        let bones = data.bones.len();
        let slots = data.slots.len();
        match self {
            Self::Rotate(t) => target("bone", t.bone_index, bones),
            Self::Translate(t) => target("bone", t.bone_index, bones),
            Self::Scale(t) => target("bone", t.bone_index, bones),
            Self::Shear(t) => target("bone", t.bone_index, bones),
            Self::Attachment(t) => target("slot", t.slot_index, slots),
            Self::Color(t) => target("slot", t.slot_index, slots),
            Self::Deform(t) => {
                target("slot", t.slot_index, slots)?;
                t.validate(animation)
            }
            Self::Event(_) => Ok(()),
            Self::DrawOrder(t) => t.validate(animation, slots),
            Self::IkConstraint(t) => {
                target("ik constraint", t.constraint_index, data.ik_constraints.len())
            }
            Self::TransformConstraint(t) => target(
                "transform constraint",
                t.constraint_index,
                data.transform_constraints.len(),
            ),
            Self::PathConstraintPosition(t) => target(
                "path constraint",
                t.constraint_index,
                data.path_constraints.len(),
            ),
            Self::PathConstraintSpacing(t) => target(
                "path constraint",
                t.constraint_index,
                data.path_constraints.len(),
            ),
            Self::PathConstraintMix(t) => target(
                "path constraint",
                t.constraint_index,
                data.path_constraints.len(),
            ),
            Self::TwoColor(t) => {
                target("slot", t.slot_index, slots)?;
                let slot = &data.slots[t.slot_index];
                if slot.has_dark {
                    Ok(())
                } else {
                    Err(Error::TwoColorTimelineRequiresDarkSlot {
                        animation: animation.to_string(),
                        slot: slot.name.clone(),
                    })
                }
            }
        }
    }
}

/// Where `time` falls within a non-empty keyframe list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum FramePosition {
    /// Before the first keyframe.
    Before,
    /// At or after the last keyframe, which has this index.
    Last(usize),
    /// Between keyframes `prev` and `prev + 1`, `percent` already eased by the curve table.
    Between { prev: usize, percent: f32 },
}

pub(crate) fn frame_position<F: Keyframe>(
    frames: &[F],
    curves: &CurveTable,
    time: f32,
) -> FramePosition {
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return FramePosition::Before;
    };
    if time < first.time() {
        return FramePosition::Before;
    }
    if time >= last.time() {
        return FramePosition::Last(frames.len() - 1);
    }
    let next = search_after(frames, time);
    let prev = next - 1;
    let percent = segment_percent(frames[prev].time(), frames[next].time(), time);
    FramePosition::Between {
        prev,
        percent: curves.curve_percent(prev, percent),
    }
}

pub(crate) trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl<const N: usize> Interpolate for [f32; N] {
    fn interpolate(self, to: Self, t: f32) -> Self {
        std::array::from_fn(|i| self[i] + (to[i] - self[i]) * t)
    }
}

/// Interpolated keyframe value at `time`, or `None` before the first keyframe.
pub(crate) fn sample<F: Keyframe, V: Interpolate>(
    frames: &[F],
    curves: &CurveTable,
    time: f32,
    value: impl Fn(&F) -> V,
) -> Option<V> {
    match frame_position(frames, curves, time) {
        FramePosition::Before => None,
        FramePosition::Last(i) => Some(value(&frames[i])),
        FramePosition::Between { prev, percent } => {
            Some(value(&frames[prev]).interpolate(value(&frames[prev + 1]), percent))
        }
    }
}

/// Wraps degrees into `(-180, 180]`.
pub(crate) fn wrap_degrees(r: f32) -> f32 {
    r - (r / 360.0 - 0.5).ceil() * 360.0
}

pub(crate) fn sign(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else if value > 0.0 {
        1.0
    } else {
        0.0
    }
}
