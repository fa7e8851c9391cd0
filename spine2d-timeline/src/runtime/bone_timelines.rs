//! Rotate, translate, scale and shear timelines for a bone's local transform.

use super::timeline::{frame_position, sample, sign, wrap_degrees, FramePosition};
use crate::curve::CurveTable;
use crate::frames::{RotateFrame, Vec2Frame};
use crate::{MixBlend, MixDirection, Skeleton};

#[derive(Clone, Debug)]
pub struct RotateTimeline {
    pub bone_index: usize,
    pub frames: Vec<RotateFrame>,
    pub curves: CurveTable,
}

impl RotateTimeline {
    pub fn new(bone_index: usize, frame_count: usize) -> Self {
        Self {
            bone_index,
            frames: vec![RotateFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    /// `angle` is in degrees, relative to the setup rotation.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, angle: f32) {
        self.frames[frame_index] = RotateFrame { time, angle };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton.data.bones.get(self.bone_index).map(|b| b.rotation) else {
            return;
        };
        let Some(bone) = skeleton.bones.get_mut(self.bone_index) else {
            return;
        };
        if !bone.active {
            return;
        }

        // Keyed angles past the last frame are used as authored; interpolated ones are wrapped.
        let (r, wrap): (f32, fn(f32) -> f32) =
            match frame_position(&self.frames, &self.curves, time) {
                FramePosition::Before => {
                    match blend {
                        MixBlend::Setup => bone.rotation = setup,
                        MixBlend::First => {
                            bone.rotation += wrap_degrees(setup - bone.rotation) * alpha;
                        }
                        MixBlend::Replace | MixBlend::Add => {}
                    }
                    return;
                }
                FramePosition::Last(i) => (self.frames[i].angle, |r| r),
                FramePosition::Between { prev, percent } => {
                    let from = self.frames[prev].angle;
                    let to = self.frames[prev + 1].angle;
                    (from + wrap_degrees(to - from) * percent, wrap_degrees)
                }
            };

        match blend {
            MixBlend::Setup => bone.rotation = setup + wrap(r) * alpha,
            MixBlend::First | MixBlend::Replace => {
                bone.rotation += wrap_degrees(r + setup - bone.rotation) * alpha;
            }
            MixBlend::Add => bone.rotation += wrap(r) * alpha,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TranslateTimeline {
    pub bone_index: usize,
    pub frames: Vec<Vec2Frame>,
    pub curves: CurveTable,
}

impl TranslateTimeline {
    pub fn new(bone_index: usize, frame_count: usize) -> Self {
        Self {
            bone_index,
            frames: vec![Vec2Frame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    /// `x`/`y` are offsets from the setup position.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, x: f32, y: f32) {
        self.frames[frame_index] = Vec2Frame { time, x, y };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton.data.bones.get(self.bone_index).map(|b| [b.x, b.y]) else {
            return;
        };
        let Some(bone) = skeleton.bones.get_mut(self.bone_index) else {
            return;
        };
        if !bone.active {
            return;
        }
        let mut current = [bone.x, bone.y];
        blend_offset(&self.frames, &self.curves, time, alpha, blend, setup, &mut current);
        [bone.x, bone.y] = current;
    }
}

#[derive(Clone, Debug)]
pub struct ShearTimeline {
    pub bone_index: usize,
    pub frames: Vec<Vec2Frame>,
    pub curves: CurveTable,
}

impl ShearTimeline {
    pub fn new(bone_index: usize, frame_count: usize) -> Self {
        Self {
            bone_index,
            frames: vec![Vec2Frame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    /// `x`/`y` are degrees added to the setup shear.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, x: f32, y: f32) {
        self.frames[frame_index] = Vec2Frame { time, x, y };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton
            .data
            .bones
            .get(self.bone_index)
            .map(|b| [b.shear_x, b.shear_y])
        else {
            return;
        };
        let Some(bone) = skeleton.bones.get_mut(self.bone_index) else {
            return;
        };
        if !bone.active {
            return;
        }
        let mut current = [bone.shear_x, bone.shear_y];
        blend_offset(&self.frames, &self.curves, time, alpha, blend, setup, &mut current);
        [bone.shear_x, bone.shear_y] = current;
    }
}

/// Shared by translate and shear: keyed values are offsets added to the setup value.
fn blend_offset(
    frames: &[Vec2Frame],
    curves: &CurveTable,
    time: f32,
    alpha: f32,
    blend: MixBlend,
    setup: [f32; 2],
    current: &mut [f32; 2],
) {
    let Some(value) = sample(frames, curves, time, |f| [f.x, f.y]) else {
        match blend {
            MixBlend::Setup => *current = setup,
            MixBlend::First => {
                for i in 0..2 {
                    current[i] += (setup[i] - current[i]) * alpha;
                }
            }
            MixBlend::Replace | MixBlend::Add => {}
        }
        return;
    };

    for i in 0..2 {
        match blend {
            MixBlend::Setup => current[i] = setup[i] + value[i] * alpha,
            MixBlend::First | MixBlend::Replace => {
                current[i] += (setup[i] + value[i] - current[i]) * alpha;
            }
            MixBlend::Add => current[i] += value[i] * alpha,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScaleTimeline {
    pub bone_index: usize,
    pub frames: Vec<Vec2Frame>,
    pub curves: CurveTable,
}

impl ScaleTimeline {
    pub fn new(bone_index: usize, frame_count: usize) -> Self {
        Self {
            bone_index,
            frames: vec![Vec2Frame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    /// `x`/`y` multiply the setup scale.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, x: f32, y: f32) {
        self.frames[frame_index] = Vec2Frame { time, x, y };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        alpha: f32,
        blend: MixBlend,
        direction: MixDirection,
    ) {
        let Some(setup) = skeleton
            .data
            .bones
            .get(self.bone_index)
            .map(|b| [b.scale_x, b.scale_y])
        else {
            return;
        };
        let Some(bone) = skeleton.bones.get_mut(self.bone_index) else {
            return;
        };
        if !bone.active {
            return;
        }

        let mut current = [bone.scale_x, bone.scale_y];
        match sample(&self.frames, &self.curves, time, |f| [f.x, f.y]) {
            None => match blend {
                MixBlend::Setup => current = setup,
                MixBlend::First => {
                    for i in 0..2 {
                        current[i] += (setup[i] - current[i]) * alpha;
                    }
                }
                MixBlend::Replace | MixBlend::Add => {}
            },
            Some(mult) => {
                for i in 0..2 {
                    current[i] =
                        blend_scale(current[i], setup[i], mult[i] * setup[i], alpha, blend, direction);
                }
            }
        }
        [bone.scale_x, bone.scale_y] = current;
    }
}

/// Blends one scale axis. With partial alpha the value is mixed toward a baseline carrying the
/// sign it is mixed from, so mirrored scales flip instead of collapsing through zero.
fn blend_scale(
    current: f32,
    setup: f32,
    value: f32,
    alpha: f32,
    blend: MixBlend,
    direction: MixDirection,
) -> f32 {
    if alpha == 1.0 {
        return match blend {
            MixBlend::Add => current + value - setup,
            MixBlend::Setup | MixBlend::First | MixBlend::Replace => value,
        };
    }

    match (direction, blend) {
        (MixDirection::Out, MixBlend::Setup) => setup + (value.abs() * sign(setup) - setup) * alpha,
        (MixDirection::Out, MixBlend::First | MixBlend::Replace) => {
            current + (value.abs() * sign(current) - current) * alpha
        }
        (MixDirection::Out, MixBlend::Add) => {
            current + (value.abs() * sign(current) - setup) * alpha
        }
        (MixDirection::In, MixBlend::Setup) => {
            let base = setup.abs() * sign(value);
            base + (value - base) * alpha
        }
        (MixDirection::In, MixBlend::First | MixBlend::Replace) => {
            let base = current.abs() * sign(value);
            base + (value - base) * alpha
        }
        (MixDirection::In, MixBlend::Add) => {
            let s = sign(value);
            current.abs() * s + (value - setup.abs() * s) * alpha
        }
    }
}
