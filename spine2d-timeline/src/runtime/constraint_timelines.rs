use super::timeline::{frame_position, sample, FramePosition, Interpolate};
use crate::curve::CurveTable;
use crate::frames::{FloatFrame, IkFrame, PathMixFrame, TransformFrame};
use crate::{MixBlend, MixDirection, Skeleton};

/// Constraint values blend from setup under `Setup`, otherwise from the current value.
fn blend_mix<const N: usize>(
    current: [f32; N],
    setup: [f32; N],
    value: Option<[f32; N]>,
    alpha: f32,
    blend: MixBlend,
) -> [f32; N] {
    match (value, blend) {
        (None, MixBlend::Setup) => setup,
        (None, MixBlend::First) => current.interpolate(setup, alpha),
        (None, MixBlend::Replace | MixBlend::Add) => current,
        (Some(value), MixBlend::Setup) => setup.interpolate(value, alpha),
        (Some(value), _) => current.interpolate(value, alpha),
    }
}

#[derive(Clone, Debug)]
pub struct IkConstraintTimeline {
    pub constraint_index: usize,
    pub frames: Vec<IkFrame>,
    pub curves: CurveTable,
}

impl IkConstraintTimeline {
    pub fn new(constraint_index: usize, frame_count: usize) -> Self {
        Self {
            constraint_index,
            frames: vec![IkFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, frame: IkFrame) {
        self.frames[frame_index] = frame;
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
        let Some(data) = skeleton.data.ik_constraints.get(self.constraint_index) else {
            return;
        };
        let setup = IkFrame {
            time: 0.0,
            mix: data.mix,
            softness: data.softness,
            bend_direction: data.bend_direction,
            compress: data.compress,
            stretch: data.stretch,
        };
        let Some(constraint) = skeleton.ik_constraints.get_mut(self.constraint_index) else {
            return;
        };
        if !constraint.active {
            return;
        }

        let current = [constraint.mix, constraint.softness];
        let (value, discrete) = match frame_position(&self.frames, &self.curves, time) {
            FramePosition::Before => {
                if matches!(blend, MixBlend::Setup | MixBlend::First) {
                    [constraint.mix, constraint.softness] =
                        blend_mix(current, [setup.mix, setup.softness], None, alpha, blend);
                    constraint.bend_direction = setup.bend_direction;
                    constraint.compress = setup.compress;
                    constraint.stretch = setup.stretch;
                }
                return;
            }
            FramePosition::Last(i) => {
                let frame = &self.frames[i];
                ([frame.mix, frame.softness], frame)
            }
            // Discrete values hold the earlier keyframe's until the next one is reached.
            FramePosition::Between { prev, percent } => {
                let from = &self.frames[prev];
                let to = &self.frames[prev + 1];
                let value = [from.mix, from.softness].interpolate([to.mix, to.softness], percent);
                (value, from)
            }
        };

        [constraint.mix, constraint.softness] = blend_mix(
            current,
            [setup.mix, setup.softness],
            Some(value),
            alpha,
            blend,
        );

        let keyed = match (blend, direction) {
            (MixBlend::Setup, MixDirection::Out) => Some(&setup),
            (_, MixDirection::In) => Some(discrete),
            (_, MixDirection::Out) => None,
        };
        if let Some(keyed) = keyed {
            constraint.bend_direction = keyed.bend_direction;
            constraint.compress = keyed.compress;
            constraint.stretch = keyed.stretch;
        }
    }
}

#[derive(Clone, Debug)]
pub struct TransformConstraintTimeline {
    pub constraint_index: usize,
    pub frames: Vec<TransformFrame>,
    pub curves: CurveTable,
}

impl TransformConstraintTimeline {
    pub fn new(constraint_index: usize, frame_count: usize) -> Self {
        Self {
            constraint_index,
            frames: vec![TransformFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, frame: TransformFrame) {
        self.frames[frame_index] = frame;
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton
            .data
            .transform_constraints
            .get(self.constraint_index)
            .map(|c| [c.rotate_mix, c.translate_mix, c.scale_mix, c.shear_mix])
        else {
            return;
        };
        let Some(constraint) = skeleton
            .transform_constraints
            .get_mut(self.constraint_index)
        else {
            return;
        };
        if !constraint.active {
            return;
        }

        let value = sample(&self.frames, &self.curves, time, |f| {
            [f.rotate_mix, f.translate_mix, f.scale_mix, f.shear_mix]
        });
        let current = [
            constraint.rotate_mix,
            constraint.translate_mix,
            constraint.scale_mix,
            constraint.shear_mix,
        ];
        [
            constraint.rotate_mix,
            constraint.translate_mix,
            constraint.scale_mix,
            constraint.shear_mix,
        ] = blend_mix(current, setup, value, alpha, blend);
    }
}

#[derive(Clone, Debug)]
pub struct PathConstraintPositionTimeline {
    pub constraint_index: usize,
    pub frames: Vec<FloatFrame>,
    pub curves: CurveTable,
}

impl PathConstraintPositionTimeline {
    pub fn new(constraint_index: usize, frame_count: usize) -> Self {
        Self {
            constraint_index,
            frames: vec![FloatFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, time: f32, position: f32) {
        self.frames[frame_index] = FloatFrame {
            time,
            value: position,
        };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton
            .data
            .path_constraints
            .get(self.constraint_index)
            .map(|c| c.position)
        else {
            return;
        };
        let Some(constraint) = skeleton.path_constraints.get_mut(self.constraint_index) else {
            return;
        };
        if !constraint.active {
            return;
        }
        let value = sample(&self.frames, &self.curves, time, |f| [f.value]);
        [constraint.position] = blend_mix([constraint.position], [setup], value, alpha, blend);
    }
}

#[derive(Clone, Debug)]
pub struct PathConstraintSpacingTimeline {
    pub constraint_index: usize,
    pub frames: Vec<FloatFrame>,
    pub curves: CurveTable,
}

impl PathConstraintSpacingTimeline {
    pub fn new(constraint_index: usize, frame_count: usize) -> Self {
        Self {
            constraint_index,
            frames: vec![FloatFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, time: f32, spacing: f32) {
        self.frames[frame_index] = FloatFrame {
            time,
            value: spacing,
        };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton
            .data
            .path_constraints
            .get(self.constraint_index)
            .map(|c| c.spacing)
        else {
            return;
        };
        let Some(constraint) = skeleton.path_constraints.get_mut(self.constraint_index) else {
            return;
        };
        if !constraint.active {
            return;
        }
        let value = sample(&self.frames, &self.curves, time, |f| [f.value]);
        [constraint.spacing] = blend_mix([constraint.spacing], [setup], value, alpha, blend);
    }
}

#[derive(Clone, Debug)]
pub struct PathConstraintMixTimeline {
    pub constraint_index: usize,
    pub frames: Vec<PathMixFrame>,
    pub curves: CurveTable,
}

impl PathConstraintMixTimeline {
    pub fn new(constraint_index: usize, frame_count: usize) -> Self {
        Self {
            constraint_index,
            frames: vec![PathMixFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(
        &mut self,
        frame_index: usize,
        time: f32,
        rotate_mix: f32,
        translate_mix: f32,
    ) {
        self.frames[frame_index] = PathMixFrame {
            time,
            rotate_mix,
            translate_mix,
        };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        let Some(setup) = skeleton
            .data
            .path_constraints
            .get(self.constraint_index)
            .map(|c| [c.rotate_mix, c.translate_mix])
        else {
            return;
        };
        let Some(constraint) = skeleton.path_constraints.get_mut(self.constraint_index) else {
            return;
        };
        if !constraint.active {
            return;
        }
        let value = sample(&self.frames, &self.curves, time, |f| {
            [f.rotate_mix, f.translate_mix]
        });
        [constraint.rotate_mix, constraint.translate_mix] = blend_mix(
            [constraint.rotate_mix, constraint.translate_mix],
            setup,
            value,
            alpha,
            blend,
        );
    }
}
