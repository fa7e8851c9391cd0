use super::timeline::{frame_position, sample, FramePosition, Interpolate};
use crate::curve::CurveTable;
use crate::frames::{search_at_or_before, AttachmentFrame, ColorFrame, DeformFrame, TwoColorFrame};
use crate::{Error, MixBlend, MixDirection, Skeleton, VertexAttachmentData};

#[derive(Clone, Debug)]
pub struct ColorTimeline {
    pub slot_index: usize,
    pub frames: Vec<ColorFrame>,
    pub curves: CurveTable,
}

impl ColorTimeline {
    pub fn new(slot_index: usize, frame_count: usize) -> Self {
        Self {
            slot_index,
            frames: vec![ColorFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, time: f32, color: [f32; 4]) {
        self.frames[frame_index] = ColorFrame { time, color };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        if !skeleton.slot_active(self.slot_index) {
            return;
        }
        let Some(setup) = skeleton.data.slots.get(self.slot_index).map(|s| s.color) else {
            return;
        };
        let slot = &mut skeleton.slots[self.slot_index];
        let value = sample(&self.frames, &self.curves, time, |f| f.color);
        slot.color = blend_color(slot.color, setup, value, alpha, blend);
    }
}

#[derive(Clone, Debug)]
pub struct TwoColorTimeline {
    pub slot_index: usize,
    pub frames: Vec<TwoColorFrame>,
    pub curves: CurveTable,
}

impl TwoColorTimeline {
    pub fn new(slot_index: usize, frame_count: usize) -> Self {
        Self {
            slot_index,
            frames: vec![TwoColorFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    pub fn set_frame(&mut self, frame_index: usize, time: f32, light: [f32; 4], dark: [f32; 3]) {
        self.frames[frame_index] = TwoColorFrame { time, light, dark };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        if !skeleton.slot_active(self.slot_index) {
            return;
        }
        let Some((setup_light, setup_dark)) = skeleton
            .data
            .slots
            .get(self.slot_index)
            .map(|s| (s.color, s.dark_color))
        else {
            return;
        };
        let slot = &mut skeleton.slots[self.slot_index];
        let light = sample(&self.frames, &self.curves, time, |f| f.light);
        let dark = sample(&self.frames, &self.curves, time, |f| f.dark);
        slot.color = blend_color(slot.color, setup_light, light, alpha, blend);
        slot.dark_color = blend_color(slot.dark_color, setup_dark, dark, alpha, blend);
    }
}

/// `value` is `None` before the first keyframe.
fn blend_color<const N: usize>(
    current: [f32; N],
    setup: [f32; N],
    value: Option<[f32; N]>,
    alpha: f32,
    blend: MixBlend,
) -> [f32; N] {
    let Some(value) = value else {
        return match blend {
            MixBlend::Setup => setup,
            MixBlend::First => current.interpolate(setup, alpha),
            MixBlend::Replace | MixBlend::Add => current,
        };
    };
    if alpha == 1.0 {
        return value;
    }
    let from = if blend == MixBlend::Setup { setup } else { current };
    from.interpolate(value, alpha)
}

#[derive(Clone, Debug)]
pub struct AttachmentTimeline {
    pub slot_index: usize,
    pub frames: Vec<AttachmentFrame>,
}

impl AttachmentTimeline {
    pub fn new(slot_index: usize, frame_count: usize) -> Self {
        Self {
            slot_index,
            frames: vec![AttachmentFrame::default(); frame_count],
        }
    }

    /// `None` clears the slot's attachment at `time`.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, attachment_name: Option<&str>) {
        self.frames[frame_index] = AttachmentFrame {
            time,
            name: attachment_name.map(str::to_string),
        };
    }

    pub(crate) fn apply(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        blend: MixBlend,
        direction: MixDirection,
    ) {
        if !skeleton.slot_active(self.slot_index) {
            return;
        }
        let Some(first) = self.frames.first() else {
            return;
        };

        let restore_setup = (direction == MixDirection::Out && blend == MixBlend::Setup)
            || (time < first.time && matches!(blend, MixBlend::Setup | MixBlend::First));
        if restore_setup {
            let data = std::sync::Arc::clone(&skeleton.data);
            let setup = data
                .slots
                .get(self.slot_index)
                .and_then(|s| s.attachment.as_deref());
            skeleton.set_slot_attachment(self.slot_index, setup);
            return;
        }
        if time < first.time {
            return;
        }

        let frame = &self.frames[search_at_or_before(&self.frames, time)];
        skeleton.set_slot_attachment(self.slot_index, frame.name.as_deref());
    }
}

/// Keyframed vertex buffers for one vertex attachment in one slot.
///
/// Unweighted attachments key absolute vertex positions; weighted attachments key offsets that
/// are added to the skinned positions. The rest buffer is the setup positions in the first case
/// and all zeros in the second, which lets both share the same blending arithmetic.
#[derive(Clone, Debug)]
pub struct DeformTimeline {
    pub slot_index: usize,
    attachment_id: u32,
    weighted: bool,
    rest: Vec<f32>,
    pub frames: Vec<DeformFrame>,
    pub curves: CurveTable,
}

impl DeformTimeline {
    pub fn new(slot_index: usize, attachment: &VertexAttachmentData, frame_count: usize) -> Self {
        let rest = attachment
            .setup_vertices()
            .unwrap_or_else(|| vec![0.0; attachment.deform_len()]);
        Self {
            slot_index,
            attachment_id: attachment.id(),
            weighted: attachment.is_weighted(),
            rest,
            frames: vec![DeformFrame::default(); frame_count],
            curves: CurveTable::new(frame_count),
        }
    }

    /// `None` keys the setup pose.
    pub fn set_frame(&mut self, frame_index: usize, time: f32, vertices: Option<Vec<f32>>) {
        self.frames[frame_index] = DeformFrame { time, vertices };
    }

    pub fn curves_mut(&mut self) -> &mut CurveTable {
        &mut self.curves
    }

    /// Id of the attachment the keyed buffers were authored against.
    pub fn attachment_id(&self) -> u32 {
        self.attachment_id
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Floats per keyed buffer.
    pub fn vertex_count(&self) -> usize {
        self.rest.len()
    }

    fn frame_vertex(&self, frame_index: usize, vertex: usize) -> f32 {
        let keyed = self.frames[frame_index].vertices.as_deref();
        keyed
            .and_then(|v| v.get(vertex))
            .copied()
            .unwrap_or(self.rest[vertex])
    }

    pub(crate) fn validate(&self, animation: &str) -> Result<(), Error> {
        for (index, frame) in self.frames.iter().enumerate() {
            let Some(vertices) = frame.vertices.as_ref() else {
                continue;
            };
            if vertices.len() != self.rest.len() {
                return Err(Error::DeformVertexCount {
                    animation: animation.to_string(),
                    index,
                    expected: self.rest.len(),
                    actual: vertices.len(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn apply(&self, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
        if !skeleton.slot_active(self.slot_index) {
            return;
        }
        let targets_slot_attachment = skeleton
            .slot_attachment_data(self.slot_index)
            .and_then(|a| a.vertex_data())
            .is_some_and(|v| v.deform_attachment == self.attachment_id);
        if !targets_slot_attachment {
            log::trace!(
                "deform timeline for attachment {} skipped: slot {} wears another attachment",
                self.attachment_id,
                self.slot_index
            );
            return;
        }

        let rest = self.rest.as_slice();
        let vertex_count = rest.len();
        let deform = &mut skeleton.slots[self.slot_index].deform;
        let blend = if deform.is_empty() {
            MixBlend::Setup
        } else {
            blend
        };

        let position = frame_position(&self.frames, &self.curves, time);
        if position == FramePosition::Before {
            match blend {
                MixBlend::Setup => deform.clear(),
                MixBlend::First if alpha == 1.0 => deform.clear(),
                MixBlend::First => {
                    deform.resize(vertex_count, 0.0);
                    for (d, r) in deform.iter_mut().zip(rest) {
                        *d += (r - *d) * alpha;
                    }
                }
                MixBlend::Replace | MixBlend::Add => {}
            }
            return;
        }

        deform.resize(vertex_count, 0.0);
        let value = |i: usize| -> f32 {
            match position {
                FramePosition::Last(frame) => self.frame_vertex(frame, i),
                FramePosition::Between { prev, percent } => self
                    .frame_vertex(prev, i)
                    .interpolate(self.frame_vertex(prev + 1, i), percent),
                FramePosition::Before => rest[i],
            }
        };

        if alpha == 1.0 {
            for (i, d) in deform.iter_mut().enumerate() {
                match blend {
                    MixBlend::Add => *d += value(i) - rest[i],
                    MixBlend::Setup | MixBlend::First | MixBlend::Replace => *d = value(i),
                }
            }
            return;
        }

        for (i, d) in deform.iter_mut().enumerate() {
            let v = value(i);
            match blend {
                MixBlend::Setup => *d = rest[i] + (v - rest[i]) * alpha,
                MixBlend::First | MixBlend::Replace => *d += (v - *d) * alpha,
                MixBlend::Add => *d += (v - rest[i]) * alpha,
            }
        }
    }
}
