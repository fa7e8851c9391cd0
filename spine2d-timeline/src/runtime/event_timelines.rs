use crate::frames::{search_after, search_at_or_before, DrawOrderFrame};
use crate::{Error, Event, MixBlend, MixDirection, Skeleton};

/// Fires keyed events whose time falls in `(last_time, time]`.
#[derive(Clone, Debug)]
pub struct EventTimeline {
    pub frames: Vec<Event>,
}

impl EventTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frames: vec![Event::default(); frame_count],
        }
    }

    /// Keys `event` at `event.time`.
    pub fn set_frame(&mut self, frame_index: usize, event: Event) {
        self.frames[frame_index] = event;
    }

    /// Appends the events in `(last_time, time]` to `events`, in keyframe order.
    ///
    /// When `last_time > time` the animation looped within this call: events after `last_time`
    /// fire first, then events from the start up to `time`.
    pub fn collect(&self, last_time: f32, time: f32, events: &mut Vec<Event>) {
        let Some(last_frame) = self.frames.last() else {
            return;
        };

        let mut last_time = last_time;
        if last_time > time {
            self.collect(last_time, f32::MAX, events);
            last_time = -1.0;
        } else if last_time >= last_frame.time {
            return;
        }
        if time < self.frames[0].time {
            return;
        }

        let mut frame = if last_time < self.frames[0].time {
            0
        } else {
            let found = search_after(&self.frames, last_time);
            let found_time = self.frames[found].time;
            // Keyframes sharing a time all fire; back up to the first of them.
            let mut frame = found;
            while frame > 0 && self.frames[frame - 1].time == found_time {
                frame -= 1;
            }
            frame
        };
        while frame < self.frames.len() && time >= self.frames[frame].time {
            events.push(self.frames[frame].clone());
            frame += 1;
        }
    }
}

/// Reorders slots for drawing.
#[derive(Clone, Debug)]
pub struct DrawOrderTimeline {
    pub frames: Vec<DrawOrderFrame>,
}

impl DrawOrderTimeline {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frames: vec![DrawOrderFrame::default(); frame_count],
        }
    }

    /// `draw_order_to_setup_index[i]` is the setup slot index drawn at position `i`; `None` keys
    /// the setup order.
    pub fn set_frame(
        &mut self,
        frame_index: usize,
        time: f32,
        draw_order_to_setup_index: Option<Vec<usize>>,
    ) {
        self.frames[frame_index] = DrawOrderFrame {
            time,
            draw_order_to_setup_index,
        };
    }

    pub(crate) fn validate(&self, animation: &str, slot_count: usize) -> Result<(), Error> {
        for (index, frame) in self.frames.iter().enumerate() {
            let Some(order) = frame.draw_order_to_setup_index.as_ref() else {
                continue;
            };
            let mut seen = vec![false; slot_count];
            let is_permutation = order.len() == slot_count
                && order
                    .iter()
                    .all(|&slot| slot < slot_count && !std::mem::replace(&mut seen[slot], true));
            if !is_permutation {
                return Err(Error::InvalidDrawOrder {
                    animation: animation.to_string(),
                    index,
                    slots: slot_count,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn apply(
        &self,
        skeleton: &mut Skeleton,
        time: f32,
        blend: MixBlend,
        direction: MixDirection,
    ) {
        let Some(first) = self.frames.first() else {
            return;
        };
        if direction == MixDirection::Out && blend == MixBlend::Setup {
            reset_draw_order(skeleton);
            return;
        }
        if time < first.time {
            if matches!(blend, MixBlend::Setup | MixBlend::First) {
                reset_draw_order(skeleton);
            }
            return;
        }

        let frame = &self.frames[search_at_or_before(&self.frames, time)];
        match frame.draw_order_to_setup_index.as_deref() {
            None => reset_draw_order(skeleton),
            Some(order) => {
                for (draw, &setup) in skeleton.draw_order.iter_mut().zip(order) {
                    *draw = setup;
                }
            }
        }
    }
}

fn reset_draw_order(skeleton: &mut Skeleton) {
    for (i, draw) in skeleton.draw_order.iter_mut().enumerate() {
        *draw = i;
    }
}
