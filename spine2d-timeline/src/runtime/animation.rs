use crate::{Error, Event, MixBlend, MixDirection, Skeleton, SkeletonData, Timeline};

/// A named set of timelines sharing one duration.
#[derive(Clone, Debug)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub timelines: Vec<Timeline>,
}

impl Animation {
    /// Creates an animation whose duration is the latest keyframe time of its timelines.
    pub fn new(name: impl Into<String>, timelines: Vec<Timeline>) -> Self {
        let duration = timelines
            .iter()
            .map(Timeline::duration)
            .fold(0.0f32, f32::max);
        Self {
            name: name.into(),
            duration,
            timelines,
        }
    }

    pub fn has_timeline(&self, property_id: u32) -> bool {
        self.timelines.iter().any(|t| t.property_id() == property_id)
    }

    pub fn property_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.timelines.iter().map(Timeline::property_id)
    }

    /// Poses `skeleton` at `time`.
    ///
    /// `last_time` is the time this animation was last applied; events keyed in
    /// `(last_time, time]` are appended to `events`. When `looped`, both times wrap into the
    /// animation's duration (a non-positive `last_time` is left as is so the first apply can
    /// fire events keyed at `0`).
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        skeleton: &mut Skeleton,
        last_time: f32,
        time: f32,
        looped: bool,
        mut events: Option<&mut Vec<Event>>,
        alpha: f32,
        blend: MixBlend,
        direction: MixDirection,
    ) {
        let mut time = time;
        let mut last_time = last_time;
        if looped && self.duration != 0.0 {
            time %= self.duration;
            if last_time > 0.0 {
                last_time %= self.duration;
            }
        }

        for timeline in &self.timelines {
            timeline.apply(
                skeleton,
                last_time,
                time,
                events.as_deref_mut(),
                alpha,
                blend,
                direction,
            );
        }
    }

    /// Rejects data that playback assumes is well formed: empty timelines, keyframe times that
    /// are not finite or go backward, curve
    /// tables that do not match their keyframes, targets missing from `data`, deform buffers of
    /// the wrong length, draw orders that are not permutations, and two color timelines on slots
    /// without a dark color.
    pub fn validate(&self, data: &SkeletonData) -> Result<(), Error> {
        for timeline in &self.timelines {
            if let Err(err) = timeline.validate(&self.name, data) {
                log::debug!("rejecting animation '{}': {err}", self.name);
                return Err(err);
            }
        }
        Ok(())
    }
}
