use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown skin: {name}")]
    UnknownSkin { name: String },

    #[error("unknown slot: {name}")]
    UnknownSlot { name: String },

    #[error("unknown attachment '{attachment}' for slot '{slot}'")]
    UnknownAttachment { slot: String, attachment: String },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("{timeline} timeline in animation '{animation}' has no keyframes")]
    EmptyTimeline { animation: String, timeline: String },

    #[error(
        "{timeline} timeline in animation '{animation}' has keyframe {index} at time {time} before the previous keyframe at {previous}"
    )]
    UnsortedKeyframes {
        animation: String,
        timeline: String,
        index: usize,
        time: f32,
        previous: f32,
    },

    #[error(
        "{timeline} timeline in animation '{animation}' has {segments} curve segments for {frames} keyframes"
    )]
    CurveTableMismatch {
        animation: String,
        timeline: String,
        segments: usize,
        frames: usize,
    },

    #[error(
        "{timeline} timeline in animation '{animation}' targets {target} index {index}, but the skeleton has {count}"
    )]
    TargetOutOfRange {
        animation: String,
        timeline: String,
        target: String,
        index: usize,
        count: usize,
    },

    #[error(
        "deform timeline in animation '{animation}' keyframe {index} has {actual} vertex floats, expected {expected}"
    )]
    DeformVertexCount {
        animation: String,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "draw order keyframe {index} in animation '{animation}' is not a permutation of {slots} slots"
    )]
    InvalidDrawOrder {
        animation: String,
        index: usize,
        slots: usize,
    },

    #[error(
        "slot '{slot}' referenced by animation '{animation}' has a two color timeline but no setup dark color"
    )]
    TwoColorTimelineRequiresDarkSlot { animation: String, slot: String },
}
