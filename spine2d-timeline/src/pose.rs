//! Serializable dump of a posed skeleton, for debugging and golden comparisons.

use crate::Skeleton;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseSnapshot {
    pub time: f32,
    pub skin: Option<String>,
    pub bones: Vec<BonePose>,
    pub slots: Vec<SlotPose>,
    pub draw_order: Vec<usize>,
    pub ik_constraints: Vec<IkConstraintPose>,
    pub transform_constraints: Vec<TransformConstraintPose>,
    pub path_constraints: Vec<PathConstraintPose>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonePose {
    pub name: String,
    pub active: bool,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPose {
    pub name: String,
    pub color: [f32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_color: Option<[f32; 3]>,
    pub attachment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deform: Vec<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IkConstraintPose {
    pub name: String,
    pub mix: f32,
    pub softness: f32,
    pub bend_direction: i32,
    pub compress: bool,
    pub stretch: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConstraintPose {
    pub name: String,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConstraintPose {
    pub name: String,
    pub position: f32,
    pub spacing: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
}

impl PoseSnapshot {
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Skeleton {
    pub fn pose_snapshot(&self) -> PoseSnapshot {
        let data = &self.data;
        let name_or = |name: Option<&String>| name.cloned().unwrap_or_default();

        PoseSnapshot {
            time: self.time(),
            skin: self.skin.clone(),
            bones: self
                .bones
                .iter()
                .map(|b| BonePose {
                    name: name_or(data.bones.get(b.data_index()).map(|d| &d.name)),
                    active: b.active,
                    x: b.x,
                    y: b.y,
                    rotation: b.rotation,
                    scale_x: b.scale_x,
                    scale_y: b.scale_y,
                    shear_x: b.shear_x,
                    shear_y: b.shear_y,
                })
                .collect(),
            slots: self
                .slots
                .iter()
                .map(|s| SlotPose {
                    name: name_or(data.slots.get(s.data_index()).map(|d| &d.name)),
                    color: s.color,
                    dark_color: s.has_dark.then_some(s.dark_color),
                    attachment: s.attachment.clone(),
                    deform: s.deform.clone(),
                })
                .collect(),
            draw_order: self.draw_order.clone(),
            ik_constraints: self
                .ik_constraints
                .iter()
                .map(|c| IkConstraintPose {
                    name: name_or(data.ik_constraints.get(c.data_index()).map(|d| &d.name)),
                    mix: c.mix,
                    softness: c.softness,
                    bend_direction: c.bend_direction,
                    compress: c.compress,
                    stretch: c.stretch,
                })
                .collect(),
            transform_constraints: self
                .transform_constraints
                .iter()
                .map(|c| TransformConstraintPose {
                    name: name_or(
                        data.transform_constraints
                            .get(c.data_index())
                            .map(|d| &d.name),
                    ),
                    rotate_mix: c.rotate_mix,
                    translate_mix: c.translate_mix,
                    scale_mix: c.scale_mix,
                    shear_mix: c.shear_mix,
                })
                .collect(),
            path_constraints: self
                .path_constraints
                .iter()
                .map(|c| PathConstraintPose {
                    name: name_or(data.path_constraints.get(c.data_index()).map(|d| &d.name)),
                    position: c.position,
                    spacing: c.spacing,
                    rotate_mix: c.rotate_mix,
                    translate_mix: c.translate_mix,
                })
                .collect(),
        }
    }
}
