use crate::{AttachmentData, Error, SkeletonData, DEFAULT_SKIN};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Bone {
    data_index: usize,
    parent: Option<usize>,

    pub active: bool,

    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
}

impl Bone {
    pub fn data_index(&self) -> usize {
        self.data_index
    }

    pub fn parent_index(&self) -> Option<usize> {
        self.parent
    }
}

#[derive(Clone, Debug)]
pub struct Slot {
    data_index: usize,
    pub bone: usize,
    pub attachment: Option<String>,
    /// Skin the current attachment was resolved from.
    pub(crate) attachment_skin: Option<String>,
    attachment_time: f32,
    /// Deform scratch buffer. Timelines resize it to the attachment's deform length; an empty
    /// buffer means the attachment is undeformed.
    pub deform: Vec<f32>,
    pub color: [f32; 4],
    pub has_dark: bool,
    pub dark_color: [f32; 3],
}

impl Slot {
    pub fn data_index(&self) -> usize {
        self.data_index
    }

    pub fn attachment_skin(&self) -> Option<&str> {
        self.attachment_skin.as_deref()
    }

    /// Skeleton time at which the current attachment was set.
    pub fn attachment_time(&self) -> f32 {
        self.attachment_time
    }

    fn set_attachment(&mut self, key: Option<String>, skin: Option<String>, time: f32) {
        if self.attachment == key && self.attachment_skin == skin {
            return;
        }
        self.attachment = key;
        self.attachment_skin = skin;
        self.attachment_time = time;
        self.deform.clear();
    }
}

#[derive(Clone, Debug)]
pub struct IkConstraint {
    data_index: usize,
    pub bones: Vec<usize>,
    pub target: usize,
    pub mix: f32,
    pub softness: f32,
    pub bend_direction: i32,
    pub compress: bool,
    pub stretch: bool,
    pub active: bool,
}

impl IkConstraint {
    pub fn data_index(&self) -> usize {
        self.data_index
    }
}

#[derive(Clone, Debug)]
pub struct TransformConstraint {
    data_index: usize,
    pub bones: Vec<usize>,
    pub target: usize,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
    pub active: bool,
}

impl TransformConstraint {
    pub fn data_index(&self) -> usize {
        self.data_index
    }
}

#[derive(Clone, Debug)]
pub struct PathConstraint {
    data_index: usize,
    pub bones: Vec<usize>,
    pub target: usize, // slot index
    pub position: f32,
    pub spacing: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub active: bool,
}

impl PathConstraint {
    pub fn data_index(&self) -> usize {
        self.data_index
    }
}

/// Mutable pose state for one instance of a [`SkeletonData`].
///
/// Timelines write local bone transforms, slot state, draw order and constraint values here.
/// World transforms and constraint solving belong to whoever consumes this state.
#[derive(Clone, Debug)]
pub struct Skeleton {
    pub data: Arc<SkeletonData>,
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    /// Draw position -> slot index.
    pub draw_order: Vec<usize>,
    pub skin: Option<String>,
    pub ik_constraints: Vec<IkConstraint>,
    pub transform_constraints: Vec<TransformConstraint>,
    pub path_constraints: Vec<PathConstraint>,
    time: f32,
}

impl Skeleton {
    pub fn new(data: Arc<SkeletonData>) -> Self {
        let bones = data
            .bones
            .iter()
            .enumerate()
            .map(|(data_index, bone)| Bone {
                data_index,
                parent: bone.parent,
                active: true,
                x: bone.x,
                y: bone.y,
                rotation: bone.rotation,
                scale_x: bone.scale_x,
                scale_y: bone.scale_y,
                shear_x: bone.shear_x,
                shear_y: bone.shear_y,
            })
            .collect();

        let slots = data
            .slots
            .iter()
            .enumerate()
            .map(|(data_index, slot)| Slot {
                data_index,
                bone: slot.bone,
                attachment: None,
                attachment_skin: None,
                attachment_time: 0.0,
                deform: Vec::new(),
                color: slot.color,
                has_dark: slot.has_dark,
                dark_color: slot.dark_color,
            })
            .collect();

        let ik_constraints = data
            .ik_constraints
            .iter()
            .enumerate()
            .map(|(data_index, c)| IkConstraint {
                data_index,
                bones: c.bones.clone(),
                target: c.target,
                mix: c.mix,
                softness: c.softness,
                bend_direction: c.bend_direction,
                compress: c.compress,
                stretch: c.stretch,
                active: true,
            })
            .collect();

        let transform_constraints = data
            .transform_constraints
            .iter()
            .enumerate()
            .map(|(data_index, c)| TransformConstraint {
                data_index,
                bones: c.bones.clone(),
                target: c.target,
                rotate_mix: c.rotate_mix,
                translate_mix: c.translate_mix,
                scale_mix: c.scale_mix,
                shear_mix: c.shear_mix,
                active: true,
            })
            .collect();

        let path_constraints = data
            .path_constraints
            .iter()
            .enumerate()
            .map(|(data_index, c)| PathConstraint {
                data_index,
                bones: c.bones.clone(),
                target: c.target,
                position: c.position,
                spacing: c.spacing,
                rotate_mix: c.rotate_mix,
                translate_mix: c.translate_mix,
                active: true,
            })
            .collect();

        let mut skeleton = Self {
            draw_order: (0..data.slots.len()).collect(),
            data,
            bones,
            slots,
            skin: None,
            ik_constraints,
            transform_constraints,
            path_constraints,
            time: 0.0,
        };
        skeleton.set_slots_to_setup_pose();
        skeleton
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn update(&mut self, delta: f32) {
        if delta.is_finite() && delta >= 0.0 {
            self.time += delta;
        }
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.data.bones.iter().position(|b| b.name == name)
    }

    pub fn find_slot(&self, name: &str) -> Option<usize> {
        self.data.slots.iter().position(|s| s.name == name)
    }

    pub fn set_to_setup_pose(&mut self) {
        self.set_bones_to_setup_pose();
        self.set_slots_to_setup_pose();
    }

    /// Resets bone locals and every constraint value to the setup pose.
    pub fn set_bones_to_setup_pose(&mut self) {
        for bone in &mut self.bones {
            let Some(data) = self.data.bones.get(bone.data_index) else {
                continue;
            };
            bone.x = data.x;
            bone.y = data.y;
            bone.rotation = data.rotation;
            bone.scale_x = data.scale_x;
            bone.scale_y = data.scale_y;
            bone.shear_x = data.shear_x;
            bone.shear_y = data.shear_y;
        }

        for ik in &mut self.ik_constraints {
            if let Some(data) = self.data.ik_constraints.get(ik.data_index) {
                ik.mix = data.mix;
                ik.softness = data.softness;
                ik.bend_direction = data.bend_direction;
                ik.compress = data.compress;
                ik.stretch = data.stretch;
            }
        }

        for c in &mut self.transform_constraints {
            if let Some(data) = self.data.transform_constraints.get(c.data_index) {
                c.rotate_mix = data.rotate_mix;
                c.translate_mix = data.translate_mix;
                c.scale_mix = data.scale_mix;
                c.shear_mix = data.shear_mix;
            }
        }

        for c in &mut self.path_constraints {
            if let Some(data) = self.data.path_constraints.get(c.data_index) {
                c.position = data.position;
                c.spacing = data.spacing;
                c.rotate_mix = data.rotate_mix;
                c.translate_mix = data.translate_mix;
            }
        }
    }

    /// Restores the setup draw order, slot colors and setup attachments.
    pub fn set_slots_to_setup_pose(&mut self) {
        self.draw_order.clear();
        self.draw_order.extend(0..self.slots.len());

        for slot_index in 0..self.slots.len() {
            let Some(data) = self.data.slots.get(slot_index) else {
                continue;
            };
            let resolved = data.attachment.as_deref().and_then(|name| {
                self.resolve_attachment_skin(slot_index, name)
                    .map(|skin| (name.to_string(), skin))
            });
            let time = self.time;
            let slot = &mut self.slots[slot_index];
            slot.color = data.color;
            slot.has_dark = data.has_dark;
            slot.dark_color = data.dark_color;
            match resolved {
                // A setup attachment is always re-attached, even when it is already current.
                Some((key, skin)) => {
                    slot.attachment = Some(key);
                    slot.attachment_skin = Some(skin);
                    slot.attachment_time = time;
                    slot.deform.clear();
                }
                None => slot.set_attachment(None, None, time),
            }
        }
    }

    /// Sets the active skin. Attachments from the previous skin are replaced by same-named
    /// attachments of the new skin; with no previous skin, setup attachments found in the new
    /// skin are attached.
    pub fn set_skin(&mut self, skin_name: Option<&str>) -> Result<(), Error> {
        if self.skin.as_deref() == skin_name {
            return Ok(());
        }
        let Some(name) = skin_name else {
            log::trace!("clearing skin {:?}", self.skin);
            self.skin = None;
            return Ok(());
        };
        let data = Arc::clone(&self.data);
        let Some(new_skin) = data.skin(name) else {
            log::warn!("unknown skin '{name}'");
            return Err(Error::UnknownSkin {
                name: name.to_string(),
            });
        };
        log::trace!("changing skin {:?} -> '{name}'", self.skin);

        let time = self.time;
        match self.skin.take() {
            Some(old_skin_name) => {
                for (slot_index, slot) in self.slots.iter_mut().enumerate() {
                    if slot.attachment_skin.as_deref() != Some(old_skin_name.as_str()) {
                        continue;
                    }
                    let Some(key) = slot.attachment.clone() else {
                        continue;
                    };
                    if new_skin.attachment(slot_index, &key).is_some() {
                        slot.set_attachment(Some(key), Some(name.to_string()), time);
                    }
                }
            }
            None => {
                for (slot_index, slot) in self.slots.iter_mut().enumerate() {
                    let Some(setup_name) = data
                        .slots
                        .get(slot_index)
                        .and_then(|s| s.attachment.as_deref())
                    else {
                        continue;
                    };
                    if new_skin.attachment(slot_index, setup_name).is_some() {
                        slot.set_attachment(
                            Some(setup_name.to_string()),
                            Some(name.to_string()),
                            time,
                        );
                    }
                }
            }
        }

        self.skin = Some(name.to_string());
        Ok(())
    }

    /// Looks an attachment up in the active skin, then in the default skin.
    pub fn attachment(&self, slot_index: usize, attachment_name: &str) -> Option<&AttachmentData> {
        let skin = self.resolve_attachment_skin(slot_index, attachment_name)?;
        self.data.skin(&skin)?.attachment(slot_index, attachment_name)
    }

    pub(crate) fn resolve_attachment_skin(
        &self,
        slot_index: usize,
        attachment_name: &str,
    ) -> Option<String> {
        if let Some(skin_name) = self.skin.as_deref() {
            let found = self
                .data
                .skin(skin_name)
                .and_then(|s| s.attachment(slot_index, attachment_name));
            if found.is_some() {
                return Some(skin_name.to_string());
            }
        }
        self.data
            .default_skin()
            .and_then(|s| s.attachment(slot_index, attachment_name))
            .map(|_| DEFAULT_SKIN.to_string())
    }

    /// Sets a slot's attachment by name. `None` clears the slot.
    pub fn set_attachment(
        &mut self,
        slot_name: &str,
        attachment_name: Option<&str>,
    ) -> Result<(), Error> {
        let Some(slot_index) = self.find_slot(slot_name) else {
            log::warn!("unknown slot '{slot_name}'");
            return Err(Error::UnknownSlot {
                name: slot_name.to_string(),
            });
        };
        if let Some(name) = attachment_name {
            if self.resolve_attachment_skin(slot_index, name).is_none() {
                log::warn!("unknown attachment '{name}' for slot '{slot_name}'");
                return Err(Error::UnknownAttachment {
                    slot: slot_name.to_string(),
                    attachment: name.to_string(),
                });
            }
        }
        self.set_slot_attachment(slot_index, attachment_name);
        Ok(())
    }

    /// Sets a slot's attachment by name, clearing the slot when the name does not resolve.
    pub(crate) fn set_slot_attachment(&mut self, slot_index: usize, attachment_name: Option<&str>) {
        let resolved = attachment_name.and_then(|name| {
            self.resolve_attachment_skin(slot_index, name)
                .map(|skin| (name.to_string(), skin))
        });
        let time = self.time;
        let Some(slot) = self.slots.get_mut(slot_index) else {
            return;
        };
        match resolved {
            Some((key, skin)) => slot.set_attachment(Some(key), Some(skin), time),
            None => slot.set_attachment(None, None, time),
        }
    }

    pub fn slot_attachment_data(&self, slot_index: usize) -> Option<&AttachmentData> {
        let slot = self.slots.get(slot_index)?;
        let key = slot.attachment.as_deref()?;
        if let Some(skin) = slot.attachment_skin.as_deref().and_then(|n| self.data.skin(n)) {
            if let Some(att) = skin.attachment(slot_index, key) {
                return Some(att);
            }
        }
        self.attachment(slot_index, key)
    }

    /// Whether timelines targeting `slot_index` should run.
    pub(crate) fn slot_active(&self, slot_index: usize) -> bool {
        self.slots
            .get(slot_index)
            .and_then(|s| self.bones.get(s.bone))
            .is_some_and(|b| b.active)
    }
}
