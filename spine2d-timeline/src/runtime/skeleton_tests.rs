use crate::test_util::{rig, rig_data, ARM, BODY_SLOT, LEG, MESH_SLOT, TINT_SLOT};
use crate::{AttachmentData, Error, Skeleton};
use std::sync::Arc;

#[test]
fn new_skeleton_starts_in_setup_pose() {
    let skeleton = Skeleton::new(rig());
    assert_eq!(skeleton.bones.len(), 3);
    assert_eq!(skeleton.bones[ARM].x, 5.0);
    assert_eq!(skeleton.bones[ARM].rotation, 30.0);
    assert_eq!(skeleton.bones[ARM].parent_index(), Some(0));
    assert_eq!(skeleton.bones[LEG].scale_x, -1.0);
    assert_eq!(skeleton.draw_order, vec![0, 1, 2]);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_skin(), Some("default"));
    assert_eq!(skeleton.slots[MESH_SLOT].attachment.as_deref(), Some("mesh"));
    assert_eq!(skeleton.slots[TINT_SLOT].attachment, None);
    assert_eq!(skeleton.slots[TINT_SLOT].dark_color, [0.1, 0.2, 0.3]);
    assert_eq!(skeleton.ik_constraints[0].bend_direction, 1);
    assert_eq!(skeleton.path_constraints[0].spacing, 10.0);
}

#[test]
fn set_to_setup_pose_restores_everything() {
    let mut skeleton = Skeleton::new(rig());
    skeleton.bones[ARM].x = 100.0;
    skeleton.bones[LEG].scale_y = 7.0;
    skeleton.slots[TINT_SLOT].color = [0.0; 4];
    skeleton.slots[MESH_SLOT].deform = vec![1.0; 6];
    skeleton.draw_order = vec![2, 1, 0];
    skeleton.ik_constraints[0].mix = 0.0;
    skeleton.ik_constraints[0].stretch = true;
    skeleton.transform_constraints[0].scale_mix = 0.0;
    skeleton.path_constraints[0].position = 3.0;
    skeleton
        .set_attachment("body", Some("body-alt"))
        .expect("attachment exists");

    skeleton.set_to_setup_pose();

    assert_eq!(skeleton.bones[ARM].x, 5.0);
    assert_eq!(skeleton.bones[LEG].scale_y, 2.0);
    assert_eq!(skeleton.slots[TINT_SLOT].color, [0.5, 0.5, 0.5, 1.0]);
    assert!(skeleton.slots[MESH_SLOT].deform.is_empty());
    assert_eq!(skeleton.draw_order, vec![0, 1, 2]);
    assert_eq!(skeleton.ik_constraints[0].mix, 1.0);
    assert!(!skeleton.ik_constraints[0].stretch);
    assert_eq!(skeleton.transform_constraints[0].scale_mix, 0.5);
    assert_eq!(skeleton.path_constraints[0].position, 0.0);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));
}

#[test]
fn bones_and_slots_reset_independently() {
    let mut skeleton = Skeleton::new(rig());
    skeleton.bones[ARM].y = -1.0;
    skeleton.draw_order = vec![1, 0, 2];

    skeleton.set_bones_to_setup_pose();
    assert_eq!(skeleton.bones[ARM].y, 10.0);
    assert_eq!(skeleton.draw_order, vec![1, 0, 2]);

    skeleton.bones[ARM].y = -1.0;
    skeleton.set_slots_to_setup_pose();
    assert_eq!(skeleton.bones[ARM].y, -1.0);
    assert_eq!(skeleton.draw_order, vec![0, 1, 2]);
}

#[test]
fn find_bone_and_slot_by_name() {
    let skeleton = Skeleton::new(rig());
    assert_eq!(skeleton.find_bone("leg"), Some(LEG));
    assert_eq!(skeleton.find_bone("tail"), None);
    assert_eq!(skeleton.find_slot("tint"), Some(TINT_SLOT));
    assert_eq!(skeleton.find_slot("hat"), None);
}

#[test]
fn attachment_lookup_falls_back_to_default_skin() {
    let mut skeleton = Skeleton::new(rig());
    skeleton.set_skin(Some("red")).expect("skin exists");

    let Some(AttachmentData::Region(body)) = skeleton.attachment(BODY_SLOT, "body") else {
        panic!("expected region");
    };
    assert_eq!(body.path, "body-red");
    let alt = skeleton.attachment(BODY_SLOT, "body-alt").expect("default skin");
    assert_eq!(alt.name(), "body-alt");
    assert!(skeleton.attachment(BODY_SLOT, "missing").is_none());
    assert!(skeleton.attachment(9, "body").is_none());
}

#[test]
fn set_skin_without_previous_skin_attaches_setup_names() {
    let mut skeleton = Skeleton::new(rig());
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_skin(), Some("default"));

    skeleton.set_skin(Some("red")).expect("skin exists");
    assert_eq!(skeleton.skin.as_deref(), Some("red"));
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_skin(), Some("red"));
    let Some(AttachmentData::Region(body)) = skeleton.slot_attachment_data(BODY_SLOT) else {
        panic!("expected region");
    };
    assert_eq!(body.path, "body-red");
    // No "mesh" entry in the red skin, so the default one stays.
    assert_eq!(skeleton.slots[MESH_SLOT].attachment_skin(), Some("default"));
}

#[test]
fn set_skin_swaps_attachments_from_previous_skin() {
    let mut data = rig_data();
    let mut blue = crate::SkinData::new("blue", 3);
    blue.set_attachment(BODY_SLOT, "body", crate::test_util::region("body-blue"));
    data.skins.insert("blue".to_string(), blue);
    let mut skeleton = Skeleton::new(Arc::new(data));

    skeleton.set_skin(Some("red")).expect("skin exists");
    skeleton.set_skin(Some("blue")).expect("skin exists");
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_skin(), Some("blue"));

    skeleton.set_skin(None).expect("clearing never fails");
    assert_eq!(skeleton.skin, None);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_skin(), Some("blue"));
}

#[test]
fn set_skin_rejects_unknown_names() {
    let mut skeleton = Skeleton::new(rig());
    let err = skeleton.set_skin(Some("green")).unwrap_err();
    assert!(matches!(err, Error::UnknownSkin { ref name } if name == "green"));
    assert_eq!(skeleton.skin, None);
}

#[test]
fn set_attachment_by_name() {
    let mut skeleton = Skeleton::new(rig());
    skeleton
        .set_attachment("body", Some("body-alt"))
        .expect("attachment exists");
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body-alt"));

    skeleton.set_attachment("body", None).expect("clearing works");
    assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);

    let err = skeleton.set_attachment("hat", Some("body")).unwrap_err();
    assert!(matches!(err, Error::UnknownSlot { .. }));
    let err = skeleton.set_attachment("body", Some("missing")).unwrap_err();
    assert!(matches!(err, Error::UnknownAttachment { .. }));
    assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);
}

#[test]
fn changing_attachment_records_time_and_clears_deform() {
    let mut skeleton = Skeleton::new(rig());
    skeleton.update(0.75);
    skeleton.slots[MESH_SLOT].deform = vec![1.0; 6];

    skeleton.set_attachment("mesh", Some("mesh")).expect("same");
    assert_eq!(skeleton.slots[MESH_SLOT].deform.len(), 6);
    assert_eq!(skeleton.slots[MESH_SLOT].attachment_time(), 0.0);

    skeleton
        .set_attachment("mesh", Some("weighted"))
        .expect("attachment exists");
    assert!(skeleton.slots[MESH_SLOT].deform.is_empty());
    assert!(skeleton.slots[MESH_SLOT].deform.capacity() >= 6);
    assert_eq!(skeleton.slots[MESH_SLOT].attachment_time(), 0.75);
}

#[test]
fn update_advances_time() {
    let mut skeleton = Skeleton::new(rig());
    skeleton.update(0.5);
    skeleton.update(0.25);
    skeleton.update(-1.0);
    skeleton.update(f32::NAN);
    assert_eq!(skeleton.time(), 0.75);
    skeleton.set_time(2.0);
    assert_eq!(skeleton.time(), 2.0);
}
