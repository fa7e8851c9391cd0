use crate::test_util::{assert_slice_approx, rig, ARM, BODY_SLOT, LEG, TINT_SLOT};
use crate::{
    AttachmentTimeline, ColorTimeline, MixBlend, MixDirection, Skeleton, Timeline,
    TwoColorTimeline,
};

fn color_timeline() -> Timeline {
    let mut timeline = ColorTimeline::new(TINT_SLOT, 2);
    timeline.set_frame(0, 1.0, [1.0, 0.0, 0.0, 1.0]);
    timeline.set_frame(1, 2.0, [0.0, 0.0, 1.0, 0.0]);
    Timeline::Color(timeline)
}

fn attachment_timeline() -> Timeline {
    let mut timeline = AttachmentTimeline::new(BODY_SLOT, 3);
    timeline.set_frame(0, 0.5, Some("body-alt"));
    timeline.set_frame(1, 1.0, None);
    timeline.set_frame(2, 2.0, Some("body"));
    Timeline::Attachment(timeline)
}

fn apply_in(timeline: &Timeline, skeleton: &mut Skeleton, time: f32, alpha: f32, blend: MixBlend) {
    timeline.apply(skeleton, -1.0, time, None, alpha, blend, MixDirection::In);
}

#[test]
fn color_with_full_alpha_writes_the_keyed_color() {
    let timeline = color_timeline();
    let mut skeleton = Skeleton::new(rig());

    apply_in(&timeline, &mut skeleton, 1.5, 1.0, MixBlend::Replace);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.5, 0.0, 0.5, 0.5]);

    apply_in(&timeline, &mut skeleton, 5.0, 1.0, MixBlend::Add);
    assert_eq!(skeleton.slots[TINT_SLOT].color, [0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn color_with_partial_alpha_mixes_from_setup_or_current() {
    let timeline = color_timeline();
    let mut skeleton = Skeleton::new(rig());

    skeleton.slots[TINT_SLOT].color = [1.0; 4];
    apply_in(&timeline, &mut skeleton, 2.0, 0.5, MixBlend::Setup);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.25, 0.25, 0.75, 0.5]);

    skeleton.slots[TINT_SLOT].color = [1.0; 4];
    apply_in(&timeline, &mut skeleton, 2.0, 0.5, MixBlend::Replace);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.5, 0.5, 1.0, 0.5]);
}

#[test]
fn color_before_first_key() {
    let timeline = color_timeline();
    let mut skeleton = Skeleton::new(rig());

    skeleton.slots[TINT_SLOT].color = [1.0; 4];
    apply_in(&timeline, &mut skeleton, 0.0, 0.5, MixBlend::Setup);
    assert_eq!(skeleton.slots[TINT_SLOT].color, [0.5, 0.5, 0.5, 1.0]);

    skeleton.slots[TINT_SLOT].color = [1.0; 4];
    apply_in(&timeline, &mut skeleton, 0.0, 0.5, MixBlend::First);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.75, 0.75, 0.75, 1.0]);

    skeleton.slots[TINT_SLOT].color = [1.0; 4];
    apply_in(&timeline, &mut skeleton, 0.0, 0.5, MixBlend::Replace);
    assert_eq!(skeleton.slots[TINT_SLOT].color, [1.0; 4]);
}

#[test]
fn two_color_drives_light_and_dark() {
    let mut timeline = TwoColorTimeline::new(TINT_SLOT, 2);
    timeline.set_frame(0, 0.0, [1.0; 4], [0.0, 0.0, 0.0]);
    timeline.set_frame(1, 1.0, [0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0]);
    let timeline = Timeline::TwoColor(timeline);
    let mut skeleton = Skeleton::new(rig());

    apply_in(&timeline, &mut skeleton, 0.5, 1.0, MixBlend::Setup);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.5, 0.5, 0.5, 1.0]);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].dark_color, &[0.5, 0.5, 0.5]);

    apply_in(&timeline, &mut skeleton, 1.0, 0.5, MixBlend::Setup);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].color, &[0.25, 0.25, 0.25, 1.0]);
    assert_slice_approx(&skeleton.slots[TINT_SLOT].dark_color, &[0.55, 0.6, 0.65]);
}

#[test]
fn color_skips_slots_on_inactive_bones() {
    let timeline = color_timeline();
    let mut skeleton = Skeleton::new(rig());
    skeleton.bones[LEG].active = false;
    skeleton.slots[TINT_SLOT].color = [0.0; 4];

    apply_in(&timeline, &mut skeleton, 1.0, 1.0, MixBlend::Setup);
    assert_eq!(skeleton.slots[TINT_SLOT].color, [0.0; 4]);
}

#[test]
fn attachment_uses_key_at_or_before_time() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());

    apply_in(&timeline, &mut skeleton, 0.5, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body-alt"));
    apply_in(&timeline, &mut skeleton, 0.99, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body-alt"));
    apply_in(&timeline, &mut skeleton, 1.5, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);
    apply_in(&timeline, &mut skeleton, 30.0, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));
}

#[test]
fn attachment_ignores_alpha() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());

    apply_in(&timeline, &mut skeleton, 0.75, 0.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body-alt"));
}

#[test]
fn attachment_mixing_out_from_setup_restores_setup_attachment() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());
    skeleton.set_slot_attachment(BODY_SLOT, Some("body-alt"));

    timeline.apply(
        &mut skeleton,
        -1.0,
        1.5,
        None,
        1.0,
        MixBlend::Setup,
        MixDirection::Out,
    );
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));

    timeline.apply(
        &mut skeleton,
        -1.0,
        1.5,
        None,
        1.0,
        MixBlend::Replace,
        MixDirection::Out,
    );
    assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);
}

#[test]
fn attachment_before_first_key() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());

    for blend in [MixBlend::Setup, MixBlend::First] {
        skeleton.set_slot_attachment(BODY_SLOT, None);
        apply_in(&timeline, &mut skeleton, 0.25, 1.0, blend);
        assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));
    }
    for blend in [MixBlend::Replace, MixBlend::Add] {
        skeleton.set_slot_attachment(BODY_SLOT, None);
        apply_in(&timeline, &mut skeleton, 0.25, 1.0, blend);
        assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);
    }
}

#[test]
fn attachment_change_records_skeleton_time() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());
    skeleton.set_time(3.0);

    apply_in(&timeline, &mut skeleton, 0.5, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_time(), 3.0);

    skeleton.set_time(4.0);
    apply_in(&timeline, &mut skeleton, 0.6, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment_time(), 3.0);
}

#[test]
fn unresolvable_attachment_key_clears_slot() {
    let mut timeline = AttachmentTimeline::new(BODY_SLOT, 1);
    timeline.set_frame(0, 0.0, Some("nowhere"));
    let timeline = Timeline::Attachment(timeline);
    let mut skeleton = Skeleton::new(rig());

    apply_in(&timeline, &mut skeleton, 0.0, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment, None);
}

#[test]
fn attachment_skips_slots_on_inactive_bones() {
    let timeline = attachment_timeline();
    let mut skeleton = Skeleton::new(rig());
    skeleton.bones[ARM].active = false;

    apply_in(&timeline, &mut skeleton, 1.5, 1.0, MixBlend::Replace);
    assert_eq!(skeleton.slots[BODY_SLOT].attachment.as_deref(), Some("body"));
}
