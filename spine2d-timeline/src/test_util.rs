use crate::{
    AttachmentData, BoneData, EventData, IkConstraintData, MeshAttachmentData, MeshVertices,
    PathConstraintData, RegionAttachmentData, SkeletonData, SkinData, SlotData,
    TransformConstraintData, VertexAttachmentData, VertexWeight,
};
use std::sync::Arc;

pub(crate) const ROOT: usize = 0;
pub(crate) const ARM: usize = 1;
pub(crate) const LEG: usize = 2;

pub(crate) const BODY_SLOT: usize = 0;
pub(crate) const MESH_SLOT: usize = 1;
pub(crate) const TINT_SLOT: usize = 2;

pub(crate) fn assert_approx(actual: f32, expected: f32) {
    assert_approx_eps(actual, expected, 1.0e-6);
}

pub(crate) fn assert_approx_eps(actual: f32, expected: f32, eps: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= eps,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

pub(crate) fn assert_slice_approx(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_approx_eps(*a, *e, 1.0e-5);
    }
}

pub(crate) fn region(name: &str) -> AttachmentData {
    AttachmentData::Region(RegionAttachmentData {
        name: name.to_string(),
        path: name.to_string(),
        color: [1.0; 4],
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        width: 32.0,
        height: 32.0,
    })
}

pub(crate) fn mesh(name: &str, vertices: MeshVertices) -> AttachmentData {
    let vertex_count = match &vertices {
        MeshVertices::Unweighted(v) => v.len(),
        MeshVertices::Weighted(v) => v.len(),
    };
    AttachmentData::Mesh(MeshAttachmentData {
        name: name.to_string(),
        path: name.to_string(),
        color: [1.0; 4],
        vertex: VertexAttachmentData::new(vertices),
        uvs: vec![[0.0, 0.0]; vertex_count],
        triangles: vec![0, 1, 2],
    })
}

/// Three bones, three slots, a default and a "red" skin, one of each constraint kind and one
/// event.
///
/// - `arm` setup: x=5, y=10, rotation=30, shear=(1, 2).
/// - `leg` setup: scale=(-1, 2).
/// - `body` slot wears region `body`; the default skin also has `body-alt`.
/// - `mesh` slot wears unweighted mesh `mesh` (3 vertices); the default skin also has weighted
///   mesh `weighted` (2 vertices, 3 influences).
/// - `tint` slot has a dark color.
pub(crate) fn rig_data() -> SkeletonData {
    let mut arm = BoneData::new("arm", Some(ROOT));
    arm.x = 5.0;
    arm.y = 10.0;
    arm.rotation = 30.0;
    arm.shear_x = 1.0;
    arm.shear_y = 2.0;
    let mut leg = BoneData::new("leg", Some(ROOT));
    leg.scale_x = -1.0;
    leg.scale_y = 2.0;

    let mut body = SlotData::new("body", ARM);
    body.attachment = Some("body".to_string());
    let mut mesh_slot = SlotData::new("mesh", ARM);
    mesh_slot.attachment = Some("mesh".to_string());
    let mut tint = SlotData::new("tint", LEG);
    tint.color = [0.5, 0.5, 0.5, 1.0];
    tint.has_dark = true;
    tint.dark_color = [0.1, 0.2, 0.3];

    let mut default_skin = SkinData::new("default", 3);
    default_skin.set_attachment(BODY_SLOT, "body", region("body"));
    default_skin.set_attachment(BODY_SLOT, "body-alt", region("body-alt"));
    default_skin.set_attachment(
        MESH_SLOT,
        "mesh",
        mesh(
            "mesh",
            MeshVertices::Unweighted(vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]]),
        ),
    );
    default_skin.set_attachment(
        MESH_SLOT,
        "weighted",
        mesh(
            "weighted",
            MeshVertices::Weighted(vec![
                vec![VertexWeight {
                    bone: ARM,
                    x: 1.0,
                    y: 1.0,
                    weight: 1.0,
                }],
                vec![
                    VertexWeight {
                        bone: ARM,
                        x: 2.0,
                        y: 0.0,
                        weight: 0.5,
                    },
                    VertexWeight {
                        bone: LEG,
                        x: 0.0,
                        y: 2.0,
                        weight: 0.5,
                    },
                ],
            ]),
        ),
    );
    let mut red_skin = SkinData::new("red", 3);
    red_skin.set_attachment(BODY_SLOT, "body", region("body-red"));

    let mut data = SkeletonData {
        bones: vec![BoneData::new("root", None), arm, leg],
        slots: vec![body, mesh_slot, tint],
        ik_constraints: vec![IkConstraintData {
            name: "aim".to_string(),
            bones: vec![ARM],
            target: LEG,
            mix: 1.0,
            softness: 0.0,
            bend_direction: 1,
            compress: false,
            stretch: false,
        }],
        transform_constraints: vec![TransformConstraintData {
            name: "follow".to_string(),
            bones: vec![LEG],
            target: ARM,
            rotate_mix: 1.0,
            translate_mix: 1.0,
            scale_mix: 0.5,
            shear_mix: 0.0,
        }],
        path_constraints: vec![PathConstraintData {
            name: "track".to_string(),
            bones: vec![ARM],
            target: BODY_SLOT,
            position: 0.0,
            spacing: 10.0,
            rotate_mix: 1.0,
            translate_mix: 1.0,
        }],
        ..SkeletonData::default()
    };
    data.skins.insert("default".to_string(), default_skin);
    data.skins.insert("red".to_string(), red_skin);
    data.events
        .insert("footstep".to_string(), EventData::new("footstep"));
    data
}

pub(crate) fn rig() -> Arc<SkeletonData> {
    Arc::new(rig_data())
}

pub(crate) fn vertex_attachment<'a>(
    data: &'a SkeletonData,
    slot_index: usize,
    name: &str,
) -> &'a VertexAttachmentData {
    data.default_skin()
        .and_then(|skin| skin.attachment(slot_index, name))
        .and_then(AttachmentData::vertex_data)
        .expect("vertex attachment in default skin")
}
