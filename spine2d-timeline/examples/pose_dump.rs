use spine2d_timeline::{
    AttachmentData, Animation, BoneData, ColorTimeline, Event, EventData, EventTimeline, MixBlend,
    MixDirection, RegionAttachmentData, RotateTimeline, Skeleton, SkeletonData, SkinData,
    SlotData, Timeline, TranslateTimeline,
};
use std::sync::Arc;

fn region(name: &str) -> AttachmentData {
    AttachmentData::Region(RegionAttachmentData {
        name: name.to_string(),
        path: name.to_string(),
        color: [1.0; 4],
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        width: 64.0,
        height: 16.0,
    })
}

fn build_data() -> SkeletonData {
    let mut arm = BoneData::new("arm", Some(0));
    arm.x = 20.0;
    arm.rotation = 90.0;
    let mut hand = SlotData::new("hand", 1);
    hand.attachment = Some("open".to_string());

    let mut skin = SkinData::new("default", 1);
    skin.set_attachment(0, "open", region("open"));
    skin.set_attachment(0, "fist", region("fist"));

    let mut data = SkeletonData {
        bones: vec![BoneData::new("root", None), arm],
        slots: vec![hand],
        ..SkeletonData::default()
    };
    data.skins.insert("default".to_string(), skin);
    data.events.insert("wave".to_string(), EventData::new("wave"));
    data
}

fn wave_animation(data: &SkeletonData) -> Animation {
    let mut rotate = RotateTimeline::new(1, 3);
    rotate.set_frame(0, 0.0, 0.0);
    rotate.set_frame(1, 0.5, 45.0);
    rotate.set_frame(2, 1.0, 0.0);
    rotate.curves_mut().set_curve(0, 0.25, 0.0, 0.75, 1.0);

    let mut translate = TranslateTimeline::new(0, 2);
    translate.set_frame(0, 0.0, 0.0, 0.0);
    translate.set_frame(1, 1.0, 0.0, 8.0);

    let mut color = ColorTimeline::new(0, 2);
    color.set_frame(0, 0.0, [1.0, 1.0, 1.0, 1.0]);
    color.set_frame(1, 1.0, [1.0, 0.5, 0.5, 1.0]);

    let mut events = EventTimeline::new(1);
    if let Some(wave) = data.events.get("wave") {
        events.set_frame(0, Event::new(0.5, wave));
    }

    Animation::new(
        "wave",
        vec![
            Timeline::Rotate(rotate),
            Timeline::Translate(translate),
            Timeline::Color(color),
            Timeline::Event(events),
        ],
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut looped = false;
    for arg in &args {
        match arg.as_str() {
            "--loop" => looped = true,
            other => positional.push(other.to_string()),
        }
    }

    let time: f32 = positional.first().map_or(Ok(0.5), |s| s.parse())?;
    let alpha: f32 = positional.get(1).map_or(Ok(1.0), |s| s.parse())?;

    let mut data = build_data();
    let animation = wave_animation(&data);
    animation.validate(&data)?;
    data.add_animation(animation);
    let data = Arc::new(data);

    let Some((_, animation)) = data.animation("wave") else {
        return Err("animation 'wave' missing".into());
    };
    let mut skeleton = Skeleton::new(Arc::clone(&data));
    skeleton.set_time(time);

    let mut events = Vec::new();
    animation.apply(
        &mut skeleton,
        -1.0,
        time,
        looped,
        Some(&mut events),
        alpha,
        MixBlend::Setup,
        MixDirection::In,
    );

    for event in &events {
        eprintln!("event '{}' at {}", event.name, event.time);
    }
    println!("{}", skeleton.pose_snapshot().to_json_string()?);
    Ok(())
}
