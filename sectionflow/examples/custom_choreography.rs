use sectionflow::{
    ChoreographyPatch, Easing, Engine, EngineOptions, InputSource, LayerPatch, PRIMARY_LEFT,
    PRIMARY_RIGHT, Role, SectionRegistry, SectionSpec, Target, TimingPatch, TransformPatch,
};

fn main() {
    // Example: one section overrides the generic recipe; the rest keep it.
    let registry = SectionRegistry::new([
        SectionSpec::new("home"),
        SectionSpec::new("gallery")
            .with_overlay(true)
            .with_content_layer(PRIMARY_LEFT, 4),
    ])
    .expect("unique section ids");
    let mut engine = Engine::new(registry, EngineOptions::default());

    // Gallery tiles rise from 400px below, fully opaque, one every 80ms.
    engine.register_choreography(
        "gallery",
        &ChoreographyPatch::new()
            .layer(
                PRIMARY_LEFT,
                LayerPatch::new()
                    .enter_from(TransformPatch::new().offset_x(0.0).offset_y(400.0).opacity(1.0))
                    .enter(TimingPatch::new().stagger_ms(80).easing(Easing::Power2Out)),
            )
            .layer(
                PRIMARY_RIGHT,
                LayerPatch::new().enter_from(TransformPatch::new().scale(0.8)),
            ),
    );

    engine
        .request_go_to_id("gallery", InputSource::Programmatic, 0)
        .expect("idle engine accepts");
    let timeline = engine.timeline().expect("transition in flight");
    println!("duration={}ms tracks={}", timeline.duration_ms(), timeline.len());
    for track in timeline.tracks() {
        if track.target.role() == Role::Incoming {
            println!(
                "{:?} start={} from={:?}",
                track.target, track.tween.start_ms, track.tween.from
            );
        }
    }

    let frame = engine.finish().expect("transition in flight");
    println!(
        "settled={} overlay={:?}",
        frame.settled,
        frame.get(&Target::Overlay(Role::Incoming))
    );
}
