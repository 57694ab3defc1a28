use sectionflow::{
    Engine, EngineOptions, InputSource, PRIMARY_LEFT, Role, SectionRegistry, SectionSpec, Target,
};

fn main() {
    // Example: a four-section presentation driven by a 60 Hz frame loop.
    //
    // A host would:
    // - translate each section container by the `Target::Section` transform
    // - apply background/overlay/element transforms to the matching layers
    // - show only the sections `is_visible` reports
    let registry = SectionRegistry::new([
        SectionSpec::new("home"),
        SectionSpec::new("circumstances").with_category("story"),
        SectionSpec::new("gallery").with_category("story"),
        SectionSpec::new("compiled").with_category("archive"),
    ])
    .expect("unique section ids");
    let mut engine = Engine::new(registry, EngineOptions::default());
    engine.subscribe(|_, change| {
        println!(
            "{:?}: {} -> {} ({:?})",
            change.phase, change.previous_id, change.current_id, change.direction
        );
    });

    let mut now_ms = 0u64;
    for _ in 0..5 {
        engine
            .request_next(InputSource::Programmatic, now_ms)
            .expect("idle engine accepts");
        loop {
            now_ms += 16;
            let Some(frame) = engine.tick(now_ms) else {
                break;
            };
            if now_ms % 320 == 0 {
                let section = frame.get(&Target::Section(Role::Incoming));
                let left = frame.get(&Target::element(Role::Incoming, PRIMARY_LEFT, 0));
                println!(
                    "t={now_ms} progress={:.2} section={section:?} left={left:?}",
                    frame.progress
                );
            }
            if frame.settled {
                break;
            }
        }
    }

    println!("current={:?}", engine.current_section().map(|s| s.id()));
}
