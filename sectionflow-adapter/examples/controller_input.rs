use sectionflow::{
    Engine, EngineOptions, Section, SectionChange, SectionRegistry, SectionSpec, Viewport,
};
use sectionflow_adapter::{Controller, InputEvent, Key, Modifiers, NavLink};

fn main() {
    // Example: a controller fed with raw host events.
    //
    // An adapter would:
    // - forward wheel/touch/pointer/key/click events to `handle`, honouring `prevent_default`
    // - call tick(now_ms) in a frame loop and apply the returned frame
    // - restyle nav links and progress dots from `nav()` / `progress()`
    let registry = SectionRegistry::new([
        SectionSpec::new("home"),
        SectionSpec::new("circumstances").with_category("story"),
        SectionSpec::new("gallery").with_category("story"),
        SectionSpec::new("compiled").with_category("archive"),
    ])
    .expect("unique section ids");
    let engine = Engine::new(
        registry,
        EngineOptions::default().with_viewport(Viewport::new(1440.0, 900.0)),
    );
    let mut c = Controller::new(engine)
        .with_nav_links([
            NavLink::new("home"),
            NavLink::new("circumstances"),
            NavLink::new("compiled"),
        ])
        .with_category_hook("story", |section: &Section, change: &SectionChange| {
            println!("story hook: entering {} via {:?}", section.id(), change.source);
        });

    let layout = c.on_resize(Viewport::new(1280.0, 720.0));
    println!("backgrounds: {layout:?}");

    let events = [
        (0, InputEvent::Wheel { delta_y: 120.0 }),
        (100, InputEvent::Wheel { delta_y: 120.0 }),
        (2_500, InputEvent::Key { key: Key::ArrowDown, modifiers: Modifiers::NONE }),
        (5_000, InputEvent::NavClick { target_id: "compiled".into() }),
        (8_000, InputEvent::Key { key: Key::Character('d'), modifiers: Modifiers::CTRL_SHIFT }),
    ];

    let mut now_ms = 0u64;
    for (at_ms, event) in events {
        while now_ms < at_ms {
            now_ms += 16;
            c.tick(now_ms);
        }
        let d = c.handle(&event, now_ms);
        println!(
            "t={now_ms} {event:?} -> {:?} prevent_default={}",
            d.outcome, d.prevent_default
        );
        println!(
            "  current={} nav={:?} dots={:?} indicator_visible={}",
            c.engine().current_index(),
            c.nav().states(),
            c.progress().dots(),
            c.progress().is_visible()
        );
    }
}
