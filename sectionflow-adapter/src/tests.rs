use crate::*;

use std::format;
use std::string::{String, ToString};
use std::sync::{Arc, Mutex};
use std::vec;
use std::vec::Vec;

use sectionflow::{
    Direction, Engine, EngineOptions, Error, InputSource, Section, SectionChange,
    SectionRegistry, SectionSpec,
};

fn registry() -> SectionRegistry {
    SectionRegistry::new([
        SectionSpec::new("home"),
        SectionSpec::new("circumstances").with_category("story"),
        SectionSpec::new("gallery").with_category("story"),
        SectionSpec::new("compiled").with_category("archive"),
    ])
    .unwrap()
}

fn controller(reduced_motion: bool) -> Controller {
    let engine = Engine::new(
        registry(),
        EngineOptions::default().with_reduced_motion(reduced_motion),
    );
    Controller::new(engine).with_nav_links([
        NavLink::new("home"),
        NavLink::new("circumstances").with_label("Circumstances"),
        NavLink::new("compiled"),
    ])
}

fn wheel(delta_y: f32) -> InputEvent {
    InputEvent::Wheel { delta_y }
}

fn key(key: Key) -> InputEvent {
    InputEvent::Key {
        key,
        modifiers: Modifiers::NONE,
    }
}

fn click(target_id: &str) -> InputEvent {
    InputEvent::NavClick {
        target_id: target_id.to_string(),
    }
}

#[test]
fn wheel_within_cooldown_is_dropped() {
    let mut c = controller(true);

    let first = c.handle(&wheel(120.0), 0);
    assert!(first.is_navigation());
    assert!(first.prevent_default);
    assert_eq!(c.engine().current_index(), 1);

    let second = c.handle(&wheel(120.0), 200);
    assert_eq!(second.outcome, InputOutcome::Ignored(IgnoreReason::Debounced));
    assert!(second.prevent_default);
    assert_eq!(c.engine().current_index(), 1);

    let third = c.handle(&wheel(120.0), 500);
    assert!(third.is_navigation());
    assert_eq!(c.engine().current_index(), 2);
    assert_eq!(c.input().last_accepted_ms(), Some(500));
}

#[test]
fn wheel_direction_and_threshold() {
    let mut c = controller(true);
    assert_eq!(
        c.handle(&wheel(0.5), 0).outcome,
        InputOutcome::Ignored(IgnoreReason::BelowThreshold)
    );
    assert_eq!(
        c.handle(&wheel(-1.0), 0).outcome,
        InputOutcome::Ignored(IgnoreReason::BelowThreshold)
    );

    let up = c.handle(&wheel(-3.0), 0).transition().unwrap();
    assert_eq!((up.from, up.to, up.direction), (0, 3, Direction::Up));
    assert_eq!(up.source, InputSource::Wheel);
}

#[test]
fn busy_rejection_does_not_restart_cooldown() {
    let mut c = controller(false);
    assert!(c.handle(&wheel(10.0), 0).is_navigation());
    assert_eq!(
        c.handle(&wheel(10.0), 600).outcome,
        InputOutcome::Rejected(Error::Busy)
    );
    assert_eq!(c.input().last_accepted_ms(), Some(0));
    assert_eq!(c.engine().target_index(), Some(1));

    let frame = c.finish().unwrap();
    assert!(frame.settled);
    assert!(c.handle(&wheel(10.0), 700).is_navigation());
}

#[test]
fn touch_swipes_are_not_debounced() {
    let mut c = controller(true);

    c.handle(&InputEvent::TouchStart { y: 500.0 }, 0);
    let up = c.handle(&InputEvent::TouchEnd { y: 440.0 }, 0);
    assert_eq!(up.transition().unwrap().direction, Direction::Down);
    assert_eq!(up.transition().unwrap().source, InputSource::Touch);

    c.handle(&InputEvent::TouchStart { y: 300.0 }, 10);
    let down = c.handle(&InputEvent::TouchEnd { y: 380.0 }, 10);
    assert_eq!(down.transition().unwrap().direction, Direction::Up);
    assert_eq!(c.engine().current_index(), 0);

    c.handle(&InputEvent::TouchStart { y: 300.0 }, 20);
    assert_eq!(
        c.handle(&InputEvent::TouchEnd { y: 280.0 }, 20).outcome,
        InputOutcome::Ignored(IgnoreReason::BelowThreshold)
    );
    assert_eq!(
        c.handle(&InputEvent::TouchEnd { y: 0.0 }, 30).outcome,
        InputOutcome::Ignored(IgnoreReason::NoGesture)
    );
}

#[test]
fn drag_fires_once_per_press() {
    let mut c = controller(true);
    c.handle(&InputEvent::PointerDown { y: 400.0 }, 0);
    assert_eq!(
        c.handle(&InputEvent::PointerMove { y: 350.0 }, 0).outcome,
        InputOutcome::Ignored(IgnoreReason::BelowThreshold)
    );
    let fired = c.handle(&InputEvent::PointerMove { y: 250.0 }, 0);
    let t = fired.transition().unwrap();
    assert_eq!((t.to, t.direction, t.source), (1, Direction::Down, InputSource::Drag));

    assert_eq!(
        c.handle(&InputEvent::PointerMove { y: 0.0 }, 10).outcome,
        InputOutcome::Ignored(IgnoreReason::NoGesture)
    );
    c.handle(&InputEvent::PointerUp, 20);

    c.handle(&InputEvent::PointerDown { y: 100.0 }, 30);
    c.handle(&InputEvent::PointerUp, 30);
    assert_eq!(
        c.handle(&InputEvent::PointerMove { y: 400.0 }, 40).outcome,
        InputOutcome::Ignored(IgnoreReason::NoGesture)
    );
    assert_eq!(c.engine().current_index(), 1);
}

#[test]
fn keys_map_to_next_and_previous() {
    let mut c = controller(true).with_input_config(InputConfig::new().with_debounce_ms(0));
    assert_eq!(c.handle(&key(Key::ArrowDown), 0).transition().unwrap().to, 1);
    assert_eq!(c.handle(&key(Key::Space), 10).transition().unwrap().to, 2);
    assert_eq!(c.handle(&key(Key::PageDown), 20).transition().unwrap().to, 3);
    let t = c.handle(&key(Key::PageUp), 30).transition().unwrap();
    assert_eq!((t.to, t.direction, t.source), (2, Direction::Up, InputSource::Key));
    assert_eq!(c.handle(&key(Key::ArrowUp), 40).transition().unwrap().to, 1);

    let other = c.handle(&key(Key::Character('x')), 50);
    assert_eq!(other.outcome, InputOutcome::Ignored(IgnoreReason::UnmappedKey));
    assert!(!other.prevent_default);
}

#[test]
fn keys_share_the_wheel_cooldown() {
    let mut c = controller(true);
    assert!(c.handle(&wheel(5.0), 0).is_navigation());
    assert_eq!(
        c.handle(&key(Key::ArrowDown), 100).outcome,
        InputOutcome::Ignored(IgnoreReason::Debounced)
    );
}

#[test]
fn ctrl_shift_d_toggles_progress_indicator() {
    let mut c = controller(true).with_input_config(InputConfig::new().with_keyboard(false));
    assert!(c.progress().is_visible());

    let toggle = InputEvent::Key {
        key: Key::Character('D'),
        modifiers: Modifiers::CTRL_SHIFT,
    };
    let d = c.handle(&toggle, 0);
    assert_eq!(d.outcome, InputOutcome::ToggleIndicator);
    assert!(d.prevent_default);
    assert!(!c.progress().is_visible());
    c.handle(&toggle, 0);
    assert!(c.progress().is_visible());

    assert_eq!(
        c.handle(&key(Key::ArrowDown), 0).outcome,
        InputOutcome::Ignored(IgnoreReason::Disabled)
    );
}

#[test]
fn key_names() {
    assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
    assert_eq!(Key::from_name("PageUp"), Key::PageUp);
    assert_eq!(Key::from_name(" "), Key::Space);
    assert_eq!(Key::from_name("d"), Key::Character('d'));
    assert_eq!(Key::from_name("Escape"), Key::Other);
}

#[test]
fn nav_clicks_jump_directly() {
    let mut c = controller(false);
    let d = c.handle(&click("compiled"), 0);
    assert!(d.prevent_default);
    let t = d.transition().unwrap();
    assert_eq!((t.from, t.to, t.direction), (0, 3, Direction::Down));
    assert_eq!(t.source, InputSource::Click);
    c.finish();

    let back = c.handle(&click("circumstances"), 10).transition().unwrap();
    assert_eq!(back.direction, Direction::Up);
    c.finish();

    // Clicking the link of the current section changes nothing.
    let same = c.handle(&click("circumstances"), 20);
    assert_eq!(same.outcome, InputOutcome::Ignored(IgnoreReason::AlreadyActive));
    assert!(same.prevent_default);
    assert!(!c.engine().is_busy());

    let unknown = c.handle(&click("elsewhere"), 30);
    assert_eq!(unknown.outcome, InputOutcome::Ignored(IgnoreReason::UnknownTarget));
    assert!(!unknown.prevent_default);
}

#[test]
fn programmatic_jumps_bypass_the_cooldown() {
    let mut c = controller(true);
    assert!(c.handle(&wheel(5.0), 0).is_navigation());
    let t = c
        .handle(&InputEvent::JumpToIndex { index: 3 }, 10)
        .transition()
        .unwrap();
    assert_eq!(t.source, InputSource::Programmatic);
    let t = c
        .handle(
            &InputEvent::JumpTo {
                target_id: "home".to_string(),
            },
            20,
        )
        .transition()
        .unwrap();
    assert_eq!((t.to, t.direction), (0, Direction::Up));

    assert_eq!(
        c.handle(
            &InputEvent::JumpTo {
                target_id: "nowhere".to_string(),
            },
            30,
        )
        .outcome,
        InputOutcome::Rejected(Error::UnknownSection("nowhere".to_string()))
    );
    assert_eq!(
        c.handle(&InputEvent::JumpToIndex { index: 9 }, 40).outcome,
        InputOutcome::Rejected(Error::IndexOutOfRange { index: 9, count: 4 })
    );
}

#[test]
fn single_section_ignores_everything() {
    let engine = Engine::new(
        SectionRegistry::new(["only"]).unwrap(),
        EngineOptions::default(),
    );
    let mut c = Controller::new(engine);
    for event in [
        wheel(100.0),
        key(Key::ArrowDown),
        click("only"),
        InputEvent::JumpToIndex { index: 0 },
    ] {
        assert_eq!(
            c.handle(&event, 0).outcome,
            InputOutcome::Ignored(IgnoreReason::NotEnoughSections)
        );
    }
    assert!(!c.engine().is_busy());
}

#[test]
fn nav_highlight_follows_category_rules() {
    let mut c = controller(false);
    assert_eq!(c.nav().active(), Some(0));
    assert_eq!(
        c.nav().states(),
        &[
            NavLinkState::Active,
            NavLinkState::Inactive,
            NavLinkState::Inactive
        ]
    );

    // Cross-category: underline animates between entries while the transition runs.
    c.handle(&click("circumstances"), 0);
    assert_eq!(
        c.nav().states(),
        &[
            NavLinkState::AnimatingOut,
            NavLinkState::AnimatingIn,
            NavLinkState::Inactive
        ]
    );
    c.finish();
    assert_eq!(c.nav().active(), Some(1));
    assert_eq!(c.nav().state(1), Some(NavLinkState::Active));
    assert_eq!(c.nav().state(0), Some(NavLinkState::Inactive));

    // Same category: the highlight stays even though `gallery` has no entry.
    c.handle(&click("gallery"), 10);
    assert_eq!(c.nav().state(1), Some(NavLinkState::Active));
    c.finish();
    assert_eq!(c.nav().active(), Some(1));

    c.handle(&click("compiled"), 20);
    c.finish();
    assert_eq!(c.nav().active_link().unwrap().target_id, "compiled");

    c.handle(&click("home"), 30);
    c.finish();
    assert_eq!(c.nav().active(), Some(0));

    // No entry for `gallery`: the first entry of its category is highlighted.
    c.handle(&click("gallery"), 40);
    c.finish();
    assert_eq!(c.nav().active(), Some(1));
}

#[test]
fn nav_highlight_clears_when_nothing_matches() {
    let engine = Engine::new(
        SectionRegistry::new(["home", "credits"]).unwrap(),
        EngineOptions::default().with_reduced_motion(true),
    );
    let mut c = Controller::new(engine).with_nav_links([NavLink::new("home")]);
    assert_eq!(c.nav().active(), Some(0));
    c.handle(&wheel(10.0), 0);
    assert_eq!(c.nav().active(), None);
    assert_eq!(c.nav().states(), &[NavLinkState::Inactive]);
}

#[test]
fn progress_dots_follow_current_category() {
    let mut c = controller(true);
    assert_eq!(
        c.progress().dots(),
        &[
            DotState::Active,
            DotState::Inactive,
            DotState::Inactive,
            DotState::Inactive
        ]
    );
    c.handle(&click("circumstances"), 0);
    assert_eq!(
        c.progress().dots(),
        &[
            DotState::Inactive,
            DotState::Active,
            DotState::SameCategory,
            DotState::Inactive
        ]
    );
}

struct Recorder {
    prefix: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn push(&self, what: &str, section: &Section) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}{what}:{}", self.prefix, section.id()));
    }
}

impl SectionHook for Recorder {
    fn on_enter(&mut self, section: &Section, _change: &SectionChange) {
        self.push("enter", section);
    }

    fn on_exit(&mut self, section: &Section, _change: &SectionChange) {
        self.push("exit", section);
    }

    fn on_settled(&mut self, section: &Section, _change: &SectionChange) {
        self.push("settled", section);
    }
}

#[test]
fn hooks_run_by_id_then_category() {
    let log: Arc<Mutex<Vec<String>>> = Arc::default();
    let mut c = controller(true)
        .with_section_hook(
            "gallery",
            Recorder {
                prefix: "",
                log: Arc::clone(&log),
            },
        )
        .with_category_hook(
            "story",
            Recorder {
                prefix: "story-",
                log: Arc::clone(&log),
            },
        );

    c.handle(&click("gallery"), 0);
    c.handle(&click("circumstances"), 10);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "enter:gallery",
            "story-enter:gallery",
            "settled:gallery",
            "story-settled:gallery",
            "exit:gallery",
            "story-exit:gallery",
            "story-enter:circumstances",
            "story-settled:circumstances",
        ]
    );
}

#[test]
fn closures_are_enter_hooks() {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let mut c = controller(false);
    c.hooks_mut()
        .on_section("compiled", move |section: &Section, change: &SectionChange| {
            assert!(change.is_starting());
            sink.lock().unwrap().push(section.id().to_string());
        });
    assert_eq!(c.hooks_mut().len(), 1);

    c.handle(&click("compiled"), 0);
    assert_eq!(*seen.lock().unwrap(), vec!["compiled"]);
    assert!(c.tick(100).is_some_and(|f| !f.settled));
    assert!(c.tick(10_000).is_some_and(|f| f.settled));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn rebuild_resyncs_navigation_and_dots() {
    let mut c = controller(true);
    c.handle(&click("compiled"), 0);
    c.rebuild(SectionRegistry::new(["compiled", "home"]).unwrap())
        .unwrap();
    assert_eq!(c.engine().current_index(), 0);
    assert_eq!(c.progress().dots(), &[DotState::Active, DotState::Inactive]);
    assert_eq!(c.nav().active(), Some(2));
}

#[test]
fn resize_reaches_the_engine() {
    let mut c = controller(false);
    let layout = c.on_resize(sectionflow::Viewport::new(800.0, 600.0));
    assert!((layout.height - 660.0).abs() < 1e-3);
    assert!((layout.top + 30.0).abs() < 1e-3);
    assert_eq!(layout, c.engine().background_layout());
    c.handle(&wheel(10.0), 0);
    let frame = c.tick(0).unwrap();
    let incoming = frame
        .get(&sectionflow::Target::Section(sectionflow::Role::Incoming))
        .unwrap();
    assert!((incoming.offset_y - 600.0).abs() < 1e-3);
}

#[cfg(feature = "serde")]
#[test]
fn input_config_deserializes_with_defaults() {
    let config: InputConfig =
        serde_json::from_str(r#"{ "debounce_ms": 300, "touch": false }"#).unwrap();
    assert_eq!(config.debounce_ms, 300);
    assert!(!config.touch);
    assert_eq!(config.touch_threshold, 40.0);
    assert_eq!(config.wheel_threshold, 1.0);

    let event: InputEvent = serde_json::from_str(r#"{ "Wheel": { "delta_y": 12.5 } }"#).unwrap();
    assert_eq!(event, InputEvent::Wheel { delta_y: 12.5 });
}
