use super::*;
use crate::{
    animation::stagger::UnitStyle,
    foundation::core::Rect,
    layout::source::StaticLayout,
    text::segment::{Granularity, segment},
    trigger::tracker::TriggerPhase,
};

const VIEWPORT_H: f64 = 1000.0;
const FRAME: f64 = 1.0 / 60.0;

// Trigger top at 1200: "top 20%" -> 1000, "top 5%" -> 1150.
fn layout() -> StaticLayout {
    StaticLayout::new()
        .with_element(".about", Rect::new(0.0, 1200.0, 800.0, 2000.0))
        .with_element(".about-para", Rect::new(0.0, 1300.0, 800.0, 1400.0))
}

fn vp(offset: f64) -> Viewport {
    Viewport::new(offset, VIEWPORT_H).unwrap()
}

fn spec(scrub: f64) -> RevealSpec {
    let mut spec = RevealSpec::new(".about-para", "Build For Speed", ".about");
    spec.scroll_trigger.scrub = scrub;
    spec
}

fn reveal(scene: &mut ScrollScene, scrub: f64) -> RevealHandle {
    scene
        .reveal(&spec(scrub), &Granularity::Words, &layout(), vp(0.0))
        .unwrap()
}

#[test]
fn reveal_binds_units_at_base_state() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    let anim = scene.animation(h.animation).unwrap();
    assert_eq!(anim.len(), 3);
    assert!(anim.units().iter().all(|u| u.opacity == 0.0 && u.offset_y == 20.0));
    assert_eq!(scene.attached(h.subscription), &[h.animation]);
    assert_eq!(scene.state(h.subscription).unwrap().phase, TriggerPhase::Before);
}

#[test]
fn missing_container_or_trigger_leaves_scene_unchanged() {
    let mut scene = ScrollScene::new();
    let mut s = spec(0.0);
    s.target = ".gone".to_string();
    let err = scene
        .reveal(&s, &Granularity::Words, &layout(), vp(0.0))
        .unwrap_err();
    assert!(matches!(err, RevealError::TargetNotFound(_)));

    let mut s = spec(0.0);
    s.scroll_trigger.trigger = ".gone".to_string();
    let err = scene
        .reveal(&s, &Granularity::Words, &layout(), vp(0.0))
        .unwrap_err();
    assert!(matches!(err, RevealError::TargetNotFound(_)));

    assert!(scene.tracker().is_empty());
    assert!(scene.animation(AnimationId(0)).is_none());
}

#[test]
fn frame_without_scroll_or_smoothing_is_idle() {
    let mut scene = ScrollScene::new();
    reveal(&mut scene, 0.0);
    assert!(scene.frame(FRAME).is_idle());
}

#[test]
fn many_scroll_events_collapse_into_one_frame() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    for offset in [1010.0, 1040.0, 1060.0, 1075.0] {
        scene.notify_scroll(offset);
    }
    let report = scene.frame(FRAME);
    assert_eq!(report.updates.len(), 1);
    assert_eq!(report.animations_updated, 1);
    assert_eq!(report.updates[0].state.progress, 0.5);
    assert_eq!(scene.animation(h.animation).unwrap().progress(), Some(0.5));
    assert!(scene.frame(FRAME).is_idle());
}

#[test]
fn unsettled_smoothing_keeps_frames_running() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.5);
    scene.notify_scroll(1150.0);
    let first = scene.frame(FRAME);
    let lagging = first.updates[0].state.smoothed_progress;
    assert!(lagging > 0.0 && lagging < 1.0);

    let mut frames = 0;
    while !scene.frame(FRAME).is_idle() {
        frames += 1;
        assert!(frames < 10_000);
    }
    let s = scene.state(h.subscription).unwrap();
    assert_eq!(s.smoothed_progress, 1.0);
    let anim = scene.animation(h.animation).unwrap();
    assert!(anim.styles().iter().all(|st| *st == UnitStyle::RESTING));
}

#[test]
fn several_animations_can_share_one_trigger() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    let units = segment("Designed For Intelligence", Granularity::Chars).into_units();
    let second = scene.bind(units, StaggerConfig::default()).unwrap();
    scene.attach(h.subscription, second).unwrap();
    scene.attach(h.subscription, second).unwrap();
    assert_eq!(scene.attached(h.subscription), &[h.animation, second]);

    scene.notify_scroll(2000.0);
    let report = scene.frame(FRAME);
    assert_eq!(report.animations_updated, 2);
    assert_eq!(scene.animation(second).unwrap().progress(), Some(1.0));
}

#[test]
fn attach_rejects_unknown_ids() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    assert!(scene.attach(SubscriptionId(99), h.animation).is_err());
    assert!(scene.attach(h.subscription, AnimationId(99)).is_err());
}

#[test]
fn unregister_freezes_styles() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    scene.notify_scroll(1075.0);
    scene.frame(FRAME);
    let frozen = scene.animation(h.animation).unwrap().styles();

    assert!(scene.unregister(h.subscription));
    assert!(!scene.unregister(h.subscription));
    scene.notify_scroll(1150.0);
    assert!(scene.frame(FRAME).is_idle());
    assert_eq!(scene.animation(h.animation).unwrap().styles(), frozen);
}

#[test]
fn unmount_drops_the_animation_but_keeps_the_trigger() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    assert!(scene.unmount(h.animation));
    assert!(!scene.unmount(h.animation));
    assert!(!scene.unmount(AnimationId(42)));
    assert!(scene.animation(h.animation).is_none());
    assert!(scene.attached(h.subscription).is_empty());
    assert_eq!(scene.animation_count(), 0);

    scene.notify_scroll(1150.0);
    let report = scene.frame(FRAME);
    assert_eq!(report.updates.len(), 1);
    assert_eq!(report.animations_updated, 0);
    assert!(scene.tracker().contains(h.subscription));
}

#[test]
fn bound_animations_are_freed_on_unmount() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    for round in 0..100 {
        let units = segment("Build For Speed", Granularity::Words).into_units();
        let id = scene.bind(units, StaggerConfig::default()).unwrap();
        assert_eq!(id, AnimationId(round + 1));
        scene.attach(h.subscription, id).unwrap();
        assert_eq!(scene.attached(h.subscription), &[h.animation, id]);

        scene.notify_scroll(1000.0 + round as f64);
        assert_eq!(scene.frame(FRAME).animations_updated, 2);

        assert!(scene.unmount(id));
        assert_eq!(scene.attached(h.subscription), &[h.animation]);
        assert_eq!(scene.animation_count(), 1);
    }

    scene.notify_scroll(1150.0);
    assert_eq!(scene.frame(FRAME).animations_updated, 1);
}

#[test]
fn repeated_reveal_cycles_do_not_accumulate() {
    let mut scene = ScrollScene::new();
    for _ in 0..1000 {
        let h = reveal(&mut scene, 0.0);
        assert!(scene.unregister(h.subscription));
        assert!(scene.unmount(h.animation));
    }
    assert_eq!(scene.animation_count(), 0);
    assert!(scene.tracker().is_empty());
    assert!(scene.animation(AnimationId(0)).is_none());
}

#[test]
fn teardown_releases_everything() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    scene.teardown(h);
    assert!(scene.tracker().is_empty());
    assert!(scene.animation(h.animation).is_none());
    assert!(scene.attached(h.subscription).is_empty());
    assert_eq!(scene.animation_count(), 0);
}

#[test]
fn refresh_moves_the_window_and_schedules_a_frame() {
    let mut scene = ScrollScene::new();
    let h = reveal(&mut scene, 0.0);
    scene.notify_scroll(1075.0);
    scene.frame(FRAME);

    let mut moved = layout();
    moved.set_scroll_offset(1075.0);
    moved.insert(".about", Rect::new(0.0, 1275.0, 800.0, 2075.0));
    assert_eq!(scene.refresh(&moved, vp(1075.0)), 1);
    let report = scene.frame(FRAME);
    assert_eq!(report.updates[0].state.progress, 0.0);
    assert_eq!(scene.animation(h.animation).unwrap().progress(), Some(0.0));
}

#[test]
fn non_finite_scroll_is_ignored() {
    let mut scene = ScrollScene::new();
    reveal(&mut scene, 0.0);
    scene.notify_scroll(f64::NAN);
    assert!(scene.frame(FRAME).is_idle());
    assert_eq!(scene.scroll_offset(), Some(0.0));
}
