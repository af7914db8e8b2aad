use super::*;
use crate::text::segment::{Granularity, segment};

fn words(text: &str) -> Vec<AnimatableUnit> {
    segment(text, Granularity::Words).into_units()
}

fn landing_config() -> StaggerConfig {
    StaggerConfig {
        from: BaseProperties {
            opacity: 0.0,
            offset_y: 20.0,
        },
        stagger: 0.04,
        duration: 0.4,
        ease: Ease::OutCubic,
        fit: StaggerFit::Compress,
    }
}

#[test]
fn bind_renders_base_state() {
    let anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    assert_eq!(anim.len(), 3);
    for u in anim.units() {
        assert_eq!(u.opacity, 0.0);
        assert_eq!(u.offset_y, 20.0);
    }
    assert_eq!(anim.progress(), Some(0.0));
}

#[test]
fn full_progress_reaches_resting_values_exactly() {
    let mut anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    anim.update(1.0);
    for s in anim.styles() {
        assert_eq!(s, UnitStyle::RESTING);
    }
}

#[test]
fn later_units_wait_for_their_window() {
    let anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    assert!(anim.eased(0, 0.04).unwrap() > 0.0);
    assert_eq!(anim.eased(1, 0.04).unwrap(), 0.0);
    assert_eq!(anim.eased(2, 0.04).unwrap(), 0.0);
    assert_eq!(anim.eased(3, 0.04), None);
}

#[test]
fn windows_keep_authored_timing_when_they_fit() {
    let t = StaggerTiming::resolve(3, &landing_config());
    let expected = [(0.0, 0.4), (0.04, 0.44), (0.08, 0.48)];
    assert_eq!(t.windows().len(), expected.len());
    for (w, (start, end)) in t.windows().iter().zip(expected) {
        assert!((w.start - start).abs() < 1e-12);
        assert!((w.end - end).abs() < 1e-12);
    }
}

#[test]
fn windows_compress_when_the_last_would_overflow() {
    let n = 40;
    let t = StaggerTiming::resolve(n, &landing_config());
    let last = t.window(n - 1).unwrap();
    assert!(last.end <= 1.0);
    assert!((last.end - 1.0).abs() < 1e-12);
    let ratio = t.window(0).unwrap().end / t.window(1).unwrap().start;
    assert!((ratio - 10.0).abs() < 1e-9);
}

#[test]
fn stretch_fills_the_whole_range() {
    let cfg = StaggerConfig {
        fit: StaggerFit::Stretch,
        ..landing_config()
    };
    let t = StaggerTiming::resolve(3, &cfg);
    let last = t.window(2).unwrap();
    assert!(last.end <= 1.0);
    assert!((last.end - 1.0).abs() < 1e-12);
    assert!((t.window(0).unwrap().end - 0.4 / 0.48).abs() < 1e-12);
}

#[test]
fn eased_is_zero_before_and_one_after_each_window() {
    let anim = StaggerAnimator::bind(
        words("LocalMind is a free, open-source platform made for students"),
        landing_config(),
    )
    .unwrap();
    for (i, w) in anim.timing().windows().iter().enumerate() {
        assert!(w.end <= 1.0);
        for p in [0.0, w.start * 0.5, w.start] {
            assert_eq!(anim.eased(i, p).unwrap(), 0.0);
        }
        for p in [w.end, (w.end + 1.0) * 0.5, 1.0] {
            assert_eq!(anim.eased(i, p).unwrap(), 1.0);
        }
    }
}

#[test]
fn properties_are_monotonic_in_progress() {
    let mut anim = StaggerAnimator::bind(words("one two three four"), landing_config()).unwrap();
    let mut prev = anim.styles();
    for step in 1..=200 {
        anim.update(f64::from(step) / 200.0);
        let cur = anim.styles();
        for (a, b) in prev.iter().zip(&cur) {
            assert!(b.opacity >= a.opacity);
            assert!(b.offset_y <= a.offset_y);
        }
        prev = cur;
    }
}

#[test]
fn update_is_idempotent() {
    let mut anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    anim.update(0.17);
    let first = anim.styles();
    anim.update(0.17);
    assert_eq!(anim.styles(), first);
}

#[test]
fn update_is_history_independent() {
    let mut a = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    let mut b = a.clone();
    a.update(0.9);
    a.update(0.2);
    b.update(0.2);
    assert_eq!(a.styles(), b.styles());
}

#[test]
fn out_of_range_progress_is_clamped_and_nan_ignored() {
    let mut anim = StaggerAnimator::bind(words("a b"), landing_config()).unwrap();
    anim.update(4.0);
    assert!(anim.styles().iter().all(|s| *s == UnitStyle::RESTING));
    anim.update(f64::NAN);
    assert!(anim.styles().iter().all(|s| *s == UnitStyle::RESTING));
    anim.update(-2.0);
    assert_eq!(anim.styles()[0].opacity, 0.0);
}

#[test]
fn empty_sequence_is_a_no_op() {
    let mut anim = StaggerAnimator::bind(Vec::new(), landing_config()).unwrap();
    anim.update(0.5);
    assert!(anim.is_empty());
    assert_eq!(anim.eased(0, 0.5), None);
}

#[test]
fn unmount_destroys_units_and_ignores_updates() {
    let mut anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    anim.update(0.3);
    anim.unmount();
    assert!(!anim.is_mounted());
    assert!(anim.is_empty());
    anim.update(0.9);
    assert_eq!(anim.progress(), Some(0.3));
}

#[test]
fn non_zero_base_opacity_interpolates_from_base() {
    let cfg = StaggerConfig {
        from: BaseProperties {
            opacity: 0.25,
            offset_y: -8.0,
        },
        ..landing_config()
    };
    let mut anim = StaggerAnimator::bind(words("x"), cfg).unwrap();
    assert_eq!(anim.styles()[0].opacity, 0.25);
    assert_eq!(anim.styles()[0].offset_y, -8.0);
    anim.update(1.0);
    assert_eq!(anim.styles()[0], UnitStyle::RESTING);
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        StaggerConfig {
            stagger: -0.1,
            ..landing_config()
        },
        StaggerConfig {
            duration: 0.0,
            ..landing_config()
        },
        StaggerConfig {
            duration: f64::NAN,
            ..landing_config()
        },
        StaggerConfig {
            from: BaseProperties {
                opacity: 1.5,
                offset_y: 0.0,
            },
            ..landing_config()
        },
    ];
    for cfg in bad {
        assert!(StaggerAnimator::bind(words("a"), cfg).is_err());
    }
}

#[test]
fn non_contiguous_indices_are_rejected() {
    let mut units = words("a b c");
    units[1].index = 5;
    let err = StaggerAnimator::bind(units, landing_config()).unwrap_err();
    assert!(err.to_string().contains("position 1 has index 5"));
}

#[test]
fn config_defaults_match_the_landing_page() {
    let cfg: StaggerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, StaggerConfig::default());
    assert_eq!(cfg.stagger, 0.04);
    assert_eq!(cfg.duration, 0.4);
    assert_eq!(cfg.ease, Ease::OutCubic);
    assert_eq!(cfg.from.offset_y, 20.0);
}

#[test]
fn eased_rejects_non_finite_progress() {
    let anim = StaggerAnimator::bind(words("Build For Speed"), landing_config()).unwrap();
    assert_eq!(anim.eased(0, f64::NAN), None);
    assert_eq!(anim.eased(0, f64::INFINITY), None);
    assert_eq!(anim.eased(0, 1.0), Some(1.0));
}
