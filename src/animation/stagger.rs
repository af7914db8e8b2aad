use crate::{
    animation::ease::Ease,
    foundation::core::ensure_finite,
    foundation::error::{RevealError, RevealResult},
    text::segment::AnimatableUnit,
};

/// Authored start values; every unit animates from these to full opacity at zero offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BaseProperties {
    /// Starting opacity in `[0, 1]`.
    #[serde(default)]
    pub opacity: f64,
    /// Starting vertical offset in pixels.
    #[serde(default = "default_offset_y", rename = "y")]
    pub offset_y: f64,
}

fn default_offset_y() -> f64 {
    20.0
}

impl Default for BaseProperties {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            offset_y: default_offset_y(),
        }
    }
}

/// Rendered properties of one unit.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct UnitStyle {
    /// Opacity in `[0, 1]` (may exceed 1 only with an overshooting ease).
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

impl UnitStyle {
    /// Resting style reached at eased scalar 1.
    pub const RESTING: UnitStyle = UnitStyle {
        opacity: 1.0,
        offset_y: 0.0,
    };

    /// Style at eased scalar `e`: `base` at 0, [`UnitStyle::RESTING`] at 1.
    pub fn at(base: &BaseProperties, e: f64) -> Self {
        Self {
            opacity: lerp(base.opacity, Self::RESTING.opacity, e),
            offset_y: lerp(base.offset_y, Self::RESTING.offset_y, e),
        }
    }
}

// Endpoints are returned verbatim so resting values are exact.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// How per-unit windows are placed inside the `[0, 1]` progress range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFit {
    /// Keep authored timings; scale them down only when the last window would end past 1.
    #[default]
    Compress,
    /// Always scale so the last window ends exactly at 1 (the whole scroll distance drives
    /// the whole sequence).
    Stretch,
}

/// Timing parameters for a staggered reveal, in normalized progress units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerConfig {
    /// Start values.
    #[serde(default)]
    pub from: BaseProperties,
    /// Delay between consecutive unit start times.
    #[serde(default = "default_stagger")]
    pub stagger: f64,
    /// Length of each unit's window.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Easing applied to each unit's local progress.
    #[serde(default)]
    pub ease: Ease,
    /// Window placement policy.
    #[serde(default)]
    pub fit: StaggerFit,
}

fn default_stagger() -> f64 {
    0.04
}

fn default_duration() -> f64 {
    0.4
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            from: BaseProperties::default(),
            stagger: default_stagger(),
            duration: default_duration(),
            ease: Ease::default(),
            fit: StaggerFit::default(),
        }
    }
}

impl StaggerConfig {
    /// Check ranges.
    pub fn validate(&self) -> RevealResult<()> {
        let opacity = ensure_finite("from.opacity", self.from.opacity)?;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(RevealError::validation("from.opacity must be in [0, 1]"));
        }
        ensure_finite("from.y", self.from.offset_y)?;
        if ensure_finite("stagger", self.stagger)? < 0.0 {
            return Err(RevealError::validation("stagger must be >= 0"));
        }
        if ensure_finite("duration", self.duration)? <= 0.0 {
            return Err(RevealError::validation("duration must be > 0"));
        }
        Ok(())
    }
}

/// A unit's slice of the overall progress range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LocalWindow {
    /// Progress where the unit starts moving.
    pub start: f64,
    /// Progress where the unit comes to rest (`start < end <= 1`).
    pub end: f64,
}

impl LocalWindow {
    /// Linear local progress, clamped to `[0, 1]`.
    pub fn local_progress(&self, progress: f64) -> f64 {
        if progress <= self.start {
            return 0.0;
        }
        if progress >= self.end {
            return 1.0;
        }
        ((progress - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Resolved windows for a sequence of `n` units.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StaggerTiming {
    windows: Vec<LocalWindow>,
}

impl StaggerTiming {
    /// Place `n` windows according to `config` (assumed valid).
    pub fn resolve(n: usize, config: &StaggerConfig) -> Self {
        if n == 0 {
            return Self::default();
        }
        let last_end = (n - 1) as f64 * config.stagger + config.duration;
        let scale = match config.fit {
            StaggerFit::Compress if last_end <= 1.0 => 1.0,
            _ => 1.0 / last_end,
        };
        let stagger = config.stagger * scale;
        let duration = config.duration * scale;
        let windows = (0..n)
            .map(|i| {
                let start = (i as f64 * stagger).min(1.0);
                LocalWindow {
                    start,
                    end: (start + duration).min(1.0),
                }
            })
            .collect();
        Self { windows }
    }

    /// Window of unit `index`.
    pub fn window(&self, index: usize) -> Option<LocalWindow> {
        self.windows.get(index).copied()
    }

    /// All windows in unit order.
    pub fn windows(&self) -> &[LocalWindow] {
        &self.windows
    }

    /// Eased scalar of unit `index` at overall `progress`.
    pub fn eased(&self, index: usize, progress: f64, ease: Ease) -> Option<f64> {
        self.window(index)
            .map(|w| ease.apply(w.local_progress(progress)))
    }
}

/// Owns a sequence of units and renders them as a pure function of progress.
///
/// There is no clock inside: the same progress always produces the same styles, which makes
/// scrubbing reversible at any scroll speed.
#[derive(Clone, Debug)]
pub struct StaggerAnimator {
    units: Vec<AnimatableUnit>,
    config: StaggerConfig,
    timing: StaggerTiming,
    mounted: bool,
    progress: Option<f64>,
}

impl StaggerAnimator {
    /// Take ownership of `units` and render them at progress 0.
    ///
    /// Unit indices must be contiguous from 0 in order.
    pub fn bind(units: Vec<AnimatableUnit>, config: StaggerConfig) -> RevealResult<Self> {
        config.validate()?;
        if let Some((pos, u)) = units.iter().enumerate().find(|(pos, u)| u.index != *pos) {
            return Err(RevealError::validation(format!(
                "unit at position {pos} has index {}",
                u.index
            )));
        }
        let timing = StaggerTiming::resolve(units.len(), &config);
        let mut anim = Self {
            units,
            config,
            timing,
            mounted: true,
            progress: None,
        };
        anim.update(0.0);
        Ok(anim)
    }

    /// Render every unit at `progress` (clamped to `[0, 1]`).
    ///
    /// A no-op after [`StaggerAnimator::unmount`], for empty sequences, and for non-finite input.
    pub fn update(&mut self, progress: f64) {
        if !self.mounted || self.units.is_empty() || !progress.is_finite() {
            return;
        }
        let p = progress.clamp(0.0, 1.0);
        let ease = self.config.ease;
        for (unit, window) in self.units.iter_mut().zip(self.timing.windows()) {
            let style = UnitStyle::at(&self.config.from, ease.apply(window.local_progress(p)));
            unit.opacity = style.opacity;
            unit.offset_y = style.offset_y;
        }
        self.progress = Some(p);
    }

    /// Eased scalar of unit `index` at `progress`, independent of the last update.
    ///
    /// `None` for an out-of-range index or non-finite progress.
    pub fn eased(&self, index: usize, progress: f64) -> Option<f64> {
        if !progress.is_finite() {
            return None;
        }
        self.timing
            .eased(index, progress.clamp(0.0, 1.0), self.config.ease)
    }

    /// Destroy the units; later updates do nothing.
    pub fn unmount(&mut self) {
        if self.mounted {
            tracing::debug!(units = self.units.len(), "animator unmounted");
        }
        self.mounted = false;
        self.units.clear();
    }

    /// Whether the container is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Bound units with their current styles.
    pub fn units(&self) -> &[AnimatableUnit] {
        &self.units
    }

    /// Current styles in unit order.
    pub fn styles(&self) -> Vec<UnitStyle> {
        self.units
            .iter()
            .map(|u| UnitStyle {
                opacity: u.opacity,
                offset_y: u.offset_y,
            })
            .collect()
    }

    /// Last progress applied, if any.
    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    /// Bound configuration.
    pub fn config(&self) -> &StaggerConfig {
        &self.config
    }

    /// Resolved per-unit windows.
    pub fn timing(&self) -> &StaggerTiming {
        &self.timing
    }

    /// Number of bound units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` when no units are bound.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
