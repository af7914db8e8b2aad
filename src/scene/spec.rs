use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::stagger::StaggerConfig,
    foundation::error::{RevealError, RevealResult},
    text::segment::Granularity,
    trigger::position::{Anchor, ScrollPosition},
    trigger::window::TriggerWindow,
};

/// Declarative description of one scroll-scrubbed text reveal.
///
/// The JSON shape follows the authoring call it replaces:
///
/// ```json
/// {
///   "target": ".about-para",
///   "text": "LocalMind is a free, open-source platform",
///   "granularity": "words",
///   "from": { "opacity": 0, "y": 20 },
///   "stagger": 0.04,
///   "duration": 0.4,
///   "ease": "power2.out",
///   "scroll_trigger": { "trigger": ".about", "start": "top 20%", "end": "top 5%", "scrub": 3 }
/// }
/// ```
///
/// Every field except `target`, `text` and `scroll_trigger.trigger` has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSpec {
    /// Container element whose text is revealed.
    pub target: String,
    /// Text content of the container.
    pub text: String,
    /// Unit size.
    #[serde(default)]
    pub granularity: Granularity,
    /// Per-unit timing and start values.
    #[serde(flatten)]
    pub animation: StaggerConfig,
    /// Scroll window driving the reveal.
    pub scroll_trigger: ScrollTriggerSpec,
}

/// Trigger element and window of a [`RevealSpec`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTriggerSpec {
    /// Element whose position drives progress.
    pub trigger: String,
    /// Boundary where progress is 0.
    #[serde(default = "default_start")]
    pub start: ScrollPosition,
    /// Boundary where progress is 1.
    #[serde(default = "default_end")]
    pub end: ScrollPosition,
    /// Smoothing lag in seconds.
    #[serde(default = "default_scrub")]
    pub scrub: f64,
}

fn default_start() -> ScrollPosition {
    ScrollPosition::new(Anchor::Fraction(0.0), Anchor::Fraction(0.2))
}

fn default_end() -> ScrollPosition {
    ScrollPosition::new(Anchor::Fraction(0.0), Anchor::Fraction(0.05))
}

fn default_scrub() -> f64 {
    3.0
}

impl ScrollTriggerSpec {
    /// Trigger on `trigger` with the default window (`top 20%` to `top 5%`, scrub 3).
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            start: default_start(),
            end: default_end(),
            scrub: default_scrub(),
        }
    }

    /// Build the validated [`TriggerWindow`].
    pub fn window(&self) -> RevealResult<TriggerWindow> {
        TriggerWindow::new(self.start, self.end, self.scrub)
    }
}

impl RevealSpec {
    /// Reveal `text` inside `target`, triggered by `trigger`, with default timing.
    pub fn new(
        target: impl Into<String>,
        text: impl Into<String>,
        trigger: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
            granularity: Granularity::default(),
            animation: StaggerConfig::default(),
            scroll_trigger: ScrollTriggerSpec::new(trigger),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> RevealResult<Self> {
        let spec: Self = serde_json::from_str(s).map_err(|e| RevealError::serde(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RevealResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read reveal spec '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> RevealResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RevealError::serde(e.to_string()))
    }

    /// Check names, timing and window ranges.
    pub fn validate(&self) -> RevealResult<()> {
        if self.target.trim().is_empty() {
            return Err(RevealError::validation("reveal target must be non-empty"));
        }
        if self.scroll_trigger.trigger.trim().is_empty() {
            return Err(RevealError::validation(
                "scroll_trigger.trigger must be non-empty",
            ));
        }
        self.animation.validate()?;
        self.scroll_trigger.window()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/spec.rs"]
mod tests;
