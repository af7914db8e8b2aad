use crate::{
    foundation::core::{Rect, Viewport},
    foundation::error::{RevealError, RevealResult},
    trigger::position::ScrollPosition,
};

/// Scroll interval over which a trigger's progress runs from 0 to 1.
///
/// Immutable once built; `scrub` is the smoothing time constant in seconds (`0` = unsmoothed).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerWindow {
    /// Boundary where progress is 0.
    pub start: ScrollPosition,
    /// Boundary where progress is 1.
    pub end: ScrollPosition,
    /// Smoothing lag in seconds.
    #[serde(default)]
    pub scrub: f64,
}

impl TriggerWindow {
    /// Build a validated window.
    pub fn new(start: ScrollPosition, end: ScrollPosition, scrub: f64) -> RevealResult<Self> {
        let w = Self { start, end, scrub };
        w.validate()?;
        Ok(w)
    }

    /// Check field ranges. Degeneracy depends on layout and is checked by [`ScrollSpan::resolve`].
    pub fn validate(&self) -> RevealResult<()> {
        if !self.scrub.is_finite() || self.scrub < 0.0 {
            return Err(RevealError::validation(
                "trigger scrub must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// A [`TriggerWindow`] resolved to absolute scroll offsets for one layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSpan {
    /// Scroll offset where progress is 0.
    pub start: f64,
    /// Scroll offset where progress is 1 (strictly greater than `start`).
    pub end: f64,
}

impl ScrollSpan {
    /// Build a span, rejecting empty or inverted intervals.
    pub fn new(start: f64, end: f64) -> RevealResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RevealError::config("trigger window offsets must be finite"));
        }
        if end <= start {
            return Err(RevealError::config(format!(
                "degenerate trigger window: start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Resolve `window` against the trigger's viewport-relative `bounds` at `viewport`.
    pub fn resolve(window: &TriggerWindow, bounds: Rect, viewport: Viewport) -> RevealResult<Self> {
        let doc = viewport.to_document(bounds);
        let h = doc.height();
        Self::new(
            window.start.scroll_offset(doc.y0, h, viewport.height),
            window.end.scroll_offset(doc.y0, h, viewport.height),
        )
    }

    /// Linear position of `offset` inside the span, clamped to `[0, 1]`.
    pub fn progress(&self, offset: f64) -> f64 {
        if offset <= self.start {
            return 0.0;
        }
        if offset >= self.end {
            return 1.0;
        }
        ((offset - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Scroll distance covered by the span.
    pub fn distance(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/window.rs"]
mod tests;
