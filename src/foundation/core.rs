use crate::foundation::error::{RevealError, RevealResult};

pub use kurbo::Rect;

/// Handle returned by [`crate::TriggerTracker::register`].
///
/// Ids are allocated monotonically and never reused, so a handle that outlives its
/// registration can never address a newer one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SubscriptionId(pub u64);

/// Handle for an animation bound inside a [`crate::ScrollScene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AnimationId(pub u64);

/// Current scroll offset and visible height, as reported by the scroll source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Document offset of the viewport's top edge, in pixels.
    pub scroll_offset: f64,
    /// Visible height in pixels (must be > 0).
    pub height: f64,
}

impl Viewport {
    /// Build a validated viewport.
    pub fn new(scroll_offset: f64, height: f64) -> RevealResult<Self> {
        if !scroll_offset.is_finite() {
            return Err(RevealError::validation("viewport scroll_offset must be finite"));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(RevealError::validation(
                "viewport height must be finite and > 0",
            ));
        }
        Ok(Self {
            scroll_offset,
            height,
        })
    }

    /// Same viewport scrolled to `offset`.
    pub fn scrolled_to(self, offset: f64) -> Self {
        Self {
            scroll_offset: offset,
            ..self
        }
    }

    /// Convert a viewport-relative rect into document coordinates.
    pub fn to_document(self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0,
            rect.y0 + self.scroll_offset,
            rect.x1,
            rect.y1 + self.scroll_offset,
        )
    }
}

pub(crate) fn ensure_finite(name: &str, v: f64) -> RevealResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RevealError::validation(format!("{name} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
