//! Scroll-scrubbed, staggered text reveals.
//!
//! A block of text is split into animatable units (words, characters or lines). Each unit
//! fades and slides into place inside its own slice of a scroll window, so scrolling down
//! plays the reveal forward and scrolling up plays it back.
//!
//! # Pipeline overview
//!
//! 1. **Segment**: `text + Granularity -> Vec<AnimatableUnit>` (lossless; separators are kept)
//! 2. **Track**: `scroll offset -> ProgressState` per registered trigger, with optional
//!    exponential smoothing (`scrub`)
//! 3. **Animate**: `smoothed progress -> UnitStyle` per unit, a pure function of progress
//! 4. **Schedule**: [`ScrollScene`] collapses scroll notifications into at most one
//!    recompute per frame and fans progress out to bound animations
//!
//! Geometry comes from a [`LayoutSource`]; this crate never touches a real document.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No clock in the animator**: the same progress always renders the same styles.
//! - **No latching**: progress is recomputed from the offset every sample, so a reveal can
//!   be replayed in either direction any number of times.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod layout;
mod scene;
mod text;
mod trigger;

pub use animation::ease::Ease;
pub use animation::stagger::{
    BaseProperties, LocalWindow, StaggerAnimator, StaggerConfig, StaggerFit, StaggerTiming,
    UnitStyle,
};
pub use foundation::core::{AnimationId, Rect, SubscriptionId, Viewport};
pub use foundation::error::{RevealError, RevealResult};
pub use layout::source::{LayoutSource, StaticLayout};
pub use scene::scroll_scene::{FrameReport, RevealHandle, ScrollScene};
pub use scene::spec::{RevealSpec, ScrollTriggerSpec};
pub use text::segment::{AnimatableUnit, Granularity, Segmentation, Segmenter, segment};
pub use trigger::position::{Anchor, ScrollPosition};
pub use trigger::smoothing::{SETTLE_EPSILON, ScrubSmoother};
pub use trigger::tracker::{
    ProgressState, TriggerEvent, TriggerPhase, TriggerTracker, TriggerUpdate,
};
pub use trigger::window::{ScrollSpan, TriggerWindow};
