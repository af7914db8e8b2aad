use std::collections::BTreeMap;

use crate::{
    foundation::core::{SubscriptionId, Viewport},
    foundation::error::{RevealError, RevealResult},
    layout::source::LayoutSource,
    trigger::smoothing::ScrubSmoother,
    trigger::window::{ScrollSpan, TriggerWindow},
};

/// Where the scroll offset sits relative to a trigger's span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    /// Offset is before the span start.
    Before,
    /// Offset is inside the span (inclusive).
    Active,
    /// Offset is past the span end.
    After,
}

impl TriggerPhase {
    fn of(span: &ScrollSpan, offset: f64) -> Self {
        if offset < span.start {
            Self::Before
        } else if offset > span.end {
            Self::After
        } else {
            Self::Active
        }
    }
}

/// Boundary crossings, named after the scroll direction that caused them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    /// Scrolling forward past the start.
    Enter,
    /// Scrolling forward past the end.
    Leave,
    /// Scrolling backward past the end.
    EnterBack,
    /// Scrolling backward past the start.
    LeaveBack,
}

fn crossings(from: TriggerPhase, to: TriggerPhase) -> &'static [TriggerEvent] {
    use TriggerEvent::*;
    use TriggerPhase::*;
    match (from, to) {
        (Before, Active) => &[Enter],
        (Active, After) => &[Leave],
        (Before, After) => &[Enter, Leave],
        (After, Active) => &[EnterBack],
        (Active, Before) => &[LeaveBack],
        (After, Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

/// Progress of one registered trigger. Only the [`TriggerTracker`] mutates it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProgressState {
    /// Raw linear progress in `[0, 1]`.
    pub progress: f64,
    /// `progress` after scrub smoothing.
    pub smoothed_progress: f64,
    /// Position relative to the span.
    pub phase: TriggerPhase,
}

/// One recomputed subscription.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TriggerUpdate {
    /// Subscription that changed.
    pub id: SubscriptionId,
    /// New state.
    pub state: ProgressState,
    /// Boundary crossings since the previous sample, in order.
    pub events: Vec<TriggerEvent>,
}

#[derive(Clone, Debug)]
struct Registration {
    target: String,
    window: TriggerWindow,
    span: ScrollSpan,
    smoother: ScrubSmoother,
    state: ProgressState,
}

impl Registration {
    fn sample(&mut self, offset: f64, dt: f64) -> (ProgressState, Vec<TriggerEvent>) {
        let progress = self.span.progress(offset);
        let phase = TriggerPhase::of(&self.span, offset);
        let events = crossings(self.state.phase, phase).to_vec();
        let smoothed_progress = self.smoother.step(progress, dt);
        self.state = ProgressState {
            progress,
            smoothed_progress,
            phase,
        };
        (self.state, events)
    }
}

/// Maps scroll offsets to per-trigger progress.
///
/// Progress is recomputed from scratch on every sample, so scrolling back and forth retraces
/// the same curve; nothing latches after the first pass.
#[derive(Debug, Default)]
pub struct TriggerTracker {
    registrations: BTreeMap<SubscriptionId, Registration>,
    next_id: u64,
}

impl TriggerTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the `trigger` element with `window`, resolving the window against the current
    /// layout.
    ///
    /// Fails without registering anything when the target is not mounted or the resolved
    /// window is degenerate. The initial state reflects `viewport.scroll_offset` with no lag.
    #[tracing::instrument(skip(self, layout))]
    pub fn register(
        &mut self,
        trigger: &str,
        window: TriggerWindow,
        layout: &dyn LayoutSource,
        viewport: Viewport,
    ) -> RevealResult<SubscriptionId> {
        window.validate()?;
        let bounds = layout
            .element_bounds(trigger)
            .ok_or_else(|| RevealError::target_not_found(trigger))?;
        let span = ScrollSpan::resolve(&window, bounds, viewport)?;

        let progress = span.progress(viewport.scroll_offset);
        let state = ProgressState {
            progress,
            smoothed_progress: progress,
            phase: TriggerPhase::of(&span, viewport.scroll_offset),
        };
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.registrations.insert(
            id,
            Registration {
                target: trigger.to_string(),
                window,
                span,
                smoother: ScrubSmoother::new(window.scrub, progress),
                state,
            },
        );
        tracing::debug!(?id, start = span.start, end = span.end, "trigger registered");
        Ok(id)
    }

    /// Drop a registration. Returns `false` for unknown or already released ids.
    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        let removed = self.registrations.remove(&id).is_some();
        if removed {
            tracing::debug!(?id, "trigger unregistered");
        }
        removed
    }

    /// Sample every live subscription at `offset`, advancing smoothing by `dt` seconds.
    pub fn on_scroll(&mut self, offset: f64, dt: f64) -> Vec<TriggerUpdate> {
        if !offset.is_finite() {
            tracing::warn!(offset, "ignoring non-finite scroll offset");
            return Vec::new();
        }
        self.registrations
            .iter_mut()
            .map(|(&id, reg)| {
                let (state, events) = reg.sample(offset, dt);
                TriggerUpdate { id, state, events }
            })
            .collect()
    }

    /// Sample a single subscription. `None` when `id` is not registered.
    pub fn on_scroll_one(
        &mut self,
        id: SubscriptionId,
        offset: f64,
        dt: f64,
    ) -> Option<TriggerUpdate> {
        if !offset.is_finite() {
            return None;
        }
        let reg = self.registrations.get_mut(&id)?;
        let (state, events) = reg.sample(offset, dt);
        Some(TriggerUpdate { id, state, events })
    }

    /// Re-resolve every window after a layout change. Returns how many spans were updated.
    ///
    /// Targets that are gone, or whose window became degenerate, keep their previous span.
    #[tracing::instrument(skip(self, layout))]
    pub fn refresh(&mut self, layout: &dyn LayoutSource, viewport: Viewport) -> usize {
        let mut updated = 0;
        for (id, reg) in &mut self.registrations {
            let Some(bounds) = layout.element_bounds(&reg.target) else {
                tracing::warn!(?id, trigger = %reg.target, "trigger target not mounted during refresh");
                continue;
            };
            match ScrollSpan::resolve(&reg.window, bounds, viewport) {
                Ok(span) => {
                    reg.span = span;
                    updated += 1;
                }
                Err(err) => {
                    tracing::warn!(?id, trigger = %reg.target, %err, "keeping previous trigger span");
                }
            }
        }
        updated
    }

    /// Current state of `id`.
    pub fn state(&self, id: SubscriptionId) -> Option<ProgressState> {
        self.registrations.get(&id).map(|r| r.state)
    }

    /// Resolved span of `id`.
    pub fn span(&self, id: SubscriptionId) -> Option<ScrollSpan> {
        self.registrations.get(&id).map(|r| r.span)
    }

    /// Window `id` was registered with.
    pub fn window(&self, id: SubscriptionId) -> Option<&TriggerWindow> {
        self.registrations.get(&id).map(|r| &r.window)
    }

    /// Target name `id` tracks.
    pub fn target(&self, id: SubscriptionId) -> Option<&str> {
        self.registrations.get(&id).map(|r| r.target.as_str())
    }

    /// Whether `id` is live.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.registrations.contains_key(&id)
    }

    /// `true` when every smoothed progress has caught up with its raw progress.
    pub fn is_settled(&self) -> bool {
        self.registrations
            .values()
            .all(|r| r.smoother.is_settled(r.state.progress))
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/tracker.rs"]
mod tests;
