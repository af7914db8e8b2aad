use std::collections::BTreeMap;

use crate::{
    animation::stagger::{StaggerAnimator, StaggerConfig},
    foundation::core::{AnimationId, SubscriptionId, Viewport},
    foundation::error::{RevealError, RevealResult},
    layout::source::LayoutSource,
    scene::spec::RevealSpec,
    text::segment::{AnimatableUnit, Segmenter},
    trigger::tracker::{ProgressState, TriggerTracker, TriggerUpdate},
    trigger::window::TriggerWindow,
};

/// Ids created by [`ScrollScene::reveal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RevealHandle {
    /// Trigger registration.
    pub subscription: SubscriptionId,
    /// Animation reading that registration's progress.
    pub animation: AnimationId,
}

/// What one [`ScrollScene::frame`] call recomputed.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Per-subscription states, empty when nothing needed recomputing.
    pub updates: Vec<TriggerUpdate>,
    /// Number of animations that received new progress.
    pub animations_updated: usize,
}

impl FrameReport {
    /// `true` when the frame did no work.
    pub fn is_idle(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Wires the tracker to its animations and rate-limits work to one pass per frame.
///
/// The surrounding renderer calls [`ScrollScene::reveal`] (or `register` + `bind` + `attach`)
/// on mount, forwards every scroll notification to [`ScrollScene::notify_scroll`], calls
/// [`ScrollScene::frame`] once per rendered frame, and releases with
/// [`ScrollScene::unregister`] / [`ScrollScene::unmount`] on unmount.
#[derive(Debug, Default)]
pub struct ScrollScene {
    tracker: TriggerTracker,
    animations: BTreeMap<AnimationId, StaggerAnimator>,
    bindings: BTreeMap<SubscriptionId, Vec<AnimationId>>,
    next_animation: u64,
    scroll_offset: Option<f64>,
    pending: bool,
}

impl ScrollScene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment, bind and register in one step.
    ///
    /// Fails with [`RevealError::TargetNotFound`] if either the container or the trigger is
    /// not mounted; on any failure the scene is left unchanged.
    #[tracing::instrument(skip(self, spec, segmenter, layout), fields(container = %spec.target))]
    pub fn reveal(
        &mut self,
        spec: &RevealSpec,
        segmenter: &dyn Segmenter,
        layout: &dyn LayoutSource,
        viewport: Viewport,
    ) -> RevealResult<RevealHandle> {
        spec.validate()?;
        if !layout.is_mounted(&spec.target) {
            return Err(RevealError::target_not_found(&spec.target));
        }
        let units = segmenter.segment(&spec.text).into_units();
        let anim = StaggerAnimator::bind(units, spec.animation)?;
        let window = spec.scroll_trigger.window()?;
        let subscription = self.register(&spec.scroll_trigger.trigger, window, layout, viewport)?;
        let animation = self.insert(anim);
        self.attach(subscription, animation)?;
        tracing::debug!(?subscription, ?animation, "reveal bound");
        Ok(RevealHandle {
            subscription,
            animation,
        })
    }

    /// Register a trigger without binding anything to it yet.
    pub fn register(
        &mut self,
        trigger: &str,
        window: TriggerWindow,
        layout: &dyn LayoutSource,
        viewport: Viewport,
    ) -> RevealResult<SubscriptionId> {
        let id = self.tracker.register(trigger, window, layout, viewport)?;
        if self.scroll_offset.is_none() {
            self.scroll_offset = Some(viewport.scroll_offset);
        }
        Ok(id)
    }

    /// Bind `units` into a new, unattached animation.
    pub fn bind(
        &mut self,
        units: Vec<AnimatableUnit>,
        config: StaggerConfig,
    ) -> RevealResult<AnimationId> {
        let anim = StaggerAnimator::bind(units, config)?;
        Ok(self.insert(anim))
    }

    fn insert(&mut self, anim: StaggerAnimator) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        self.animations.insert(id, anim);
        id
    }

    /// Drive `animation` from `subscription`, rendering the current progress immediately.
    ///
    /// Several animations may read the same subscription.
    pub fn attach(
        &mut self,
        subscription: SubscriptionId,
        animation: AnimationId,
    ) -> RevealResult<()> {
        let state = self.tracker.state(subscription).ok_or_else(|| {
            RevealError::validation(format!("unknown subscription {}", subscription.0))
        })?;
        let anim = self
            .animations
            .get_mut(&animation)
            .ok_or_else(|| RevealError::validation(format!("unknown animation {}", animation.0)))?;
        anim.update(state.smoothed_progress);

        let bound = self.bindings.entry(subscription).or_default();
        if !bound.contains(&animation) {
            bound.push(animation);
        }
        Ok(())
    }

    /// Record the latest scroll offset. Cheap; call on every scroll event.
    pub fn notify_scroll(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        self.scroll_offset = Some(offset);
        self.pending = true;
    }

    /// Recompute at most once: when a scroll is pending or smoothing is still catching up.
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let due = self.pending || !self.tracker.is_settled();
        self.pending = false;
        let Some(offset) = self.scroll_offset else {
            return FrameReport::default();
        };
        if !due || self.tracker.is_empty() {
            return FrameReport::default();
        }

        let updates = self.tracker.on_scroll(offset, dt);
        let mut animations_updated = 0;
        for update in &updates {
            let Some(bound) = self.bindings.get(&update.id) else {
                continue;
            };
            for id in bound {
                if let Some(anim) = self.animations.get_mut(id).filter(|a| a.is_mounted()) {
                    anim.update(update.state.smoothed_progress);
                    animations_updated += 1;
                }
            }
        }
        tracing::trace!(offset, subscriptions = updates.len(), animations_updated, "frame");
        FrameReport {
            updates,
            animations_updated,
        }
    }

    /// Release a trigger. Its animations stop receiving progress and keep their last styles.
    pub fn unregister(&mut self, subscription: SubscriptionId) -> bool {
        self.bindings.remove(&subscription);
        self.tracker.unregister(subscription)
    }

    /// The animation's container was removed: destroy its units, detach it from every
    /// subscription and drop it from the scene. Returns `false` for unknown ids.
    ///
    /// Works the same for animations created by [`ScrollScene::reveal`] and by
    /// [`ScrollScene::bind`]; the subscription itself stays registered.
    pub fn unmount(&mut self, animation: AnimationId) -> bool {
        let Some(mut anim) = self.animations.remove(&animation) else {
            return false;
        };
        anim.unmount();
        self.bindings.retain(|_, bound| {
            bound.retain(|id| *id != animation);
            !bound.is_empty()
        });
        true
    }

    /// Unregister the trigger and unmount the animation of a [`RevealHandle`].
    pub fn teardown(&mut self, handle: RevealHandle) {
        self.unregister(handle.subscription);
        self.unmount(handle.animation);
    }

    /// Re-resolve trigger windows after a layout change; the next frame recomputes.
    pub fn refresh(&mut self, layout: &dyn LayoutSource, viewport: Viewport) -> usize {
        let updated = self.tracker.refresh(layout, viewport);
        self.scroll_offset = Some(viewport.scroll_offset);
        self.pending = true;
        updated
    }

    /// Animation by id; `None` once unmounted.
    pub fn animation(&self, id: AnimationId) -> Option<&StaggerAnimator> {
        self.animations.get(&id)
    }

    /// Animations attached to `subscription`.
    pub fn attached(&self, subscription: SubscriptionId) -> &[AnimationId] {
        self.bindings
            .get(&subscription)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current progress of `subscription`.
    pub fn state(&self, subscription: SubscriptionId) -> Option<ProgressState> {
        self.tracker.state(subscription)
    }

    /// The underlying tracker (read-only; progress is mutated only through frames).
    pub fn tracker(&self) -> &TriggerTracker {
        &self.tracker
    }

    /// Number of animations held by the scene.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Last scroll offset seen.
    pub fn scroll_offset(&self) -> Option<f64> {
        self.scroll_offset
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scroll_scene.rs"]
mod tests;
