// Copyright 2025 the Callbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::anchors::{SheetAnchors, SheetValue};
use crate::animation::{Generation, SheetAnimation};
use crate::config::SheetConfig;

/// Something the host may want to react to, drained with
/// [`SheetState::take_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetEvent {
    /// An animation toward `target` began.
    AnimationStarted {
        /// The new animation.
        generation: Generation,
        /// Where it is heading.
        target: SheetValue,
    },
    /// An in-flight animation was replaced by newer input.
    AnimationCancelled {
        /// The cancelled animation.
        generation: Generation,
    },
    /// The sheet came to rest on `value`.
    Settled {
        /// The anchor reached.
        value: SheetValue,
    },
    /// A dismiss was requested; the sheet is collapsing.
    DismissRequested,
}

/// Accessibility action offered on the drag handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleAction {
    /// Open the sheet fully.
    Expand,
    /// Close the sheet down to its handle.
    Collapse,
}

/// Anchored drag state machine for the action sheet.
///
/// The sheet rests on one of the [`SheetAnchors`] and moves between them
/// through direct manipulation ([`drag`](Self::drag) then
/// [`settle`](Self::settle)) or programmatic requests
/// ([`expand`](Self::expand), [`collapse`](Self::collapse)). Animations are
/// advanced by the host through [`tick`](Self::tick); the most recent input
/// always wins and cancels whatever animation was in flight.
///
/// `current_value` is the anchor the sheet last came to rest on and
/// `target_value` the one it is heading to. Until anchors are measured there
/// is no offset and every motion request is a no-op, except `expand` and
/// `collapse`, which are remembered and applied once anchors arrive.
#[derive(Clone, Debug)]
pub struct SheetState {
    config: SheetConfig,
    anchors: Option<SheetAnchors>,
    current: SheetValue,
    target: SheetValue,
    offset: Option<f64>,
    pending: Option<SheetValue>,
    animation: Option<SheetAnimation>,
    last_generation: Generation,
    dragging: bool,
    events: Vec<SheetEvent>,
}

impl SheetState {
    /// Creates a sheet that will rest on `initial` once anchors are known.
    #[must_use]
    pub fn new(config: SheetConfig, initial: SheetValue) -> Self {
        Self {
            config,
            anchors: None,
            current: initial,
            target: initial,
            offset: None,
            pending: None,
            animation: None,
            last_generation: Generation::default(),
            dragging: false,
            events: Vec::new(),
        }
    }

    /// The tunables in use.
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The anchors, once measured.
    #[must_use]
    pub fn anchors(&self) -> Option<&SheetAnchors> {
        self.anchors.as_ref()
    }

    /// The anchor the sheet last came to rest on.
    #[must_use]
    pub fn current_value(&self) -> SheetValue {
        self.current
    }

    /// The anchor the sheet is resting on or heading to.
    #[must_use]
    pub fn target_value(&self) -> SheetValue {
        self.target
    }

    /// Offset along the sheet axis; `None` until anchors are measured.
    #[must_use]
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Returns `true` between the first [`drag`](Self::drag) and the
    /// following [`settle`](Self::settle).
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Generation of the in-flight animation.
    #[must_use]
    pub fn animation_generation(&self) -> Option<Generation> {
        self.animation.map(|animation| animation.generation)
    }

    /// Installs or replaces the anchors.
    ///
    /// A sheet at rest moves with its anchor. Any other offset is kept, only
    /// clamped into the new bounds, and an in-flight animation is redirected
    /// to its target's new position. A value missing from the new anchors is
    /// replaced by `Collapsed`, and an animation heading there follows it. A remembered `expand`/`collapse` is
    /// applied by snapping to its anchor.
    pub fn update_anchors(&mut self, anchors: SheetAnchors) {
        let previous = self.anchors.replace(anchors);
        for value in [&mut self.current, &mut self.target] {
            if !anchors.has(*value) {
                *value = SheetValue::Collapsed;
            }
        }

        let Some(offset) = self.offset else {
            let value = self.pending.take().unwrap_or(self.target);
            let value = if anchors.has(value) {
                value
            } else {
                SheetValue::Collapsed
            };
            self.snap_to(value);
            log::debug!("anchors measured, sheet placed at {value:?}");
            return;
        };

        if let Some(animation) = &mut self.animation {
            // A target that disappeared was replaced above.
            animation.target = self.target;
            if let Some(to) = anchors.offset(self.target) {
                let from = anchors.clamp(offset);
                animation.retarget(from, to);
                self.offset = Some(from);
                return;
            }
            self.cancel_animation();
        }

        let at_rest = !self.dragging
            && previous
                .and_then(|previous| previous.offset(self.current))
                .is_some_and(|anchor| anchor == offset);
        if at_rest {
            self.offset = anchors.offset(self.current);
        } else {
            self.offset = Some(anchors.clamp(offset));
        }
    }

    /// Animates to `Expanded`.
    pub fn expand(&mut self) {
        self.animate_to(SheetValue::Expanded);
    }

    /// Animates to `Collapsed`. A no-op when already resting there.
    pub fn collapse(&mut self) {
        self.animate_to(SheetValue::Collapsed);
    }

    /// Requests a dismiss: collapses and reports [`SheetEvent::DismissRequested`].
    pub fn dismiss(&mut self) {
        self.events.push(SheetEvent::DismissRequested);
        self.collapse();
    }

    /// Animates to `value`.
    ///
    /// Before anchors exist the request is remembered and applied when they
    /// arrive. Values the anchors do not define are ignored. A request for
    /// the value the sheet already rests on, or is already animating to, does
    /// nothing.
    pub fn animate_to(&mut self, value: SheetValue) {
        let Some(anchors) = self.anchors else {
            log::debug!("deferring move to {value:?} until anchors are measured");
            self.pending = Some(value);
            return;
        };
        let Some(to) = anchors.offset(value) else {
            log::debug!("ignoring move to {value:?}, no such anchor");
            return;
        };
        if let Some(animation) = &self.animation {
            if animation.target == value && animation.to() == to {
                return;
            }
        } else if !self.dragging && self.current == value && self.offset == Some(to) {
            return;
        }
        self.dragging = false;
        self.start_animation(value);
    }

    /// Moves the sheet by `delta` along its axis, clamped to the anchors.
    ///
    /// Cancels any in-flight animation. Returns the delta actually applied;
    /// `0` when anchors are not measured yet or `delta` is not finite.
    pub fn drag(&mut self, delta: f64) -> f64 {
        let (Some(anchors), Some(offset)) = (self.anchors, self.offset) else {
            return 0.0;
        };
        if !delta.is_finite() {
            return 0.0;
        }
        self.cancel_animation();
        self.dragging = true;
        let next = anchors.clamp(offset + delta);
        log::trace!("drag {delta} moves sheet {offset} -> {next}");
        self.offset = Some(next);
        next - offset
    }

    /// Releases the sheet with `velocity`, in pixels per second, and animates
    /// to the chosen anchor.
    ///
    /// Positive velocity moves toward `Collapsed`. Above the velocity
    /// threshold the next anchor in the direction of travel wins; below it
    /// the positional threshold decides between the two anchors around the
    /// offset. A non-finite velocity counts as zero. No-op without anchors.
    pub fn settle(&mut self, velocity: f64) {
        let (Some(anchors), Some(offset)) = (self.anchors, self.offset) else {
            return;
        };
        self.dragging = false;
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let value = self.settle_target(&anchors, offset, velocity);
        log::debug!("settling from {offset} at {velocity} px/s toward {value:?}");
        self.start_animation(value);
    }

    /// Advances the in-flight animation to `now_ms` on the host clock.
    ///
    /// The first tick of an animation starts its clock. Returns `true` while
    /// the animation is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(animation) = &mut self.animation else {
            return false;
        };
        let (offset, done) = animation.sample(now_ms);
        let target = animation.target;
        self.offset = Some(offset);
        log::trace!("tick {now_ms}: offset {offset}");
        if done {
            self.animation = None;
            self.finish(target);
        }
        !done
    }

    /// Drains the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        core::mem::take(&mut self.events)
    }

    /// The accessibility actions the drag handle currently offers.
    ///
    /// `Expand` is offered unless the sheet is at or heading to `Expanded`,
    /// and `Collapse` unless it is at or heading to `Collapsed`. Nothing is
    /// offered before anchors are measured.
    #[must_use]
    pub fn handle_actions(&self) -> SmallVec<[HandleAction; 2]> {
        let mut actions = SmallVec::new();
        if self.anchors.is_none() {
            return actions;
        }
        if self.target != SheetValue::Expanded {
            actions.push(HandleAction::Expand);
        }
        if self.target != SheetValue::Collapsed {
            actions.push(HandleAction::Collapse);
        }
        actions
    }

    /// Runs `action` if it is currently offered. Returns whether it ran.
    pub fn perform_handle_action(&mut self, action: HandleAction) -> bool {
        if !self.handle_actions().contains(&action) {
            return false;
        }
        match action {
            HandleAction::Expand => self.expand(),
            HandleAction::Collapse => self.collapse(),
        }
        true
    }

    fn settle_target(&self, anchors: &SheetAnchors, offset: f64, velocity: f64) -> SheetValue {
        if velocity.abs() > self.config.velocity_threshold_px() {
            return anchors.next_in_direction(offset, velocity);
        }
        let ((lower, low), (upper, high)) = anchors.bracket(offset);
        if low == high {
            return lower;
        }
        let gap = high - low;
        let threshold = self.config.positional_threshold;
        let boundary = if self.current == lower {
            low + gap * threshold
        } else if self.current == upper {
            high - gap * threshold
        } else {
            low + gap * 0.5
        };
        if offset > boundary { upper } else { lower }
    }

    fn start_animation(&mut self, value: SheetValue) {
        let (Some(anchors), Some(from)) = (self.anchors, self.offset) else {
            return;
        };
        let Some(to) = anchors.offset(value) else {
            return;
        };
        self.cancel_animation();
        self.target = value;
        if from == to {
            self.finish(value);
            return;
        }
        self.last_generation = Generation(self.last_generation.0 + 1);
        let generation = self.last_generation;
        self.animation = Some(SheetAnimation::new(
            generation,
            value,
            from,
            to,
            self.config.animation_duration_ms,
        ));
        log::debug!("animation {generation:?} started toward {value:?}");
        self.events
            .push(SheetEvent::AnimationStarted { generation, target: value });
    }

    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            log::debug!("animation {:?} cancelled", animation.generation);
            self.events.push(SheetEvent::AnimationCancelled {
                generation: animation.generation,
            });
        }
    }

    fn snap_to(&mut self, value: SheetValue) {
        self.cancel_animation();
        self.dragging = false;
        self.current = value;
        self.target = value;
        self.offset = self.anchors.and_then(|anchors| anchors.offset(value));
    }

    fn finish(&mut self, value: SheetValue) {
        self.current = value;
        self.target = value;
        log::debug!("sheet settled at {value:?}");
        self.events.push(SheetEvent::Settled { value });
    }
}

impl Default for SheetState {
    fn default() -> Self {
        Self::new(SheetConfig::default(), SheetValue::Collapsed)
    }
}
