//! A headless slider engine with one or two thumbs.
//!
//! ## Usage
//!
//! Feed the engine layout widths and gesture events from the host; it answers
//! with value notifications and transforms for the thumbs, the selected rail
//! and the label/notch followers.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use thumbline_components::range_slider::{RangeSlider, RangeSliderArgs};
//! use thumbline_ui::{GestureEvent, Px};
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let sink = changes.clone();
//! let args = RangeSliderArgs::default()
//!     .low(20.0)
//!     .high(80.0)
//!     .on_value_changed(move |low, high, by_user| {
//!         sink.lock().unwrap().push((low, high, by_user));
//!     });
//! let mut slider = RangeSlider::new(args).expect("valid bounds");
//!
//! slider.on_container_layout(Px::new(300.0));
//! slider.on_thumb_layout(Px::new(20.0));
//!
//! // Tap on the right half: the high thumb is closer and jumps to 75.
//! slider.handle_gesture(GestureEvent::Down {
//!     page_x: Px::new(230.0),
//!     location_x: Px::new(220.0),
//!     active_touches: 1,
//! });
//! slider.handle_gesture(GestureEvent::Release);
//!
//! assert_eq!(slider.values().high, 75.0);
//! assert_eq!(changes.lock().unwrap().last(), Some(&(20.0, 75.0, true)));
//! ```
use derive_setters::Setters;
use thumbline_ui::{CallbackWith, LayoutMetrics, MetricsChange, Px};
use tracing::{debug, trace};

use crate::error::SliderError;

pub use follower::{FollowerFrame, FollowerKind};
pub use geometry::{
    DomainBounds, RailExtent, offset_for_pointer, position_for_value, selected_rail,
    snap_to_step, thumb_center, value_for_position,
};
pub use interaction::GestureResponse;
pub use render::{FollowerVisual, RenderHooks, SliderScene, ThumbVisual};
pub use store::{RangeValues, WriteSource};
pub use sync::ControlledValues;

use follower::FollowerProjector;
use interaction::DragController;
use store::ValueStore;
use sync::SyncBridge;

mod follower;
mod geometry;
mod interaction;
mod render;
mod selector;
mod store;
mod sync;

/// One of the two slider thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumb {
    /// Lower end of the range; the only thumb without range mode.
    Low,
    /// Upper end of the range.
    High,
}

impl Thumb {
    /// Both thumbs, low first.
    pub const ALL: [Thumb; 2] = [Thumb::Low, Thumb::High];

    pub(crate) fn index(self) -> usize {
        match self {
            Thumb::Low => 0,
            Thumb::High => 1,
        }
    }
}

/// Transform changes pushed to the host as they happen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualUpdate {
    /// A thumb's left edge moved.
    ThumbOffset {
        /// The thumb that moved.
        thumb: Thumb,
        /// New left-edge translation.
        offset: Px,
    },
    /// The selected rail changed.
    SelectedRail(RailExtent),
    /// A follower moved or changed visibility.
    Follower(FollowerFrame),
    /// A thumb was pressed or released.
    Pressed {
        /// The thumb of the drag session.
        thumb: Thumb,
        /// `true` on touch-down, `false` on release or termination.
        pressed: bool,
    },
}

/// Arguments for [`RangeSlider`].
#[derive(PartialEq, Clone, Setters)]
pub struct RangeSliderArgs {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Distance between neighbouring selectable values.
    pub step: f64,
    /// Minimum distance between low and high in range mode.
    pub min_range: f64,
    /// Controlled low value. `None` leaves the low thumb uncontrolled.
    #[setters(strip_option)]
    pub low: Option<f64>,
    /// Controlled high value. `None` leaves the high thumb uncontrolled.
    #[setters(strip_option)]
    pub high: Option<f64>,
    /// Single-thumb mode: only the low thumb exists and high is pinned to
    /// `max`.
    pub disable_range: bool,
    /// Ignore all touches.
    pub disabled: bool,
    /// Let followers extend past the container edges.
    pub allow_label_overflow: bool,
    /// Keep the label visible when no drag is in progress.
    pub floating_label: bool,
    /// Called with `(low, high, by_user)` whenever the values change.
    #[setters(skip)]
    pub on_value_changed: CallbackWith<(f64, f64, bool)>,
    /// Called with `(low, high)` when a drag session starts.
    #[setters(skip)]
    pub on_slider_touch_start: CallbackWith<(f64, f64)>,
    /// Called with `(low, high)` when a drag session ends.
    #[setters(skip)]
    pub on_slider_touch_end: CallbackWith<(f64, f64)>,
    /// Receives transform changes for thumbs, rail and followers.
    #[setters(skip)]
    pub on_visual_update: CallbackWith<VisualUpdate>,
}

impl RangeSliderArgs {
    /// Sets the value change handler.
    pub fn on_value_changed<F>(mut self, on_value_changed: F) -> Self
    where
        F: Fn(f64, f64, bool) + Send + Sync + 'static,
    {
        self.on_value_changed =
            CallbackWith::new(move |(low, high, by_user)| on_value_changed(low, high, by_user));
        self
    }

    /// Sets the value change handler using a shared callback.
    pub fn on_value_changed_shared(
        mut self,
        on_value_changed: impl Into<CallbackWith<(f64, f64, bool)>>,
    ) -> Self {
        self.on_value_changed = on_value_changed.into();
        self
    }

    /// Sets the touch start handler.
    pub fn on_slider_touch_start<F>(mut self, on_touch_start: F) -> Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.on_slider_touch_start =
            CallbackWith::new(move |(low, high)| on_touch_start(low, high));
        self
    }

    /// Sets the touch end handler.
    pub fn on_slider_touch_end<F>(mut self, on_touch_end: F) -> Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.on_slider_touch_end = CallbackWith::new(move |(low, high)| on_touch_end(low, high));
        self
    }

    /// Sets the visual update sink.
    pub fn on_visual_update<F>(mut self, on_visual_update: F) -> Self
    where
        F: Fn(VisualUpdate) + Send + Sync + 'static,
    {
        self.on_visual_update = CallbackWith::new(on_visual_update);
        self
    }

    /// Validated value domain described by these args.
    pub fn bounds(&self) -> Result<DomainBounds, SliderError> {
        DomainBounds::new(self.min, self.max, self.step, self.min_range)
    }
}

impl Default for RangeSliderArgs {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            min_range: 0.0,
            low: None,
            high: None,
            disable_range: false,
            disabled: false,
            allow_label_overflow: false,
            floating_label: false,
            on_value_changed: CallbackWith::noop(),
            on_slider_touch_start: CallbackWith::noop(),
            on_slider_touch_end: CallbackWith::noop(),
            on_visual_update: CallbackWith::noop(),
        }
    }
}

/// Drag and value state of one slider control.
///
/// All methods run synchronously on the thread that dispatches host events;
/// every notification for an event has been delivered when the method
/// returns.
pub struct RangeSlider {
    args: RangeSliderArgs,
    bounds: DomainBounds,
    metrics: LayoutMetrics,
    store: ValueStore,
    bridge: SyncBridge,
    drag: DragController,
    followers: FollowerProjector,
}

impl RangeSlider {
    /// Creates a slider, rejecting bounds that leave no usable domain.
    pub fn new(args: RangeSliderArgs) -> Result<Self, SliderError> {
        let bounds = args.bounds().inspect_err(|err| {
            tracing::warn!("rejected range slider configuration: {err}");
        })?;
        let store = ValueStore::new(bounds, !args.disable_range, args.low, args.high);
        let followers = FollowerProjector::new(
            args.allow_label_overflow,
            args.floating_label,
            store.snapshot().low,
        );
        Ok(Self {
            bridge: SyncBridge::new(ControlledValues::from(&args)),
            args,
            bounds,
            metrics: LayoutMetrics::default(),
            store,
            drag: DragController::default(),
            followers,
        })
    }

    /// Applies a new set of args, as a host does on every render pass.
    ///
    /// Bounds are validated before anything changes; on error the slider
    /// keeps its previous configuration. Controlled values then go through
    /// the external sync bridge.
    pub fn update_args(&mut self, args: RangeSliderArgs) -> Result<(), SliderError> {
        let bounds = args.bounds()?;
        let bounds_changed = bounds != self.bounds;
        let range_changed = args.disable_range != self.args.disable_range;
        let disabled = args.disabled;
        let allow_label_overflow = args.allow_label_overflow;
        let floating_label = args.floating_label;
        let controlled = ControlledValues::from(&args);
        let previous_floating_label = self.args.floating_label;
        self.args = args;

        self.set_disabled(disabled);
        self.set_allow_label_overflow(allow_label_overflow);
        if floating_label != previous_floating_label {
            let frame = self.followers.set_floating_label(floating_label);
            self.emit(VisualUpdate::Follower(frame));
        }
        if range_changed {
            self.store.set_range_enabled(!self.args.disable_range);
        }
        if bounds_changed {
            self.bounds = bounds;
            self.store.set_bounds(bounds);
        }
        if bounds_changed || range_changed {
            self.rebase_session();
        }

        let applied = self.sync(controlled);
        if (bounds_changed || range_changed) && !applied {
            self.resync();
        }
        Ok(())
    }

    /// Replaces the value domain and re-clamps the current values.
    pub fn set_bounds(
        &mut self,
        min: f64,
        max: f64,
        step: f64,
        min_range: f64,
    ) -> Result<(), SliderError> {
        let bounds = DomainBounds::new(min, max, step, min_range)?;
        if bounds == self.bounds {
            return Ok(());
        }
        self.args.min = min;
        self.args.max = max;
        self.args.step = step;
        self.args.min_range = min_range;
        self.bounds = bounds;
        self.store.set_bounds(bounds);
        self.rebase_session();
        self.resync();
        Ok(())
    }

    /// Enables or disables touch handling. Disabling ends a live drag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.args.disabled = disabled;
        if disabled && self.drag.is_active() {
            debug!("slider disabled during drag; ending session");
            self.end_session();
        }
    }

    /// Allows followers to extend past the container edges.
    pub fn set_allow_label_overflow(&mut self, allow: bool) {
        self.args.allow_label_overflow = allow;
        self.followers.set_allow_overflow(allow);
    }

    /// Keeps the label visible outside drag sessions.
    pub fn set_floating_label(&mut self, floating: bool) {
        if self.args.floating_label == floating {
            return;
        }
        self.args.floating_label = floating;
        let frame = self.followers.set_floating_label(floating);
        self.emit(VisualUpdate::Follower(frame));
    }

    /// Records the container width reported by the host layout.
    pub fn on_container_layout(&mut self, width: Px) {
        let change = self.metrics.set_container_width(width);
        self.after_metrics_change(change);
    }

    /// Records the thumb width reported by the host layout.
    pub fn on_thumb_layout(&mut self, width: Px) {
        let change = self.metrics.set_thumb_width(width);
        self.after_metrics_change(change);
    }

    /// Records a follower's own width and re-centres it.
    pub fn on_follower_layout(&mut self, kind: FollowerKind, width: Px) {
        if let Some(frame) =
            self.followers
                .set_width(kind, width, self.metrics.container_width)
        {
            self.emit(VisualUpdate::Follower(frame));
        }
    }

    fn after_metrics_change(&mut self, change: MetricsChange) {
        match change {
            MetricsChange::BecameReady | MetricsChange::Resized => {
                debug!(?change, metrics = ?self.metrics, "layout changed");
                self.resync();
            }
            MetricsChange::Pending => {
                trace!(metrics = ?self.metrics, "layout incomplete");
            }
            MetricsChange::Unchanged => {}
        }
    }

    /// Current args, including the latest controlled values.
    pub fn args(&self) -> &RangeSliderArgs {
        &self.args
    }

    /// Current value domain.
    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    /// Latest layout measurements.
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Current low/high values.
    pub fn values(&self) -> RangeValues {
        self.store.snapshot()
    }

    /// Source of the latest write to a thumb's value.
    pub fn write_source(&self, thumb: Thumb) -> WriteSource {
        self.store.source(thumb)
    }

    /// `true` unless single-thumb mode is active.
    pub fn range_enabled(&self) -> bool {
        self.store.range_enabled()
    }

    /// `true` while touches are ignored.
    pub fn is_disabled(&self) -> bool {
        self.args.disabled
    }

    /// `true` while a drag session is live.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Thumb of the live drag session.
    pub fn active_thumb(&self) -> Option<Thumb> {
        self.drag.active_thumb()
    }

    /// Thumbs present in the current mode, low first.
    pub fn thumbs(&self) -> impl Iterator<Item = Thumb> + use<> {
        let range_enabled = self.range_enabled();
        Thumb::ALL
            .into_iter()
            .filter(move |thumb| range_enabled || *thumb == Thumb::Low)
    }

    /// Left-edge offset of a thumb; `None` before layout is known or for the
    /// high thumb in single-thumb mode.
    pub fn thumb_offset(&self, thumb: Thumb) -> Option<Px> {
        if !self.metrics.is_ready() || (thumb == Thumb::High && !self.range_enabled()) {
            return None;
        }
        Some(position_for_value(
            self.store.value(thumb),
            self.metrics.container_width,
            self.metrics.thumb_width,
            self.bounds.min,
            self.bounds.max,
        ))
    }

    /// Extent of the selected rail; `None` before layout is known.
    pub fn selected_rail(&self) -> Option<RailExtent> {
        let low = self.thumb_offset(Thumb::Low)?;
        Some(selected_rail(
            low,
            self.thumb_offset(Thumb::High),
            self.metrics.thumb_width,
        ))
    }

    /// Current frame of a follower overlay.
    pub fn follower(&self, kind: FollowerKind) -> FollowerFrame {
        self.followers.frame(kind)
    }

    fn emit(&self, update: VisualUpdate) {
        self.args.on_visual_update.call(update);
    }
}


#[cfg(test)]
mod tests {
    use thumbline_ui::GestureEvent;

    use super::{testing::*, *};

    fn range(low: f64, high: f64) -> RangeSliderArgs {
        RangeSliderArgs::default().low(low).high(high)
    }

    #[test]
    fn rejects_empty_domain() {
        let result = RangeSlider::new(RangeSliderArgs::default().min(10.0).max(10.0));
        assert!(matches!(result, Err(SliderError::EmptyDomain { .. })));
    }

    #[test]
    fn initial_values_default_to_full_domain() {
        let slider = RangeSlider::new(RangeSliderArgs::default()).expect("valid args");
        assert_eq!(slider.values(), RangeValues {
            low: 0.0,
            high: 100.0
        });
        assert_eq!(slider.thumb_offset(Thumb::Low), None);
        assert_eq!(slider.selected_rail(), None);
    }

    #[test]
    fn first_layout_resyncs_once() {
        let recorder = Recorder::default();
        let mut slider = RangeSlider::new(recorder.attach(range(20.0, 80.0))).expect("valid args");

        slider.on_container_layout(Px(300.0));
        assert!(recorder.changes().is_empty());
        slider.on_thumb_layout(Px(20.0));
        assert_eq!(recorder.changes(), vec![(20.0, 80.0, false)]);
        assert_eq!(slider.thumb_offset(Thumb::Low), Some(Px(56.0)));
        assert_eq!(slider.thumb_offset(Thumb::High), Some(Px(224.0)));

        slider.on_thumb_layout(Px(20.0));
        assert_eq!(recorder.changes().len(), 1);
    }

    #[test]
    fn resize_moves_thumbs() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0));
        slider.on_container_layout(Px(160.0));
        assert_eq!(recorder.changes(), vec![(20.0, 80.0, false)]);
        assert!(recorder.visuals().contains(&VisualUpdate::ThumbOffset {
            thumb: Thumb::High,
            offset: Px(112.0)
        }));
    }

    #[test]
    fn invalid_update_keeps_previous_config() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0));
        let args = slider.args().clone().step(0.0);
        assert_eq!(
            slider.update_args(args),
            Err(SliderError::InvalidStep(0.0))
        );
        assert_eq!(slider.bounds().step, 1.0);
        assert!(recorder.changes().is_empty());
    }

    #[test]
    fn narrowing_bounds_reclamps_values() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0));
        slider.set_bounds(30.0, 60.0, 1.0, 0.0).expect("valid bounds");
        assert_eq!(slider.values(), RangeValues {
            low: 30.0,
            high: 60.0
        });
        assert_eq!(recorder.changes(), vec![(30.0, 60.0, false)]);
    }

    #[test]
    fn switching_to_single_thumb_pins_high() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0));
        let args = slider.args().clone().disable_range(true);
        slider.update_args(args).expect("valid args");

        assert!(!slider.range_enabled());
        assert_eq!(slider.thumbs().collect::<Vec<_>>(), vec![Thumb::Low]);
        assert_eq!(slider.thumb_offset(Thumb::High), None);
        assert_eq!(recorder.changes(), vec![(20.0, 100.0, false)]);
        assert_eq!(
            slider.selected_rail(),
            Some(RailExtent {
                start: Px::ZERO,
                width: Px(66.0)
            })
        );
    }

    #[test]
    fn floating_label_shows_label_without_drag() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0));
        assert!(!slider.follower(FollowerKind::Label).visible);
        slider.set_floating_label(true);
        assert!(slider.follower(FollowerKind::Label).visible);
        assert!(!slider.follower(FollowerKind::Notch).visible);
        assert_eq!(recorder.visuals().len(), 1);
    }

    #[test]
    fn floating_label_sits_over_low_thumb_outside_drag() {
        let (mut slider, recorder) = laid_out(range(20.0, 80.0).floating_label(true));
        slider.on_follower_layout(FollowerKind::Label, Px(40.0));
        let label = slider.follower(FollowerKind::Label);
        assert!(label.visible);
        assert_eq!(label.translate_x, Px(46.0));
        assert_eq!(label.value, 20.0);

        let args = slider.args().clone().low(50.0);
        slider.update_args(args).expect("valid args");
        let label = slider.follower(FollowerKind::Label);
        assert_eq!(label.translate_x, Px(130.0));
        assert_eq!(label.value, 50.0);
        assert!(recorder.visuals().contains(&VisualUpdate::Follower(label)));
    }

    #[test]
    fn followers_track_dragged_thumb() {
        let (mut slider, _) = laid_out(range(20.0, 80.0));
        slider.on_follower_layout(FollowerKind::Label, Px(40.0));
        slider.handle_gesture(down(150.0));

        let label = slider.follower(FollowerKind::Label);
        assert!(label.visible);
        assert_eq!(label.value, 50.0);
        assert_eq!(label.translate_x, Px(130.0));

        slider.handle_gesture(GestureEvent::Release);
        assert!(!slider.follower(FollowerKind::Label).visible);
    }

    #[test]
    fn compose_runs_hooks_for_present_parts() {
        let (slider, _) = laid_out(range(20.0, 80.0));
        let hooks = RenderHooks::<String>::new()
            .thumb(|thumb: Thumb| format!("{thumb:?}"))
            .rail_selected(|()| "selected".to_string())
            .label(|value: f64| format!("{value}"));
        let scene = slider.compose(&hooks);

        assert_eq!(scene.rail, None);
        assert_eq!(scene.thumbs.len(), 2);
        assert_eq!(scene.thumbs[1].visual, "High");
        assert_eq!(scene.thumbs[1].offset, Some(Px(224.0)));
        let (visual, extent) = scene.rail_selected.expect("selected rail hook");
        assert_eq!(visual, "selected");
        assert_eq!(extent.map(|rail| rail.width), Some(Px(168.0)));
        assert_eq!(scene.label.map(|label| label.visual), Some("20".to_string()));
        assert!(scene.notch.is_none());
    }

    #[test]
    fn callbacks_are_compared_by_identity() {
        let args = RangeSliderArgs::default().on_value_changed(|_, _, _| {});
        assert!(args == args.clone());
        assert!(args != RangeSliderArgs::default().on_value_changed(|_, _, _| {}));
    }
}
