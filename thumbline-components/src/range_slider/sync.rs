use tracing::{debug, trace};

use super::{
    RangeSlider, RangeSliderArgs, Thumb, VisualUpdate, geometry::thumb_center,
    store::WriteSource,
};

/// Values the host supplies as controlled props.
///
/// `None` leaves a thumb uncontrolled; non-finite values count as `None`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ControlledValues {
    /// Controlled low value.
    pub low: Option<f64>,
    /// Controlled high value.
    pub high: Option<f64>,
}

impl ControlledValues {
    /// Controls both thumbs.
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// Controls the low thumb only.
    pub fn low(low: f64) -> Self {
        Self {
            low: Some(low),
            high: None,
        }
    }

    /// Controls the high thumb only.
    pub fn high(high: f64) -> Self {
        Self {
            low: None,
            high: Some(high),
        }
    }

    /// Value supplied for a thumb.
    pub fn get(&self, thumb: Thumb) -> Option<f64> {
        match thumb {
            Thumb::Low => self.low,
            Thumb::High => self.high,
        }
    }

    fn set(&mut self, thumb: Thumb, value: Option<f64>) {
        match thumb {
            Thumb::Low => self.low = value,
            Thumb::High => self.high = value,
        }
    }

    fn sanitized(self) -> Self {
        Self {
            low: self.low.filter(|v| v.is_finite()),
            high: self.high.filter(|v| v.is_finite()),
        }
    }

    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

impl From<&RangeSliderArgs> for ControlledValues {
    fn from(args: &RangeSliderArgs) -> Self {
        Self {
            low: args.low,
            high: args.high,
        }
    }
}

/// Remembers the previous controlled props so only real changes are applied.
#[derive(Debug, Clone)]
pub(super) struct SyncBridge {
    previous: ControlledValues,
}

impl SyncBridge {
    pub(super) fn new(initial: ControlledValues) -> Self {
        Self {
            previous: initial.sanitized(),
        }
    }

    /// Stores `incoming` and returns the previous snapshot.
    fn advance(&mut self, incoming: ControlledValues) -> ControlledValues {
        std::mem::replace(&mut self.previous, incoming)
    }
}

impl RangeSlider {
    /// Reconciles externally controlled values with the internal store.
    ///
    /// A thumb is written only when its controlled value differs from the one
    /// supplied last time. A value that merely echoes the user's latest drag
    /// write is adopted without another notification. Returns `true` when the
    /// store was written.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sync(&mut self, controlled: ControlledValues) -> bool {
        let incoming = controlled.sanitized();
        let previous = self.bridge.advance(incoming);
        self.args.low = incoming.low;
        self.args.high = incoming.high;

        let mut writes = ControlledValues::default();
        for thumb in self.thumbs() {
            let Some(value) = incoming.get(thumb) else {
                continue;
            };
            if previous.get(thumb) == Some(value) {
                continue;
            }
            if self.store.source(thumb) == WriteSource::User
                && self.bounds.clamp(value) == self.store.value(thumb)
            {
                trace!(?thumb, value, "controlled value echoes the last drag");
                self.store.adopt_external(thumb);
                continue;
            }
            writes.set(thumb, Some(value));
        }
        if writes.is_empty() {
            return false;
        }

        let values = self.store.write_external(writes.low, writes.high);
        self.rebase_session();
        debug!(low = values.low, high = values.high, "applied controlled values");
        self.resync();
        true
    }

    /// Pushes every transform for the current values and reports them with
    /// `by_user = false`. Followers are placed over the dragged thumb, or the
    /// low thumb outside a drag. Does nothing until layout is known.
    pub(super) fn resync(&mut self) -> bool {
        if !self.metrics.is_ready() {
            trace!("resync deferred until layout is known");
            return false;
        }
        for thumb in self.thumbs() {
            if let Some(offset) = self.thumb_offset(thumb) {
                self.emit(VisualUpdate::ThumbOffset { thumb, offset });
            }
        }
        if let Some(rail) = self.selected_rail() {
            self.emit(VisualUpdate::SelectedRail(rail));
        }
        let followed = self.drag.active_thumb().unwrap_or(Thumb::Low);
        if let Some(offset) = self.thumb_offset(followed) {
            let center = thumb_center(offset, self.metrics.thumb_width);
            let value = self.store.value(followed);
            for frame in self
                .followers
                .update(center, value, self.metrics.container_width)
            {
                self.emit(VisualUpdate::Follower(frame));
            }
        }
        let values = self.store.snapshot();
        self.args
            .on_value_changed
            .call((values.low, values.high, false));
        true
    }
}
