use super::{
    Thumb,
    geometry::{DomainBounds, clamp_value},
};

/// Who performed the latest write of a thumb's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteSource {
    /// Controlled props supplied by the host.
    #[default]
    External,
    /// A drag gesture.
    User,
}

/// Snapshot of the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValues {
    /// Low thumb value.
    pub low: f64,
    /// High thumb value; pinned to `max` without range mode.
    pub high: f64,
}

impl RangeValues {
    /// Value of one thumb.
    pub fn value(&self, thumb: Thumb) -> f64 {
        match thumb {
            Thumb::Low => self.low,
            Thumb::High => self.high,
        }
    }
}

/// Current low/high values and the source of each thumb's last write.
///
/// Every write re-establishes `min <= low <= high <= max` and, in range mode,
/// `high - low >= min_range`. Writes are last-write-wins: the thumb being
/// written keeps its (clamped) value and its sibling yields if needed.
#[derive(Debug, Clone)]
pub(super) struct ValueStore {
    bounds: DomainBounds,
    range_enabled: bool,
    low: f64,
    high: f64,
    sources: [WriteSource; 2],
}

impl ValueStore {
    pub(super) fn new(
        bounds: DomainBounds,
        range_enabled: bool,
        low: Option<f64>,
        high: Option<f64>,
    ) -> Self {
        let mut store = Self {
            bounds,
            range_enabled,
            low: low.filter(|v| v.is_finite()).unwrap_or(bounds.min),
            high: high.filter(|v| v.is_finite()).unwrap_or(bounds.max),
            sources: [WriteSource::External; 2],
        };
        store.normalize(Thumb::Low);
        store
    }

    pub(super) fn snapshot(&self) -> RangeValues {
        RangeValues {
            low: self.low,
            high: self.high,
        }
    }

    pub(super) fn value(&self, thumb: Thumb) -> f64 {
        self.snapshot().value(thumb)
    }

    pub(super) fn source(&self, thumb: Thumb) -> WriteSource {
        self.sources[thumb.index()]
    }

    pub(super) fn range_enabled(&self) -> bool {
        self.range_enabled
    }

    /// Writes one thumb and returns the resulting snapshot.
    pub(super) fn write(&mut self, thumb: Thumb, value: f64, source: WriteSource) -> RangeValues {
        if thumb == Thumb::High && !self.range_enabled {
            return self.snapshot();
        }
        match thumb {
            Thumb::Low => self.low = value,
            Thumb::High => self.high = value,
        }
        self.sources[thumb.index()] = source;
        self.normalize(thumb);
        self.snapshot()
    }

    /// Writes the externally supplied values. A lone `high` keeps priority
    /// over the existing low; otherwise low wins conflicts.
    pub(super) fn write_external(&mut self, low: Option<f64>, high: Option<f64>) -> RangeValues {
        let high = high.filter(|_| self.range_enabled);
        if let Some(low) = low {
            self.low = low;
            self.sources[Thumb::Low.index()] = WriteSource::External;
        }
        if let Some(high) = high {
            self.high = high;
            self.sources[Thumb::High.index()] = WriteSource::External;
        }
        let keep = if low.is_none() && high.is_some() {
            Thumb::High
        } else {
            Thumb::Low
        };
        self.normalize(keep);
        self.snapshot()
    }

    /// Marks a thumb's current value as externally owned without changing it.
    pub(super) fn adopt_external(&mut self, thumb: Thumb) {
        self.sources[thumb.index()] = WriteSource::External;
    }

    pub(super) fn set_bounds(&mut self, bounds: DomainBounds) {
        self.bounds = bounds;
        self.normalize(Thumb::Low);
    }

    pub(super) fn set_range_enabled(&mut self, range_enabled: bool) {
        self.range_enabled = range_enabled;
        self.normalize(Thumb::Low);
    }

    fn normalize(&mut self, keep: Thumb) {
        let DomainBounds {
            min,
            max,
            min_range,
            ..
        } = self.bounds;
        self.low = clamp_value(self.low, min, max);
        if !self.range_enabled {
            self.high = max;
            return;
        }
        self.high = clamp_value(self.high, min, max);
        match keep {
            Thumb::Low => {
                self.low = clamp_value(self.low, min, max - min_range);
                self.high = clamp_value(self.high, self.low + min_range, max);
            }
            Thumb::High => {
                self.high = clamp_value(self.high, min + min_range, max);
                self.low = clamp_value(self.low, min, self.high - min_range);
            }
        }
    }
}
