//! Widths reported by the external layout system.

use crate::px::Px;

/// Container and thumb widths as last measured by the host.
///
/// A zero (or otherwise non-positive) width means "not measured yet"; every
/// position computation must check [`LayoutMetrics::is_ready`] first.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Width of the slider container.
    pub container_width: Px,
    /// Width of one thumb.
    pub thumb_width: Px,
}

/// What changed when a new measurement arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsChange {
    /// The measurement equals the stored one.
    Unchanged,
    /// Metrics changed but at least one width is still unknown.
    Pending,
    /// Both widths just became known.
    BecameReady,
    /// Metrics were ready and one of the widths changed.
    Resized,
}

impl LayoutMetrics {
    /// Creates metrics from both widths.
    pub fn new(container_width: Px, thumb_width: Px) -> Self {
        Self {
            container_width,
            thumb_width,
        }
    }

    /// `true` once both widths are positive.
    pub fn is_ready(&self) -> bool {
        self.container_width.is_positive() && self.thumb_width.is_positive()
    }

    /// Stores a new container width and reports the transition.
    pub fn set_container_width(&mut self, width: Px) -> MetricsChange {
        let next = Self {
            container_width: width,
            ..*self
        };
        self.replace(next)
    }

    /// Stores a new thumb width and reports the transition.
    pub fn set_thumb_width(&mut self, width: Px) -> MetricsChange {
        let next = Self {
            thumb_width: width,
            ..*self
        };
        self.replace(next)
    }

    fn replace(&mut self, next: Self) -> MetricsChange {
        if next == *self {
            return MetricsChange::Unchanged;
        }
        let was_ready = self.is_ready();
        *self = next;
        match (was_ready, self.is_ready()) {
            (false, true) => MetricsChange::BecameReady,
            (true, true) => MetricsChange::Resized,
            _ => MetricsChange::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_requires_both_widths() {
        let mut metrics = LayoutMetrics::default();
        assert!(!metrics.is_ready());
        assert_eq!(
            metrics.set_container_width(Px(300.0)),
            MetricsChange::Pending
        );
        assert_eq!(metrics.set_thumb_width(Px(20.0)), MetricsChange::BecameReady);
        assert!(metrics.is_ready());
    }

    #[test]
    fn repeated_measurement_is_unchanged() {
        let mut metrics = LayoutMetrics::new(Px(300.0), Px(20.0));
        assert_eq!(
            metrics.set_container_width(Px(300.0)),
            MetricsChange::Unchanged
        );
        assert_eq!(metrics.set_container_width(Px(320.0)), MetricsChange::Resized);
    }

    #[test]
    fn collapsing_to_zero_is_pending() {
        let mut metrics = LayoutMetrics::new(Px(300.0), Px(20.0));
        assert_eq!(metrics.set_container_width(Px::ZERO), MetricsChange::Pending);
        assert!(!metrics.is_ready());
        assert_eq!(
            metrics.set_container_width(Px(300.0)),
            MetricsChange::BecameReady
        );
    }
}
