use thumbline_ui::Px;

use crate::error::SliderError;

/// Largest number of decimal places kept when tidying stepped values.
const MAX_DECIMALS: i32 = 12;

/// Value domain of a slider: `[min, max]` walked in `step` increments, with
/// `min_range` as the smallest allowed distance between the two thumbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBounds {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Distance between neighbouring stepped values.
    pub step: f64,
    /// Minimum separation between low and high in range mode.
    pub min_range: f64,
}

impl DomainBounds {
    /// Validates and builds a domain.
    pub fn new(min: f64, max: f64, step: f64, min_range: f64) -> Result<Self, SliderError> {
        for (field, value) in [
            ("min", min),
            ("max", max),
            ("step", step),
            ("min_range", min_range),
        ] {
            if !value.is_finite() {
                return Err(SliderError::NonFinite { field, value });
            }
        }
        if min >= max {
            return Err(SliderError::EmptyDomain { min, max });
        }
        if step <= 0.0 {
            return Err(SliderError::InvalidStep(step));
        }
        if min_range < 0.0 {
            return Err(SliderError::NegativeMinRange(min_range));
        }
        let span = max - min;
        if min_range > span {
            return Err(SliderError::MinRangeTooLarge { min_range, span });
        }
        Ok(Self {
            min,
            max,
            step,
            min_range,
        })
    }

    /// Clamps `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        clamp_value(value, self.min, self.max)
    }
}

/// Clamps into `[lo, hi]` without panicking on inverted bounds (the lower
/// bound wins) or NaN input (maps to `lo`).
pub(crate) fn clamp_value(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.min(hi).max(lo)
}

fn decimals(x: f64) -> i32 {
    let x = x.abs();
    for places in 0..MAX_DECIMALS {
        let scaled = x * 10f64.powi(places);
        if (scaled - scaled.round()).abs() < 1e-7 {
            return places;
        }
    }
    MAX_DECIMALS
}

/// Removes floating point residue such as `0.30000000000000004` so equal
/// steps compare equal.
fn tidy(value: f64, min: f64, step: f64) -> f64 {
    let factor = 10f64.powi(decimals(step).max(decimals(min)));
    (value * factor).round() / factor
}

/// Rounds `value` to the nearest selectable value.
///
/// Selectable values are `min + k * step` for every `k` that stays within
/// `max`, plus `max` itself. The input is clamped into `[min, max]` first.
/// Ties round up (towards `max`), so when `max - min` is not a multiple of
/// `step`, the trailing partial step resolves to `max` from its midpoint on.
///
/// ```
/// use thumbline_components::range_slider::snap_to_step;
///
/// assert_eq!(snap_to_step(4.4, 0.0, 10.0, 1.0), 4.0);
/// assert_eq!(snap_to_step(4.5, 0.0, 10.0, 1.0), 5.0);
/// // 0, 3, 6, 9 and 10 are selectable.
/// assert_eq!(snap_to_step(9.4, 0.0, 10.0, 3.0), 9.0);
/// assert_eq!(snap_to_step(9.5, 0.0, 10.0, 3.0), 10.0);
/// assert_eq!(snap_to_step(-5.0, 0.0, 10.0, 3.0), 0.0);
/// ```
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let raw = clamp_value(value, min, max);
    if step <= 0.0 || !step.is_finite() {
        return raw;
    }
    let index = ((raw - min) / step + 0.5).floor();
    let snapped = tidy(min + index * step, min, step);
    if snapped > max {
        return max;
    }
    let next = tidy(snapped + step, min, step);
    if snapped < raw && next > max && max - raw <= raw - snapped {
        return max;
    }
    snapped
}

/// Left-edge offset of a thumb showing `value`.
///
/// `offset = (value - min) / (max - min) * (container_width - thumb_width)`,
/// with `value` clamped into `[min, max]` so the result always lies in
/// `[0, container_width - thumb_width]`.
pub fn position_for_value(
    value: f64,
    container_width: Px,
    thumb_width: Px,
    min: f64,
    max: f64,
) -> Px {
    let span = max - min;
    let available = (container_width - thumb_width).positive().to_f64();
    if span <= 0.0 || available <= 0.0 {
        return Px::ZERO;
    }
    let fraction = (clamp_value(value, min, max) - min) / span;
    Px::saturating_from_f64(fraction * available)
}

/// Value selected when a thumb's left edge sits at `offset`.
///
/// Inverse of [`position_for_value`] followed by [`snap_to_step`]. Offsets
/// outside the track clamp to `min` or `max` before rounding.
pub fn value_for_position(
    offset: Px,
    container_width: Px,
    thumb_width: Px,
    min: f64,
    max: f64,
    step: f64,
) -> f64 {
    let available = (container_width - thumb_width).positive().to_f64();
    if available <= 0.0 {
        return min;
    }
    let raw = min + offset.to_f64() / available * (max - min);
    snap_to_step(clamp_value(raw, min, max), min, max, step)
}

/// Center of a thumb whose left edge sits at `offset`.
pub fn thumb_center(offset: Px, thumb_width: Px) -> Px {
    offset + thumb_width / 2.0
}

/// Left-edge offset of a thumb centred under a pointer at `pointer_x`.
pub fn offset_for_pointer(pointer_x: Px, thumb_width: Px) -> Px {
    pointer_x - thumb_width / 2.0
}

/// Horizontal extent of the highlighted rail segment.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RailExtent {
    /// Left edge, relative to the container.
    pub start: Px,
    /// Width of the segment.
    pub width: Px,
}

impl RailExtent {
    /// Right edge, relative to the container.
    pub fn end(&self) -> Px {
        self.start + self.width
    }
}

/// Selected rail between the thumb centers.
///
/// With a single thumb (`high_offset` is `None`) the segment runs from the
/// container's left edge to the low thumb's center.
pub fn selected_rail(low_offset: Px, high_offset: Option<Px>, thumb_width: Px) -> RailExtent {
    let low_center = thumb_center(low_offset, thumb_width);
    match high_offset {
        Some(high_offset) => {
            let high_center = thumb_center(high_offset, thumb_width);
            RailExtent {
                start: low_center,
                width: (high_center - low_center).positive(),
            }
        }
        None => RailExtent {
            start: Px::ZERO,
            width: low_center.positive(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Px = Px(300.0);
    const THUMB: Px = Px(20.0);

    #[test]
    fn bounds_validation() {
        assert!(DomainBounds::new(0.0, 100.0, 1.0, 0.0).is_ok());
        assert_eq!(
            DomainBounds::new(5.0, 5.0, 1.0, 0.0),
            Err(SliderError::EmptyDomain { min: 5.0, max: 5.0 })
        );
        assert_eq!(
            DomainBounds::new(0.0, 10.0, 0.0, 0.0),
            Err(SliderError::InvalidStep(0.0))
        );
        assert_eq!(
            DomainBounds::new(0.0, 10.0, 1.0, -1.0),
            Err(SliderError::NegativeMinRange(-1.0))
        );
        assert_eq!(
            DomainBounds::new(0.0, 10.0, 1.0, 11.0),
            Err(SliderError::MinRangeTooLarge {
                min_range: 11.0,
                span: 10.0
            })
        );
        assert!(matches!(
            DomainBounds::new(0.0, f64::INFINITY, 1.0, 0.0),
            Err(SliderError::NonFinite { field: "max", .. })
        ));
    }

    #[test]
    fn position_interpolates_linearly() {
        assert_eq!(position_for_value(0.0, CONTAINER, THUMB, 0.0, 100.0), Px(0.0));
        assert_eq!(
            position_for_value(50.0, CONTAINER, THUMB, 0.0, 100.0),
            Px(140.0)
        );
        assert_eq!(
            position_for_value(100.0, CONTAINER, THUMB, 0.0, 100.0),
            Px(280.0)
        );
    }

    #[test]
    fn position_clamps_out_of_domain_values() {
        assert_eq!(
            position_for_value(-10.0, CONTAINER, THUMB, 0.0, 100.0),
            Px(0.0)
        );
        assert_eq!(
            position_for_value(150.0, CONTAINER, THUMB, 0.0, 100.0),
            Px(280.0)
        );
    }

    #[test]
    fn round_trip_matches_snapping() {
        let (min, max, step) = (-20.0, 80.0, 2.5);
        for i in 0..=40 {
            // Grid points and points 30% of a step past them; never a tie.
            for v in [min + i as f64 * step, min + (i as f64 + 0.3) * step] {
                let expected = snap_to_step(v, min, max, step);
                let offset = position_for_value(v, CONTAINER, THUMB, min, max);
                let back = value_for_position(offset, CONTAINER, THUMB, min, max, step);
                assert_eq!(back, expected, "value {v}");
            }
        }
    }

    #[test]
    fn offsets_outside_track_clamp_to_bounds() {
        assert_eq!(
            value_for_position(Px(-50.0), CONTAINER, THUMB, 0.0, 100.0, 1.0),
            0.0
        );
        assert_eq!(
            value_for_position(Px(1000.0), CONTAINER, THUMB, 0.0, 100.0, 1.0),
            100.0
        );
    }

    #[test]
    fn zero_travel_maps_to_min() {
        assert_eq!(
            value_for_position(Px(10.0), Px(20.0), THUMB, 3.0, 9.0, 1.0),
            3.0
        );
        assert_eq!(position_for_value(7.0, Px(20.0), THUMB, 3.0, 9.0), Px(0.0));
    }

    #[test]
    fn fractional_steps_compare_equal() {
        assert_eq!(snap_to_step(0.29, 0.0, 1.0, 0.1), 0.3);
        assert_eq!(snap_to_step(0.71, 0.0, 1.0, 0.1), 0.7);
        assert_eq!(snap_to_step(1.04, 1.0, 2.0, 0.05), 1.05);
    }

    #[test]
    fn trailing_partial_step_reaches_max() {
        // Grid 0, 3, 6, 9 and max 10.
        assert_eq!(snap_to_step(9.2, 0.0, 10.0, 3.0), 9.0);
        assert_eq!(snap_to_step(9.6, 0.0, 10.0, 3.0), 10.0);
        assert_eq!(snap_to_step(10.0, 0.0, 10.0, 3.0), 10.0);
        assert_eq!(snap_to_step(7.4, 0.0, 10.0, 3.0), 6.0);
        assert_eq!(snap_to_step(7.5, 0.0, 10.0, 3.0), 9.0);
    }

    #[test]
    fn rail_spans_thumb_centers() {
        let rail = selected_rail(Px(56.0), Some(Px(224.0)), THUMB);
        assert_eq!(rail.start, Px(66.0));
        assert_eq!(rail.end(), Px(234.0));

        let single = selected_rail(Px(56.0), None, THUMB);
        assert_eq!(single, RailExtent {
            start: Px::ZERO,
            width: Px(66.0),
        });
    }

    #[test]
    fn pointer_and_center_are_inverse() {
        let offset = offset_for_pointer(Px(100.0), THUMB);
        assert_eq!(offset, Px(90.0));
        assert_eq!(thumb_center(offset, THUMB), Px(100.0));
    }
}
