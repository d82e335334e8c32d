use thumbline_ui::Px;

use super::Thumb;

/// Picks the thumb a touch-down at container-local `touch_x` belongs to.
///
/// The thumb whose center is closer wins and exact ties go to the low thumb.
/// When both centers coincide (thumbs stacked), the side of the touch decides:
/// strictly to the right selects high, otherwise low. Without range mode the
/// low thumb is the only candidate.
pub(super) fn select_thumb(
    touch_x: Px,
    low_center: Px,
    high_center: Px,
    range_enabled: bool,
) -> Thumb {
    if !range_enabled {
        return Thumb::Low;
    }
    if low_center == high_center {
        return if touch_x > low_center {
            Thumb::High
        } else {
            Thumb::Low
        };
    }
    let to_low = touch_x.distance_to(low_center);
    let to_high = touch_x.distance_to(high_center);
    if to_high < to_low {
        Thumb::High
    } else {
        Thumb::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_thumb_wins() {
        assert_eq!(select_thumb(Px(40.0), Px(66.0), Px(234.0), true), Thumb::Low);
        assert_eq!(
            select_thumb(Px(200.0), Px(66.0), Px(234.0), true),
            Thumb::High
        );
        assert_eq!(
            select_thumb(Px(290.0), Px(66.0), Px(234.0), true),
            Thumb::High
        );
    }

    #[test]
    fn tie_goes_to_low() {
        assert_eq!(
            select_thumb(Px(150.0), Px(100.0), Px(200.0), true),
            Thumb::Low
        );
    }

    #[test]
    fn stacked_thumbs_split_by_touch_side() {
        assert_eq!(
            select_thumb(Px(120.0), Px(120.0), Px(120.0), true),
            Thumb::Low
        );
        assert_eq!(
            select_thumb(Px(100.0), Px(120.0), Px(120.0), true),
            Thumb::Low
        );
        assert_eq!(
            select_thumb(Px(121.0), Px(120.0), Px(120.0), true),
            Thumb::High
        );
    }

    #[test]
    fn single_thumb_mode_always_low() {
        assert_eq!(
            select_thumb(Px(290.0), Px(10.0), Px(290.0), false),
            Thumb::Low
        );
    }
}
