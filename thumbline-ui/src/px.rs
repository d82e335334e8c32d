//! Pixel units used by the layout boundary of thumbline.
//!
//! Widths and pointer coordinates reach the engine from an external layout
//! system and gesture primitive. Those collaborators report fractional pixel
//! values, so [`Px`] wraps an `f32` rather than an integer.
//!
//! # Key Types
//!
//! - [`Px`] - A single horizontal pixel coordinate or width. Negative values are
//!   allowed (touches left of the track origin).
//!
//! # Coordinate System
//!
//! - Origin at the left edge of the reference frame
//! - X-axis increases to the right
//! - Only the horizontal axis is modelled; sliders are laid out horizontally
//!
//! # Example
//!
//! ```
//! use thumbline_ui::px::Px;
//!
//! let container = Px::new(300.0);
//! let thumb = Px::new(20.0);
//!
//! // Space the thumb's left edge can travel through.
//! let travel = (container - thumb).positive();
//! assert_eq!(travel, Px::new(280.0));
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// A horizontal pixel coordinate or width.
///
/// # Examples
///
/// ```
/// use thumbline_ui::px::Px;
///
/// let a = Px::new(12.5);
/// let b = Px::new(-2.5);
/// assert_eq!(a + b, Px::new(10.0));
/// assert_eq!(Px::new(-4.0).positive(), Px::ZERO);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Px(pub f32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Px` from an `f32` value.
    pub const fn new(value: f32) -> Self {
        Px(value)
    }

    /// Returns the raw `f32` value.
    pub fn raw(self) -> f32 {
        self.0
    }

    /// Converts the pixel value to `f64` for domain arithmetic.
    ///
    /// ```
    /// use thumbline_ui::px::Px;
    ///
    /// assert_eq!(Px::new(1.5).to_f64(), 1.5);
    /// ```
    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }

    /// Creates a `Px` from an `f64`, saturating at the `f32` range.
    ///
    /// Non-finite input maps to zero so a broken measurement never poisons a
    /// transform.
    ///
    /// ```
    /// use thumbline_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f64(f64::MAX), Px::new(f32::MAX));
    /// assert_eq!(Px::saturating_from_f64(f64::NAN), Px::ZERO);
    /// ```
    pub fn saturating_from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Px::ZERO;
        }
        Px(value.clamp(f32::MIN as f64, f32::MAX as f64) as f32)
    }

    /// Returns `true` when the value is finite and strictly greater than zero.
    ///
    /// Layout measurements are only meaningful once they are positive.
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns the value, or zero if it is negative.
    pub fn positive(self) -> Self {
        if self.0 < 0.0 { Px::ZERO } else { self }
    }

    /// Returns the absolute distance between two coordinates.
    ///
    /// ```
    /// use thumbline_ui::px::Px;
    ///
    /// assert_eq!(Px::new(3.0).distance_to(Px::new(-2.0)), Px::new(5.0));
    /// ```
    pub fn distance_to(self, other: Self) -> Self {
        Px((self.0 - other.0).abs())
    }

    /// Clamps the value into `[lo, hi]`.
    ///
    /// Unlike [`f32::clamp`] this never panics: when `hi < lo` the lower bound
    /// wins.
    pub fn clamp_between(self, lo: Px, hi: Px) -> Self {
        Px(self.0.min(hi.0).max(lo.0))
    }
}

impl From<f32> for Px {
    fn from(value: f32) -> Self {
        Px(value)
    }
}

impl From<Px> for f32 {
    fn from(value: Px) -> Self {
        value.0
    }
}

impl Add for Px {
    type Output = Px;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
