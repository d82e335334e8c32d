//! Headless components for thumbline.
//!
//! Components here own their state and logic but draw nothing. A host feeds
//! them layout widths and gesture events and applies the transforms they push
//! back.
//!
//! # Example
//!
//! ```
//! use thumbline_components::range_slider::{RangeSlider, RangeSliderArgs};
//! use thumbline_ui::Px;
//!
//! let mut slider = RangeSlider::new(
//!     RangeSliderArgs::default().min(0.0).max(10.0).step(0.5).low(2.0).high(7.5),
//! )
//! .expect("valid bounds");
//! slider.on_container_layout(Px::new(220.0));
//! slider.on_thumb_layout(Px::new(20.0));
//!
//! assert_eq!(slider.values().high, 7.5);
//! assert!(slider.selected_rail().is_some());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod error;
pub mod range_slider;

pub use error::SliderError;
