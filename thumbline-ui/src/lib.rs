//! thumbline-ui holds the host-facing primitives shared by thumbline
//! components.
//!
//! # Overview
//!
//! Components in `thumbline-components` never talk to a windowing system or a
//! renderer. They consume measurements and gestures from the host and report
//! back through callbacks. This crate defines that boundary:
//!
//! - [`Px`] for widths and pointer coordinates,
//! - [`CallbackWith`] and [`RenderSlotWith`] for args fields,
//! - [`GestureEvent`] and [`TouchTracker`] for the gesture stream,
//! - [`LayoutMetrics`] for container and thumb widths,
//! - [`logging::init_tracing`] for hosts that want the default log output.
//!
//! # Example
//!
//! ```
//! use thumbline_ui::{CallbackWith, LayoutMetrics, Px};
//!
//! let on_change = CallbackWith::new(|(low, high): (f64, f64)| {
//!     assert!(low <= high);
//! });
//! on_change.call((1.0, 2.0));
//!
//! let metrics = LayoutMetrics::new(Px::new(300.0), Px::new(20.0));
//! assert!(metrics.is_ready());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod gesture;
pub mod logging;
pub mod metrics;
pub mod prop;
pub mod px;

pub use crate::{
    gesture::{GestureEvent, TouchTracker, should_claim_move},
    metrics::{LayoutMetrics, MetricsChange},
    prop::{CallbackWith, RenderSlotWith},
    px::Px,
};
