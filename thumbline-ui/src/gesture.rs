//! Continuous-gesture primitive consumed by slider components.
//!
//! A host gesture system delivers one [`GestureEvent`] per pointer update.
//! Hosts that only see raw touches (id + page coordinate) can run them through
//! a [`TouchTracker`], which counts active touches, follows the primary touch
//! and queues the equivalent gesture events.
//!
//! # Usage
//!
//! ```
//! use thumbline_ui::gesture::{GestureEvent, TouchTracker};
//! use thumbline_ui::px::Px;
//!
//! let mut tracker = TouchTracker::new(Px::new(40.0));
//!
//! tracker.touch_start(7, Px::new(90.0), Px::new(12.0));
//! tracker.touch_move(7, Px::new(120.0), Px::new(14.0));
//! tracker.touch_end(7);
//!
//! let events = tracker.take_events();
//! assert!(matches!(
//!     events[0],
//!     GestureEvent::Down { location_x, active_touches: 1, .. } if location_x == Px::new(50.0)
//! ));
//! assert!(matches!(events[1], GestureEvent::Move { .. }));
//! assert_eq!(events[2], GestureEvent::Release);
//! ```
//!
//! # Thread Safety
//!
//! `TouchTracker` is meant to be driven from the single thread that
//! dispatches input.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::trace;

use crate::px::Px;

/// Horizontal travel must exceed this multiple of vertical travel before a
/// move-initiated gesture is claimed by a horizontal slider.
pub const HORIZONTAL_DOMINANCE: f32 = 2.0;

/// One event of the continuous-gesture stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A touch went down.
    Down {
        /// Absolute (page) x coordinate of the touch.
        page_x: Px,
        /// x coordinate of the touch relative to the receiving container.
        location_x: Px,
        /// Number of touches active, this one included.
        active_touches: usize,
    },
    /// The primary touch moved.
    Move {
        /// Latest absolute (page) x coordinate of the touch.
        move_x: Px,
        /// Accumulated horizontal travel since the touch went down.
        dx: Px,
        /// Accumulated vertical travel since the touch went down.
        dy: Px,
        /// Number of touches currently active.
        active_touches: usize,
    },
    /// The primary touch was lifted.
    Release,
    /// Another responder asks to take the gesture over.
    TerminationRequest,
    /// The host gesture system cancelled the gesture.
    Terminate,
}

/// Returns `true` when a move with accumulated travel `(dx, dy)` is
/// horizontal enough for a slider to claim it.
///
/// ```
/// use thumbline_ui::gesture::should_claim_move;
/// use thumbline_ui::px::Px;
///
/// assert!(should_claim_move(Px::new(10.0), Px::new(3.0)));
/// assert!(!should_claim_move(Px::new(10.0), Px::new(6.0)));
/// ```
pub fn should_claim_move(dx: Px, dy: Px) -> bool {
    dx.raw().abs() > HORIZONTAL_DOMINANCE * dy.raw().abs()
}

#[derive(Debug, Clone, Copy)]
struct TouchPoint {
    id: u64,
    start_x: Px,
    start_y: Px,
}

/// Turns raw touches into [`GestureEvent`]s for one container.
///
/// A touch that goes down while no other finger is down becomes the primary
/// and is the only one producing `Move` and `Release` events. Every finger
/// stays counted until it is lifted, so receivers can reject starts made
/// while another touch is active. Events are queued in arrival order and
/// never dropped or coalesced.
#[derive(Debug, Default)]
pub struct TouchTracker {
    /// Page x of the container's left edge.
    container_page_x: Px,
    /// Ids of every touch currently down.
    touches: SmallVec<[u64; 4]>,
    /// Touch driving the current gesture, if any.
    primary: Option<TouchPoint>,
    /// Events awaiting dispatch, oldest first.
    events: VecDeque<GestureEvent>,
}

impl TouchTracker {
    /// Creates a tracker for a container whose left edge sits at
    /// `container_page_x`.
    pub fn new(container_page_x: Px) -> Self {
        Self {
            container_page_x,
            ..Self::default()
        }
    }

    /// Number of touches currently down.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Records a touch going down at page coordinates `(page_x, page_y)`.
    pub fn touch_start(&mut self, id: u64, page_x: Px, page_y: Px) {
        if self.touches.contains(&id) {
            trace!("duplicate touch start for id {id}; ignoring");
            return;
        }
        self.touches.push(id);
        if self.touches.len() == 1 {
            self.primary = Some(TouchPoint {
                id,
                start_x: page_x,
                start_y: page_y,
            });
        }
        self.events.push_back(GestureEvent::Down {
            page_x,
            location_x: page_x - self.container_page_x,
            active_touches: self.touches.len(),
        });
    }

    /// Records a touch moving to page coordinates `(page_x, page_y)`.
    ///
    /// Moves of non-primary touches are dropped.
    pub fn touch_move(&mut self, id: u64, page_x: Px, page_y: Px) {
        let Some(primary) = self.primary.filter(|primary| primary.id == id) else {
            return;
        };
        self.events.push_back(GestureEvent::Move {
            move_x: page_x,
            dx: page_x - primary.start_x,
            dy: page_y - primary.start_y,
            active_touches: self.touches.len(),
        });
    }

    /// Records a touch being lifted.
    pub fn touch_end(&mut self, id: u64) {
        let Some(index) = self.touches.iter().position(|touch| *touch == id) else {
            return;
        };
        self.touches.remove(index);
        if self.primary.is_some_and(|primary| primary.id == id) {
            self.primary = None;
            self.events.push_back(GestureEvent::Release);
        }
    }

    /// Asks the receiver whether it yields the gesture.
    pub fn request_termination(&mut self) {
        if self.primary.is_some() {
            self.events.push_back(GestureEvent::TerminationRequest);
        }
    }

    /// Cancels the gesture, e.g. when the host system steals it.
    ///
    /// Fingers still down stay counted until they are lifted.
    pub fn cancel(&mut self) {
        if self.primary.take().is_some() {
            self.events.push_back(GestureEvent::Terminate);
        }
    }

    /// Retrieves and clears all pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<GestureEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_translates_to_container_coordinates() {
        let mut tracker = TouchTracker::new(Px(100.0));
        tracker.touch_start(1, Px(130.0), Px(5.0));
        assert_eq!(
            tracker.take_events(),
            vec![GestureEvent::Down {
                page_x: Px(130.0),
                location_x: Px(30.0),
                active_touches: 1,
            }]
        );
    }

    #[test]
    fn second_touch_is_counted_but_does_not_drive_moves() {
        let mut tracker = TouchTracker::new(Px::ZERO);
        tracker.touch_start(1, Px(10.0), Px(0.0));
        tracker.touch_start(2, Px(50.0), Px(0.0));
        tracker.touch_move(2, Px(60.0), Px(0.0));
        tracker.touch_move(1, Px(20.0), Px(4.0));

        let events = tracker.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[1],
            GestureEvent::Down {
                active_touches: 2,
                ..
            }
        ));
        assert_eq!(
            events[2],
            GestureEvent::Move {
                move_x: Px(20.0),
                dx: Px(10.0),
                dy: Px(4.0),
                active_touches: 2,
            }
        );
    }

    #[test]
    fn lifting_secondary_touch_does_not_release() {
        let mut tracker = TouchTracker::new(Px::ZERO);
        tracker.touch_start(1, Px(10.0), Px(0.0));
        tracker.touch_start(2, Px(50.0), Px(0.0));
        tracker.touch_end(2);
        assert_eq!(tracker.active_touches(), 1);
        tracker.touch_end(1);
        assert_eq!(tracker.active_touches(), 0);

        let events = tracker.take_events();
        assert_eq!(events.last(), Some(&GestureEvent::Release));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GestureEvent::Release)
                .count(),
            1
        );
    }

    #[test]
    fn lifting_primary_keeps_other_touches_counted() {
        let mut tracker = TouchTracker::new(Px::ZERO);
        tracker.touch_start(1, Px(10.0), Px(0.0));
        tracker.touch_start(2, Px(50.0), Px(0.0));
        tracker.touch_end(1);
        assert_eq!(tracker.active_touches(), 1);

        tracker.touch_start(3, Px(90.0), Px(0.0));
        tracker.touch_move(3, Px(120.0), Px(0.0));
        let events = tracker.take_events();
        assert_eq!(events.last(), Some(&GestureEvent::Down {
            page_x: Px(90.0),
            location_x: Px(90.0),
            active_touches: 2,
        }));

        tracker.touch_end(2);
        tracker.touch_end(3);
        assert_eq!(tracker.active_touches(), 0);
        assert!(tracker.take_events().is_empty());

        // With every finger lifted the next touch drives a new gesture.
        tracker.touch_start(4, Px(30.0), Px(0.0));
        tracker.touch_end(4);
        assert_eq!(tracker.take_events(), vec![
            GestureEvent::Down {
                page_x: Px(30.0),
                location_x: Px(30.0),
                active_touches: 1,
            },
            GestureEvent::Release,
        ]);
    }

    #[test]
    fn cancel_emits_terminate_once() {
        let mut tracker = TouchTracker::new(Px::ZERO);
        tracker.touch_start(1, Px(10.0), Px(0.0));
        tracker.request_termination();
        tracker.cancel();
        tracker.cancel();
        assert_eq!(
            &tracker.take_events()[1..],
            &[GestureEvent::TerminationRequest, GestureEvent::Terminate]
        );
    }

    #[test]
    fn claim_requires_horizontal_dominance() {
        assert!(should_claim_move(Px(-9.0), Px(4.0)));
        assert!(!should_claim_move(Px(8.0), Px(4.0)));
        assert!(!should_claim_move(Px::ZERO, Px::ZERO));
    }
}
