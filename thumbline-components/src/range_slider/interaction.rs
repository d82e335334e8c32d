use thumbline_ui::{GestureEvent, Px, gesture};
use tracing::{debug, trace};

use super::{
    RangeSlider, Thumb, VisualUpdate,
    geometry::{clamp_value, offset_for_pointer, position_for_value, thumb_center, value_for_position},
    selector::select_thumb,
    store::WriteSource,
};

/// How the slider answered a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResponse {
    /// The event changed the drag session.
    Consumed,
    /// The event was not for this slider (disabled, multi-touch, no session,
    /// layout unknown).
    Ignored,
    /// A drag is live; the slider keeps the gesture.
    TerminationRejected,
    /// No drag is live; another responder may take over.
    TerminationAccepted,
}

/// State of one drag, from touch-down to release or termination.
#[derive(Debug, Clone, Copy)]
pub(super) struct DragSession {
    pub(super) thumb: Thumb,
    /// Page x of the container's left edge, derived at touch-down.
    container_origin: Px,
    /// Last value written by this session; starts at the thumb's value.
    pub(super) last_value: f64,
    /// Thumb offset at the last accepted update.
    last_position: Option<Px>,
}

#[derive(Debug, Default)]
pub(super) struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub(super) fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub(super) fn active_thumb(&self) -> Option<Thumb> {
        self.session.map(|session| session.thumb)
    }

    pub(super) fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub(super) fn session_mut(&mut self) -> Option<&mut DragSession> {
        self.session.as_mut()
    }

    fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
    }

    fn take(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

impl RangeSlider {
    /// Feeds one event of the host's continuous-gesture stream.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureResponse {
        match event {
            GestureEvent::Down {
                page_x,
                location_x,
                active_touches,
            } => self.touch_down(page_x, location_x, active_touches),
            GestureEvent::Move { move_x, .. } => self.touch_move(move_x),
            GestureEvent::Release | GestureEvent::Terminate => {
                if self.end_session() {
                    GestureResponse::Consumed
                } else {
                    GestureResponse::Ignored
                }
            }
            GestureEvent::TerminationRequest => {
                if self.drag.is_active() {
                    trace!("keeping gesture ownership during drag");
                    GestureResponse::TerminationRejected
                } else {
                    GestureResponse::TerminationAccepted
                }
            }
        }
    }

    /// Whether the slider wants to become the responder on touch-down.
    pub fn should_claim_start(&self) -> bool {
        !self.args.disabled
    }

    /// Whether the slider wants to take over a gesture that started
    /// elsewhere, given its accumulated travel.
    pub fn should_claim_move(&self, dx: Px, dy: Px) -> bool {
        !self.args.disabled && gesture::should_claim_move(dx, dy)
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn touch_down(&mut self, page_x: Px, location_x: Px, active_touches: usize) -> GestureResponse {
        if self.args.disabled || active_touches > 1 || self.drag.is_active() {
            trace!(disabled = self.args.disabled, "touch-down ignored");
            return GestureResponse::Ignored;
        }
        if !self.metrics.is_ready() {
            debug!("touch-down before layout is known; ignoring");
            return GestureResponse::Ignored;
        }
        if !page_x.raw().is_finite() || !location_x.raw().is_finite() {
            return GestureResponse::Ignored;
        }

        let thumb_width = self.metrics.thumb_width;
        let center = |thumb| {
            self.thumb_offset(thumb)
                .map(|offset| thumb_center(offset, thumb_width))
                .unwrap_or(Px::ZERO)
        };
        let thumb = select_thumb(
            location_x,
            center(Thumb::Low),
            center(Thumb::High),
            self.range_enabled(),
        );
        let values = self.store.snapshot();
        self.drag.begin(DragSession {
            thumb,
            container_origin: page_x - location_x,
            last_value: self.store.value(thumb),
            last_position: self.thumb_offset(thumb),
        });
        debug!(?thumb, "drag session started");

        self.emit(VisualUpdate::Pressed {
            thumb,
            pressed: true,
        });
        for frame in self.followers.set_dragging(true) {
            self.emit(VisualUpdate::Follower(frame));
        }
        self.args.on_slider_touch_start.call((values.low, values.high));

        self.apply_pointer(location_x);
        GestureResponse::Consumed
    }

    fn touch_move(&mut self, move_x: Px) -> GestureResponse {
        let Some(session) = self.drag.session() else {
            return GestureResponse::Ignored;
        };
        if self.args.disabled {
            return GestureResponse::Ignored;
        }
        self.apply_pointer(move_x - session.container_origin);
        GestureResponse::Consumed
    }

    /// Moves the session's thumb under a container-local pointer position.
    /// Returns `true` when the value changed.
    fn apply_pointer(&mut self, pointer_x: Px) -> bool {
        let Some(session) = self.drag.session() else {
            return false;
        };
        if !self.metrics.is_ready() || !pointer_x.raw().is_finite() {
            trace!(?pointer_x, "pointer update dropped");
            return false;
        }

        let container_width = self.metrics.container_width;
        let thumb_width = self.metrics.thumb_width;
        let bounds = self.bounds;
        let raw = value_for_position(
            offset_for_pointer(pointer_x, thumb_width),
            container_width,
            thumb_width,
            bounds.min,
            bounds.max,
            bounds.step,
        );
        let (lo, hi) = self.session_bounds(session.thumb);
        let value = clamp_value(raw, lo, hi);
        if value == session.last_value {
            return false;
        }

        let values = self.store.write(session.thumb, value, WriteSource::User);
        let value = values.value(session.thumb);
        let offset = position_for_value(value, container_width, thumb_width, bounds.min, bounds.max);
        let center = thumb_center(offset, thumb_width);
        if let Some(session) = self.drag.session_mut() {
            session.last_value = value;
            session.last_position = Some(offset);
        }
        trace!(thumb = ?session.thumb, value, "thumb moved");

        self.emit(VisualUpdate::ThumbOffset {
            thumb: session.thumb,
            offset,
        });
        self.args
            .on_value_changed
            .call((values.low, values.high, true));
        for frame in self.followers.update(center, value, container_width) {
            self.emit(VisualUpdate::Follower(frame));
        }
        if let Some(rail) = self.selected_rail() {
            self.emit(VisualUpdate::SelectedRail(rail));
        }
        true
    }

    /// Re-reads the live session against the store after the configuration
    /// changed. A session on a thumb that no longer exists is ended.
    pub(super) fn rebase_session(&mut self) {
        let Some(thumb) = self.drag.active_thumb() else {
            return;
        };
        if thumb == Thumb::High && !self.range_enabled() {
            debug!("high thumb removed during drag; ending session");
            self.end_session();
            return;
        }
        let value = self.store.value(thumb);
        if let Some(session) = self.drag.session_mut() {
            session.last_value = value;
        }
    }

    /// Range a dragged thumb may take, keeping `min_range` to its sibling.
    fn session_bounds(&self, thumb: Thumb) -> (f64, f64) {
        let bounds = self.bounds;
        if !self.range_enabled() {
            return (bounds.min, bounds.max);
        }
        let values = self.store.snapshot();
        match thumb {
            Thumb::Low => (bounds.min, values.high - bounds.min_range),
            Thumb::High => (values.low + bounds.min_range, bounds.max),
        }
    }

    /// Ends the live drag session, if any. Returns `false` when idle.
    pub(super) fn end_session(&mut self) -> bool {
        let Some(session) = self.drag.take() else {
            return false;
        };
        debug!(
            thumb = ?session.thumb,
            value = session.last_value,
            position = ?session.last_position,
            "drag session ended"
        );
        self.emit(VisualUpdate::Pressed {
            thumb: session.thumb,
            pressed: false,
        });
        for frame in self.followers.set_dragging(false) {
            self.emit(VisualUpdate::Follower(frame));
        }
        let values = self.store.snapshot();
        self.args.on_slider_touch_end.call((values.low, values.high));
        true
    }
}
