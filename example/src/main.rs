//! Drives a range slider with a scripted touch sequence and prints what a
//! host would draw.
//!
//! Run with `RUST_LOG=thumbline_components=debug` to see the drag session.

use std::sync::Arc;

use parking_lot::Mutex;
use thumbline_components::range_slider::{
    FollowerKind, RangeSlider, RangeSliderArgs, RenderHooks, SliderScene, Thumb, VisualUpdate,
};
use thumbline_ui::{GestureEvent, Px, TouchTracker, logging};
use tracing::info;

const CONTAINER_PAGE_X: Px = Px(40.0);

/// Values reported to the host, applied back as controlled props.
#[derive(Default)]
struct HostState {
    low: f64,
    high: f64,
    pending: bool,
}

fn hooks() -> RenderHooks<String> {
    RenderHooks::<String>::new()
        .rail(|()| "rail".to_string())
        .rail_selected(|()| "selected".to_string())
        .thumb(|thumb: Thumb| format!("thumb[{thumb:?}]"))
        .label(|value: f64| format!("{value:.0}"))
        .notch(|_: f64| "^".to_string())
}

fn describe(scene: &SliderScene<String>) {
    for thumb in &scene.thumbs {
        info!(visual = %thumb.visual, offset = ?thumb.offset, "thumb");
    }
    if let Some((visual, extent)) = &scene.rail_selected {
        info!(%visual, ?extent, "rail");
    }
    if let Some(label) = &scene.label {
        info!(
            visual = %label.visual,
            visible = label.frame.visible,
            x = label.frame.translate_x.raw(),
            "label"
        );
    }
}

fn dispatch(slider: &mut RangeSlider, tracker: &mut TouchTracker) {
    for event in tracker.take_events() {
        if let GestureEvent::Move { dx, dy, .. } = event
            && !slider.is_dragging()
            && !slider.should_claim_move(dx, dy)
        {
            continue;
        }
        let response = slider.handle_gesture(event);
        tracing::debug!(?event, ?response, "gesture dispatched");
    }
}

fn apply_host_state(slider: &mut RangeSlider, host: &Mutex<HostState>) {
    let (low, high) = {
        let mut host = host.lock();
        if !host.pending {
            return;
        }
        host.pending = false;
        (host.low, host.high)
    };
    let args = slider.args().clone().low(low).high(high);
    if let Err(err) = slider.update_args(args) {
        tracing::error!("host props rejected: {err}");
    }
}

fn main() {
    logging::init_tracing();

    let host = Arc::new(Mutex::new(HostState::default()));
    let reported = host.clone();
    let args = RangeSliderArgs::default()
        .min(0.0)
        .max(200.0)
        .step(5.0)
        .min_range(10.0)
        .low(40.0)
        .high(160.0)
        .on_value_changed(move |low, high, by_user| {
            info!(low, high, by_user, "value changed");
            let mut host = reported.lock();
            host.low = low;
            host.high = high;
            host.pending = by_user;
        })
        .on_slider_touch_start(|low, high| info!(low, high, "touch start"))
        .on_slider_touch_end(|low, high| info!(low, high, "touch end"))
        .on_visual_update(|update| {
            if let VisualUpdate::Pressed { thumb, pressed } = update {
                info!(?thumb, pressed, "pressed");
            }
        });

    let mut slider = match RangeSlider::new(args) {
        Ok(slider) => slider,
        Err(err) => {
            tracing::error!("invalid slider configuration: {err}");
            return;
        }
    };
    slider.on_container_layout(Px(320.0));
    slider.on_thumb_layout(Px(24.0));
    slider.on_follower_layout(FollowerKind::Label, Px(36.0));
    slider.on_follower_layout(FollowerKind::Notch, Px(8.0));

    let hooks = hooks();
    describe(&slider.compose(&hooks));

    // Grab the high thumb and drag it left past the low thumb.
    let mut tracker = TouchTracker::new(CONTAINER_PAGE_X);
    tracker.touch_start(1, Px(300.0), Px(20.0));
    for x in [280.0, 220.0, 160.0, 90.0, 40.0] {
        tracker.touch_move(1, Px(x), Px(22.0));
        dispatch(&mut slider, &mut tracker);
        apply_host_state(&mut slider, &host);
    }
    describe(&slider.compose(&hooks));
    tracker.touch_end(1);
    dispatch(&mut slider, &mut tracker);

    // Touches are ignored once the slider is disabled.
    slider.set_disabled(true);
    tracker.touch_start(2, Px(120.0), Px(10.0));
    tracker.touch_end(2);
    dispatch(&mut slider, &mut tracker);

    let values = slider.values();
    info!(low = values.low, high = values.high, "final values");
}
