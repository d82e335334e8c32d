use smallvec::SmallVec;
use thumbline_ui::{Px, RenderSlotWith};

use super::{FollowerFrame, FollowerKind, RailExtent, RangeSlider, Thumb};

/// Host render hooks turning slider state into host visuals of type `V`.
///
/// Every hook is optional; a missing hook simply leaves that part out of the
/// composed [`SliderScene`].
pub struct RenderHooks<V> {
    thumb: Option<RenderSlotWith<Thumb, V>>,
    rail: Option<RenderSlotWith<(), V>>,
    rail_selected: Option<RenderSlotWith<(), V>>,
    label: Option<RenderSlotWith<f64, V>>,
    notch: Option<RenderSlotWith<f64, V>>,
}

impl<V> Default for RenderHooks<V> {
    fn default() -> Self {
        Self {
            thumb: None,
            rail: None,
            rail_selected: None,
            label: None,
            notch: None,
        }
    }
}

impl<V> Clone for RenderHooks<V> {
    fn clone(&self) -> Self {
        Self {
            thumb: self.thumb.clone(),
            rail: self.rail.clone(),
            rail_selected: self.rail_selected.clone(),
            label: self.label.clone(),
            notch: self.notch.clone(),
        }
    }
}

impl<V> RenderHooks<V> {
    /// Creates hooks with nothing rendered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thumb hook, called once per visible thumb.
    pub fn thumb(mut self, render: impl Into<RenderSlotWith<Thumb, V>>) -> Self {
        self.thumb = Some(render.into());
        self
    }

    /// Sets the background rail hook.
    pub fn rail(mut self, render: impl Into<RenderSlotWith<(), V>>) -> Self {
        self.rail = Some(render.into());
        self
    }

    /// Sets the selected rail hook.
    pub fn rail_selected(mut self, render: impl Into<RenderSlotWith<(), V>>) -> Self {
        self.rail_selected = Some(render.into());
        self
    }

    /// Sets the label hook, called with the label's current value.
    pub fn label(mut self, render: impl Into<RenderSlotWith<f64, V>>) -> Self {
        self.label = Some(render.into());
        self
    }

    /// Sets the notch hook, called with the notch's current value.
    pub fn notch(mut self, render: impl Into<RenderSlotWith<f64, V>>) -> Self {
        self.notch = Some(render.into());
        self
    }
}

/// A rendered thumb and where to put it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbVisual<V> {
    /// Which thumb.
    pub thumb: Thumb,
    /// Left-edge translation; `None` until layout is known.
    pub offset: Option<Px>,
    /// Host visual produced by the thumb hook.
    pub visual: V,
}

/// A rendered follower and its current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerVisual<V> {
    /// Transform, visibility and value.
    pub frame: FollowerFrame,
    /// Host visual produced by the label or notch hook.
    pub visual: V,
}

/// Everything the host needs to draw the slider once.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderScene<V> {
    /// Background rail.
    pub rail: Option<V>,
    /// Selected rail with its extent (`None` extent until layout is known).
    pub rail_selected: Option<(V, Option<RailExtent>)>,
    /// Thumbs, low first.
    pub thumbs: SmallVec<[ThumbVisual<V>; 2]>,
    /// Value label.
    pub label: Option<FollowerVisual<V>>,
    /// Value notch.
    pub notch: Option<FollowerVisual<V>>,
}

impl RangeSlider {
    /// Runs the render hooks against the current state.
    ///
    /// Composition is read-only; transforms that change during a drag are
    /// also pushed through `on_visual_update`, so hosts do not need to
    /// compose again per move.
    pub fn compose<V>(&self, hooks: &RenderHooks<V>) -> SliderScene<V> {
        let rail = hooks.rail.as_ref().map(|hook| hook.render(()));
        let rail_selected = hooks
            .rail_selected
            .as_ref()
            .map(|hook| (hook.render(()), self.selected_rail()));

        let mut thumbs = SmallVec::new();
        if let Some(hook) = hooks.thumb.as_ref() {
            for thumb in self.thumbs() {
                thumbs.push(ThumbVisual {
                    thumb,
                    offset: self.thumb_offset(thumb),
                    visual: hook.render(thumb),
                });
            }
        }

        let follower = |hook: Option<&RenderSlotWith<f64, V>>, kind| {
            hook.map(|hook| {
                let frame = self.follower(kind);
                FollowerVisual {
                    frame,
                    visual: hook.render(frame.value),
                }
            })
        };

        SliderScene {
            rail,
            rail_selected,
            thumbs,
            label: follower(hooks.label.as_ref(), FollowerKind::Label),
            notch: follower(hooks.notch.as_ref(), FollowerKind::Notch),
        }
    }
}
