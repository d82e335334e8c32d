use thumbline_ui::Px;

/// Overlay kinds that follow the active thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowerKind {
    /// Value label.
    Label,
    /// Small notch pointing at the thumb.
    Notch,
}

impl FollowerKind {
    fn index(self) -> usize {
        match self {
            FollowerKind::Label => 0,
            FollowerKind::Notch => 1,
        }
    }
}

/// Transform and content for one follower overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerFrame {
    /// Which overlay this frame is for.
    pub kind: FollowerKind,
    /// Whether the host should show the overlay.
    pub visible: bool,
    /// Left edge of the overlay, relative to the container.
    pub translate_x: Px,
    /// Value the overlay displays.
    pub value: f64,
}

#[derive(Debug, Clone, Copy)]
struct Follower {
    width: Px,
    frame: FollowerFrame,
}

/// Positions label and notch overlays over the thumb being dragged.
///
/// Frames are pushed to the host on every accepted move; nothing here waits
/// for a layout pass.
#[derive(Debug, Clone)]
pub(super) struct FollowerProjector {
    followers: [Follower; 2],
    allow_overflow: bool,
    floating_label: bool,
    dragging: bool,
    /// Thumb center and value of the latest projection.
    last: Option<(Px, f64)>,
}

impl FollowerProjector {
    pub(super) fn new(allow_overflow: bool, floating_label: bool, initial_value: f64) -> Self {
        let follower = |kind| Follower {
            width: Px::ZERO,
            frame: FollowerFrame {
                kind,
                visible: false,
                translate_x: Px::ZERO,
                value: initial_value,
            },
        };
        let mut projector = Self {
            followers: [follower(FollowerKind::Label), follower(FollowerKind::Notch)],
            allow_overflow,
            floating_label,
            dragging: false,
            last: None,
        };
        projector.refresh_visibility();
        projector
    }

    pub(super) fn frame(&self, kind: FollowerKind) -> FollowerFrame {
        self.followers[kind.index()].frame
    }

    fn visible(&self, kind: FollowerKind) -> bool {
        match kind {
            FollowerKind::Label => self.dragging || self.floating_label,
            FollowerKind::Notch => self.dragging,
        }
    }

    fn refresh_visibility(&mut self) {
        for kind in [FollowerKind::Label, FollowerKind::Notch] {
            let visible = self.visible(kind);
            self.followers[kind.index()].frame.visible = visible;
        }
    }

    fn project(&mut self, kind: FollowerKind, center: Px, value: f64, container_width: Px) {
        let visible = self.visible(kind);
        let follower = &mut self.followers[kind.index()];
        let position = center - follower.width / 2.0;
        let translate_x = if self.allow_overflow {
            position
        } else {
            position.clamp_between(Px::ZERO, (container_width - follower.width).positive())
        };
        follower.frame = FollowerFrame {
            kind,
            visible,
            translate_x,
            value,
        };
    }

    /// Moves both followers to a thumb centred at `center` showing `value`.
    pub(super) fn update(
        &mut self,
        center: Px,
        value: f64,
        container_width: Px,
    ) -> [FollowerFrame; 2] {
        self.last = Some((center, value));
        self.project(FollowerKind::Label, center, value, container_width);
        self.project(FollowerKind::Notch, center, value, container_width);
        self.frames()
    }

    /// Stores a measured overlay width and re-projects with the last
    /// position, if any.
    pub(super) fn set_width(
        &mut self,
        kind: FollowerKind,
        width: Px,
        container_width: Px,
    ) -> Option<FollowerFrame> {
        self.followers[kind.index()].width = width.positive();
        let (center, value) = self.last?;
        self.project(kind, center, value, container_width);
        Some(self.frame(kind))
    }

    pub(super) fn set_dragging(&mut self, dragging: bool) -> [FollowerFrame; 2] {
        self.dragging = dragging;
        self.refresh_visibility();
        self.frames()
    }

    pub(super) fn set_allow_overflow(&mut self, allow_overflow: bool) {
        self.allow_overflow = allow_overflow;
    }

    pub(super) fn set_floating_label(&mut self, floating_label: bool) -> FollowerFrame {
        self.floating_label = floating_label;
        self.refresh_visibility();
        self.frame(FollowerKind::Label)
    }

    fn frames(&self) -> [FollowerFrame; 2] {
        [
            self.followers[0].frame,
            self.followers[1].frame,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Px = Px(300.0);

    #[test]
    fn hidden_until_dragging() {
        let mut projector = FollowerProjector::new(false, false, 0.0);
        assert!(!projector.frame(FollowerKind::Label).visible);
        let frames = projector.set_dragging(true);
        assert!(frames.iter().all(|f| f.visible));
        let frames = projector.set_dragging(false);
        assert!(frames.iter().all(|f| !f.visible));
    }

    #[test]
    fn floating_label_is_always_visible() {
        let mut projector = FollowerProjector::new(false, true, 0.0);
        assert!(projector.frame(FollowerKind::Label).visible);
        assert!(!projector.frame(FollowerKind::Notch).visible);
        projector.set_dragging(false);
        assert!(projector.frame(FollowerKind::Label).visible);
    }

    #[test]
    fn centred_on_thumb_and_clamped_into_container() {
        let mut projector = FollowerProjector::new(false, false, 0.0);
        projector.set_width(FollowerKind::Label, Px(40.0), CONTAINER);
        projector.set_dragging(true);

        projector.update(Px(150.0), 50.0, CONTAINER);
        let label = projector.frame(FollowerKind::Label);
        assert_eq!(label.translate_x, Px(130.0));
        assert_eq!(label.value, 50.0);

        projector.update(Px(10.0), 0.0, CONTAINER);
        assert_eq!(projector.frame(FollowerKind::Label).translate_x, Px(0.0));

        projector.update(Px(295.0), 100.0, CONTAINER);
        assert_eq!(
            projector.frame(FollowerKind::Label).translate_x,
            Px(260.0)
        );
    }

    #[test]
    fn overflow_allowed_skips_clamping() {
        let mut projector = FollowerProjector::new(true, false, 0.0);
        projector.set_width(FollowerKind::Label, Px(40.0), CONTAINER);
        projector.update(Px(10.0), 0.0, CONTAINER);
        assert_eq!(projector.frame(FollowerKind::Label).translate_x, Px(-10.0));
    }

    #[test]
    fn late_width_reprojects_last_position() {
        let mut projector = FollowerProjector::new(false, false, 0.0);
        assert!(
            projector
                .set_width(FollowerKind::Notch, Px(8.0), CONTAINER)
                .is_none()
        );
        projector.update(Px(100.0), 30.0, CONTAINER);
        let frame = projector
            .set_width(FollowerKind::Notch, Px(12.0), CONTAINER)
            .expect("projected");
        assert_eq!(frame.translate_x, Px(94.0));
        assert_eq!(frame.value, 30.0);
    }
}
