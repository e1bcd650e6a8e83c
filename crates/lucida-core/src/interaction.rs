//! Pointer-driven panning and ROI selection as explicit state transitions.
//!
//! [`transition`] is pure: it takes the current state, the event and the
//! mapped pointer position and returns the next state plus the side effect
//! the viewer has to apply. Wheel zoom is handled by the viewer directly since
//! it does not depend on these states.

use crate::viewport::rescale_coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Committed region of interest, `x1 <= x2`, `y1 <= y2`, in image coordinates.
///
/// The corners sit on pixel boundaries, so the covered pixels are
/// `x1..x2` by `y1..y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Roi {
    /// Normalised rectangle between two corners, or `None` if they share a
    /// row or a column.
    pub fn from_corners(a: (i64, i64), b: (i64, i64)) -> Option<Self> {
        if a.0 == b.0 || a.1 == b.1 {
            return None;
        }
        Some(Self {
            x1: a.0.min(b.0),
            y1: a.1.min(b.1),
            x2: a.0.max(b.0),
            y2: a.1.max(b.1),
        })
    }

    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }

    /// Carry the ROI over to an image of another size, proportionally.
    pub fn rescaled(self, old_size: (usize, usize), new_size: (usize, usize)) -> Option<Self> {
        let clamp_x = |v: i64| rescale_coord(v, old_size.0, new_size.0).clamp(0, new_size.0 as i64);
        let clamp_y = |v: i64| rescale_coord(v, old_size.1, new_size.1).clamp(0, new_size.1 as i64);
        Self::from_corners(
            (clamp_x(self.x1), clamp_y(self.y1)),
            (clamp_x(self.x2), clamp_y(self.y2)),
        )
    }
}

/// In-progress ROI drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragRect {
    /// Corner where the drag started.
    pub anchor: (i64, i64),
    /// Corner following the pointer.
    pub current: (i64, i64),
}

impl DragRect {
    pub fn to_roi(&self) -> Option<Roi> {
        Roi::from_corners(self.anchor, self.current)
    }

    pub fn rescaled(self, old_size: (usize, usize), new_size: (usize, usize)) -> Self {
        let map = |(x, y): (i64, i64)| {
            (
                rescale_coord(x, old_size.0, new_size.0),
                rescale_coord(y, old_size.1, new_size.1),
            )
        };
        Self {
            anchor: map(self.anchor),
            current: map(self.current),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Panning; `anchor` is the image position last seen under the pointer.
    Panning { anchor: (i64, i64) },
    DraggingRoi(DragRect),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Move,
    Press(PointerButton),
    Release(PointerButton),
}

/// The pointer position of one event, already mapped to image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerContext {
    /// Floor-mapped position, even outside the image. `None` without a pixmap.
    pub raw: Option<(i64, i64)>,
    /// Nearest pixel boundary, only while the pointer is over the image.
    pub nearest: Option<(i64, i64)>,
    /// Whether `raw` lies inside the image.
    pub over_image: bool,
    pub roi_enabled: bool,
}

impl PointerContext {
    /// Floor-mapped position while over the image.
    pub fn cursor(&self) -> Option<(i64, i64)> {
        self.raw.filter(|_| self.over_image)
    }
}

/// What the viewer must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Shift the viewport by `(dx, dy)` image pixels, then re-anchor the pan.
    Pan { dx: i64, dy: i64 },
    /// A new drag started; drop the committed ROI.
    ClearRoi,
    /// A drag ended; store this ROI (or none).
    CommitRoi(Option<Roi>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: InteractionState,
    pub effect: Effect,
}

impl Transition {
    fn to(state: InteractionState) -> Self {
        Self {
            state,
            effect: Effect::None,
        }
    }
}

pub fn transition(
    state: InteractionState,
    event: PointerEvent,
    ctx: &PointerContext,
) -> Transition {
    match event {
        PointerEvent::Press(PointerButton::Primary) => match (ctx.roi_enabled, ctx.cursor(), ctx.nearest) {
            (true, Some(_), Some(corner)) => Transition {
                state: InteractionState::DraggingRoi(DragRect {
                    anchor: corner,
                    current: corner,
                }),
                effect: Effect::ClearRoi,
            },
            _ => Transition::to(state),
        },
        PointerEvent::Press(PointerButton::Middle | PointerButton::Secondary) => match ctx.cursor() {
            Some(anchor) => Transition::to(InteractionState::Panning { anchor }),
            None => Transition::to(state),
        },
        PointerEvent::Move => match state {
            InteractionState::Panning { anchor } => match ctx.raw {
                Some((x, y)) => Transition {
                    state,
                    effect: Effect::Pan {
                        dx: anchor.0 - x,
                        dy: anchor.1 - y,
                    },
                },
                None => Transition::to(state),
            },
            InteractionState::DraggingRoi(drag) => match (ctx.over_image, ctx.nearest) {
                (true, Some(corner)) => Transition::to(InteractionState::DraggingRoi(DragRect {
                    current: corner,
                    ..drag
                })),
                _ => Transition::to(state),
            },
            InteractionState::Idle => Transition::to(state),
        },
        PointerEvent::Release(_) => match state {
            InteractionState::DraggingRoi(drag) => Transition {
                state: InteractionState::Idle,
                effect: Effect::CommitRoi(drag.to_roi()),
            },
            _ => Transition::to(InteractionState::Idle),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over(x: i64, y: i64) -> PointerContext {
        PointerContext {
            raw: Some((x, y)),
            nearest: Some((x, y)),
            over_image: true,
            roi_enabled: true,
        }
    }

    fn off(x: i64, y: i64) -> PointerContext {
        PointerContext {
            raw: Some((x, y)),
            nearest: None,
            over_image: false,
            roi_enabled: true,
        }
    }

    fn drag(from: (i64, i64), to: (i64, i64)) -> Transition {
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Primary),
            &over(from.0, from.1),
        );
        let t = transition(t.state, PointerEvent::Move, &over(to.0, to.1));
        transition(
            t.state,
            PointerEvent::Release(PointerButton::Primary),
            &over(to.0, to.1),
        )
    }

    #[test]
    fn drag_equal_on_one_axis_yields_no_roi() {
        let t = drag((10, 10), (10, 50));
        assert_eq!(t.state, InteractionState::Idle);
        assert_eq!(t.effect, Effect::CommitRoi(None));
    }

    #[test]
    fn drag_commits_normalised_roi() {
        let t = drag((50, 60), (10, 10));
        assert_eq!(
            t.effect,
            Effect::CommitRoi(Some(Roi {
                x1: 10,
                y1: 10,
                x2: 50,
                y2: 60
            }))
        );
    }

    #[test]
    fn press_starts_drag_and_clears_roi() {
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Primary),
            &over(3, 4),
        );
        assert_eq!(t.effect, Effect::ClearRoi);
        assert!(matches!(t.state, InteractionState::DraggingRoi(_)));
    }

    #[test]
    fn press_outside_image_does_nothing() {
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Primary),
            &off(-3, 4),
        );
        assert_eq!(t, Transition::to(InteractionState::Idle));
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Middle),
            &off(-3, 4),
        );
        assert_eq!(t.state, InteractionState::Idle);
    }

    #[test]
    fn roi_disabled_ignores_primary_press() {
        let ctx = PointerContext {
            roi_enabled: false,
            ..over(3, 3)
        };
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Primary),
            &ctx,
        );
        assert_eq!(t.state, InteractionState::Idle);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn leaving_image_freezes_drag_corner() {
        let start = InteractionState::DraggingRoi(DragRect {
            anchor: (1, 1),
            current: (5, 5),
        });
        let t = transition(start, PointerEvent::Move, &off(200, 5));
        assert_eq!(t.state, start);
    }

    #[test]
    fn pan_moves_viewport_against_pointer() {
        let t = transition(
            InteractionState::Idle,
            PointerEvent::Press(PointerButton::Secondary),
            &over(20, 20),
        );
        assert_eq!(t.state, InteractionState::Panning { anchor: (20, 20) });
        let t = transition(t.state, PointerEvent::Move, &over(25, 18));
        assert_eq!(t.effect, Effect::Pan { dx: -5, dy: 2 });
    }

    #[test]
    fn pan_continues_off_image() {
        let state = InteractionState::Panning { anchor: (0, 0) };
        let t = transition(state, PointerEvent::Move, &off(-4, 0));
        assert_eq!(t.effect, Effect::Pan { dx: 4, dy: 0 });
    }

    #[test]
    fn release_always_returns_to_idle() {
        let state = InteractionState::Panning { anchor: (0, 0) };
        let t = transition(
            state,
            PointerEvent::Release(PointerButton::Middle),
            &PointerContext::default(),
        );
        assert_eq!(t.state, InteractionState::Idle);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn roi_rescale_tracks_image_size() {
        let roi = Roi {
            x1: 10,
            y1: 10,
            x2: 50,
            y2: 20,
        };
        let scaled = roi.rescaled((100, 100), (200, 50)).unwrap();
        assert_eq!(
            scaled,
            Roi {
                x1: 20,
                y1: 5,
                x2: 100,
                y2: 10
            }
        );
    }
}
