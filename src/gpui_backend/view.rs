use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent,
    Window, canvas, div, px,
};

use crate::event::{Action, Outcome};
use crate::geom::{ScreenPoint, ScreenSize};
use crate::interaction::DragTracker;
use crate::session::Session;

use super::paint::{paint_list, to_hsla};

#[derive(Debug, Default)]
struct ViewState {
    origin: ScreenPoint,
    drag: Option<DragTracker>,
}

/// A GPUI view that draws a [`Session`] and handles pan and zoom.
///
/// Left-drag pans, the scroll wheel zooms about the cursor. Everything else
/// (text fields, buttons) goes through a [`SessionHandle`].
#[derive(Clone)]
pub struct GpuiLinePlotView {
    session: Arc<RwLock<Session>>,
    state: Arc<RwLock<ViewState>>,
}

impl GpuiLinePlotView {
    /// Create a view for the given session.
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    /// Get a handle for mutating the underlying session.
    pub fn session_handle(&self) -> SessionHandle {
        SessionHandle {
            session: Arc::clone(&self.session),
        }
    }

    fn local_point(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = self.state.read().expect("view state lock").origin;
        ScreenPoint::new(f32::from(position.x) - origin.x, f32::from(position.y) - origin.y)
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        let threshold = self
            .session
            .read()
            .expect("session lock")
            .config()
            .drag_threshold_px;
        self.state.write().expect("view state lock").drag = Some(DragTracker::begin(pos, threshold));
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        let delta = {
            let mut state = self.state.write().expect("view state lock");
            let Some(drag) = state.drag.as_mut() else {
                return;
            };
            drag.update(pos)
        };
        if let Some((dx, dy)) = delta {
            let outcome = self
                .session
                .write()
                .expect("session lock")
                .dispatch(Action::Pan { dx, dy });
            if outcome.needs_redraw() {
                cx.notify();
            }
        }
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        self.state.write().expect("view state lock").drag = None;
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        let delta = ev.delta.pixel_delta(px(16.0));
        let delta_y = -f32::from(delta.y);
        if delta_y.abs() < 0.01 {
            return;
        }
        let outcome = self
            .session
            .write()
            .expect("session lock")
            .dispatch(Action::Wheel {
                position: pos,
                delta_y,
            });
        if outcome.needs_redraw() {
            cx.notify();
        }
    }
}

impl Render for GpuiLinePlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let session = Arc::clone(&self.session);
        let state = Arc::clone(&self.state);
        let background = self.session.read().expect("session lock").theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        let origin = ScreenPoint::new(
                            f32::from(bounds.origin.x),
                            f32::from(bounds.origin.y),
                        );
                        state.write().expect("view state lock").origin = origin;
                        let mut session = session.write().expect("session lock");
                        session.resize(ScreenSize::new(
                            f32::from(bounds.size.width),
                            f32::from(bounds.size.height),
                        ));
                        (origin, session.render_list())
                    },
                    move |_, (origin, list), window, cx| {
                        paint_list(&list, origin, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

/// A handle for mutating a [`Session`] held inside a `GpuiLinePlotView`.
///
/// The handle clones cheaply; call `cx.notify()` on the view after a
/// mutation that needs a redraw.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<RwLock<Session>>,
}

impl SessionHandle {
    /// Read the session state.
    ///
    /// The session is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let session = self.session.read().expect("session lock");
        f(&session)
    }

    /// Mutate the session state.
    ///
    /// The session is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.session.write().expect("session lock");
        f(&mut session)
    }

    /// Apply one action.
    pub fn dispatch(&self, action: Action) -> Outcome {
        self.write(|session| session.dispatch(action))
    }
}
