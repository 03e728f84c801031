use gpui::prelude::*;
use gpui::{
    AppContext, Application, Bounds, Entity, MouseButton, SharedString, WindowBounds,
    WindowOptions, div, px, rgb, size,
};

use gpui_linsys::{Action, GpuiLinePlotView, LineId, Session, SessionHandle, Theme};

struct LinsysDemo {
    plot: Entity<GpuiLinePlotView>,
    session: SessionHandle,
}

impl LinsysDemo {
    fn button(
        &self,
        label: &'static str,
        action: Action,
        cx: &mut gpui::Context<Self>,
    ) -> impl IntoElement {
        div()
            .px_3()
            .py_1()
            .rounded_md()
            .bg(rgb(0x3a3d45))
            .text_color(rgb(0xeeeeee))
            .child(label)
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _, _, cx| {
                    this.session.dispatch(action.clone());
                    this.plot.update(cx, |_, cx| cx.notify());
                    cx.notify();
                }),
            )
    }
}

impl gpui::Render for LinsysDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        let (equations, status, view) = self.session.read(|session| {
            (
                format!(
                    "{}   |   {}",
                    session.display_text(LineId::First),
                    session.display_text(LineId::Second)
                ),
                session.status(),
                session.viewport().describe(),
            )
        });

        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(rgb(0x1e1f24))
            .text_color(rgb(0xd8dbe0))
            .child(
                div()
                    .flex()
                    .gap_2()
                    .p_2()
                    .child(self.button("Zoom in", Action::ZoomIn, cx))
                    .child(self.button("Zoom out", Action::ZoomOut, cx))
                    .child(self.button("Reset view", Action::ResetView, cx))
                    .child(self.button("Reset all", Action::ResetAll, cx))
                    .child(self.button("Swap", Action::Swap, cx))
                    .child(self.button("Randomize", Action::Randomize, cx)),
            )
            .child(div().px_2().child(SharedString::from(equations)))
            .child(div().px_2().child(SharedString::from(status)))
            .child(div().px_2().child(SharedString::from(view)))
            .child(div().flex_1().child(self.plot.clone()))
    }
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(1000.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let session = Session::builder().theme(Theme::dark()).build();
            let view = GpuiLinePlotView::new(session);
            let handle = view.session_handle();
            let plot = cx.new(|_| view);
            cx.new(|_| LinsysDemo {
                plot,
                session: handle,
            })
        })
        .unwrap();
    });
}
