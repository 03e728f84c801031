//! gpui_linsys visualizes a pair of linear equations `Ax + By = C`.
//! It parses and formats equations, classifies and solves the system, clips
//! both lines to a pan/zoom viewport and produces backend-agnostic draw
//! commands, with a software rasterizer for PNG export and an optional GPUI
//! view (`gpui` feature).

#![forbid(unsafe_code)]

pub mod axis;
pub mod clip;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod geom;
pub mod interaction;
pub mod line;
pub mod parse;
pub mod render;
pub mod session;
pub mod solver;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{GridLine, GridSpec};
pub use clip::{Segment, clip};
pub use config::PlotConfig;
pub use error::{ConfigError, Error, ExportError, ParseError, ViewportError};
pub use event::{Action, Outcome};
pub use export::{ExportOptions, Snapshot};
pub use geom::{Point, ScreenPoint, ScreenRect, ScreenSize};
pub use interaction::DragTracker;
pub use line::{Coefficient, EPSILON, Line, LineId};
pub use parse::{format_line, parse_line};
pub use render::{
    Color, LinePayload, LineSegment, LineStyle, MarkerStyle, RectStyle, RenderCommand, RenderList,
    RenderPayload, TextAnchor, TextStyle, build_render_list,
};
pub use session::{Session, SessionBuilder};
pub use solver::{Intersection, solution_steps, solve};
pub use style::Theme;
pub use transform::Transform;
pub use view::{Range, ViewLimits, ViewRect, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiLinePlotView, SessionHandle};
