//! GPUI integration for gpui_linsys.
//!
//! This module provides a GPUI view that draws a [`Session`](crate::session::Session)
//! and maps pointer input to pan and cursor-anchored zoom.

mod paint;
mod view;

pub use view::{GpuiLinePlotView, SessionHandle};
