//! Application-level orchestration.
//!
//! The selector lives on a single task that is the only writer of the selection.
//! Presentation layers send commands in and receive surface updates back, so the
//! terminal thread never touches selector state directly.

mod controller;
mod surface;

pub(crate) use controller::{run_controller, UiCommand, UiUpdate};
pub(crate) use surface::{ChannelSurface, SurfaceUpdate};
