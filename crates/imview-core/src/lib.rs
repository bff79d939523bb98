//! Host-side protocol for the imview GUI bridge.
//!
//! The host owns the viewport, the event loop and the coordinate system. This
//! crate describes what the bridge needs from it:
//!
//! - [`ViewerContext`] is the per-callback view of the host viewer (event
//!   kind, pointer, buttons, modifiers, viewport, draw passes).
//! - [`ffi`] holds the C-repr event struct and raw codes for hosts calling
//!   through a C ABI; [`ViewerSnapshot`] is its owned Rust counterpart.
//! - [`config`] and [`log`] carry the bridge configuration and the
//!   developer log output it gates.

pub mod config;
pub mod ffi;
pub mod inputs;
pub mod log;
pub mod viewer;

pub use config::BridgeConfig;
pub use inputs::ViewerSnapshot;
pub use viewer::{is_2d_viewer, DrawPass, EventKind, Modifiers, TransformMode, ViewerContext};
