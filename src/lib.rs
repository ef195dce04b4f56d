//! Viewport transform engine for an infinite canvas workspace.
//!
//! This crate owns the mapping between screen pixels and world coordinates:
//! a camera (uniform scale plus translation), wheel zoom about the pointer,
//! drag panning split into a cheap continuous phase and a commit phase, and
//! a two-pointer pinch gesture. Every camera change is reported as
//! [`sync::Action`]s so the host can keep a render surface and a dotted
//! background grid in lockstep. It compiles natively (for the replay tool
//! and tests) and to WebAssembly (for the browser bridge in [`web`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Viewport`] controller and testable [`engine::ViewportCore`] |
//! | [`camera`] | Camera, points and screen/world conversions |
//! | [`viewport`] | Viewport size, client bounds and visible world rectangle |
//! | [`gesture`] | Drag/pinch gesture state machine |
//! | [`pan`] | Drag offsets and the continuous/commit pan phases |
//! | [`pinch`] | Pinch history and anchored zoom with two-finger pan |
//! | [`input`] | Pointer ids, wheel input and tracked-pointer set |
//! | [`sync`] | Output actions, sink traits and grid CSS values |
//! | [`config`] | Zoom limits, wheel response and grid tunables |
//! | [`replay`] | Scripted event replay used by the `canvas-replay` binary |
//! | [`web`] | `wasm-bindgen` bridge for browser hosts |
//! | [`consts`] | Shared numeric and style constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod gesture;
pub mod input;
pub mod pan;
pub mod pinch;
pub mod replay;
pub mod sync;
pub mod viewport;
pub mod web;
