//! Platform abstraction layer
//!
//! Browser bindings for:
//! - Frame scheduling (`requestAnimationFrame`)
//! - Container measurement
//! - Input events (resize, mouse)
//! - Theme lookup (the `dark` class on the root element)
//!
//! Native builds have no platform layer; they drive the host headlessly.

#[cfg(target_arch = "wasm32")]
pub mod web;
