//! Inkslate Render Library
//!
//! Renderer abstraction for Inkslate. Shapes paint through
//! [`inkslate_core::RenderSurface`] onto a layered scene; the Vello backend
//! encodes that scene for the GPU.

mod renderer;
mod scene;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{FrameStats, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{LayeredSurface, SceneRenderer, SceneSink};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::{VelloRenderer, VelloScene};
