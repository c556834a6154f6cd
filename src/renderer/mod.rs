//! Canvas 2D rendering module
//!
//! Draws a `RenderState` plus its HUD layout. Holds no game state.

pub mod canvas;

pub use canvas::CanvasRenderer;
