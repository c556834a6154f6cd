//! HUD layout
//!
//! Computes what the HUD shows for a frame, independent of how it is drawn.

pub mod hud;

pub use hud::{HealthBar, HudLayout, TextLine, WinBanner};
