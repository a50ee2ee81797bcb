//! Rendering Adapter: text output derived from the simulated body.
//!
//! # Invariants
//! - Renderers read the body and HUD values; they never move the body.
//!
//! # Workaround
//! Frames are rendered as text so flights can be inspected headlessly. The
//! [`Renderer`] trait is the seam a GPU backend would implement.

mod hud;
mod renderer;

pub use hud::ThrustMeter;
pub use renderer::{DebugTextRenderer, FrameView, RenderView, Renderer};
