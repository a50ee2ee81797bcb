use flightsim_common::Transform;
use flightsim_kernel::HudReading;
use glam::Vec3;

use crate::hud::ThrustMeter;

/// Camera offset from the aircraft, in the aircraft's local frame.
const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 5.0);

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: CHASE_OFFSET,
            target: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

impl RenderView {
    /// Camera rigidly attached behind and above `body`.
    pub fn chase(body: &Transform) -> Self {
        Self {
            eye: body.position + body.rotation * CHASE_OFFSET,
            target: body.position,
            ..Self::default()
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView {
    pub frame: u64,
    pub body: Transform,
    pub reading: HudReading,
    pub view: RenderView,
}

impl FrameView {
    /// Frame seen from the chase camera.
    pub fn chase(frame: u64, body: Transform, reading: HudReading) -> Self {
        Self {
            frame,
            body,
            reading,
            view: RenderView::chase(&body),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameView) -> Self::Output;
}

/// Produces a human-readable frame: camera, aircraft pose and thrust meter.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Frame {} ===\n", frame.frame));

        let v = &frame.view;
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.fov_degrees
        ));

        let p = frame.body.position;
        let (yaw, pitch, roll) = frame.body.rotation.to_euler(glam::EulerRot::YXZ);
        out.push_str(&format!(
            "Aircraft: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} roll={:.1}\n",
            p.x,
            p.y,
            p.z,
            yaw.to_degrees(),
            pitch.to_degrees(),
            roll.to_degrees()
        ));

        out.push_str(&ThrustMeter::format(&frame.reading));
        out.push('\n');
        out
    }
}
