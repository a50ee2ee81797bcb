use flightsim_common::Transform;

use crate::config::FlightConfig;
use crate::controller::{FlightDynamicsController, FrameReport};
use crate::error::FlightError;
use crate::script::FlightScript;

/// Owns one controller and the body it flies, and steps them once per frame.
///
/// This is the headless stand-in for a render loop: whoever schedules frames
/// calls [`tick`](Self::tick) and reads [`body`](Self::body) afterwards.
#[derive(Debug)]
pub struct FrameDriver {
    controller: FlightDynamicsController,
    body: Transform,
    delta: f32,
    frame: u64,
    script: FlightScript,
    cursor: usize,
}

impl FrameDriver {
    pub fn new(config: &FlightConfig) -> Result<Self, FlightError> {
        config.validate()?;
        let controller =
            FlightDynamicsController::with_bindings(config.constants, config.bindings.clone())?;
        Ok(Self {
            controller,
            body: Transform::from_position(config.frame.start_position),
            delta: config.frame.delta,
            frame: 0,
            script: FlightScript::new(),
            cursor: 0,
        })
    }

    /// Replay `script` from the current frame on.
    pub fn with_script(mut self, script: FlightScript) -> Self {
        self.cursor = script.events().partition_point(|e| e.frame < self.frame);
        self.script = script;
        self
    }

    pub fn controller(&self) -> &FlightDynamicsController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FlightDynamicsController {
        &mut self.controller
    }

    pub fn body(&self) -> &Transform {
        &self.body
    }

    /// Number of frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Simulate one frame with the configured delta.
    pub fn tick(&mut self) -> Result<FrameReport, FlightError> {
        self.tick_with(self.delta)
    }

    /// Simulate one frame with an explicit delta.
    pub fn tick_with(&mut self, delta: f32) -> Result<FrameReport, FlightError> {
        self.apply_script();
        let report = self.controller.update(&mut self.body, delta)?;
        self.frame += 1;
        Ok(report)
    }

    /// Simulate `frames` frames, handing each result to `on_frame`.
    pub fn run(
        &mut self,
        frames: u64,
        mut on_frame: impl FnMut(u64, &Transform, &FrameReport),
    ) -> Result<(), FlightError> {
        let _span = tracing::info_span!("flight_run", frames, delta = self.delta).entered();
        for _ in 0..frames {
            let report = self.tick()?;
            on_frame(self.frame, &self.body, &report);
        }
        tracing::info!(
            frame = self.frame,
            speed = self.controller.speed(),
            altitude = self.body.position.y,
            "flight run finished"
        );
        Ok(())
    }

    fn apply_script(&mut self) {
        let events = self.script.events();
        while let Some(event) = events.get(self.cursor) {
            if event.frame > self.frame {
                break;
            }
            let applied = if event.pressed {
                self.controller.on_key_down(&event.code)
            } else {
                self.controller.on_key_up(&event.code)
            };
            if applied.is_none() {
                tracing::debug!(code = %event.code, frame = event.frame, "scripted key is unbound");
            }
            self.cursor += 1;
        }
    }
}
