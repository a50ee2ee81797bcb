use flightsim_common::Transform;
use flightsim_kernel::FrameReport;
use serde::{Deserialize, Serialize};

/// Errors from exporting recorded telemetry.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Telemetry captured after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSample {
    pub frame: u64,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub thrust_percent: f32,
    pub speed: f32,
    pub drag: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub changed: bool,
}

/// Collects per-frame samples from a flight.
#[derive(Debug, Clone, Default)]
pub struct FlightRecorder {
    samples: Vec<FlightSample>,
}

impl FlightRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, frame: u64, body: &Transform, report: &FrameReport) {
        let p = body.position;
        let r = body.rotation;
        self.samples.push(FlightSample {
            frame,
            position: [p.x, p.y, p.z],
            rotation: [r.x, r.y, r.z, r.w],
            thrust_percent: report.reading.thrust_percent,
            speed: report.reading.speed_knots,
            drag: report.reading.drag,
            vertical_velocity: report.vertical_velocity,
            grounded: report.grounded,
            changed: report.changed,
        });
    }

    pub fn samples(&self) -> &[FlightSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First frame at which the aircraft left the ground, if it did.
    pub fn takeoff_frame(&self) -> Option<u64> {
        self.samples.iter().find(|s| !s.grounded).map(|s| s.frame)
    }

    pub fn summary(&self) -> FlightSummary {
        let mut summary = FlightSummary {
            frames: self.samples.len(),
            ..FlightSummary::default()
        };
        let Some(first) = self.samples.first() else {
            return summary;
        };
        summary.min_altitude = first.position[1];
        summary.max_altitude = first.position[1];
        summary.max_speed = first.speed;

        for s in &self.samples {
            summary.max_speed = summary.max_speed.max(s.speed);
            summary.min_altitude = summary.min_altitude.min(s.position[1]);
            summary.max_altitude = summary.max_altitude.max(s.position[1]);
            summary.ground_frames += usize::from(s.grounded);
            summary.change_notifications += usize::from(s.changed);
        }
        if let Some(last) = self.samples.last() {
            summary.final_thrust_percent = last.thrust_percent;
            summary.final_speed = last.speed;
        }
        summary.takeoff_frame = self.takeoff_frame();
        summary
    }

    pub fn to_json(&self) -> Result<String, RecorderError> {
        Ok(serde_json::to_string_pretty(&self.samples)?)
    }

    pub fn write_json(&self, writer: impl std::io::Write) -> Result<(), RecorderError> {
        serde_json::to_writer_pretty(writer, &self.samples)?;
        tracing::debug!(samples = self.samples.len(), "telemetry exported");
        Ok(())
    }
}

/// Aggregate view of a recorded flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSummary {
    pub frames: usize,
    pub max_speed: f32,
    pub final_speed: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
    pub ground_frames: usize,
    pub change_notifications: usize,
    pub final_thrust_percent: f32,
    pub takeoff_frame: Option<u64>,
}

impl std::fmt::Display for FlightSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flight: frames={} thrust={:.0}% speed={:.3} (max {:.3}) altitude=[{:.3}, {:.3}] ground_frames={} changes={}",
            self.frames,
            self.final_thrust_percent,
            self.final_speed,
            self.max_speed,
            self.min_altitude,
            self.max_altitude,
            self.ground_frames,
            self.change_notifications
        )?;
        match self.takeoff_frame {
            Some(frame) => write!(f, " takeoff={frame}"),
            None => write!(f, " takeoff=none"),
        }
    }
}
