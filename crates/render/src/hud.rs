use flightsim_kernel::{Hud, HudReading};

/// Thrust meter overlay: three lines of text refreshed every frame.
#[derive(Debug, Clone, Default)]
pub struct ThrustMeter {
    reading: HudReading,
    text: String,
    refreshes: u64,
}

impl ThrustMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format a reading the way the overlay shows it.
    pub fn format(reading: &HudReading) -> String {
        format!(
            "Thrust: {}%\nSpeed: {} kn\nDrag: {}",
            reading.thrust_percent, reading.speed_knots, reading.drag
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn reading(&self) -> HudReading {
        self.reading
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl Hud for ThrustMeter {
    fn refresh(&mut self, reading: &HudReading) {
        self.reading = *reading;
        self.text = Self::format(reading);
        self.refreshes += 1;
    }
}
