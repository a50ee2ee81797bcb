use serde::{Deserialize, Serialize};

use crate::error::FlightError;

/// One key transition, applied just before frame `frame` is simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub frame: u64,
    pub code: String,
    pub pressed: bool,
}

/// A recorded keyboard session, replayable frame by frame.
///
/// ```yaml
/// events:
///   - { frame: 0, code: KeyC, pressed: true }
///   - { frame: 100, code: KeyC, pressed: false }
/// ```
///
/// Events are kept sorted by frame however the script is built, including
/// when it is deserialized directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScriptFile")]
pub struct FlightScript {
    events: Vec<ScriptEvent>,
}

/// On-disk shape of a script, in whatever order it was written.
#[derive(Deserialize)]
struct ScriptFile {
    events: Vec<ScriptEvent>,
}

impl From<ScriptFile> for FlightScript {
    fn from(file: ScriptFile) -> Self {
        Self::from_events(file.events)
    }
}

impl FlightScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from events in any order. Events on the same frame keep their
    /// relative order.
    pub fn from_events(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self { events }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, FlightError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, FlightError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn press(mut self, frame: u64, code: impl Into<String>) -> Self {
        self.push(frame, code.into(), true);
        self
    }

    pub fn release(mut self, frame: u64, code: impl Into<String>) -> Self {
        self.push(frame, code.into(), false);
        self
    }

    /// Hold `code` from frame `from` up to, not including, frame `until`.
    pub fn hold(self, code: &str, from: u64, until: u64) -> Self {
        self.press(from, code).release(until, code)
    }

    fn push(&mut self, frame: u64, code: String, pressed: bool) {
        let at = self.events.partition_point(|e| e.frame <= frame);
        self.events.insert(
            at,
            ScriptEvent {
                frame,
                code,
                pressed,
            },
        );
    }

    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Frame of the last event, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.events.last().map(|e| e.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_events_sorted() {
        let s = FlightScript::new()
            .hold("KeyC", 10, 20)
            .press(5, "KeyS")
            .release(15, "KeyS");
        let frames: Vec<u64> = s.events().iter().map(|e| e.frame).collect();
        assert_eq!(frames, vec![5, 10, 15, 20]);
        assert_eq!(s.last_frame(), Some(20));
    }

    #[test]
    fn same_frame_events_keep_insertion_order() {
        let s = FlightScript::new().press(3, "KeyA").release(3, "KeyA");
        assert!(s.events()[0].pressed);
        assert!(!s.events()[1].pressed);
    }

    #[test]
    fn parses_yaml_and_sorts() {
        let s = FlightScript::from_yaml_str(
            "events:\n  - { frame: 9, code: KeyC, pressed: false }\n  - { frame: 0, code: KeyC, pressed: true }\n",
        )
        .unwrap();
        assert_eq!(s.events().len(), 2);
        assert_eq!(s.events()[0].frame, 0);
        assert!(s.events()[0].pressed);
    }

    #[test]
    fn direct_deserialize_sorts_events() {
        let s: FlightScript = serde_yaml::from_str(
            "events:\n  - { frame: 5, code: KeyS, pressed: true }\n  - { frame: 0, code: KeyC, pressed: true }\n",
        )
        .unwrap();
        let frames: Vec<u64> = s.events().iter().map(|e| e.frame).collect();
        assert_eq!(frames, vec![0, 5]);
    }

    #[test]
    fn missing_field_is_an_error() {
        assert!(FlightScript::from_yaml_str("events:\n  - { frame: 1 }\n").is_err());
    }
}
