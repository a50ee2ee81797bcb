use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// The three values shown on the thrust meter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudReading {
    /// Thrust as a percentage of max thrust, `[0, 100]`.
    pub thrust_percent: f32,
    pub speed_knots: f32,
    pub drag: f32,
}

/// Display collaborator refreshed once per frame by the controller.
pub trait Hud {
    fn refresh(&mut self, reading: &HudReading);
}

/// Lets the caller keep a handle on a HUD it has given to the controller.
impl<H: Hud + ?Sized> Hud for Rc<RefCell<H>> {
    fn refresh(&mut self, reading: &HudReading) {
        self.borrow_mut().refresh(reading);
    }
}
