use flightsim_common::RigidBody;
use flightsim_input::{ControlAxis, ControlState, KeyBindings};
use glam::{Quat, Vec3};
use tracing::{debug, trace, warn};

use crate::constants::FlightConstants;
use crate::error::FlightError;
use crate::hud::{Hud, HudReading};
use crate::listeners::{ChangeListeners, ListenerId};

/// What happened during one [`FlightDynamicsController::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub reading: HudReading,
    pub vertical_velocity: f32,
    /// The body hit the ground and was clamped this frame.
    pub grounded: bool,
    /// A change notification was sent this frame.
    pub changed: bool,
}

/// Keyboard-driven flight model for a single rigid body.
///
/// The controller owns the simulation state only. The body it moves is
/// borrowed for the duration of each [`update`](Self::update), so the caller
/// (a scene graph or a [`FrameDriver`](crate::FrameDriver)) keeps ownership.
pub struct FlightDynamicsController {
    constants: FlightConstants,
    bindings: KeyBindings,
    controls: ControlState,
    thrust: f32,
    speed: f32,
    vertical_velocity: f32,
    current_drag: f32,
    move_vector: Vec3,
    rotation_vector: Vec3,
    last_position: Vec3,
    last_orientation: Quat,
    listeners: ChangeListeners,
    hud: Option<Box<dyn Hud>>,
}

impl FlightDynamicsController {
    /// Controller at rest with the default key layout.
    pub fn new(constants: FlightConstants) -> Result<Self, FlightError> {
        Self::with_bindings(constants, KeyBindings::default())
    }

    pub fn with_bindings(
        constants: FlightConstants,
        bindings: KeyBindings,
    ) -> Result<Self, FlightError> {
        constants.validate()?;
        bindings.validate()?;
        Ok(Self::at_rest(constants, bindings))
    }

    fn at_rest(constants: FlightConstants, bindings: KeyBindings) -> Self {
        Self {
            constants,
            bindings,
            controls: ControlState::new(),
            thrust: 0.0,
            speed: 0.0,
            vertical_velocity: 0.0,
            current_drag: 0.0,
            move_vector: Vec3::ZERO,
            rotation_vector: Vec3::ZERO,
            last_position: Vec3::ZERO,
            last_orientation: Quat::IDENTITY,
            listeners: ChangeListeners::new(),
            hud: None,
        }
    }

    pub fn constants(&self) -> &FlightConstants {
        &self.constants
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn thrust(&self) -> f32 {
        self.thrust
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Drag computed by the most recent update.
    pub fn current_drag(&self) -> f32 {
        self.current_drag
    }

    pub fn move_vector(&self) -> Vec3 {
        self.move_vector
    }

    pub fn rotation_vector(&self) -> Vec3 {
        self.rotation_vector
    }

    /// Key pressed. Returns the axis it set, or `None` for an unbound code.
    pub fn on_key_down(&mut self, code: &str) -> Option<ControlAxis> {
        self.key_event(code, true)
    }

    /// Key released. Returns the axis it cleared, or `None` for an unbound code.
    pub fn on_key_up(&mut self, code: &str) -> Option<ControlAxis> {
        self.key_event(code, false)
    }

    fn key_event(&mut self, code: &str, held: bool) -> Option<ControlAxis> {
        let axis = self.bindings.axis_for(code)?;
        self.set_axis(axis, held);
        Some(axis)
    }

    /// Drive an axis directly, bypassing the key table.
    pub fn set_axis(&mut self, axis: ControlAxis, held: bool) {
        if self.controls.set(axis, held) != held {
            trace!(%axis, held, "control axis changed");
        }
    }

    /// Release every axis, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.controls.clear();
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Attach the thrust meter. Replaces any previous one.
    pub fn set_hud(&mut self, hud: Box<dyn Hud>) {
        self.hud = Some(hud);
    }

    pub fn take_hud(&mut self) -> Option<Box<dyn Hud>> {
        self.hud.take()
    }

    /// Current thrust meter values.
    pub fn reading(&self) -> HudReading {
        HudReading {
            thrust_percent: self.thrust / self.constants.max_thrust * 100.0,
            speed_knots: self.speed,
            drag: self.current_drag,
        }
    }

    /// Advance the simulation by `delta` seconds and move `body` accordingly.
    ///
    /// Fails with [`FlightError::InvalidArgument`] for a negative or
    /// non-finite delta, leaving all state untouched.
    pub fn update<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        delta: f32,
    ) -> Result<FrameReport, FlightError> {
        if !delta.is_finite() || delta < 0.0 {
            warn!(delta, "rejected frame delta");
            return Err(FlightError::InvalidArgument(format!(
                "delta must be a non-negative finite number of seconds, got {delta}"
            )));
        }
        let _span = tracing::debug_span!("flight_update", delta).entered();

        self.update_move_vector();
        self.update_rotation_vector();
        self.accelerate(delta);
        self.climb(body);
        let grounded = self.detect_collision(body);
        self.roll_correction(body);
        let reading = self.refresh_hud();
        self.apply_motion(body, delta);
        let settled = self.clamp_to_ground(body);
        let changed = self.detect_change(body);

        Ok(FrameReport {
            reading,
            vertical_velocity: self.vertical_velocity,
            grounded: grounded || settled,
            changed,
        })
    }

    fn update_move_vector(&mut self) {
        let c = &self.controls;
        self.move_vector = Vec3::new(
            c.pair(ControlAxis::Right, ControlAxis::Left),
            c.pair(ControlAxis::Up, ControlAxis::Down),
            c.value(ControlAxis::Back) - self.speed,
        );
    }

    fn update_rotation_vector(&mut self) {
        let c = &self.controls;
        self.rotation_vector = Vec3::new(
            c.pair(ControlAxis::PitchUp, ControlAxis::PitchDown),
            c.pair(ControlAxis::YawLeft, ControlAxis::YawRight),
            c.pair(ControlAxis::RollLeft, ControlAxis::RollRight),
        );
    }

    fn accelerate(&mut self, delta: f32) {
        let input = self
            .controls
            .pair(ControlAxis::ThrustUp, ControlAxis::ThrustDown);
        self.thrust = (self.thrust + self.constants.acceleration_constant() * input)
            .clamp(0.0, self.constants.max_thrust);

        let drag = self.constants.drag(self.speed);
        self.current_drag = drag;
        self.speed += (self.thrust - drag) * delta;
    }

    // Vertical velocity goes straight into position, without the frame delta.
    fn climb<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        self.vertical_velocity = self.constants.lift(self.speed) + self.constants.gravity;
        let mut position = body.position();
        position.y += self.vertical_velocity;
        body.set_position(position);
    }

    fn detect_collision<B: RigidBody + ?Sized>(&mut self, body: &mut B) -> bool {
        if !self.clamp_to_ground(body) {
            return false;
        }
        if self.speed > self.constants.brake_threshold && self.controls.braking {
            self.speed -= self.constants.brake_decrement;
            debug!(speed = self.speed, "braking on ground");
        }
        true
    }

    /// Lift the body back onto the ground if it sank below it.
    fn clamp_to_ground<B: RigidBody + ?Sized>(&self, body: &mut B) -> bool {
        let mut position = body.position();
        if position.y >= self.constants.ground_height {
            return false;
        }
        position.y = self.constants.ground_height;
        body.set_position(position);
        true
    }

    fn roll_correction<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        if self.vertical_velocity <= 0.0 {
            return;
        }
        let q = body.orientation();
        let angle = q.z * q.w;
        // |zw| <= 0.5, so normalizing shifts each component by at most ~3.2e-6.
        let correction =
            Quat::from_xyzw(0.0, angle * self.constants.roll_correction_gain, 0.0, 1.0).normalize();
        body.compose_rotation(correction);
    }

    fn refresh_hud(&mut self) -> HudReading {
        let reading = self.reading();
        if let Some(hud) = self.hud.as_mut() {
            hud.refresh(&reading);
        }
        reading
    }

    fn apply_motion<B: RigidBody + ?Sized>(&mut self, body: &mut B, delta: f32) {
        let rot_mult = delta * self.constants.roll_speed;
        let move_mult = delta * self.speed;

        body.translate_local(self.move_vector * move_mult);

        let r = self.rotation_vector * rot_mult;
        let rotation =
            Quat::from_xyzw(r.x, r.y / self.constants.yaw_damping, r.z, 1.0).normalize();
        body.compose_rotation(rotation);
    }

    fn detect_change<B: RigidBody + ?Sized>(&mut self, body: &B) -> bool {
        let position = body.position();
        let orientation = body.orientation();
        let eps = self.constants.change_epsilon;

        let moved = self.last_position.distance_squared(position) > eps;
        let turned = 8.0 * (1.0 - self.last_orientation.dot(orientation)) > eps;
        if !(moved || turned) {
            return false;
        }

        trace!(?position, "body changed");
        self.listeners.notify();
        self.last_position = position;
        self.last_orientation = orientation;
        true
    }
}

impl Default for FlightDynamicsController {
    fn default() -> Self {
        Self::at_rest(FlightConstants::default(), KeyBindings::default())
    }
}

impl std::fmt::Debug for FlightDynamicsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightDynamicsController")
            .field("thrust", &self.thrust)
            .field("speed", &self.speed)
            .field("vertical_velocity", &self.vertical_velocity)
            .field("current_drag", &self.current_drag)
            .field("controls", &self.controls)
            .field("listeners", &self.listeners)
            .field("hud", &self.hud.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsim_common::Transform;
    use std::cell::RefCell;
    use std::rc::Rc;

    const GROUND: f32 = 0.125;

    fn grounded_body() -> Transform {
        Transform::from_position(Vec3::new(0.0, GROUND, 0.0))
    }

    struct RecordingHud(Rc<RefCell<Vec<HudReading>>>);

    impl Hud for RecordingHud {
        fn refresh(&mut self, reading: &HudReading) {
            self.0.borrow_mut().push(*reading);
        }
    }

    fn count_changes(ctl: &mut FlightDynamicsController) -> Rc<RefCell<u32>> {
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        ctl.subscribe(move || *h.borrow_mut() += 1);
        hits
    }

    #[test]
    fn starts_at_rest() {
        let ctl = FlightDynamicsController::default();
        assert_eq!(ctl.thrust(), 0.0);
        assert_eq!(ctl.speed(), 0.0);
        assert!(ctl.controls().is_idle());
    }

    #[test]
    fn new_rejects_invalid_constants() {
        let bad = FlightConstants {
            max_thrust: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            FlightDynamicsController::new(bad),
            Err(FlightError::InvalidConfig(_))
        ));
    }

    #[test]
    fn key_events_follow_binding_table() {
        let mut ctl = FlightDynamicsController::default();
        assert_eq!(ctl.on_key_down("KeyC"), Some(ControlAxis::ThrustUp));
        assert!(ctl.controls().thrust_up);
        // Holding keeps it set; repeats are harmless.
        assert_eq!(ctl.on_key_down("KeyC"), Some(ControlAxis::ThrustUp));
        assert!(ctl.controls().thrust_up);
        assert_eq!(ctl.on_key_up("KeyC"), Some(ControlAxis::ThrustUp));
        assert!(!ctl.controls().thrust_up);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut ctl = FlightDynamicsController::default();
        assert_eq!(ctl.on_key_down("KeyZ"), None);
        assert_eq!(ctl.on_key_up("Escape"), None);
        assert!(ctl.controls().is_idle());
    }

    #[test]
    fn negative_delta_is_rejected_without_side_effects() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("KeyC");
        let mut body = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        let err = ctl.update(&mut body, -0.01).unwrap_err();
        assert!(matches!(err, FlightError::InvalidArgument(_)));
        assert!(ctl.update(&mut body, f32::NAN).is_err());
        assert!(ctl.update(&mut body, f32::INFINITY).is_err());
        assert_eq!(ctl.thrust(), 0.0);
        assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn rotation_vector_is_signed_pair_difference() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = grounded_body();
        ctl.on_key_down("KeyS"); // pitch up
        ctl.on_key_down("KeyE"); // yaw right
        ctl.on_key_down("KeyA"); // roll left
        ctl.on_key_down("KeyD"); // roll right
        ctl.update(&mut body, 0.0).unwrap();
        assert_eq!(ctl.rotation_vector(), Vec3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn move_vector_points_back_against_speed() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 2.0;
        let mut body = grounded_body();
        ctl.update(&mut body, 0.0).unwrap();
        assert_eq!(ctl.move_vector(), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn thrust_stays_in_bounds_for_mixed_input() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = grounded_body();
        let max = ctl.constants().max_thrust;
        for frame in 0..600u32 {
            let up = frame % 7 < 5 || frame > 400;
            let down = frame % 11 == 0 || (200..260).contains(&frame);
            ctl.set_axis(ControlAxis::ThrustUp, up);
            ctl.set_axis(ControlAxis::ThrustDown, down);
            let delta = (frame % 4) as f32 * 0.02;
            ctl.update(&mut body, delta).unwrap();
            assert!((0.0..=max).contains(&ctl.thrust()), "frame {frame}: {}", ctl.thrust());
        }
    }

    #[test]
    fn thrust_up_reaches_max_in_one_hundred_frames_and_never_overshoots() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = grounded_body();
        let max = ctl.constants().max_thrust;
        ctl.on_key_down("KeyC");

        let mut previous = 0.0;
        for _ in 0..100 {
            ctl.update(&mut body, 0.01).unwrap();
            assert!(ctl.thrust() >= previous);
            assert!(ctl.thrust() <= max);
            previous = ctl.thrust();
        }
        assert!((ctl.thrust() - max).abs() < 1e-4);

        for _ in 0..20 {
            ctl.update(&mut body, 0.01).unwrap();
        }
        assert_eq!(ctl.thrust(), max);
    }

    #[test]
    fn thrust_down_floors_at_zero() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = grounded_body();
        ctl.on_key_down("KeyV");
        for _ in 0..5 {
            ctl.update(&mut body, 0.01).unwrap();
        }
        assert_eq!(ctl.thrust(), 0.0);
    }

    #[test]
    fn thrust_increment_ignores_delta() {
        let mut a = FlightDynamicsController::default();
        let mut b = FlightDynamicsController::default();
        a.on_key_down("KeyC");
        b.on_key_down("KeyC");
        a.update(&mut grounded_body(), 0.0).unwrap();
        b.update(&mut grounded_body(), 1.0).unwrap();
        assert_eq!(a.thrust(), b.thrust());
    }

    #[test]
    fn drag_is_cached_for_display() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 2.0;
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert!((ctl.current_drag() - ctl.constants().drag(2.0)).abs() < 1e-7);
    }

    #[test]
    fn ground_clamp_is_exact() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = Transform::from_position(Vec3::new(3.0, 0.5, -1.0));
        // 0.5 + (-0.75) falls below ground.
        let report = ctl.update(&mut body, 0.01).unwrap();
        assert!(report.grounded);
        assert_eq!(body.position.y, GROUND);

        let report = ctl.update(&mut body, 0.01).unwrap();
        assert!(report.grounded);
        assert_eq!(body.position.y, GROUND);
    }

    #[test]
    fn ground_clamp_holds_while_rolling_forward() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 3.0;
        let mut body = grounded_body();
        ctl.update(&mut body, 0.1).unwrap();
        assert_eq!(body.position.y, GROUND);
        assert!(body.position.z < 0.0);
    }

    #[test]
    fn nose_down_on_ground_stays_at_ground_height() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 5.0;
        ctl.on_key_down("KeyW");
        let mut body = Transform {
            position: Vec3::new(0.0, GROUND, 0.0),
            rotation: Quat::from_rotation_x(-0.3),
            ..Transform::default()
        };
        for frame in 0..20 {
            let report = ctl.update(&mut body, 0.1).unwrap();
            assert!(report.grounded, "frame {frame}");
            assert_eq!(body.position.y, GROUND, "frame {frame}");
        }
    }

    #[test]
    fn vertical_motion_is_not_scaled_by_delta() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = Transform::from_position(Vec3::new(0.0, 100.0, 0.0));
        let report = ctl.update(&mut body, 0.0).unwrap();
        assert_eq!(report.vertical_velocity, -0.75);
        assert_eq!(body.position.y, 99.25);
        assert!(!report.grounded);
    }

    #[test]
    fn braking_decelerates_only_when_held() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 1.0;
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert_eq!(ctl.speed(), 1.0);

        ctl.on_key_down("Space");
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert!((ctl.speed() - 0.99).abs() < 1e-6);
    }

    #[test]
    fn braking_ignored_below_threshold() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("Space");
        ctl.speed = 0.002;
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert_eq!(ctl.speed(), 0.002);
    }

    #[test]
    fn braking_ignored_in_the_air() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("Space");
        ctl.speed = 1.0;
        let mut body = Transform::from_position(Vec3::new(0.0, 50.0, 0.0));
        let report = ctl.update(&mut body, 0.0).unwrap();
        assert!(!report.grounded);
        assert_eq!(ctl.speed(), 1.0);
    }

    #[test]
    fn roll_correction_applies_only_while_climbing() {
        let start = Quat::from_rotation_z(0.5);

        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 20.0;
        let mut body = Transform {
            position: Vec3::new(0.0, 10.0, 0.0),
            rotation: start,
            ..Transform::default()
        };
        let report = ctl.update(&mut body, 0.0).unwrap();
        assert!(report.vertical_velocity > 0.0);
        let expected = start
            * Quat::from_xyzw(0.0, start.z * start.w * 0.005, 0.0, 1.0).normalize();
        assert!(body.rotation.abs_diff_eq(expected, 1e-6));

        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 1.0;
        let mut body = Transform {
            position: Vec3::new(0.0, 10.0, 0.0),
            rotation: start,
            ..Transform::default()
        };
        ctl.update(&mut body, 0.0).unwrap();
        assert!(body.rotation.abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn roll_correction_stays_within_normalization_bound() {
        // z * w peaks at 0.5 for a quarter turn about z.
        let start = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 20.0;
        let mut body = Transform {
            position: Vec3::new(0.0, 10.0, 0.0),
            rotation: start,
            ..Transform::default()
        };
        ctl.update(&mut body, 0.0).unwrap();

        let raw = start * Quat::from_xyzw(0.0, start.z * start.w * 0.005, 0.0, 1.0);
        assert!(body.rotation.is_normalized());
        assert!(body.rotation.abs_diff_eq(raw, 1e-5));
        assert!(!body.rotation.abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn yaw_input_is_damped() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("KeyQ");
        let mut body = grounded_body();
        ctl.update(&mut body, 1.0).unwrap();
        let expected = Quat::from_xyzw(0.0, 0.75 / 7.5, 0.0, 1.0).normalize();
        assert!(body.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn pitch_input_rotates_about_local_x() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("KeyS");
        let mut body = Transform::from_position(Vec3::new(0.0, 50.0, 0.0));
        ctl.update(&mut body, 0.1).unwrap();
        let expected = Quat::from_xyzw(0.075, 0.0, 0.0, 1.0).normalize();
        assert!(body.rotation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn forward_motion_scales_with_speed_squared() {
        let mut ctl = FlightDynamicsController::default();
        ctl.speed = 2.0;
        let mut body = grounded_body();
        ctl.update(&mut body, 0.5).unwrap();
        // Direction uses the speed before acceleration, the multiplier the speed after.
        let after = 2.0 - ctl.constants().drag(2.0) * 0.5;
        assert!((body.position.z - (-2.0 * after * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn hud_receives_reading_every_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ctl = FlightDynamicsController::default();
        ctl.set_hud(Box::new(RecordingHud(Rc::clone(&log))));
        ctl.on_key_down("KeyC");

        let mut body = grounded_body();
        let report = ctl.update(&mut body, 0.01).unwrap();
        ctl.update(&mut body, 0.01).unwrap();

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], report.reading);
        assert!((log[0].thrust_percent - 1.0).abs() < 1e-4);
        assert!((log[1].thrust_percent - 2.0).abs() < 1e-4);
        assert!(log[1].speed_knots > 0.0);
    }

    #[test]
    fn release_all_clears_held_axes() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("KeyC");
        ctl.on_key_down("Space");
        ctl.release_all();
        assert!(ctl.controls().is_idle());

        ctl.update(&mut grounded_body(), 0.01).unwrap();
        assert_eq!(ctl.thrust(), 0.0);
    }

    #[test]
    fn take_hud_detaches_it() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ctl = FlightDynamicsController::default();
        assert!(ctl.take_hud().is_none());
        ctl.set_hud(Box::new(RecordingHud(Rc::clone(&log))));

        let mut body = grounded_body();
        ctl.update(&mut body, 0.01).unwrap();
        assert!(ctl.take_hud().is_some());
        ctl.update(&mut body, 0.01).unwrap();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn change_fires_once_for_two_idle_zero_delta_updates() {
        let mut ctl = FlightDynamicsController::default();
        let hits = count_changes(&mut ctl);
        let mut body = grounded_body();

        let first = ctl.update(&mut body, 0.0).unwrap();
        let second = ctl.update(&mut body, 0.0).unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn change_fires_on_rotation_only() {
        let mut ctl = FlightDynamicsController::default();
        let hits = count_changes(&mut ctl);
        let mut body = grounded_body();
        ctl.update(&mut body, 0.0).unwrap();

        ctl.on_key_down("KeyA");
        let report = ctl.update(&mut body, 0.1).unwrap();
        assert!(report.changed);
        assert_eq!(body.position.y, GROUND);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let mut ctl = FlightDynamicsController::default();
        let hits = Rc::new(RefCell::new(0));
        let h = Rc::clone(&hits);
        let id = ctl.subscribe(move || *h.borrow_mut() += 1);
        assert!(ctl.unsubscribe(id));
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn takeoff_scenario_fifty_frames() {
        let mut ctl = FlightDynamicsController::default();
        let mut body = grounded_body();
        ctl.on_key_down("KeyC");

        let mut previous_speed = 0.0;
        for frame in 1..=50 {
            ctl.update(&mut body, 0.1).unwrap();
            assert!(ctl.speed() > previous_speed, "frame {frame}");
            assert!(body.position.y >= GROUND, "frame {frame}");
            previous_speed = ctl.speed();
        }
        // One acceleration step per frame regardless of delta.
        assert!((ctl.thrust() - 1.75).abs() < 1e-4);

        for _ in 51..=100 {
            ctl.update(&mut body, 0.1).unwrap();
            assert!(body.position.y >= GROUND);
        }
        assert!((ctl.thrust() - ctl.constants().max_thrust).abs() < 1e-4);
        assert!(ctl.speed() > previous_speed);
    }

    #[test]
    fn negative_speed_has_no_floor() {
        let mut ctl = FlightDynamicsController::default();
        ctl.on_key_down("Space");
        ctl.speed = 0.005;
        ctl.update(&mut grounded_body(), 0.0).unwrap();
        assert!(ctl.speed() < 0.0);
    }
}
