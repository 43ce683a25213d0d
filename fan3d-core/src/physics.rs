/// Rigid-body style rotation state for one fan
use std::f32::consts::{PI, TAU};

/// Conversion factor from RPM to rad/s
pub const RPM_TO_RAD_PER_SEC: f32 = PI / 30.0;

/// Tunable physics constants.
///
/// The defaults carry the documented values; none of them are hard-coded
/// in the update loop so alternative feels can be dialed in.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsParams {
    /// Upper bound of the speed control, in RPM
    pub max_speed_rpm: f32,
    /// Target restored when the fan is powered back on, in RPM
    pub cruise_speed_rpm: f32,
    /// Speed change per discrete speed-up/down input, in RPM
    pub speed_step_rpm: f32,
    /// Spin-up rate, rad/s²
    pub accel_rate: f32,
    /// Spin-down rate, rad/s². Slower than accel for an inertial coast-down feel
    pub decel_rate: f32,
    /// Oscillation phase advance, rad/s
    pub oscillation_rate: f32,
    /// Peak yaw sweep either side of center, radians
    pub oscillation_amplitude: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            max_speed_rpm: 10.0,
            cruise_speed_rpm: 2.0,
            speed_step_rpm: 0.5,
            accel_rate: 0.1,
            decel_rate: 0.05,
            oscillation_rate: 0.5,
            oscillation_amplitude: PI / 6.0,
        }
    }
}

/// Angular state advanced once per frame.
///
/// All angles are radians; `angular_position` and `oscillation_phase` wrap
/// mod 2π, `angular_velocity` stays within [0, max] and chases
/// `target_velocity` at the bounded accel/decel rates.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    pub params: PhysicsParams,
    pub angular_position: f32,
    pub angular_velocity: f32,
    pub target_velocity: f32,
    pub powered: bool,
    pub oscillating: bool,
    pub oscillation_phase: f32,
}

impl PhysicsState {
    /// A fan at rest: powered but with no speed target
    pub fn at_rest(params: PhysicsParams) -> Self {
        Self {
            params,
            angular_position: 0.0,
            angular_velocity: 0.0,
            target_velocity: 0.0,
            powered: true,
            oscillating: false,
            oscillation_phase: 0.0,
        }
    }

    /// Set the speed target in RPM, clamped to [0, max_speed]
    pub fn set_target_speed(&mut self, rpm: f32) {
        let rpm = rpm.clamp(0.0, self.params.max_speed_rpm);
        self.target_velocity = rpm * RPM_TO_RAD_PER_SEC;
    }

    pub fn speed_up(&mut self) {
        self.set_target_speed(self.target_speed_rpm() + self.params.speed_step_rpm);
    }

    pub fn speed_down(&mut self) {
        self.set_target_speed(self.target_speed_rpm() - self.params.speed_step_rpm);
    }

    /// Toggle power. Powering off forces the target to zero but lets the
    /// rotor coast down under the deceleration rate; powering on restores
    /// the cruise target.
    pub fn toggle_power(&mut self) {
        self.powered = !self.powered;
        if self.powered {
            self.set_target_speed(self.params.cruise_speed_rpm);
        } else {
            self.target_velocity = 0.0;
        }
    }

    /// Toggle the yaw sweep. Oscillation is independent of power state.
    pub fn toggle_oscillation(&mut self) {
        self.oscillating = !self.oscillating;
    }

    pub fn target_speed_rpm(&self) -> f32 {
        self.target_velocity / RPM_TO_RAD_PER_SEC
    }

    pub fn current_speed_rpm(&self) -> f32 {
        self.angular_velocity / RPM_TO_RAD_PER_SEC
    }

    /// Current yaw offset of the whole assembly, clamped to ±amplitude
    pub fn yaw_offset(&self) -> f32 {
        let amplitude = self.params.oscillation_amplitude;
        (amplitude * self.oscillation_phase.sin()).clamp(-amplitude, amplitude)
    }

    /// Advance one fixed time step. Pure synchronous state transition;
    /// never blocks, never fails.
    pub fn advance(&mut self, dt: f32) {
        // An unpowered fan always decays toward zero regardless of any
        // pending speed target.
        let target = if self.powered { self.target_velocity } else { 0.0 };

        if target > self.angular_velocity {
            self.angular_velocity =
                target.min(self.angular_velocity + self.params.accel_rate * dt);
        } else {
            self.angular_velocity =
                target.max(self.angular_velocity - self.params.decel_rate * dt);
        }

        self.angular_position =
            (self.angular_position + self.angular_velocity * dt).rem_euclid(TAU);

        if self.oscillating {
            self.oscillation_phase =
                (self.oscillation_phase + self.params.oscillation_rate * dt).rem_euclid(TAU);
        }
    }
}
