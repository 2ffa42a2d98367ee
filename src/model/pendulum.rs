use crate::config::{PendulumConfig, RenderConfig};

/// Who is moving the badge this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Free integration of the damped pendulum.
    Swinging,
    /// Angle follows the pointer.
    Dragging,
}

/// The badge's physical state, mutated once per animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumState {
    /// Displacement from the downward vertical, radians.
    pub angle: f64,
    /// Radians per second.
    pub angular_velocity: f64,
    /// Pivot to card centre, px.
    pub rope_length: f64,
    pub phase: Phase,
    /// Timestamp of the last step, in milliseconds.
    pub last_timestamp: f64,
}

impl PendulumState {
    pub fn new(config: &PendulumConfig, now: f64) -> Self {
        let max_angle = config.max_angle();
        Self {
            angle: config.initial_angle.clamp(-max_angle, max_angle),
            angular_velocity: 0.0,
            rope_length: config.rope_length.clamp(config.rope_min, config.rope_max),
            phase: Phase::Swinging,
            last_timestamp: now,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// Per-frame visual parameters for the badge and its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub rotation_degrees: f64,
    pub rope_length: f64,
    /// Vertical scale of the string, >= 1.
    pub string_stretch: f64,
    pub card_tilt_x: f64,
    pub card_tilt_y: f64,
    /// Horizontal shadow shift in px.
    pub shadow_sway: f64,
    /// Vertical shadow drop in px.
    pub shadow_offset: f64,
    pub shadow_scale: f64,
    pub shadow_opacity: f64,
}

impl RenderParams {
    pub fn from_state(state: &PendulumState, render: &RenderConfig) -> Self {
        let deg = state.rotation_degrees();
        let speed = state.angular_velocity.abs();
        let parallax = render.parallax;

        Self {
            rotation_degrees: deg,
            rope_length: state.rope_length,
            string_stretch: 1.0 + (speed * render.stretch_coefficient).min(render.stretch_cap),
            card_tilt_x: (-deg * 0.18).clamp(-parallax, parallax),
            card_tilt_y: (deg * 0.28).clamp(-parallax * 1.5, parallax * 1.5),
            shadow_sway: state.angle.sin() * 18.0,
            shadow_offset: 14.0 + speed * 4.0,
            shadow_scale: (1.0 + deg.abs() * 0.013).clamp(1.0, 1.65),
            shadow_opacity: 0.5 + (speed * 0.14).min(0.35),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(angle: f64, angular_velocity: f64) -> PendulumState {
        PendulumState {
            angle,
            angular_velocity,
            rope_length: 160.0,
            phase: Phase::Swinging,
            last_timestamp: 0.0,
        }
    }

    #[test]
    fn new_state_starts_swinging_at_initial_angle() {
        let s = PendulumState::new(&PendulumConfig::default(), 12.0);
        assert_eq!(s.phase, Phase::Swinging);
        assert_eq!(s.angle, 0.25);
        assert_eq!(s.angular_velocity, 0.0);
        assert_eq!(s.last_timestamp, 12.0);
    }

    #[test]
    fn new_state_clamps_initial_values() {
        let config = PendulumConfig {
            initial_angle: 3.0,
            rope_length: 1000.0,
            ..PendulumConfig::default()
        };
        let s = PendulumState::new(&config, 0.0);
        assert_relative_eq!(s.angle, 55f64.to_radians());
        assert_eq!(s.rope_length, 260.0);
    }

    #[test]
    fn render_params_at_rest() {
        let p = RenderParams::from_state(&state(0.0, 0.0), &RenderConfig::default());
        assert_eq!(p.rotation_degrees, 0.0);
        assert_eq!(p.string_stretch, 1.0);
        assert_eq!(p.shadow_offset, 14.0);
        assert_eq!(p.shadow_scale, 1.0);
        assert_eq!(p.shadow_opacity, 0.5);
        assert_eq!(p.card_tilt_x, 0.0);
    }

    #[test]
    fn render_params_cap_at_high_speed() {
        let p = RenderParams::from_state(&state(-0.9, 40.0), &RenderConfig::default());
        assert_relative_eq!(p.string_stretch, 1.18);
        assert_relative_eq!(p.shadow_opacity, 0.85);
        // -51.6 deg saturates both tilts and the shadow scale
        assert_relative_eq!(p.card_tilt_x, 8.0);
        assert_relative_eq!(p.card_tilt_y, -12.0);
        assert_relative_eq!(p.shadow_scale, 1.65);
        assert!(p.shadow_sway < 0.0);
    }

    #[test]
    fn render_tilt_is_proportional_for_small_angles() {
        let p = RenderParams::from_state(&state(0.1, 0.5), &RenderConfig::default());
        let deg = 0.1f64.to_degrees();
        assert_relative_eq!(p.rotation_degrees, deg);
        assert_relative_eq!(p.card_tilt_x, -deg * 0.18);
        assert_relative_eq!(p.card_tilt_y, deg * 0.28);
        assert_relative_eq!(p.string_stretch, 1.0 + 0.5 * 0.055);
        assert_relative_eq!(p.shadow_offset, 16.0);
    }
}
