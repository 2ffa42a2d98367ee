use glam::DVec2;
use tracing::{debug, trace};

use crate::config::PendulumConfig;
use crate::controller::input::{Drag, DragSample, FrameInput};
use crate::controller::wind::Wind;
use crate::model::{Phase, PendulumState, RenderParams};

/// Floor for the drag velocity estimate when two samples share a timestamp.
const MIN_DRAG_DT: f64 = 1e-3;

/// External torque source for the free swing.
pub trait Torque {
    /// Advance by `dt` seconds and return the angular acceleration to add.
    fn torque(&mut self, dt: f64) -> f64;
}

impl Torque for Wind {
    fn torque(&mut self, dt: f64) -> f64 {
        Wind::torque(self, dt)
    }
}

/// No forcing at all.
pub struct StillAir;

impl Torque for StillAir {
    fn torque(&mut self, _dt: f64) -> f64 {
        0.0
    }
}

/// Angle of `pointer` around `pivot`, measured from the downward vertical.
pub fn pointer_angle(pivot: DVec2, pointer: DVec2, max_angle: f64) -> f64 {
    let d = pointer - pivot;
    d.x.atan2(d.y).clamp(-max_angle, max_angle)
}

pub fn pointer_rope_length(pivot: DVec2, pointer: DVec2, min: f64, max: f64) -> f64 {
    pivot.distance(pointer).clamp(min, max)
}

/// Pivot sitting `rope_length` px above `anchor` (top-centre of the badge).
pub fn pivot_above(anchor: DVec2, rope_length: f64) -> DVec2 {
    DVec2::new(anchor.x, anchor.y - rope_length)
}

/// Advances a [`PendulumState`] one animation frame at a time.
pub struct PendulumIntegrator {
    config: PendulumConfig,
}

impl PendulumIntegrator {
    pub fn new(config: PendulumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    /// Seconds since the last step, clamped to `[0, max_dt]`.
    pub fn frame_dt(&self, state: &PendulumState, now: f64) -> f64 {
        let dt = (now - state.last_timestamp) / 1000.0;
        if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        }
    }

    pub fn step<T: Torque>(
        &self,
        state: &PendulumState,
        now: f64,
        input: &FrameInput,
        wind: &mut T,
    ) -> (PendulumState, RenderParams) {
        let dt = self.frame_dt(state, now);
        let mut next = state.clone();
        next.last_timestamp = now;

        match input.drag {
            Drag::Follow(sample) => self.follow_pointer(&mut next, state.angle, sample, dt),
            Drag::Held => {
                next.phase = Phase::Dragging;
                next.angular_velocity = 0.0;
            }
            Drag::Released => {
                if state.is_dragging() {
                    debug!(velocity = state.angular_velocity, "badge thrown");
                }
                next.phase = Phase::Swinging;
                self.swing(&mut next, dt, input.scroll_delta, wind);
            }
        }

        trace!(angle = next.angle, velocity = next.angular_velocity, dt, "pendulum step");
        let params = RenderParams::from_state(&next, &self.config.render);
        (next, params)
    }

    fn follow_pointer(&self, s: &mut PendulumState, previous_angle: f64, sample: DragSample, dt: f64) {
        let cfg = &self.config;
        s.phase = Phase::Dragging;
        if cfg.elastic_rope {
            s.rope_length = pointer_rope_length(sample.pivot, sample.pointer, cfg.rope_min, cfg.rope_max);
        }
        s.angle = pointer_angle(sample.pivot, sample.pointer, cfg.max_angle());
        s.angular_velocity = (s.angle - previous_angle) / dt.max(MIN_DRAG_DT);
    }

    // Symplectic Euler with flat per-frame damping
    fn swing<T: Torque>(&self, s: &mut PendulumState, dt: f64, scroll_delta: f64, wind: &mut T) {
        let cfg = &self.config;

        s.angular_velocity += (scroll_delta * cfg.scroll_gain).clamp(-cfg.scroll_max, cfg.scroll_max);

        let acc = -(cfg.gravity / s.rope_length) * s.angle.sin() + wind.torque(dt);
        s.angular_velocity += acc * dt;
        s.angular_velocity *= cfg.damping;
        s.angle += s.angular_velocity * dt;

        let max_angle = cfg.max_angle();
        if s.angle > max_angle {
            s.angle = max_angle;
            s.angular_velocity = -s.angular_velocity.abs() * cfg.restitution;
        } else if s.angle < -max_angle {
            s.angle = -max_angle;
            s.angular_velocity = s.angular_velocity.abs() * cfg.restitution;
        }
    }
}
