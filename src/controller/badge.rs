use glam::DVec2;

use crate::config::PendulumConfig;
use crate::controller::input::{InputEvent, InputState};
use crate::controller::integrator::{pivot_above, PendulumIntegrator};
use crate::controller::wind::Wind;
use crate::model::{PendulumState, RenderParams};

/// One animated badge: its state plus everything needed to advance it.
///
/// Event handlers call [`handle`](Self::handle) at any time; the animation
/// loop calls [`frame`](Self::frame) once per frame.
pub struct BadgeController {
    integrator: PendulumIntegrator,
    state: PendulumState,
    input: InputState,
    wind: Wind,
}

impl BadgeController {
    pub fn new(config: PendulumConfig, now: f64, scroll_y: f64, seed: u64) -> Self {
        let state = PendulumState::new(&config, now);
        let input = InputState::new(config.drag_enabled, scroll_y);
        let wind = Wind::new(config.wind.clone(), seed);
        Self {
            integrator: PendulumIntegrator::new(config),
            state,
            input,
            wind,
        }
    }

    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    pub fn handle(&mut self, event: &InputEvent) {
        self.input.process_event(event);
    }

    /// Pivot for a badge whose top-centre is at `anchor`.
    pub fn pivot(&self, anchor: DVec2) -> DVec2 {
        pivot_above(anchor, self.state.rope_length)
    }

    /// Consume queued input and advance one frame.
    pub fn frame(&mut self, now: f64, anchor: DVec2) -> RenderParams {
        let input = self.input.take_frame(self.pivot(anchor));
        let (next, params) = self.integrator.step(&self.state, now, &input, &mut self.wind);
        self.state = next;
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindConfig;
    use crate::model::Phase;
    use approx::assert_relative_eq;

    fn calm_controller() -> BadgeController {
        let config = PendulumConfig {
            wind: WindConfig::calm(),
            ..PendulumConfig::default()
        };
        BadgeController::new(config, 0.0, 0.0, 1)
    }

    #[test]
    fn drag_then_release_round_trip() {
        let mut badge = calm_controller();
        let anchor = DVec2::new(200.0, 210.0);
        let pivot = badge.pivot(anchor);
        assert_eq!(pivot, DVec2::new(200.0, 50.0));

        badge.handle(&InputEvent::DragStart { x: 200.0, y: 230.0 });
        badge.frame(16.0, anchor);
        assert_eq!(badge.state().phase, Phase::Dragging);
        assert_eq!(badge.state().angle, 0.25);

        badge.handle(&InputEvent::DragMove { x: 230.0, y: 150.0 });
        badge.frame(32.0, anchor);
        assert_relative_eq!(badge.state().angle, 30f64.atan2(100.0));
        assert_eq!(badge.state().phase, Phase::Dragging);

        badge.handle(&InputEvent::DragEnd);
        badge.frame(48.0, anchor);
        assert_eq!(badge.state().phase, Phase::Swinging);
    }

    #[test]
    fn still_pointer_holds_the_stretched_badge() {
        let mut badge = calm_controller();
        let anchor = DVec2::new(0.0, 160.0);
        let grab = badge.pivot(anchor) + DVec2::new(50.0, 100.0);
        badge.handle(&InputEvent::DragStart { x: grab.x, y: grab.y });
        badge.handle(&InputEvent::DragMove { x: grab.x, y: grab.y });

        badge.frame(16.0, anchor);
        let held_angle = 50f64.atan2(100.0);
        assert_relative_eq!(badge.state().angle, held_angle);
        assert_relative_eq!(badge.state().rope_length, 50f64.hypot(100.0));

        // The rope shortened, but the pivot must not follow it
        for i in 2..=8 {
            badge.frame(i as f64 * 16.0, anchor);
            assert_relative_eq!(badge.state().angle, held_angle);
            assert_eq!(badge.state().angular_velocity, 0.0);
            assert_eq!(badge.state().phase, Phase::Dragging);
        }
    }

    #[test]
    fn grab_hold_then_release_swings_back() {
        let mut badge = calm_controller();
        let anchor = DVec2::new(0.0, 160.0);
        let frame_ms = 1000.0 / 60.0;
        let grab = badge.pivot(anchor) + DVec2::new(50.0, 100.0);
        badge.handle(&InputEvent::DragStart { x: grab.x, y: grab.y });
        badge.handle(&InputEvent::DragMove { x: grab.x, y: grab.y });

        let held_angle = 50f64.atan2(100.0);
        for i in 1..=30 {
            let params = badge.frame(i as f64 * frame_ms, anchor);
            assert_relative_eq!(params.rotation_degrees, held_angle.to_degrees());
        }

        badge.handle(&InputEvent::DragEnd);
        badge.frame(31.0 * frame_ms, anchor);
        assert_eq!(badge.state().phase, Phase::Swinging);
        assert!(badge.state().angular_velocity < 0.0);
        assert!(badge.state().angle < held_angle);

        for i in 32..=60 {
            badge.frame(i as f64 * frame_ms, anchor);
        }
        assert!(badge.state().angle < held_angle - 0.1);
    }

    #[test]
    fn scroll_kicks_the_swing() {
        let mut still = calm_controller();
        let mut kicked = calm_controller();
        let anchor = DVec2::new(0.0, 0.0);

        kicked.handle(&InputEvent::Scroll { y: 100.0 });
        let a = still.frame(16.0, anchor);
        let b = kicked.frame(16.0, anchor);
        assert!(kicked.state().angular_velocity > still.state().angular_velocity);
        assert!(b.rotation_degrees > a.rotation_degrees);
    }

    #[test]
    fn default_wind_keeps_the_badge_moving() {
        let mut badge = BadgeController::new(PendulumConfig::default(), 0.0, 0.0, 77);
        let anchor = DVec2::new(0.0, 0.0);
        let mut moving_frames = 0;
        for i in 1..=20_000 {
            badge.frame(i as f64 * 1000.0 / 60.0, anchor);
            if i > 10_000 && badge.state().angular_velocity.abs() > 1e-4 {
                moving_frames += 1;
            }
        }
        assert!(moving_frames > 8_000);
    }

    #[test]
    fn render_params_follow_state() {
        let mut badge = calm_controller();
        let params = badge.frame(16.0, DVec2::ZERO);
        assert_relative_eq!(params.rotation_degrees, badge.state().angle.to_degrees());
        assert_eq!(params.rope_length, badge.state().rope_length);
    }
}
