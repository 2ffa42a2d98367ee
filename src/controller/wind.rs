use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::WindConfig;

/// 1D value noise: smoothstep between hashed lattice values.
///
/// The hash keeps the sign of `sin`, so the output spans roughly (-3, 1)
/// rather than a symmetric range.
pub fn value_noise(t: f64) -> f64 {
    let i = t.floor();
    let f = t - i;
    let s = f * f * (3.0 - 2.0 * f);
    let r1 = lattice(i);
    let r2 = lattice(i + 1.0);
    (r1 * (1.0 - s) + r2 * s) * 2.0 - 1.0
}

fn lattice(i: f64) -> f64 {
    ((i * 127.1).sin() * 43758.5453) % 1.0
}

/// Ambient breeze plus intermittent gusts, applied while the badge swings freely.
pub struct Wind {
    config: WindConfig,
    phase: f64,
    gust: f64,
    gust_timer: f64,
    rng: SmallRng,
}

impl Wind {
    pub fn new(config: WindConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let phase = rng.random::<f64>() * 1000.0;
        Self {
            config,
            phase,
            gust: 0.0,
            gust_timer: 0.0,
            rng,
        }
    }

    pub fn gust(&self) -> f64 {
        self.gust
    }

    /// Advance by `dt` seconds and return the torque for this frame.
    pub fn torque(&mut self, dt: f64) -> f64 {
        let cfg = &self.config;
        self.phase += dt * cfg.phase_rate;

        if self.gust_timer <= 0.0 && self.rng.random_bool(cfg.gust_chance) {
            self.gust = self.rng.random_range(-1.0..1.0) * cfg.gust_strength;
            self.gust_timer = 0.5 + self.rng.random::<f64>() * 0.7;
            debug!(gust = self.gust, duration = self.gust_timer, "wind gust");
        } else {
            self.gust *= cfg.gust_decay;
            self.gust_timer -= dt;
        }

        let wind = value_noise(self.phase) * cfg.strength + self.gust;
        wind * cfg.torque_scale
    }
}
