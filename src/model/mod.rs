// MODEL: Pendulum state and derived render values
pub mod pendulum;

pub use pendulum::{Phase, PendulumState, RenderParams};
