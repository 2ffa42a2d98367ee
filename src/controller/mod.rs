// CONTROLLER: Input, physics, and the per-frame update
pub mod input;
pub mod wind;
pub mod integrator;
pub mod badge;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;

pub use input::{InputEvent, InputState, FrameInput};
pub use wind::Wind;
pub use integrator::{PendulumIntegrator, Torque, StillAir};
pub use badge::BadgeController;
#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoopContext;
