// VIEW: CSS output for the badge
pub mod style;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use style::BadgeStyles;
#[cfg(target_arch = "wasm32")]
pub use dom::BadgeElements;
