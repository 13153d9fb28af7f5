pub mod canvas;
pub mod overlay;
pub mod skeleton;
#[cfg(feature = "desktop")]
pub mod window;

pub use canvas::Canvas;
pub use skeleton::{leg_color, TORSO_CONNECTIONS};
#[cfg(feature = "desktop")]
pub use window::MinifbRenderer;
