#[cfg(feature = "desktop")]
pub mod camera;
pub mod config;
pub mod counter;
pub mod pose;
pub mod render;
pub mod session;
pub mod source;
