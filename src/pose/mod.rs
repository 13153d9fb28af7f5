pub mod angle;
#[cfg(feature = "desktop")]
pub mod detector;
pub mod landmark;
pub mod letterbox;
#[cfg(feature = "desktop")]
pub mod preprocess;

pub use angle::{joint_angle, leg_angle, DEFAULT_MIN_VISIBILITY};
#[cfg(feature = "desktop")]
pub use detector::PoseDetector;
pub use landmark::{Landmark, LandmarkIndex, Pose, Side};
pub use letterbox::{unletterbox_pose, LetterboxInfo};
#[cfg(feature = "desktop")]
pub use preprocess::preprocess_for_blazepose;
