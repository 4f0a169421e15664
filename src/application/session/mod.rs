//! Session window detection.

pub mod detector;

pub use detector::{find_live, is_live_now, SessionDetector};
