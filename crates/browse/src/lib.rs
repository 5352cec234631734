//! Presents the upstream's fixed 20-item pages as application-defined
//! windows, re-tiling upstream pages where the sizes disagree.

pub mod browser;
pub mod error;
pub mod window;
