#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Nearest-point search over feature clouds.
pub mod nearest;

/// Operations on 3D feature points.
pub mod ops;

/// Feature point cloud container.
pub mod pointcloud;
