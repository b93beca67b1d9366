//! Vectorized rotation and point-group algebra for orientation analysis
//!
//! This library provides broadcast collections of quaternions, rotations and
//! 3-d vectors, the crystallographic point groups closed from generators, and
//! fundamental-sector containment tests on the sphere.

pub mod config;
pub mod error;
pub mod quaternion;
pub mod sampling;
pub mod scalar;
pub mod vector;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, error::Error>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
