// Constants

// Tolerances
pub const NORM_TOLERANCE: f64 = 1e-12; // Below this a vector/quaternion norm is treated as zero
pub const AXIS_TOLERANCE: f64 = 1e-6; // For classifying rotation axes against the coordinate frame
pub const CONTAINMENT_TOLERANCE: f64 = 1e-9; // Boundary slack for spherical-region membership

// Uniqueness
pub const DIFFERENTIATOR_DECIMALS: i32 = 6; // Rounding precision of element fingerprints
pub const DIFFERENTIATOR_SCALE: f64 = 1e6; // 10^DIFFERENTIATOR_DECIMALS, kept in sync by test

// Group generation
/// Largest order of any finite crystallographic point group (that of m-3m).
/// The closure loop in `Symmetry::from_generators` treats exceeding this
/// bound as proof that the generators do not span a point group.
pub const MAX_POINT_GROUP_ORDER: usize = 48;
