use std::f64::consts::TAU;

use log::debug;
use rand::Rng;

use crate::quaternion::rotation::Rotation;

/// Draw `n` rotations uniformly distributed over SO(3).
///
/// Uses the subgroup-algorithm construction: three independent uniform
/// deviates map to a quaternion whose distribution matches the Haar
/// measure. All returned rotations are proper.
pub fn random_rotations<R: Rng>(n: usize, rng: &mut R) -> Rotation {
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let u3: f64 = rng.gen();
        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        let x = a * (TAU * u2).sin();
        let y = a * (TAU * u2).cos();
        let z = b * (TAU * u3).sin();
        let w = b * (TAU * u3).cos();
        rows.push(([w, x, y, z], false));
    }
    debug!("sampled {n} uniform orientations");
    Rotation::from_rows(&rows)
}
