use std::f64::consts::{FRAC_1_SQRT_2, PI};

use log::debug;
use nalgebra::Vector3;
use ndarray::{ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use crate::config::{AXIS_TOLERANCE, CONTAINMENT_TOLERANCE};
use crate::quaternion::rotation::Rotation;
use crate::quaternion::symmetry::Symmetry;
use crate::scalar::scalar::round_key;
use crate::vector::vector3d::Vector3d;

/// A region on the sphere bounded by great circles: the intersection of
/// the half-spaces `n · v >= 0` over a set of unit normals.
///
/// With no normals the region is the whole sphere. The containment test
/// admits a small tolerance so that boundary points count as inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphericalRegion {
    normals: Vector3d,
}

impl SphericalRegion {
    /// Bound a region by the given normals (flattened to one axis).
    pub fn new(normals: Vector3d) -> Self {
        Self {
            normals: normals.flatten(),
        }
    }

    /// Bound a region by explicit normal rows.
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self::new(Vector3d::from_rows(rows))
    }

    /// The bounding normals.
    pub fn normals(&self) -> &Vector3d {
        &self.normals
    }

    /// Number of bounding half-spaces.
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// Whether each vector lies inside the region, as a boolean array of
    /// the vectors' leading shape.
    pub fn contains(&self, vectors: &Vector3d) -> ArrayD<bool> {
        let table = self.normals.dot_outer(vectors);
        table
            .data()
            .map_axis(Axis(0), |dots| {
                dots.iter().all(|&d| d >= -CONTAINMENT_TOLERANCE)
            })
    }

    /// Containment test for one point.
    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        self.contains(&Vector3d::single(x, y, z))[IxDyn(&[])]
    }

    /// The fundamental sector of a point group: a region containing
    /// exactly one representative of each orbit of directions under the
    /// group, up to boundary identification.
    ///
    /// The normals come out in a fixed order: azimuthal wedge planes
    /// first, then the equatorial cap, then the sloped cuts of the cubic
    /// groups.
    pub fn from_symmetry(symmetry: &Symmetry) -> SphericalRegion {
        let inventory = Inventory::scan(symmetry.rotation());
        let rows = sector_normals(&inventory);
        debug!(
            "fundamental sector of {} bounded by {} normals",
            symmetry,
            rows.len()
        );
        Self::from_rows(&rows)
    }
}

/// Geometric census of a group's elements, the raw material for sector
/// construction.
struct Inventory {
    order: usize,
    /// Fold count of the proper rotation subgroup about ±z (1 if none).
    z_order: usize,
    has_inversion: bool,
    /// A mirror whose plane is the equator.
    has_sigma_h: bool,
    /// An improper rotation about ±z that is neither the inversion nor a
    /// mirror.
    has_improper_z: bool,
    /// Azimuths of proper twofold axes lying in the equator, mod π.
    diads: Vec<f64>,
    /// Azimuths of vertical mirror normals, mod π.
    verticals: Vec<f64>,
    /// Distinct proper threefold axis lines; exactly four marks a cubic
    /// group.
    threefold_axes: usize,
    /// Canonical axes of all proper non-identity elements.
    proper_axes: Vec<Vector3<f64>>,
}

impl Inventory {
    fn scan(rotation: &Rotation) -> Inventory {
        let mut z_rotors = 0usize;
        let mut has_inversion = false;
        let mut has_sigma_h = false;
        let mut has_improper_z = false;
        let mut diads = Vec::new();
        let mut verticals = Vec::new();
        let mut threefold_keys = std::collections::HashSet::new();
        let mut proper_keys = std::collections::HashSet::new();
        let mut proper_axes = Vec::new();

        for ([w, x, y, z], improper) in rotation.rows() {
            let angle = 2.0 * w.abs().clamp(0.0, 1.0).acos();
            let raw = Vector3::new(x, y, z);
            let axis = if raw.norm() > AXIS_TOLERANCE {
                Some(canonical_axis(raw))
            } else {
                None
            };

            if improper {
                if angle < AXIS_TOLERANCE {
                    has_inversion = true;
                } else if let Some(normal) = axis {
                    if (angle - PI).abs() < AXIS_TOLERANCE {
                        // a mirror about this normal
                        if normal.z.abs() > 1.0 - AXIS_TOLERANCE {
                            has_sigma_h = true;
                        } else if normal.z.abs() < AXIS_TOLERANCE {
                            verticals.push(azimuth_mod_pi(&normal));
                        }
                        // oblique mirrors carry no sector information
                    } else if normal.z.abs() > 1.0 - AXIS_TOLERANCE {
                        has_improper_z = true;
                    }
                }
            } else if let Some(axis) = axis {
                if angle < AXIS_TOLERANCE {
                    continue; // identity
                }
                if axis_key_insert(&mut proper_keys, &axis) {
                    proper_axes.push(axis);
                }
                if axis.z.abs() > 1.0 - AXIS_TOLERANCE {
                    z_rotors += 1;
                }
                if (angle - PI).abs() < AXIS_TOLERANCE && axis.z.abs() < AXIS_TOLERANCE {
                    diads.push(azimuth_mod_pi(&axis));
                }
                if (angle - 2.0 * PI / 3.0).abs() < AXIS_TOLERANCE {
                    axis_key_insert(&mut threefold_keys, &axis);
                }
            }
        }

        Inventory {
            order: rotation.len(),
            z_order: z_rotors + 1,
            has_inversion,
            has_sigma_h,
            has_improper_z,
            diads,
            verticals,
            threefold_axes: threefold_keys.len(),
            proper_axes,
        }
    }

    fn is_cubic(&self) -> bool {
        self.threefold_axes == 4
    }

    fn has_in_plane(&self) -> bool {
        !self.diads.is_empty() || !self.verticals.is_empty()
    }
}

/// Flip an axis so its first significant component is positive, making the
/// two quaternion signs of one rotation agree on an axis line.
fn canonical_axis(v: Vector3<f64>) -> Vector3<f64> {
    let unit = v / v.norm();
    for component in [unit.x, unit.y, unit.z] {
        if component.abs() > AXIS_TOLERANCE {
            return if component < 0.0 { -unit } else { unit };
        }
    }
    unit
}

fn azimuth_mod_pi(axis: &Vector3<f64>) -> f64 {
    let mut azimuth = axis.y.atan2(axis.x) % PI;
    if azimuth < 0.0 {
        azimuth += PI;
    }
    if PI - azimuth < AXIS_TOLERANCE {
        azimuth = 0.0;
    }
    azimuth
}

fn axis_key_insert(
    keys: &mut std::collections::HashSet<(i64, i64, i64)>,
    axis: &Vector3<f64>,
) -> bool {
    keys.insert((round_key(axis.x), round_key(axis.y), round_key(axis.z)))
}

fn inplane(azimuth: f64) -> [f64; 3] {
    [azimuth.cos(), azimuth.sin(), 0.0]
}

/// Whether the azimuthal wedge straddles the +y direction rather than
/// starting at it.
///
/// Groups whose in-plane features are mirror lines through +y (odd
/// principal axes with in-plane elements, lone horizontal mirrors, or
/// vertical mirror sets that avoid the x-axis) take a wedge symmetric
/// about +y; everything else anchors one wedge plane on the x-axis.
fn wedge_is_centered(inventory: &Inventory) -> bool {
    if inventory.has_sigma_h && !inventory.has_in_plane() {
        return true;
    }
    if inventory.z_order >= 3
        && inventory.z_order % 2 == 1
        && (inventory.has_in_plane() || inventory.has_improper_z || inventory.has_sigma_h)
    {
        return true;
    }
    if inventory.verticals.len() >= 2 {
        let through_x = inventory
            .verticals
            .iter()
            .any(|&a| a < AXIS_TOLERANCE || PI - a < AXIS_TOLERANCE);
        return !through_x;
    }
    false
}

/// The sloped boundary planes closing a cubic wedge around its threefold
/// corners.
fn cubic_extras(k: usize, centered: bool) -> Vec<[f64; 3]> {
    const H: f64 = FRAC_1_SQRT_2;
    match (k, centered) {
        (2, _) => vec![[H, 0.0, H], [0.0, H, H], [0.0, -H, H]],
        (4, false) => vec![[H, 0.0, H], [0.0, -H, H]],
        (4, true) => vec![[0.0, -H, H]],
        (8, _) => vec![[0.0, -H, H]],
        _ => Vec::new(),
    }
}

fn sector_normals(inventory: &Inventory) -> Vec<[f64; 3]> {
    // 1. Trivial and order-2 groups with a unique defining axis
    if inventory.order <= 1 {
        return Vec::new();
    }
    if inventory.order == 2 {
        if inventory.has_inversion {
            return vec![[0.0, 0.0, 1.0]];
        }
        if let [axis] = inventory.proper_axes.as_slice() {
            return vec![[axis.x, axis.y, axis.z]];
        }
        // a lone mirror continues into the wedge construction
    }

    // 2. Wedge count: the sphere divides into k congruent sectors
    let cubic = inventory.is_cubic();
    let cap = !cubic && (inventory.z_order == 2 || inventory.has_inversion);
    let k = if cubic {
        inventory.order / 6
    } else if cap {
        inventory.order / 2
    } else {
        inventory.order
    };
    let centered = wedge_is_centered(inventory);

    // 3. Wedge planes, then cap, then cubic corner cuts
    let mut rows = Vec::new();
    if k >= 2 {
        let width = 2.0 * PI / k as f64;
        let (first, second) = if centered {
            (PI - 0.5 * width, 0.5 * width)
        } else {
            (PI, width)
        };
        rows.push(inplane(first));
        if k > 2 {
            rows.push(inplane(second));
        }
    }
    if cap {
        rows.push([0.0, 0.0, 1.0]);
    }
    if cubic {
        rows.extend(cubic_extras(k, centered));
    }
    rows
}
