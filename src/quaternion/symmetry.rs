use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::MAX_POINT_GROUP_ORDER;
use crate::error::Error;
use crate::quaternion::point_groups::{ALIASES, CI, GROUPS};
use crate::quaternion::rotation::Rotation;
use crate::vector::spherical_region::SphericalRegion;
use crate::Result;

/// The set of orientations comprising a point group.
///
/// The elements are stored flat. A mirror is an improper twofold rotation
/// about the mirror normal; the inversion is the improper identity. The
/// named crystallographic groups live in [`crate::quaternion::point_groups`]
/// and can be looked up by Hermann-Mauguin symbol with
/// [`Symmetry::from_symbol`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symmetry {
    rotation: Rotation,
    name: String,
}

impl Symmetry {
    /// Wrap a complete element set. The elements are taken as given;
    /// use [`Symmetry::from_generators`] to close a partial set.
    pub fn new(rotation: Rotation) -> Self {
        Self {
            rotation: rotation.flatten(),
            name: String::new(),
        }
    }

    /// Attach a Hermann-Mauguin symbol.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Close a set of generating transformations into a full group.
    ///
    /// Starts from the identity together with every generator element,
    /// then composes the set with itself until it stops growing. A set
    /// that is still growing past [`MAX_POINT_GROUP_ORDER`] elements
    /// cannot be a point group and is rejected, which catches generators
    /// at irrational angles that would otherwise never stabilize.
    pub fn from_generators(generators: &[&Rotation]) -> Result<Symmetry> {
        let mut rows = Rotation::identity().rows();
        for generator in generators {
            rows.extend(generator.rows());
        }
        let mut group = Rotation::from_rows(&rows).unique();

        let mut size = 0;
        let mut size_new = group.len();
        while size_new != size {
            if size_new > MAX_POINT_GROUP_ORDER {
                warn!(
                    "group closure reached {} elements, past the point-group cap of {}",
                    size_new, MAX_POINT_GROUP_ORDER
                );
                return Err(Error::DegenerateGenerators {
                    max: MAX_POINT_GROUP_ORDER,
                });
            }
            size = size_new;
            group = group.outer(&group).unique();
            size_new = group.len();
            debug!("closure pass: {} -> {} elements", size, size_new);
        }
        Ok(Symmetry {
            rotation: group,
            name: String::new(),
        })
    }

    /// Look up a named group by Hermann-Mauguin symbol, e.g. `"m-3m"`.
    pub fn from_symbol(symbol: &str) -> Result<&'static Symmetry> {
        GROUPS
            .iter()
            .chain(ALIASES.iter())
            .find(|g| g.name() == symbol)
            .copied()
            .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))
    }

    /// The Hermann-Mauguin symbol, empty for ad-hoc groups.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element set.
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Number of elements in the group.
    pub fn order(&self) -> usize {
        self.rotation.len()
    }

    /// True when the group contains no mirrors, rotoinversions, or the
    /// inversion.
    pub fn is_proper(&self) -> bool {
        !self.rotation.improper().iter().any(|&flag| flag)
    }

    /// The canonical fingerprints of the elements as a set.
    fn tuples(&self) -> HashSet<([i64; 4], bool)> {
        self.rotation.differentiators().into_iter().collect()
    }

    /// The named groups that are subgroups of this group.
    pub fn subgroups(&self) -> Vec<&'static Symmetry> {
        let mine = self.tuples();
        GROUPS
            .iter()
            .filter(|g| g.tuples().is_subset(&mine))
            .copied()
            .collect()
    }

    /// The named proper groups that are subgroups of this group.
    pub fn proper_subgroups(&self) -> Vec<&'static Symmetry> {
        self.subgroups()
            .into_iter()
            .filter(|g| g.is_proper())
            .collect()
    }

    /// The largest proper subgroup. Every group has one, since the
    /// identity group is a subgroup of everything; `None` only for an
    /// empty element set.
    pub fn proper_subgroup(&self) -> Option<&'static Symmetry> {
        self.proper_subgroups()
            .into_iter()
            .max_by_key(|g| g.order())
    }

    /// True when the inversion is one of the elements (the Laue groups).
    pub fn contains_inversion(&self) -> bool {
        CI.tuples().is_subset(&self.tuples())
    }

    /// The largest proper subgroup of this group extended by the
    /// inversion.
    pub fn proper_inversion_subgroup(&self) -> Result<&'static Symmetry> {
        let with_inversion = Symmetry::from_generators(&[&self.rotation, CI.rotation()])?;
        Ok(with_inversion
            .proper_subgroup()
            .expect("every group closure contains the identity subgroup"))
    }

    /// The group formed by the elements common to both groups.
    ///
    /// Shared elements are matched by canonical fingerprint and the result
    /// is re-closed, so rounding drift between the two element lists
    /// cannot produce a non-group.
    pub fn intersection(&self, other: &Symmetry) -> Result<Symmetry> {
        let theirs = other.tuples();
        let shared: HashSet<([i64; 4], bool)> = self
            .tuples()
            .intersection(&theirs)
            .copied()
            .collect();
        let indices: Vec<usize> = self
            .rotation
            .differentiators()
            .into_iter()
            .enumerate()
            .filter(|(_, d)| shared.contains(d))
            .map(|(i, _)| i)
            .collect();
        let common = self.rotation.select(&indices);
        Self::from_generators(&[&common])
    }

    /// The fundamental sector of this group on the sphere.
    pub fn fundamental_sector(&self) -> SphericalRegion {
        SphericalRegion::from_symmetry(self)
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "point group of order {}", self.order())
        } else {
            write!(f, "{} (order {})", self.name, self.order())
        }
    }
}
