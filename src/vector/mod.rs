// Vector module: broadcast collections of 3-d cartesian vectors
// This module provides vector algebra and spherical-region containment tests

// ======================== MODULE DECLARATIONS ========================
pub mod spherical_region;
pub mod vector3d;

mod _tests_vector3d;

// ======================== 3-D VECTOR COLLECTIONS ========================
pub use vector3d::Vector3d; // struct - vectors on a trailing axis of 3, any leading shape
// Vector3d impl methods:
//   new(data: ArrayD<f64>) -> Result<Self>            - wraps data, trailing axis must be 3
//   single(x: f64, y: f64, z: f64) -> Self            - one vector, empty leading shape
//   from_rows(rows: &[[f64; 3]]) -> Self              - 1-d collection from explicit rows
//   zero(shape: &[usize]) -> Self                     - zero vectors of a leading shape
//   xvector()/yvector()/zvector() -> Self             - cartesian basis vectors
//   data(&self) -> &ArrayD<f64>                       - underlying array (leading shape + [3])
//   shape(&self)/ndim(&self)/len(&self)/is_empty(&self) - leading-shape accessors
//   x(&self)/y(&self)/z(&self) -> Scalar              - one component over the leading shape
//   get(&self, index: &[usize]) -> Result<Vector3d>   - single vector by full leading index
//   checked_add/_sub(&self, rhs: &Vector3d) -> Result<Vector3d> - broadcasting arithmetic
//   checked_scale(&self, factor: &Scalar) -> Result<Vector3d> - elementwise scaling
//   dot(&self, rhs: &Vector3d) -> Result<Scalar>      - broadcasting inner product
//   dot_outer(&self, rhs: &Vector3d) -> Scalar        - all-pairs inner products
//   cross(&self, rhs: &Vector3d) -> Result<Vector3d>  - broadcasting cross product
//   norm(&self) -> Scalar                             - euclidean lengths
//   unit(&self) -> Vector3d                           - normalized copies (zeros stay zero)
//   angle_with(&self, rhs: &Vector3d) -> Result<Scalar> - interior angles in [0, π]
//   from_polar(theta: &Scalar, phi: &Scalar, r: f64) -> Result<Vector3d> - spherical coordinates
//   rotate(&self, rotation: &Rotation) -> Result<Vector3d> - transform by rotations
//   rotate_about_z(&self, angle: f64) -> Vector3d     - convenience rotation about +z
//   reshape(&self, shape: &[usize]) -> Result<Vector3d> - new leading shape, same count
//   flatten(&self) -> Vector3d                        - collapse leading shape to one axis
//   unique(&self) -> Vector3d                         - distinct vectors, first-occurrence order

// ======================== SPHERICAL REGIONS ========================
pub use spherical_region::SphericalRegion; // struct - sphere patch cut by half-space normals
// SphericalRegion impl methods:
//   new(normals: Vector3d) -> Self                    - bound by normals (flattened)
//   from_rows(rows: &[[f64; 3]]) -> Self              - bound by explicit normal rows
//   normals(&self) -> &Vector3d                       - the bounding normals
//   len(&self)/is_empty(&self)                        - number of half-spaces
//   contains(&self, vectors: &Vector3d) -> ArrayD<bool> - per-vector containment
//   contains_point(&self, x: f64, y: f64, z: f64) -> bool - single-point containment
//   from_symmetry(symmetry: &Symmetry) -> SphericalRegion - fundamental sector of a point group
