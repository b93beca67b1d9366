// Quaternion module: rotation algebra and crystallographic point groups
// This module provides unit-quaternion collections, proper/improper rotations,
// group closure from generators and the named point-group registry

// ======================== MODULE DECLARATIONS ========================
pub mod point_groups;
pub mod quaternion;
pub mod rotation;
pub mod symmetry;

mod _tests_rotation;

// ======================== QUATERNION ALGEBRA ========================
pub use quaternion::Quaternion; // struct - quaternions on a trailing axis of 4 (w, x, y, z)
// Quaternion impl methods:
//   new(data: ArrayD<f64>) -> Result<Self>            - wraps data, trailing axis must be 4
//   single(w: f64, x: f64, y: f64, z: f64) -> Self    - one quaternion, empty leading shape
//   from_rows(rows: &[[f64; 4]]) -> Self              - 1-d collection from explicit rows
//   identity() -> Self                                - the unit quaternion (1, 0, 0, 0)
//   data(&self) -> &ArrayD<f64>                       - underlying array (leading shape + [4])
//   shape(&self)/ndim(&self)/len(&self)/is_empty(&self) - leading-shape accessors
//   w(&self)/x(&self)/y(&self)/z(&self) -> Scalar     - one component over the leading shape
//   get(&self, index: &[usize]) -> Result<Quaternion> - single quaternion by full leading index
//   conj(&self) -> Quaternion                         - negated vector parts
//   norm(&self) -> Scalar                             - euclidean norms
//   unit(&self) -> Quaternion                         - normalized copies (zeros stay zero)
//   inverse(&self) -> Quaternion                      - conj / squared norm
//   dot(&self, rhs: &Quaternion) -> Result<Scalar>    - broadcasting 4-component inner product
//   compose(&self, rhs: &Quaternion) -> Result<Quaternion> - broadcasting Hamilton product

// ======================== ROTATIONS ========================
pub use rotation::Rotation; // struct - unit quaternions plus a per-element improper flag
// Rotation impl methods:
//   new(data: ArrayD<f64>, improper: ArrayD<bool>) -> Result<Self> - wraps and normalizes
//   from_quaternion(quaternion: &Quaternion) -> Self  - all-proper rotations
//   single(w: f64, x: f64, y: f64, z: f64, improper: bool) -> Self - one rotation
//   from_rows(rows: &[([f64; 4], bool)]) -> Self      - 1-d collection from explicit rows
//   identity() -> Self                                - the identity rotation
//   from_axes_angles(axes: &Vector3d, angles: &Scalar) -> Result<Self> - axis-angle build
//   data(&self)/improper(&self)/quaternion(&self)     - raw parts
//   shape(&self)/ndim(&self)/len(&self)/is_empty(&self) - leading-shape accessors
//   get(&self, index: &[usize]) -> Result<Rotation>   - single rotation by full leading index
//   compose(&self, rhs: &Rotation) -> Result<Rotation> - broadcasting composition, flags xor
//   outer(&self, rhs: &Rotation) -> Rotation          - all-pairs composition, flattened
//   inverse(&self) -> Rotation                        - conjugate quaternion, flags kept
//   apply(&self, vectors: &Vector3d) -> Result<Vector3d> - transform vectors, improper negates
//   differentiators(&self) -> Vec<([i64; 4], bool)>   - sign-normalized rounded element keys
//   unique(&self) -> Rotation                         - distinct rotations, first occurrence
//   angle(&self) -> Scalar                            - rotation angles in [0, π]
//   axis(&self) -> Vector3d                           - unit axes, +z for the identity
//   reshape(&self, shape: &[usize]) -> Result<Rotation> - new leading shape, same count
//   flatten(&self) -> Rotation                        - collapse leading shape to one axis

// ======================== POINT-GROUP SYMMETRY ========================
pub use symmetry::Symmetry; // struct - a closed finite rotation group with an optional name
// Symmetry impl methods:
//   new(rotation: Rotation) -> Self                   - wraps an element set (flattened, taken as given)
//   with_name(self, name: &str) -> Self               - attach an international symbol
//   from_generators(generators: &[&Rotation]) -> Result<Symmetry> - close under composition
//   from_symbol(symbol: &str) -> Result<&'static Symmetry> - registry lookup
//   name(&self) -> &str                               - international symbol (may be empty)
//   rotation(&self) -> &Rotation                      - the element set
//   order(&self) -> usize                             - number of elements
//   is_proper(&self) -> bool                          - no improper elements
//   subgroups(&self) -> Vec<&'static Symmetry>        - registered groups contained in this one
//   proper_subgroups(&self) -> Vec<&'static Symmetry> - the proper ones among those
//   proper_subgroup(&self) -> Option<&'static Symmetry> - largest proper registered subgroup
//   contains_inversion(&self) -> bool                 - whether -1 is an element
//   proper_inversion_subgroup(&self) -> Result<&'static Symmetry> - proper subgroup after adjoining -1
//   intersection(&self, rhs: &Symmetry) -> Result<Symmetry> - group on the shared elements
//   fundamental_sector(&self) -> SphericalRegion      - orbit-representative region of directions

// ======================== NAMED POINT GROUPS ========================
pub use point_groups::{
    // === registry ===
    ALIASES,       // Vec<&Symmetry> - primary-axis aliases accepted by from_symbol ('2', 'm')
    GROUPS,        // Vec<&Symmetry> - the 32 crystallographic groups plus axis variants, by system
    PROPER_GROUPS, // Vec<&Symmetry> - the 11 purely rotational groups
    // === triclinic ===
    C1, // 1
    CI, // -1
    // === monoclinic ===
    C2, C2X, C2Y, C2Z,    // 2 about z (alias '2'), x, y, z ('211', '121', '112')
    CS, CSX, CSY, CSZ,    // m normal to z (alias 'm'), x, y, z ('m11', '1m1', '11m')
    C2H, // 2/m
    // === orthorhombic ===
    C2V, // mm2
    D2,  // 222
    D2H, // mmm
    // === tetragonal ===
    C4, C4X, C4Y, // 4 about z, x, y (x and y variants unnamed)
    C4H, // 4/m
    C4V, // 4mm
    D2D, // -42m
    D4,  // 422
    D4H, // 4/mmm
    S4,  // -4
    // === trigonal ===
    C3, C3X, C3Y, // 3 about z, x, y (x and y variants unnamed)
    C3V, // 3m
    D3,  // 32
    D3D, // -3m
    S6,  // -3
    // === hexagonal ===
    C3H, // -6
    C6,  // 6
    C6H, // 6/m
    C6V, // 6mm
    D3H, // -6m2
    D6,  // 622
    D6H, // 6/mmm
    // === cubic ===
    O,  // 432
    OH, // m-3m
    T,  // 23
    TD, // -43m
    TH, // m-3
};
