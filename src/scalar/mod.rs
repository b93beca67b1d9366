// Scalar module: broadcast arithmetic over n-dimensional f64 data
// This module provides the shape machinery the geometric types build on

// ======================== MODULE DECLARATIONS ========================
pub mod broadcast;
pub mod scalar;


// ======================== BROADCAST MACHINERY ========================
pub use broadcast::{
    broadcast_shape, // fn(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> - common shape under trailing-axis alignment
    broadcast_pair,  // fn(lhs: &ArrayD<f64>, rhs: &ArrayD<f64>) -> Result<(ArrayViewD, ArrayViewD)> - both operands viewed at the common shape
    broadcast_to,    // fn(data: &ArrayD<A>, shape: &[usize]) -> Result<ArrayD<A>> - materialized copy at a target shape
    zip_map,         // fn(lhs, rhs, f: Fn(f64, f64) -> f64) -> Result<ArrayD<f64>> - elementwise combine after broadcasting
    zip_compare,     // fn(lhs, rhs, f: Fn(f64, f64) -> bool) -> Result<ArrayD<bool>> - elementwise predicate after broadcasting
    zip_bool,        // fn(lhs, rhs, f: Fn(bool, bool) -> bool) -> Result<ArrayD<bool>> - boolean combine after broadcasting
};

// ======================== SCALAR CONTAINER ========================
pub use scalar::Scalar; // struct - n-dimensional f64 data with broadcast arithmetic
// Scalar impl methods:
//   from_array(data: ArrayD<f64>) -> Self            - wraps an existing array
//   from_value(value: f64) -> Self                   - 0-d scalar
//   from_vec(values: Vec<f64>) -> Self               - 1-d scalar
//   from_slice(values: &[f64]) -> Self               - 1-d scalar copied from a slice
//   data(&self) -> &ArrayD<f64>                      - underlying array
//   shape(&self) -> &[usize]                         - shape (empty for 0-d)
//   ndim(&self) -> usize                             - number of axes
//   size(&self) -> usize                             - element count
//   get(&self, index: &[usize]) -> Result<f64>       - single element by full index
//   checked_add/_sub/_mul/_pow(&self, rhs: &Scalar) -> Result<Scalar> - broadcasting arithmetic
//   powf(&self, exp: f64) -> Scalar                  - elementwise power by a plain exponent
//   lt/le/gt/ge/eq_elem(&self, rhs: &Scalar) -> Result<ArrayD<bool>> - broadcasting comparisons
//   reshape(&self, shape: &[usize]) -> Result<Scalar> - same data, new shape
//   flatten(&self) -> Scalar                         - collapse to one axis
//   unique(&self) -> Scalar                          - distinct values, first-occurrence order
